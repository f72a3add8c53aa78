//! Daily Diet admin CLI
//!
//! Inspects the server's database directly.
//!
//! # Usage
//!
//! ```bash
//! daily-diet-admin user list
//! daily-diet-admin user list --session 3f0c...
//! daily-diet-admin meal list --session 3f0c...
//! daily-diet-admin metrics --session 3f0c... --format json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use daily_diet::config::Config;
use daily_diet::db::{init_db, MealRepository, UserRepository};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "daily-diet-admin")]
#[command(version)]
#[command(about = "Daily Diet administration tool")]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect users
    User(UserCommand),
    /// Inspect meals
    Meal(MealCommand),
    /// Show adherence metrics for a session
    Metrics {
        /// Session token
        #[arg(long, short)]
        session: String,
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand)]
enum UserSubcommand {
    /// List users, optionally only those of one session
    List {
        #[arg(long, short)]
        session: Option<String>,
    },
}

#[derive(Args)]
struct MealCommand {
    #[command(subcommand)]
    command: MealSubcommand,
}

#[derive(Subcommand)]
enum MealSubcommand {
    /// List a session's meals in the order they were recorded
    List {
        #[arg(long, short)]
        session: String,
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

// ============================================================================
// Commands
// ============================================================================

async fn list_users(
    repo: &UserRepository,
    session: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let users = match session {
        Some(session) => repo.list_by_session(&session).await?,
        None => repo.list().await?,
    };

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!("{:<38} {:<38} {:<20}", "ID", "SESSION", "NAME");
    println!("{}", "-".repeat(96));

    for user in &users {
        println!("{:<38} {:<38} {:<20}", user.id, user.session_id, user.name);
    }

    println!();
    println!("Total: {} user(s)", users.len());

    Ok(())
}

async fn list_meals(
    repo: &MealRepository,
    session: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let meals = repo.list(session).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&meals)?),
        OutputFormat::Text => {
            if meals.is_empty() {
                println!("No meals recorded for this session.");
            }
            for meal in &meals {
                println!("{}", meal);
            }
        }
    }

    Ok(())
}

async fn show_metrics(
    repo: &MealRepository,
    session: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = repo.metrics(session).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&metrics)?),
        OutputFormat::Text => {
            println!("Meals recorded:   {}", metrics.registered_meals);
            println!("  on diet:        {}", metrics.registered_meals_on_diet);
            println!("  off diet:       {}", metrics.registered_meals_off_diet);
            println!("Best diet streak: {}", metrics.best_diet_streak);
        }
    }

    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_diet=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.config)?;
    let pool = init_db(&config.database_path).await?;

    match cli.command {
        Commands::User(cmd) => match cmd.command {
            UserSubcommand::List { session } => {
                list_users(&UserRepository::new(pool), session).await
            }
        },
        Commands::Meal(cmd) => match cmd.command {
            MealSubcommand::List { session, format } => {
                list_meals(&MealRepository::new(pool), &session, format).await
            }
        },
        Commands::Metrics { session, format } => {
            show_metrics(&MealRepository::new(pool), &session, format).await
        }
    }
}
