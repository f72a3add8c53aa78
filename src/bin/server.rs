//! Daily Diet server
//!
//! # Configuration
//!
//! Environment variables:
//! - `DAILY_DIET_PORT`: Port to listen on (default: 3333)
//! - `DAILY_DIET_DATABASE_PATH`: SQLite database file (default: ~/.local/share/daily-diet/daily-diet.db)
//! - `DAILY_DIET_COOKIE_MAX_AGE_DAYS`: Session cookie lifetime (default: 7)
//! - `DAILY_DIET_CONFIG`: Path to config file (default: ~/.config/daily-diet/config.yaml)
//!
//! # Config File Format
//!
//! ```yaml
//! port: 3333
//! database_path: /var/lib/daily-diet/daily-diet.db
//! cookie_max_age_days: 7
//! ```

use daily_diet::config::Config;
use daily_diet::db::init_db;
use daily_diet::server::{build_router, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_diet=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(None)?;

    tracing::info!("Database: {}", config.database_path.display());
    let pool = init_db(&config.database_path).await?;

    let app = build_router(AppState::new(pool, &config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
