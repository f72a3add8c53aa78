//! HTTP surface of the diet tracker.

pub mod error;
pub mod extract;
pub mod routes;
pub mod session;

pub use error::AppError;
pub use routes::build_router;
pub use session::{ResolvedSession, Session, SESSION_COOKIE};

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::{MealRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub meals: MealRepository,
    pub cookie_max_age_secs: u64,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            meals: MealRepository::new(pool),
            cookie_max_age_secs: config.cookie_max_age_secs(),
        }
    }
}
