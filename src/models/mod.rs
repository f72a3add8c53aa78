mod meal;
mod metrics;
mod user;

pub use meal::{Meal, MealChanges};
pub use metrics::Metrics;
pub use user::User;

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the precision the store keeps (microseconds), so a record
/// built in memory compares equal to the same record read back.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
