use serde::{Deserialize, Serialize};

/// Adherence statistics for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub registered_meals: u64,
    pub registered_meals_on_diet: u64,
    pub registered_meals_off_diet: u64,
    /// Longest run of consecutive on-diet meals in creation order.
    pub best_diet_streak: u64,
}

impl Metrics {
    /// Folds a session's history, oldest first, in a single pass.
    pub fn from_history<I>(history: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut metrics = Self::default();
        let mut current = 0u64;

        for is_on_diet in history {
            metrics.registered_meals += 1;
            if is_on_diet {
                metrics.registered_meals_on_diet += 1;
                current += 1;
                metrics.best_diet_streak = metrics.best_diet_streak.max(current);
            } else {
                metrics.registered_meals_off_diet += 1;
                current = 0;
            }
        }

        metrics
    }
}
