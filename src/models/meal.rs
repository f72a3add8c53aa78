use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A meal recorded under a session.
///
/// `created_at` is fixed at insertion and is the only ordering key used for
/// streaks; `updated_at` moves on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meal {
    pub fn new(
        session_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        is_on_diet: bool,
    ) -> Self {
        let now = super::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            is_on_diet,
            session_id: session_id.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.is_on_diet { "on diet" } else { "off diet" };
        writeln!(f, "{} ({})", self.name, tag)?;
        writeln!(f, "  ID: {}", self.id)?;
        writeln!(f, "  Recorded: {}", self.created_at.format("%Y-%m-%d %H:%M"))?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        Ok(())
    }
}

/// Partial update of a meal. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_on_diet: Option<bool>,
}

impl MealChanges {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_on_diet(mut self, is_on_diet: bool) -> Self {
        self.is_on_diet = Some(is_on_diet);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_on_diet.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_new() {
        let meal = Meal::new("session-1", "Salad", "Greens and olive oil", true);

        assert_eq!(meal.session_id, "session-1");
        assert_eq!(meal.name, "Salad");
        assert_eq!(meal.description, "Greens and olive oil");
        assert!(meal.is_on_diet);
        assert_eq!(meal.created_at, meal.updated_at);
    }

    #[test]
    fn test_meal_display() {
        let meal = Meal::new("session-1", "Burger", "Double cheese", false);

        let output = format!("{}", meal);
        assert!(output.contains("Burger"));
        assert!(output.contains("off diet"));
        assert!(output.contains("Double cheese"));
    }

    #[test]
    fn test_meal_json_uses_column_names() {
        let meal = Meal::new("session-1", "Salad", "", true);

        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["is_on_diet"], true);
        assert_eq!(json["session_id"], "session-1");
        assert!(json.get("created_at").is_some());
    }

    #[test]
    fn test_changes_builder() {
        let changes = MealChanges::default();
        assert!(changes.is_empty());

        let changes = changes.with_name("Soup").with_on_diet(false);
        assert!(!changes.is_empty());
        assert_eq!(changes.name.as_deref(), Some("Soup"));
        assert!(changes.description.is_none());
        assert_eq!(changes.is_on_diet, Some(false));
    }
}
