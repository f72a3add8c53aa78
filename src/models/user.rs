use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user and the session token their requests carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, session_id: impl Into<String>) -> Self {
        let now = super::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            session_id: session_id.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new() {
        let user = User::new("Alice", "session-1");

        assert_eq!(user.name, "Alice");
        assert_eq!(user.session_id, "session-1");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_users_get_distinct_ids() {
        let a = User::new("Alice", "session-1");
        let b = User::new("Alice", "session-1");

        assert_ne!(a.id, b.id);
    }
}
