//! User and role models
//!
//! A user account for the monitoring platform. The user's role is embedded
//! in the record (denormalized at export time); the role reference is not
//! re-validated when a record set is exported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An access role assigned to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier
    pub id: i64,

    /// Role name (e.g., "Administrator", "Operator")
    pub name: String,

    /// Human-readable description of what the role permits
    pub description: String,
}

/// A platform user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,

    /// Login name, unique across the platform
    pub username: String,

    /// Contact email address
    pub email: String,

    /// Hashed login credential; never stored in the clear
    pub password_hash: String,

    /// Whether the account can currently log in
    pub is_active: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the user last logged in, if ever
    pub last_login_at: Option<DateTime<Utc>>,

    /// The user's access role
    pub role: Role,
}

impl User {
    /// Create a new active user account
    pub fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_role() -> Role {
        Role {
            id: 1,
            name: "Administrator".to_string(),
            description: "Full platform access".to_string(),
        }
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(1, "kai", "kai@example.com", "hash", admin_role());

        assert!(user.is_active);
        assert!(user.last_login_at.is_none());
        assert_eq!(user.role.name, "Administrator");
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut user = User::new(2, "robin", "robin@example.com", "hash", admin_role());
        user.last_login_at = Some(Utc::now());

        let json = serde_json::to_string(&user).unwrap();
        let decoded: User = serde_json::from_str(&json).unwrap();

        assert_eq!(user, decoded);
    }

    #[test]
    fn test_none_timestamp_round_trip() {
        let user = User::new(3, "alex", "alex@example.com", "hash", admin_role());

        let json = serde_json::to_string(&user).unwrap();
        let decoded: User = serde_json::from_str(&json).unwrap();

        assert!(decoded.last_login_at.is_none());
        assert_eq!(user, decoded);
    }
}
