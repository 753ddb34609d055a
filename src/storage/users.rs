//! User repository for JSON storage
//!
//! Manages the users.json record file. Every call opens the file, performs
//! one operation, and releases it; nothing is cached between calls.

use std::path::PathBuf;

use crate::error::{EnvmonError, EnvmonResult};
use crate::models::User;

use super::file_io::{read_json, write_json_atomic};

/// Serializable user record file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
#[derive(Debug, Clone)]
pub struct UserRepository {
    path: PathBuf,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get all users in insertion order
    pub fn get_all(&self) -> EnvmonResult<Vec<User>> {
        let data: UserData = read_json(&self.path)?;
        Ok(data.users)
    }

    /// Insert a user, keeping its id
    ///
    /// Fails with a conflict error if a user with the same id already
    /// exists. There are no upsert semantics.
    pub fn insert(&self, user: User) -> EnvmonResult<()> {
        let mut data: UserData = read_json(&self.path)?;

        if data.users.iter().any(|u| u.id == user.id) {
            return Err(EnvmonError::conflict("User", user.id));
        }

        data.users.push(user);
        write_json_atomic(&self.path, &data)
    }

    /// Number of stored users
    pub fn count(&self) -> EnvmonResult<usize> {
        Ok(self.get_all()?.len())
    }
}
