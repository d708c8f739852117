//! User registration service

use std::sync::Arc;

use crate::db::{Database, UserRepository};
use crate::error::{Error, Result};
use crate::models::User;

/// Registers users and enforces username uniqueness.
///
/// Users have no update or delete path; a profile created here is immutable.
#[derive(Clone)]
pub struct UserService {
    db: Arc<Database>,
}

impl UserService {
    /// Create a service backed by the given database handle
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new user
    ///
    /// Uniqueness is delegated to the storage layer; any constraint
    /// violation comes back as `UsernameTaken`.
    pub async fn register(&self, username: &str, standard: i64) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::InvalidInput("username is required".to_string()));
        }

        let repo = UserRepository::new(self.db.connection());
        let user = repo.insert(username, standard).await?;
        tracing::info!(username = %user.username, standard = user.standard, "Registered user");
        Ok(user)
    }

    /// Look up a registered user by username
    pub async fn get(&self, username: &str) -> Result<Option<User>> {
        let repo = UserRepository::new(self.db.connection());
        repo.get(username).await
    }
}
