//! User repository

use crate::error::{Error, Result};
use crate::models::User;
use libsql::{params, Connection};

/// `SQLite` storage for user rows
pub struct UserRepository<'a> {
    conn: &'a Connection,
}

impl<'a> UserRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new user
    ///
    /// Uniqueness is enforced by the primary key; a constraint violation
    /// surfaces as `UsernameTaken` without inspecting the store's message
    /// any further.
    pub async fn insert(&self, username: &str, standard: i64) -> Result<User> {
        let result = self
            .conn
            .execute(
                "INSERT INTO users (username, standard) VALUES (?1, ?2)",
                params![username, standard],
            )
            .await;

        match result {
            Ok(_) => Ok(User::new(username, standard)),
            Err(e) if is_unique_violation(&e) => Err(Error::UsernameTaken(username.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a user by username
    pub async fn get(&self, username: &str) -> Result<Option<User>> {
        let mut rows = self
            .conn
            .query(
                "SELECT username, standard FROM users WHERE username = ?1",
                params![username],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(User {
                username: row.get(0)?,
                standard: row.get(1)?,
            })),
            None => Ok(None),
        }
    }
}

fn is_unique_violation(error: &libsql::Error) -> bool {
    error.to_string().contains("UNIQUE constraint failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_insert_and_get() {
        let db = setup().await;
        let repo = UserRepository::new(db.connection());

        let user = repo.insert("anita", 9).await.unwrap();
        assert_eq!(user.username, "anita");
        assert_eq!(user.standard, 9);

        let fetched = repo.get("anita").await.unwrap().unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_duplicate_username_rejected() {
        let db = setup().await;
        let repo = UserRepository::new(db.connection());

        repo.insert("anita", 9).await.unwrap();
        let err = repo.insert("anita", 11).await.unwrap_err();
        assert!(matches!(err, Error::UsernameTaken(name) if name == "anita"));

        // First registration is untouched
        let user = repo.get("anita").await.unwrap().unwrap();
        assert_eq!(user.standard, 9);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_unknown_user() {
        let db = setup().await;
        let repo = UserRepository::new(db.connection());

        assert!(repo.get("nobody").await.unwrap().is_none());
    }
}
