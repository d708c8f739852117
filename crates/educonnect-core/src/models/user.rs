//! User model

use serde::{Deserialize, Serialize};

/// A registered user.
///
/// The username doubles as the primary identifier; there is no surrogate key.
/// Users are immutable after registration and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Globally unique username
    pub username: String,
    /// Grade/level classifier, opaque to the core logic
    pub standard: i64,
}

impl User {
    /// Create a new user record
    #[must_use]
    pub fn new(username: impl Into<String>, standard: i64) -> Self {
        Self {
            username: username.into(),
            standard,
        }
    }
}
