//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A unique identifier for a note.
///
/// Ids are assigned by the database (AUTOINCREMENT) so they are monotonic
/// and never reused, even after the row they belonged to is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw database id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value of this id
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for NoteId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A shared note: metadata plus a reference to an uploaded file.
///
/// The `file_name` points into the blob store but carries no lifetime
/// guarantee; the backing file may go missing without invalidating the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Note title
    pub title: String,
    /// School subject the note covers
    pub subject: String,
    /// Name of the uploaded file in the blob store
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Username of the uploader (trust-on-claim, not authenticated)
    pub author: String,
    /// Creation timestamp (Unix ms), the sole sort key for listings
    pub created_at: i64,
}
