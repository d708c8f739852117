//! Note repository

use crate::error::{Error, Result};
use crate::models::{Note, NoteId};
use libsql::{params, Connection};

/// `SQLite` storage for note rows
pub struct NoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> NoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new note, assigning its id and creation timestamp
    pub async fn insert(
        &self,
        title: &str,
        subject: &str,
        file_name: &str,
        author: &str,
    ) -> Result<Note> {
        let created_at = chrono::Utc::now().timestamp_millis();

        self.conn
            .execute(
                "INSERT INTO notes (title, subject, file_name, author, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![title, subject, file_name, author, created_at],
            )
            .await?;

        let id = NoteId::new(self.conn.last_insert_rowid());
        self.get(id)
            .await?
            .ok_or_else(|| Error::Database(format!("inserted note {id} not readable back")))
    }

    /// Fetch a note by id
    pub async fn get(&self, id: NoteId) -> Result<Option<Note>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, subject, file_name, author, created_at
                 FROM notes WHERE id = ?1",
                params![id.as_i64()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(parse_note(&row)?)),
            None => Ok(None),
        }
    }

    /// List all notes, newest first
    ///
    /// Ties on `created_at` keep insertion order, so the listing is stable.
    pub async fn list(&self) -> Result<Vec<Note>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, subject, file_name, author, created_at
                 FROM notes
                 ORDER BY created_at DESC, id ASC",
                (),
            )
            .await?;

        let mut notes = Vec::new();
        while let Some(row) = rows.next().await? {
            notes.push(parse_note(&row)?);
        }

        Ok(notes)
    }

    /// Delete a note row by id
    ///
    /// Fails with `NoteNotFound` when the id is absent, so callers can tell
    /// a no-op apart from a successful removal.
    pub async fn delete(&self, id: NoteId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id.as_i64()])
            .await?;

        if rows == 0 {
            return Err(Error::NoteNotFound(id));
        }

        Ok(())
    }
}

/// Parse a note from a database row
fn parse_note(row: &libsql::Row) -> Result<Note> {
    Ok(Note {
        id: NoteId::new(row.get::<i64>(0)?),
        title: row.get(1)?,
        subject: row.get(2)?,
        file_name: row.get(3)?,
        author: row.get(4)?,
        created_at: row.get(5)?,
    })
}
