//! Note lifecycle service
//!
//! Coordinates the note catalog (database rows) with the blob store holding
//! the uploaded files. The two stores share no transaction; create and
//! delete are each a fixed two-step sequence with a defined ordering.

use std::sync::Arc;

use crate::blobstore::BlobStore;
use crate::db::{Database, NoteRepository};
use crate::error::{Error, Result};
use crate::models::{Note, NoteId};

/// Owns the lifecycle of notes: create on upload, list, delete.
#[derive(Clone)]
pub struct NoteService {
    db: Arc<Database>,
    blobs: Arc<BlobStore>,
}

impl NoteService {
    /// Create a service backed by the given database and blob store handles
    pub fn new(db: Arc<Database>, blobs: Arc<BlobStore>) -> Self {
        Self { db, blobs }
    }

    /// Create a note from an upload
    ///
    /// The file is written to the blob store under its original name before
    /// the catalog row is inserted, so a failed write never leaves a row
    /// pointing at nothing. The reverse is not guaranteed: a row insert
    /// failing after the write leaves an orphaned blob behind.
    pub async fn create(
        &self,
        title: &str,
        subject: &str,
        author: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Note> {
        let title = required_field(title, "title")?;
        let subject = required_field(subject, "subject")?;
        let author = required_field(author, "author")?;
        let file_name = required_field(file_name, "file")?;

        self.blobs.store(file_name, bytes).await?;

        let repo = NoteRepository::new(self.db.connection());
        let note = match repo.insert(title, subject, file_name, author).await {
            Ok(note) => note,
            Err(e) => {
                // Accepted limitation: the blob written above is now
                // orphaned. The catalog stays consistent either way.
                tracing::warn!(
                    file_name = %file_name,
                    error = %e,
                    "Note row insert failed after blob write; blob left orphaned"
                );
                return Err(e);
            }
        };

        tracing::info!(id = %note.id, author = %note.author, "Created note");
        Ok(note)
    }

    /// List all notes, newest first
    pub async fn list(&self) -> Result<Vec<Note>> {
        let repo = NoteRepository::new(self.db.connection());
        repo.list().await
    }

    /// Delete a note and best-effort remove its file
    ///
    /// The row deletion is the authoritative event: it happens first, and
    /// once it succeeds the operation reports success no matter what happens
    /// to the blob. A locked or already-missing file only produces a warning
    /// so the catalog never shows an entry whose deletion "worked" while the
    /// row survived.
    pub async fn delete(&self, id: NoteId) -> Result<()> {
        let repo = NoteRepository::new(self.db.connection());

        let note = repo.get(id).await?.ok_or(Error::NoteNotFound(id))?;
        repo.delete(id).await?;

        match self.blobs.remove(&note.file_name).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(id = %id, file_name = %note.file_name, "Blob already missing during note delete");
            }
            Err(e) => {
                tracing::warn!(
                    id = %id,
                    file_name = %note.file_name,
                    error = %e,
                    "Blob removal failed during note delete; row is gone, leaving the file"
                );
            }
        }

        tracing::info!(id = %id, "Deleted note");
        Ok(())
    }
}

fn required_field<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidInput(format!("{name} is required")));
    }
    Ok(value)
}
