//! Search facade over a note listing
//!
//! Plain substring filtering over an in-memory listing; the catalog is small
//! enough that nothing fancier than this is warranted.

use crate::models::Note;

/// Filter notes whose title or subject contains the query, case-insensitively
///
/// The filter is stable: matching notes keep the order of the input listing.
/// An empty (or whitespace-only) query returns the full listing unchanged.
#[must_use]
pub fn filter(query: &str, notes: &[Note]) -> Vec<Note> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return notes.to_vec();
    }

    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&query)
                || note.subject.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}
