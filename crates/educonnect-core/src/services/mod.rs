//! Business-logic services coordinating the database and the blob store

mod note_service;
mod user_service;

pub use note_service::NoteService;
pub use user_service::UserService;
