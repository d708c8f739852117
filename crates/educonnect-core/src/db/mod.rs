//! Database layer for EduConnect

mod connection;
mod migrations;
mod note_repository;
mod user_repository;

pub use connection::Database;
pub use note_repository::NoteRepository;
pub use user_repository::UserRepository;
