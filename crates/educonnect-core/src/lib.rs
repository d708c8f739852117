//! educonnect-core - Core library for EduConnect
//!
//! This crate contains the shared models, database layer, blob storage,
//! and business logic used by the EduConnect interfaces (HTTP API, tooling).

pub mod blobstore;
pub mod db;
pub mod error;
pub mod models;
pub mod search;
pub mod services;

pub use blobstore::BlobStore;
pub use error::{Error, Result};
pub use models::{Note, NoteId, User};
pub use services::{NoteService, UserService};
