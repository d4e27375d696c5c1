//! Bookshelf: an HTTP service exposing CRUD operations over a book catalog.
//!
//! Storage, validation and the book model live in `bookshelf-core`; this crate
//! adds configuration and the HTTP routing layer.

pub mod api;
pub mod config;

pub use bookshelf_core::{db, models, validation};
