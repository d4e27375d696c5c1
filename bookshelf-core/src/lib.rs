//! Core library for Bookshelf.
//!
//! This crate provides the book model, record validation and SQLite storage
//! for Bookshelf, independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use bookshelf_core::db::{BookStore, Database, SqliteBookStore};
//!
//! let db = Database::open("Data Source=books.db")?;
//! db.migrate()?;
//!
//! let store = SqliteBookStore::new(db);
//! let books = store.get_all()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod models;
pub mod validation;

// Re-export commonly used types at crate root
pub use db::{BookStore, Database, SqliteBookStore};
pub use models::Book;
pub use validation::{BookValidator, ValidationFailure, Validator};
