//! HTTP routing layer.
//!
//! | Method | Path            | Handler                 |
//! |--------|-----------------|-------------------------|
//! | POST   | `/books`        | [`books::create_book`]  |
//! | GET    | `/books`        | [`books::list_books`]   |
//! | GET    | `/books/{isbn}` | [`books::get_book`]     |
//! | PUT    | `/books/{isbn}` | [`books::update_book`]  |
//! | DELETE | `/books/{isbn}` | [`books::delete_book`]  |

pub mod books;
mod error;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::db::{BookStore, Database, SqliteBookStore};
use crate::models::Book;
use crate::validation::{BookValidator, Validator};

pub use error::{ApiError, DUPLICATE_ISBN};

/// Collaborators shared by every request. Nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
    pub validator: Arc<dyn Validator<Book>>,
}

impl AppState {
    pub fn new(books: Arc<dyn BookStore>, validator: Arc<dyn Validator<Book>>) -> Self {
        Self { books, validator }
    }

    /// SQLite-backed store with the standard book rules.
    pub fn from_database(db: Database) -> Self {
        Self::new(Arc::new(SqliteBookStore::new(db)), Arc::new(BookValidator))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{isbn}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
