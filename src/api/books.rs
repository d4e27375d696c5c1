use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::db::BookStore;
use crate::models::Book;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksQuery {
    pub search_term: Option<String>,
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(book) = payload?;
    ensure_valid(&state, &book)?;

    let candidate = book.clone();
    if !with_store(&state, move |books| books.create(&candidate)).await? {
        return Err(ApiError::duplicate_isbn());
    }

    tracing::info!(isbn = %book.isbn, "Created book");
    let location = format!("/books/{}", book.isbn);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

/// Lists every book, or only those whose title contains `searchTerm`.
pub async fn list_books(
    State(state): State<AppState>,
    query: Result<Query<ListBooksQuery>, QueryRejection>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let Query(query) = query?;
    let books = with_store(&state, move |books| match query.search_term.as_deref() {
        Some(term) if !term.trim().is_empty() => books.search_by_title(term),
        _ => books.get_all(),
    })
    .await?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ApiError> {
    with_store(&state, move |books| books.get_by_isbn(&isbn))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// The path ISBN replaces whatever the payload carries before validation.
pub async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let Json(mut book) = payload?;
    book.isbn = isbn;
    ensure_valid(&state, &book)?;

    let replacement = book.clone();
    if !with_store(&state, move |books| books.update(&replacement)).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(isbn = %book.isbn, "Updated book");
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<StatusCode, ApiError> {
    let key = isbn.clone();
    if !with_store(&state, move |books| books.delete(&key)).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(%isbn, "Deleted book");
    Ok(StatusCode::NO_CONTENT)
}

fn ensure_valid(state: &AppState, book: &Book) -> Result<(), ApiError> {
    let failures = state.validator.validate(book);
    if failures.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(failures))
    }
}

/// Runs a store call on the blocking pool; SQLite may wait out its busy timeout.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn BookStore) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let books = Arc::clone(&state.books);
    let result = tokio::task::spawn_blocking(move || op(books.as_ref()))
        .await
        .map_err(anyhow::Error::from)?;
    Ok(result?)
}
