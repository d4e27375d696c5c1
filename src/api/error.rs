use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::validation::ValidationFailure;

pub const DUPLICATE_ISBN: &str = "A book with the same ISBN already exists";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Field-level rejections, including the duplicate-ISBN conflict on create.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<ValidationFailure>),
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
    #[error("malformed query string: {0}")]
    MalformedQuery(#[from] QueryRejection),
    #[error("book not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    pub fn duplicate_isbn() -> Self {
        Self::Validation(vec![ValidationFailure::new("Isbn", DUPLICATE_ISBN)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(failures) => (StatusCode::BAD_REQUEST, Json(failures)).into_response(),
            Self::MalformedBody(rejection) => {
                let failure = ValidationFailure::new("", rejection.body_text());
                (StatusCode::BAD_REQUEST, Json(vec![failure])).into_response()
            }
            Self::MalformedQuery(rejection) => {
                let failure = ValidationFailure::new("", rejection.body_text());
                (StatusCode::BAD_REQUEST, Json(vec![failure])).into_response()
            }
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Store(err) => {
                tracing::error!("Book store failure: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
