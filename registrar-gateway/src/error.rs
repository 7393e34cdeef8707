//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use registrar_core::{CourseId, ProfessorId};
use serde_json::json;

/// Errors that can occur during gateway request handling.
///
/// Malformed identifiers and email addresses never reach these variants:
/// the typed extractors reject them at the serde boundary, before any store
/// access.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// A create collided with a stored professor id.
    #[error("professor with id '{0}' already exists")]
    ProfessorExists(ProfessorId),

    /// A create collided with a stored course id.
    #[error("course with id '{0}' already exists")]
    CourseExists(CourseId),

    /// The requested professor does not exist in the store.
    #[error("professor '{0}' not found")]
    ProfessorNotFound(ProfessorId),

    /// The requested course does not exist in the store.
    #[error("course '{0}' not found")]
    CourseNotFound(CourseId),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::ProfessorExists(_) | ApiError::CourseExists(_) => StatusCode::BAD_REQUEST,
            ApiError::ProfessorNotFound(_) | ApiError::CourseNotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
