use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use advisor_core::error::CoreError;
use advisor_store::error::StoreError;

/// Handler return type; the error half renders itself as JSON.
pub type AppResult<T> = Result<T, AppError>;

/// Everything a handler can fail with.
///
/// Domain validation arrives via [`CoreError`], upstream trouble via
/// [`StoreError`], and the two string variants cover request-level
/// problems the handler detects itself. Rendering goes through
/// [`IntoResponse`] so every failure body has the same
/// `{ "error", "code" }` shape.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Status, stable error code, and client-facing message for this error.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Store(err) => store_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
        }
    }
}

/// Map a store failure onto the HTTP surface.
///
/// A missing row is the client's 404. Every other store failure (transport,
/// bad upstream status, undecodable body) is logged with its detail and
/// reported as a bare 502; upstream status lines and bodies never reach
/// the client.
fn store_parts(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        other => {
            tracing::error!(error = %other, "Store error");
            (
                StatusCode::BAD_GATEWAY,
                "STORE_UNAVAILABLE",
                "The process data store is unavailable".to_string(),
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}
