//! Response envelope for the JSON API.
//!
//! Every successful endpoint answers `{ "data": ... }`, the shape the
//! dashboard client unwraps. Handlers return [`DataResponse`] rather than
//! building the envelope with `serde_json::json!` so the payload type is
//! visible in the handler signature.

use serde::Serialize;

/// The `{ "data": T }` wrapper around a successful payload.
///
/// Error responses do not use this envelope; they carry
/// `{ "error", "code" }` (see [`crate::error::AppError`]).
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}
