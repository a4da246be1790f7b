/// Errors from the process store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream store returned a non-2xx status code.
    #[error("Store API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode store response: {0}")]
    Decode(String),

    /// A row the caller referenced does not exist.
    #[error("Entity not found: {entity} '{id}'")]
    NotFound { entity: &'static str, id: String },
}
