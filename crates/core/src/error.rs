/// Error type for the pure domain layer.
///
/// Core functions take their inputs by argument and do no I/O, so the only
/// failure they can report is input that fails validation. Callers that need
/// richer errors (missing rows, transport failures) wrap this in their own
/// types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}
