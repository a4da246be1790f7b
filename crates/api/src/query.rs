//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

use crate::error::AppError;

/// Default lookback window for time-bounded reads, in hours.
pub const DEFAULT_WINDOW_HOURS: u32 = 24;

/// Largest accepted lookback window, in hours (one week).
pub const MAX_WINDOW_HOURS: u32 = 168;

/// Generic lookback window parameter (`?hours=`).
///
/// Used by any handler that reads a recent slice of process history.
#[derive(Debug, Deserialize)]
pub struct WindowParams {
    pub hours: Option<u32>,
}

impl WindowParams {
    /// Resolve the window, defaulting to [`DEFAULT_WINDOW_HOURS`] and
    /// rejecting zero or anything beyond [`MAX_WINDOW_HOURS`].
    pub fn resolve(&self) -> Result<u32, AppError> {
        let hours = self.hours.unwrap_or(DEFAULT_WINDOW_HOURS);
        if hours == 0 || hours > MAX_WINDOW_HOURS {
            return Err(AppError::BadRequest(format!(
                "hours must be between 1 and {MAX_WINDOW_HOURS}"
            )));
        }
        Ok(hours)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_hours_defaults_to_a_day() {
        let params = WindowParams { hours: None };
        assert_eq!(params.resolve().unwrap(), 24);
    }

    #[test]
    fn zero_and_oversized_windows_are_rejected() {
        assert_matches!(
            WindowParams { hours: Some(0) }.resolve(),
            Err(AppError::BadRequest(_))
        );
        assert_matches!(
            WindowParams { hours: Some(169) }.resolve(),
            Err(AppError::BadRequest(_))
        );
        assert_eq!(WindowParams { hours: Some(168) }.resolve().unwrap(), 168);
    }
}
