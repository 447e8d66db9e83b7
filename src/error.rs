use thiserror::Error;
use tracing::{error, warn};

/// Domain errors for screen-stack.
///
/// The registry's own operations are total: empty stacks and absent handles
/// degrade to no-ops or `None` results, never errors. The only failure
/// surface is the externally-implemented close capability.
#[derive(Error, Debug)]
pub enum ScreenError {
    /// The host screen rejected or failed a close request.
    #[error("close request failed: {0}")]
    CloseRequest(String),
}

pub type Result<T> = std::result::Result<T, ScreenError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the caller doesn't need to know.
///
/// Includes file/line information using `#[track_caller]` for better
/// debugging. Follows the Zed error handling pattern.
///
/// # Examples
///
/// ```ignore
/// use screen_stack::error::ResultExt;
///
/// // A failing close request is reported, not propagated
/// handle.request_close().log_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_err_passes_through_ok() {
        let result: std::result::Result<i32, ScreenError> = Ok(7);
        assert_eq!(result.log_err(), Some(7));
    }

    #[test]
    fn test_log_err_swallows_err() {
        let result: std::result::Result<i32, ScreenError> =
            Err(ScreenError::CloseRequest("screen refused".into()));
        assert_eq!(result.log_err(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ScreenError::CloseRequest("window server gone".into());
        assert_eq!(err.to_string(), "close request failed: window server gone");
    }
}
