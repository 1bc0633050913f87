//! Error type returned by the translation pipeline.

use thiserror::Error;

/// Failure of a whole translation request.
///
/// Backend failures and cancellation are ordinary results of the pipeline and
/// are returned, never panicked. Panics are reserved for collaborator
/// contract violations (see [`crate::translation::dispatch`]).
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The backend returned a non-success response for some unit.
    ///
    /// The status and message are forwarded verbatim; no status code is
    /// interpreted here, and the failure is terminal for the request.
    #[error("translation backend returned {status}: {message}")]
    Backend {
        /// HTTP status code reported by the backend.
        status: u16,
        /// Error message reported by the backend.
        message: String,
    },

    /// The request was cancelled before every unit completed, either by
    /// process shutdown or by the per-unit wait bound.
    #[error("translation timed out, try again later")]
    Timeout,

    /// Recording the finished translation failed.
    ///
    /// Only id collisions are retried internally; everything else from the
    /// store surfaces here.
    #[error("recording translation failed: {0:#}")]
    Storage(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_carries_status_and_message() {
        let err = TranslateError::Backend {
            status: 400,
            message: "bad token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "translation backend returned 400: bad token"
        );
    }

    #[test]
    fn test_timeout_message_suggests_retry() {
        assert!(TranslateError::Timeout.to_string().contains("try again"));
    }
}
