//! Error types for the moodwell engine.
//!
//! The classification and trend pipelines never surface these to callers:
//! remote failures fall back to the local heuristic and malformed history is
//! skipped. Errors only escape from configuration loading and the host bridge.

/// Top-level error type for the mood engine.
#[derive(Debug, thiserror::Error)]
pub enum MoodwellError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Remote classifier transport or response error.
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Remote classifier did not answer within its deadline.
    #[error("classifier timed out after {0}ms")]
    Timeout(u64),

    /// Caller supplied input the engine cannot act on.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Host bridge protocol error (envelope parse, serialization, stdio).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MoodwellError {
    /// Returns `true` for failures the local fallback is expected to absorb.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Classifier(_) | Self::Timeout(_))
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, MoodwellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_classifier() {
        let err = MoodwellError::Classifier("connection refused".into());
        assert_eq!(err.to_string(), "classifier error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = MoodwellError::Timeout(3000);
        assert_eq!(err.to_string(), "classifier timed out after 3000ms");
    }

    #[test]
    fn display_config() {
        let err = MoodwellError::Config("timeout_ms must be > 0".into());
        assert_eq!(err.to_string(), "config error: timeout_ms must be > 0");
    }

    #[test]
    fn remote_failures_are_recoverable() {
        assert!(MoodwellError::Classifier("x".into()).is_recoverable());
        assert!(MoodwellError::Timeout(1).is_recoverable());
        assert!(!MoodwellError::Config("x".into()).is_recoverable());
        assert!(!MoodwellError::Protocol("x".into()).is_recoverable());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MoodwellError>();
    }
}
