//! Core error types for tracewalk.

/// Core result type
pub type TraceResult<T> = Result<T, TraceError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// A frame of the trace log could not be decoded
    #[error("Corrupt log at byte {offset}: {reason}")]
    CorruptLog {
        /// Byte offset of the start of the failing frame
        offset: u64,
        /// What was wrong with the frame
        reason: String,
    },

    /// The log holds no events, so there is no current event
    #[error("Log is empty")]
    EmptyLog,

    /// A path pattern failed to compile
    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// Pattern source as given
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Unknown event kind tag
    #[error("Unknown event kind: {0}")]
    UnknownKind(String),

    /// An event could not be serialized
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// I/O failure other than a clean end of stream
    #[error("I/O error: {0}")]
    Io(String),
}

impl TraceError {
    /// Shorthand for a [`TraceError::CorruptLog`]
    pub fn corrupt(offset: u64, reason: impl Into<String>) -> Self {
        Self::CorruptLog {
            offset,
            reason: reason.into(),
        }
    }

    /// Whether this error came from a malformed log
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptLog { .. })
    }
}

impl From<std::io::Error> for TraceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TraceError::EmptyLog;
        assert_eq!(format!("{}", err), "Log is empty");

        let err = TraceError::UnknownKind("raise".to_string());
        assert_eq!(format!("{}", err), "Unknown event kind: raise");
    }

    #[test]
    fn test_corrupt_log_reports_offset() {
        let err = TraceError::corrupt(42, "truncated payload");
        let s = format!("{}", err);
        assert!(s.contains("42"));
        assert!(s.contains("truncated payload"));
        assert!(err.is_corrupt());
        assert!(!TraceError::EmptyLog.is_corrupt());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TraceError::from(io);
        assert!(matches!(err, TraceError::Io(ref msg) if msg.contains("denied")));
    }

    #[test]
    fn test_error_equality() {
        let err1 = TraceError::corrupt(0, "x");
        let err2 = TraceError::corrupt(0, "x");
        assert_eq!(err1, err2);
        assert_ne!(err1, TraceError::EmptyLog);
    }
}
