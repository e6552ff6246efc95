//! Trace event records.
//!
//! One event per captured occurrence; immutable once built.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracewalk_core::{EventCategory, EventKind, TraceError, TraceResult};

/// A single captured occurrence in a traced program
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Source location identifier
    pub path: String,
    /// Line number, starting at 1
    pub line: u32,
    /// What happened
    pub kind: EventKind,
    /// Method name for call/return-like kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl TraceEvent {
    /// Create an event without a method name
    pub fn new(path: impl Into<String>, line: u32, kind: EventKind) -> Self {
        Self {
            path: path.into(),
            line,
            kind,
            method: None,
        }
    }

    /// Create a `line` event
    pub fn line(path: impl Into<String>, line: u32) -> Self {
        Self::new(path, line, EventKind::Line)
    }

    /// Create a `call` event for `method`
    pub fn call(path: impl Into<String>, line: u32, method: impl Into<String>) -> Self {
        Self::new(path, line, EventKind::Call).with_method(method)
    }

    /// Create a `return` event for `method`
    pub fn ret(path: impl Into<String>, line: u32, method: impl Into<String>) -> Self {
        Self::new(path, line, EventKind::Return).with_method(method)
    }

    /// Attach a method name
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Whether the kind belongs to `category`
    #[must_use]
    pub fn is(&self, category: EventCategory) -> bool {
        self.kind.is(category)
    }

    /// Opens a nesting level
    #[must_use]
    pub fn begins(&self) -> bool {
        self.kind.begins()
    }

    /// Closes a nesting level
    #[must_use]
    pub fn ends(&self) -> bool {
        self.kind.ends()
    }

    /// Check the fields a decoded payload must carry
    ///
    /// # Errors
    ///
    /// Returns `CorruptLog` at `offset` if the path is empty or the line is 0
    pub fn validate(&self, offset: u64) -> TraceResult<()> {
        if self.path.is_empty() {
            return Err(TraceError::corrupt(offset, "event has an empty path"));
        }
        if self.line == 0 {
            return Err(TraceError::corrupt(offset, "event line must be positive"));
        }
        Ok(())
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(method) = &self.method {
            write!(f, " {}", method)?;
        }
        write!(f, " {}:{}", self.path, self.line)
    }
}
