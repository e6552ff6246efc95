//! Cursor for moving through an event log.

use crate::event::TraceEvent;
use crate::stream::EventLog;
use std::sync::Arc;
use tracewalk_core::{TraceError, TraceResult};

/// Position in an event log
///
/// The position is always clamped to `[0, len - 1]`; moving past either end
/// stops at that end.
#[derive(Debug, Clone)]
pub struct Cursor {
    log: Arc<EventLog>,
    position: usize,
}

impl Cursor {
    /// Create a cursor on the first event of `log`
    #[must_use]
    pub fn new(log: Arc<EventLog>) -> Self {
        Self { log, position: 0 }
    }

    /// The log this cursor reads
    #[must_use]
    pub fn log(&self) -> &Arc<EventLog> {
        &self.log
    }

    /// Current index
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of events in the log
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether the log holds no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Event at the current position
    ///
    /// # Errors
    ///
    /// Returns `EmptyLog` if the log holds no events
    pub fn current(&self) -> TraceResult<&TraceEvent> {
        self.log.get(self.position).ok_or(TraceError::EmptyLog)
    }

    /// Move by `offset`, clamping at either end
    pub fn advance(&mut self, offset: isize) {
        let target = if offset.is_negative() {
            self.position.saturating_sub(offset.unsigned_abs())
        } else {
            self.position.saturating_add(offset.unsigned_abs())
        };
        self.position = self.clamp(target);
    }

    /// Move to `index`, clamping into range
    pub fn jump_to(&mut self, index: isize) {
        self.position = usize::try_from(index).map_or(0, |index| self.clamp(index));
    }

    /// Move to the first event
    pub fn to_first(&mut self) {
        self.position = 0;
    }

    /// Move to the last event
    pub fn to_last(&mut self) {
        self.position = self.last_index();
    }

    /// Whether the cursor is on the first event
    #[must_use]
    pub const fn at_first(&self) -> bool {
        self.position == 0
    }

    /// Whether the cursor is on the last event (always true for an empty log)
    #[must_use]
    pub fn at_last(&self) -> bool {
        self.position == self.last_index()
    }

    fn last_index(&self) -> usize {
        self.log.len().saturating_sub(1)
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.last_index())
    }
}
