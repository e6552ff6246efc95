//! Decoded, in-memory event log.

use crate::encoding::FrameDecoder;
use crate::event::TraceEvent;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracewalk_core::TraceResult;

/// Ordered, immutable sequence of events loaded from a trace log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<TraceEvent>,
}

impl EventLog {
    /// Wrap already decoded events
    #[must_use]
    pub fn from_events(events: Vec<TraceEvent>) -> Self {
        Self { events }
    }

    /// Decode every frame of `reader`
    ///
    /// An empty stream gives an empty log.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLog` if any frame is malformed; no partial log is kept
    pub fn load<R: Read>(reader: R) -> TraceResult<Self> {
        let mut decoder = FrameDecoder::new(reader);
        let mut events = Vec::new();
        while let Some(event) = decoder.decode()? {
            events.push(event);
        }
        tracing::debug!(events = events.len(), bytes = decoder.offset(), "loaded trace log");
        Ok(Self { events })
    }

    /// Open and decode a log file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened, `CorruptLog` if it is malformed
    pub fn open(path: impl AsRef<Path>) -> TraceResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening trace log");
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log holds no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TraceEvent> {
        self.events.get(index)
    }

    /// All events in order
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Iterate over the events in order
    pub fn iter(&self) -> std::slice::Iter<'_, TraceEvent> {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a TraceEvent;
    type IntoIter = std::slice::Iter<'a, TraceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
