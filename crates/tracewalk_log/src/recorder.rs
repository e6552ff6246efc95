//! Recording side of the log: the producer interface and a frame-writing sink.
//!
//! Capturing events from a running program depends on the host runtime, so the
//! hook itself lives outside this crate. It feeds a [`Recorder`], which decides
//! what to keep and appends it to the log.

use crate::encoding::FrameEncoder;
use crate::event::TraceEvent;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracewalk_core::{KindFilter, TraceResult};

/// Producer of trace events
pub trait Recorder {
    /// Begin emitting events that pass `filter`
    ///
    /// # Errors
    ///
    /// Returns error if the sink cannot be prepared
    fn start(&mut self, filter: KindFilter) -> TraceResult<()>;

    /// Offer one captured event; returns whether it was written
    ///
    /// # Errors
    ///
    /// Returns error if writing to the sink fails
    fn record(&mut self, event: &TraceEvent) -> TraceResult<bool>;

    /// Stop emitting and close the sink
    ///
    /// # Errors
    ///
    /// Returns error if the final flush fails
    fn stop(&mut self) -> TraceResult<()>;

    /// Whether events are currently being written
    fn is_recording(&self) -> bool;
}

/// Recorder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Categories to record
    pub filter: KindFilter,
    /// Paths whose events are never recorded
    pub ignore_paths: Vec<String>,
    /// Directory new log files are created in
    pub directory: PathBuf,
}

impl RecorderConfig {
    /// File name for a log started now, e.g. `2024-03-01-12:30:05.log`
    #[must_use]
    pub fn default_filename() -> String {
        format!("{}.log", chrono::Local::now().format("%F-%T"))
    }

    /// Full path for a log started now
    #[must_use]
    pub fn default_path(&self) -> PathBuf {
        self.directory.join(Self::default_filename())
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            filter: KindFilter::default(),
            ignore_paths: Vec::new(),
            directory: PathBuf::from("."),
        }
    }
}

/// Recorder that appends frames to a writer
pub struct FrameRecorder<W: Write> {
    encoder: Option<FrameEncoder<W>>,
    closed: Option<W>,
    filter: KindFilter,
    ignore_paths: Vec<String>,
    recording: bool,
    recorded: u64,
}

impl FrameRecorder<BufWriter<File>> {
    /// Create a recorder writing to a new timestamped file
    ///
    /// The recorder is returned stopped; call [`Recorder::start`] to begin.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be created
    pub fn create(config: &RecorderConfig) -> TraceResult<(Self, PathBuf)> {
        let path = config.default_path();
        let file = File::create(&path)?;
        tracing::info!(path = %path.display(), "recording trace log");
        let recorder = Self::new(BufWriter::new(file))
            .with_filter(config.filter)
            .with_ignored(config.ignore_paths.iter().cloned());
        Ok((recorder, path))
    }
}

impl<W: Write> FrameRecorder<W> {
    /// Create a stopped recorder over `writer`
    pub fn new(writer: W) -> Self {
        Self {
            encoder: Some(FrameEncoder::new(writer)),
            closed: None,
            filter: KindFilter::default(),
            ignore_paths: Vec::new(),
            recording: false,
            recorded: 0,
        }
    }

    /// Set the filter used when started without an explicit one
    #[must_use]
    pub fn with_filter(mut self, filter: KindFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Never record events from these paths
    #[must_use]
    pub fn with_ignored(mut self, paths: impl IntoIterator<Item = String>) -> Self {
        self.ignore_paths.extend(paths);
        self
    }

    /// Number of events written
    #[must_use]
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    /// Filter in effect
    #[must_use]
    pub fn filter(&self) -> KindFilter {
        self.filter
    }

    /// Whether the sink was closed by [`Recorder::stop`]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.encoder.is_none()
    }

    /// Stop if needed and hand back the writer
    ///
    /// # Errors
    ///
    /// Returns error if the final flush fails
    pub fn finish(mut self) -> TraceResult<Option<W>> {
        self.stop()?;
        Ok(self
            .encoder
            .take()
            .map(FrameEncoder::into_inner)
            .or_else(|| self.closed.take()))
    }

    fn ignores(&self, path: &str) -> bool {
        self.ignore_paths.iter().any(|ignored| ignored == path)
    }
}

impl<W: Write> Recorder for FrameRecorder<W> {
    fn start(&mut self, filter: KindFilter) -> TraceResult<()> {
        if self.encoder.is_none() {
            tracing::warn!("recorder already closed, ignoring start");
            return Ok(());
        }
        self.filter = filter;
        self.recording = true;
        tracing::debug!(kinds = ?filter.kinds(), "recorder started");
        Ok(())
    }

    fn record(&mut self, event: &TraceEvent) -> TraceResult<bool> {
        if !self.filter.allows(event.kind) || self.ignores(&event.path) {
            return Ok(false);
        }
        let Some(encoder) = self.encoder.as_mut().filter(|_| self.recording) else {
            return Ok(false);
        };
        encoder.encode(event)?;
        self.recorded += 1;
        Ok(true)
    }

    fn stop(&mut self) -> TraceResult<()> {
        if !self.recording {
            return Ok(());
        }
        self.recording = false;
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.flush()?;
        }
        self.closed = self.encoder.take().map(FrameEncoder::into_inner);
        tracing::debug!(events = self.recorded, "recorder stopped");
        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.recording
    }
}
