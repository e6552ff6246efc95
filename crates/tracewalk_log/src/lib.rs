//! tracewalk event log
//!
//! Append-only trace log format, its in-memory form and cursors over it.
//! Logs are decoded in full at load time and never mutated afterwards.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event;
pub mod encoding;
pub mod stream;
pub mod cursor;
pub mod recorder;

pub use event::TraceEvent;
pub use encoding::{decode_stream, encode, FrameDecoder, FrameEncoder, MAX_FRAME_LEN};
pub use stream::EventLog;
pub use cursor::Cursor;
pub use recorder::{FrameRecorder, Recorder, RecorderConfig};
pub use tracewalk_core::{EventCategory, EventKind, KindFilter, TraceError, TraceResult};
