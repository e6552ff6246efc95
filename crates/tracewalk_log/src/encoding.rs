//! Frame codec for the trace log.
//!
//! A log is a plain concatenation of frames, with no header or trailer:
//!
//! ```text
//! <decimal byte length> ':' <payload>
//! ```
//!
//! The payload is one [`TraceEvent`] as a JSON object with named fields,
//! so every frame can be parsed on its own and a writer only ever appends.

use crate::event::TraceEvent;
use std::io::{self, Read, Write};
use tracewalk_core::{TraceError, TraceResult};

/// Largest payload a decoder will accept
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Delimiter between the length prefix and the payload
pub const FRAME_DELIMITER: u8 = b':';

/// Encode one event as a complete frame
///
/// # Errors
///
/// Returns `Encoding` if the event cannot be serialized or its payload is
/// larger than [`MAX_FRAME_LEN`]
pub fn encode(event: &TraceEvent) -> TraceResult<Vec<u8>> {
    let payload = serde_json::to_vec(event).map_err(|e| TraceError::Encoding(e.to_string()))?;
    if payload.len() > MAX_FRAME_LEN {
        return Err(TraceError::Encoding(format!(
            "payload of {} bytes exceeds {} bytes",
            payload.len(),
            MAX_FRAME_LEN
        )));
    }
    let mut frame = payload.len().to_string().into_bytes();
    frame.reserve(payload.len() + 1);
    frame.push(FRAME_DELIMITER);
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Decode every frame of `reader` until end of stream
///
/// # Errors
///
/// Returns `CorruptLog` on the first malformed frame; nothing decoded
/// before it is returned
pub fn decode_stream<R: Read>(reader: R) -> TraceResult<Vec<TraceEvent>> {
    FrameDecoder::new(reader).collect()
}

/// Frame encoder for appending to a sink
pub struct FrameEncoder<W> {
    writer: W,
    written: u64,
}

impl<W: Write> FrameEncoder<W> {
    /// Create a new encoder
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Append one frame
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails
    pub fn encode(&mut self, event: &TraceEvent) -> TraceResult<()> {
        let frame = encode(event)?;
        self.writer.write_all(&frame)?;
        self.written += frame.len() as u64;
        Ok(())
    }

    /// Bytes written so far
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flush the writer
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Get a reference to the inner writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Frame decoder for reading a log front to back
pub struct FrameDecoder<R> {
    reader: R,
    offset: u64,
    failed: bool,
}

impl<R: Read> FrameDecoder<R> {
    /// Create a new decoder
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            failed: false,
        }
    }

    /// Bytes consumed so far
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Decode the next frame
    ///
    /// Returns `Ok(None)` only when the stream ends exactly on a frame boundary.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLog` carrying the offset of the frame start if the
    /// frame is truncated or its payload is not a valid event
    pub fn decode(&mut self) -> TraceResult<Option<TraceEvent>> {
        let start = self.offset;
        let Some(len) = self.read_length(start)? else {
            return Ok(None);
        };

        let mut payload = vec![0u8; len];
        self.reader.read_exact(&mut payload).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                TraceError::corrupt(start, format!("truncated payload, expected {} bytes", len))
            } else {
                e.into()
            }
        })?;
        self.offset += len as u64;

        let event: TraceEvent = serde_json::from_slice(&payload)
            .map_err(|e| TraceError::corrupt(start, format!("undecodable payload: {}", e)))?;
        event.validate(start)?;
        Ok(Some(event))
    }

    fn read_length(&mut self, start: u64) -> TraceResult<Option<usize>> {
        let mut len = 0usize;
        let mut digits = 0usize;
        loop {
            let Some(byte) = self.read_byte()? else {
                if digits == 0 {
                    return Ok(None);
                }
                return Err(TraceError::corrupt(start, "stream ended inside a frame length"));
            };
            match byte {
                FRAME_DELIMITER if digits == 0 => {
                    return Err(TraceError::corrupt(start, "frame length is empty"));
                }
                FRAME_DELIMITER => return Ok(Some(len)),
                b'0'..=b'9' => {
                    if digits == 1 && len == 0 {
                        return Err(TraceError::corrupt(start, "frame length has a leading zero"));
                    }
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(byte - b'0')))
                        .filter(|l| *l <= MAX_FRAME_LEN)
                        .ok_or_else(|| {
                            TraceError::corrupt(
                                start,
                                format!("frame length exceeds {} bytes", MAX_FRAME_LEN),
                            )
                        })?;
                    digits += 1;
                }
                other => {
                    return Err(TraceError::corrupt(
                        start,
                        format!("unexpected byte 0x{:02x} in frame length", other),
                    ));
                }
            }
        }
    }

    fn read_byte(&mut self) -> TraceResult<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.offset += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> Iterator for FrameDecoder<R> {
    type Item = TraceResult<TraceEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.decode().transpose();
        if matches!(result, Some(Err(_))) {
            self.failed = true;
        }
        result
    }
}
