//! tracewalk core types
//!
//! This crate contains pure types and logic with no I/O.
//! Event kinds carry the nesting predicates every traversal relies on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod kind;

// Re-exports
pub use error::{TraceError, TraceResult};
pub use kind::{EventCategory, EventKind, KindFilter};
