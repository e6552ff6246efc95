//! tracewalk navigator
//!
//! Debugger-style movement over a recorded trace: stepping, jumping,
//! skipping noise, searching and walking whole call subtrees.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod matcher;
pub mod navigator;
pub mod traverse;

pub use matcher::{Matcher, PathMatcher};
pub use navigator::Navigator;
pub use traverse::{PrefixTraverse, WithDepth};
