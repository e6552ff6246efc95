//! Pre-order traversal of a begin/end subtree.

use crate::navigator::Navigator;
use std::iter::FusedIterator;
use tracewalk_log::TraceEvent;

/// Events of the subtree rooted at the navigator's position, in execution order
///
/// Started on a `begins` event, the walk ends with its matching `ends` event.
/// Started anywhere else, it ends with the `ends` event that closes the frame
/// the walk began in. It also ends at the last event of the log. The navigator
/// follows along: mid-walk it sits on the next event to be yielded, and once
/// the walk is exhausted it rests on the last event yielded.
pub struct PrefixTraverse<'a> {
    nav: &'a mut Navigator,
    start: usize,
    depth: usize,
    rooted: bool,
    done: bool,
}

impl<'a> PrefixTraverse<'a> {
    pub(crate) fn new(nav: &'a mut Navigator) -> Self {
        let start = nav.index();
        let rooted = nav.current().is_ok_and(TraceEvent::begins);
        let done = nav.is_empty();
        Self {
            nav,
            start,
            depth: 0,
            rooted,
            done,
        }
    }

    /// Index the walk started from
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Unmatched `begins` events seen so far
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Go back to the starting event and walk again
    pub fn restart(&mut self) {
        self.nav.jump_to(self.start as isize);
        self.depth = 0;
        self.done = self.nav.is_empty();
    }

    /// Pair every event with its nesting depth relative to the start
    pub fn with_depth(self) -> WithDepth<'a> {
        WithDepth { inner: self }
    }

    fn advance(&mut self) -> Option<(usize, TraceEvent)> {
        if self.done {
            return None;
        }
        let Ok(event) = self.nav.current().cloned() else {
            self.done = true;
            return None;
        };

        let mut level = self.depth;
        if self.nav.at_last() {
            self.done = true;
        } else if event.ends() {
            if self.depth == 0 {
                self.done = true;
            } else {
                self.depth -= 1;
                level = self.depth;
                if self.depth == 0 && self.rooted {
                    self.done = true;
                } else {
                    self.nav.step_forward();
                }
            }
        } else if event.begins() {
            self.depth += 1;
            self.nav.step_forward();
        } else {
            self.nav.step_forward();
        }
        Some((level, event))
    }
}

impl Iterator for PrefixTraverse<'_> {
    type Item = TraceEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(|(_, event)| event)
    }
}

impl FusedIterator for PrefixTraverse<'_> {}

/// [`PrefixTraverse`] yielding `(depth, event)` pairs
pub struct WithDepth<'a> {
    inner: PrefixTraverse<'a>,
}

impl WithDepth<'_> {
    /// Go back to the starting event and walk again
    pub fn restart(&mut self) {
        self.inner.restart();
    }
}

impl Iterator for WithDepth<'_> {
    type Item = (usize, TraceEvent);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.advance()
    }
}

impl FusedIterator for WithDepth<'_> {}
