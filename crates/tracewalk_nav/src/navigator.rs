//! Navigator over a loaded event log.

use crate::matcher::{Matcher, PathMatcher};
use crate::traverse::PrefixTraverse;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracewalk_core::TraceResult;
use tracewalk_log::{Cursor, EventLog, TraceEvent};

/// Traversal commands over one event log
///
/// Movement never fails: every index and offset is clamped into range, and on
/// an empty log every movement is a no-op. Only [`Navigator::current`]
/// reports `EmptyLog`.
#[derive(Debug, Clone)]
pub struct Navigator {
    cursor: Cursor,
}

impl Navigator {
    /// Create a navigator on the first event of `log`
    pub fn new(log: impl Into<Arc<EventLog>>) -> Self {
        Self {
            cursor: Cursor::new(log.into()),
        }
    }

    /// Decode a log from `reader` and navigate it
    ///
    /// # Errors
    ///
    /// Returns `CorruptLog` if the stream is malformed
    pub fn from_reader<R: Read>(reader: R) -> TraceResult<Self> {
        EventLog::load(reader).map(Self::new)
    }

    /// Open a log file and navigate it
    ///
    /// # Errors
    ///
    /// Returns `Io` or `CorruptLog` if the file cannot be loaded
    pub fn open(path: impl AsRef<Path>) -> TraceResult<Self> {
        EventLog::open(path).map(Self::new)
    }

    /// The underlying log
    #[must_use]
    pub fn log(&self) -> &Arc<EventLog> {
        self.cursor.log()
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    /// Whether the log holds no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// Current index
    #[must_use]
    pub fn index(&self) -> usize {
        self.cursor.position()
    }

    /// Event at the current index
    ///
    /// # Errors
    ///
    /// Returns `EmptyLog` if the log holds no events
    pub fn current(&self) -> TraceResult<&TraceEvent> {
        self.cursor.current()
    }

    /// Whether the cursor is on the first event
    #[must_use]
    pub fn at_first(&self) -> bool {
        self.cursor.at_first()
    }

    /// Whether the cursor is on the last event
    #[must_use]
    pub fn at_last(&self) -> bool {
        self.cursor.at_last()
    }

    /// Move one event forward
    pub fn step_forward(&mut self) -> &mut Self {
        self.cursor.advance(1);
        self
    }

    /// Move one event backward
    pub fn step_backward(&mut self) -> &mut Self {
        self.cursor.advance(-1);
        self
    }

    /// Move by `offset` events
    pub fn advance(&mut self, offset: isize) -> &mut Self {
        self.cursor.advance(offset);
        self
    }

    /// Move to `index`
    pub fn jump_to(&mut self, index: isize) -> &mut Self {
        self.cursor.jump_to(index);
        self
    }

    /// Move to the first event
    pub fn to_first(&mut self) -> &mut Self {
        self.cursor.to_first();
        self
    }

    /// Move to the last event
    pub fn to_last(&mut self) -> &mut Self {
        self.cursor.to_last();
        self
    }

    /// Step forward while the current path matches, stopping at the last event
    pub fn skip_while(&mut self, matcher: &PathMatcher) -> &mut Self {
        let from = self.index();
        while !self.at_last() && self.current_matches(|event| matcher.matches(event)) {
            self.step_forward();
        }
        tracing::trace!(from, to = self.index(), "skip");
        self
    }

    /// Step forward at least once, then until `matcher` matches or the last
    /// event is reached
    pub fn search_forward(&mut self, matcher: impl Into<Matcher>) -> &mut Self {
        let matcher = matcher.into();
        let from = self.index();
        self.step_forward();
        while !self.at_last() && !self.current_matches(|event| matcher.matches(event)) {
            self.step_forward();
        }
        tracing::trace!(from, to = self.index(), "search forward");
        self
    }

    /// Step backward at least once, then until the path matches or the first
    /// event is reached
    pub fn search_backward(&mut self, matcher: &PathMatcher) -> &mut Self {
        let from = self.index();
        self.step_backward();
        while !self.at_first() && !self.current_matches(|event| matcher.matches(event)) {
            self.step_backward();
        }
        tracing::trace!(from, to = self.index(), "search backward");
        self
    }

    /// Walk the nesting subtree rooted at the current event, in execution order
    ///
    /// The cursor moves along with the iterator. While the walk is partial it
    /// sits on the next event to be yielded; once exhausted it rests on the
    /// last event yielded. Assumes begin/end events are well nested.
    pub fn prefix_traverse(&mut self) -> PrefixTraverse<'_> {
        PrefixTraverse::new(self)
    }

    fn current_matches(&self, test: impl Fn(&TraceEvent) -> bool) -> bool {
        self.current().is_ok_and(test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tracewalk_core::{EventKind, TraceError};
    use tracewalk_log::FrameEncoder;

    fn nav(events: Vec<TraceEvent>) -> Navigator {
        Navigator::new(EventLog::from_events(events))
    }

    fn three_lines() -> Navigator {
        nav(vec![
            TraceEvent::line("spec.rb", 10),
            TraceEvent::line("spec.rb", 11),
            TraceEvent::line("spec.rb", 12),
        ])
    }

    fn line(nav: &Navigator) -> u32 {
        nav.current().unwrap().line
    }

    #[test]
    fn test_knows_current_event() {
        let mut nav = three_lines();
        assert_eq!(line(&nav), 10);
        assert_eq!(line(nav.step_forward()), 11);
        assert_eq!(line(nav.step_forward()), 12);
        assert_eq!(line(nav.step_forward()), 12);
        assert_eq!(line(nav.step_backward().step_backward()), 10);
    }

    #[test]
    fn test_jump_first_last_numbered() {
        let mut nav = three_lines();
        assert_eq!(line(nav.to_first()), 10);
        assert_eq!(line(nav.to_last()), 12);
        assert_eq!(line(nav.to_first()), 10);
        assert_eq!(line(nav.jump_to(0)), 10);
        assert_eq!(line(nav.jump_to(1)), 11);
        assert_eq!(line(nav.jump_to(2)), 12);
        assert_eq!(line(nav.jump_to(99_999)), 12);
        assert_eq!(line(nav.jump_to(-4)), 10);
    }

    #[test]
    fn test_from_reader() {
        let mut encoder = FrameEncoder::new(Vec::new());
        encoder.encode(&TraceEvent::line("a.rb", 1)).unwrap();
        encoder.encode(&TraceEvent::line("a.rb", 2)).unwrap();
        let bytes = encoder.into_inner();

        let mut nav = Navigator::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(nav.len(), 2);
        assert_eq!(line(nav.to_last()), 2);
    }

    #[test]
    fn test_empty_log() {
        let mut nav = Navigator::from_reader(&b""[..]).unwrap();
        assert!(nav.is_empty());
        assert_eq!(nav.current(), Err(TraceError::EmptyLog));
        nav.step_forward()
            .step_backward()
            .jump_to(5)
            .skip_while(&PathMatcher::literal(""))
            .search_forward(EventKind::Line)
            .search_backward(&PathMatcher::literal("x"));
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.prefix_traverse().count(), 0);
    }

    #[test]
    fn test_skip_stops_on_first_non_matching() {
        let mut events: Vec<_> = (1..=5).map(|l| TraceEvent::line("gems/rack.rb", l)).collect();
        events.push(TraceEvent::line("app.rb", 1));
        events.push(TraceEvent::line("gems/rack.rb", 6));
        let mut nav = nav(events);

        nav.skip_while(&PathMatcher::literal("gems/"));
        assert_eq!(nav.index(), 5);
        nav.skip_while(&PathMatcher::literal("gems/"));
        assert_eq!(nav.index(), 5);
    }

    #[test]
    fn test_skip_stops_at_last() {
        let mut nav = three_lines();
        nav.skip_while(&PathMatcher::pattern(r"\.rb$").unwrap());
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_search_forward_by_path() {
        let mut nav = nav(vec![
            TraceEvent::line("a.rb", 1),
            TraceEvent::line("b.rb", 1),
            TraceEvent::line("target.rb", 1),
            TraceEvent::line("c.rb", 1),
            TraceEvent::line("target.rb", 2),
        ]);
        nav.search_forward("target");
        assert_eq!(nav.index(), 2);
        // Starting on a match still moves on.
        nav.search_forward("target");
        assert_eq!(nav.index(), 4);
        nav.search_forward("target");
        assert_eq!(nav.index(), 4);
    }

    #[test]
    fn test_search_forward_by_kind() {
        let mut nav = nav(vec![
            TraceEvent::line("a.rb", 1),
            TraceEvent::call("a.rb", 2, "m"),
            TraceEvent::ret("a.rb", 3, "m"),
            TraceEvent::line("a.rb", 4),
        ]);
        nav.search_forward(EventKind::Line);
        assert_eq!(nav.index(), 3);
        nav.to_first().search_forward(EventKind::Return);
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_search_forward_without_match_ends_at_last() {
        let mut nav = three_lines();
        nav.search_forward("nowhere");
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_search_backward() {
        let mut nav = nav(vec![
            TraceEvent::line("target.rb", 1),
            TraceEvent::line("a.rb", 1),
            TraceEvent::line("target.rb", 2),
            TraceEvent::line("b.rb", 1),
            TraceEvent::line("target.rb", 3),
        ]);
        nav.to_last().search_backward(&PathMatcher::literal("target"));
        assert_eq!(nav.index(), 2);
        nav.search_backward(&PathMatcher::literal("target"));
        assert_eq!(nav.index(), 0);
        nav.jump_to(3).search_backward(&PathMatcher::literal("nowhere"));
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn test_navigators_share_log() {
        let a = three_lines();
        let mut b = Navigator::new(Arc::clone(a.log()));
        b.to_last();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 2);
    }

    proptest::proptest! {
        #[test]
        fn prop_search_forward_terminates_in_range(
            paths in proptest::collection::vec(
                proptest::sample::select(vec!["a.rb", "b.rb", "c.rb"]),
                1..40,
            ),
            start in 0usize..40,
            needle in proptest::sample::select(vec!["a", "b", "c", "z"]),
        ) {
            let n = paths.len();
            let mut nav = nav(paths.iter().map(|p| TraceEvent::line(*p, 1)).collect());
            nav.jump_to(start as isize);
            let from = nav.index();
            nav.search_forward(needle);
            let to = nav.index();

            prop_assert!(to < n);
            prop_assert!(to > from || from == n - 1);
            let first_hit = (from + 1..n).find(|i| paths[*i].contains(needle));
            prop_assert_eq!(to, first_hit.unwrap_or(n - 1));
        }
    }
}
