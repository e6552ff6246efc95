//! Plain-text reports: log summary and subtree listings.

use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, Write};
use tracewalk_core::EventCategory;
use tracewalk_log::{EventLog, TraceEvent};

/// Event counts of one log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// All events
    pub total: usize,
    /// `line` events
    pub lines: usize,
    /// Scope open/close events
    pub modules: usize,
    /// Method call/return events
    pub methods: usize,
    /// Block call/return events
    pub blocks: usize,
    /// Distinct paths
    pub files: usize,
}

impl Summary {
    /// Count the events of `log`
    #[must_use]
    pub fn of(log: &EventLog) -> Self {
        let mut summary = Self {
            total: log.len(),
            ..Self::default()
        };
        let mut paths = BTreeSet::new();
        for event in log {
            match event.kind.category() {
                EventCategory::Lines => summary.lines += 1,
                EventCategory::Modules => summary.modules += 1,
                EventCategory::Methods => summary.methods += 1,
                EventCategory::Blocks => summary.blocks += 1,
            }
            paths.insert(event.path.as_str());
        }
        summary.files = paths.len();
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "events  {}", self.total)?;
        writeln!(f, "  lines   {}", self.lines)?;
        writeln!(f, "  modules {}", self.modules)?;
        writeln!(f, "  methods {}", self.methods)?;
        writeln!(f, "  blocks  {}", self.blocks)?;
        write!(f, "files   {}", self.files)
    }
}

/// Write one event per line, indented two spaces per nesting level
///
/// Returns the number of events written.
pub fn write_tree<W: Write>(
    out: &mut W,
    walk: impl Iterator<Item = (usize, TraceEvent)>,
) -> io::Result<usize> {
    let mut written = 0;
    for (depth, event) in walk {
        writeln!(out, "{:indent$}{}", "", event, indent = depth * 2)?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracewalk_core::EventKind;
    use tracewalk_nav::Navigator;

    #[test]
    fn test_summary_counts() {
        let log = EventLog::from_events(vec![
            TraceEvent::new("a.rb", 1, EventKind::ScopeOpen),
            TraceEvent::line("a.rb", 2),
            TraceEvent::call("b.rb", 3, "x"),
            TraceEvent::ret("b.rb", 4, "x"),
            TraceEvent::new("a.rb", 5, EventKind::BlockCall),
        ]);
        let summary = Summary::of(&log);
        assert_eq!(
            summary,
            Summary {
                total: 5,
                lines: 1,
                modules: 1,
                methods: 2,
                blocks: 1,
                files: 2,
            }
        );
        assert!(summary.to_string().starts_with("events  5\n"));
    }

    #[test]
    fn test_write_tree_indents_by_depth() {
        let mut nav = Navigator::new(EventLog::from_events(vec![
            TraceEvent::call("a.rb", 1, "outer"),
            TraceEvent::line("a.rb", 2),
            TraceEvent::ret("a.rb", 3, "outer"),
        ]));
        let mut out = Vec::new();
        let written = write_tree(&mut out, nav.prefix_traverse().with_depth()).unwrap();
        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "call outer a.rb:1\n  line a.rb:2\nreturn outer a.rb:3\n"
        );
    }
}
