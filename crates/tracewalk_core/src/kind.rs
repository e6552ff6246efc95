//! Event kinds and the categories a recorder can filter on.

use crate::error::TraceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event kind - what happened at a traced location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Execution moved to a new line
    Line,
    /// A module or class body was opened
    ScopeOpen,
    /// A module or class body was closed
    ScopeClose,
    /// A method was called
    Call,
    /// A method returned
    Return,
    /// A natively implemented method was called
    NativeCall,
    /// A natively implemented method returned
    NativeReturn,
    /// A block was entered
    BlockCall,
    /// A block was left
    BlockReturn,
}

impl EventKind {
    /// Every kind, in declaration order
    pub const ALL: [EventKind; 9] = [
        Self::Line,
        Self::ScopeOpen,
        Self::ScopeClose,
        Self::Call,
        Self::Return,
        Self::NativeCall,
        Self::NativeReturn,
        Self::BlockCall,
        Self::BlockReturn,
    ];

    /// Category this kind belongs to
    #[must_use]
    pub const fn category(self) -> EventCategory {
        match self {
            Self::Line => EventCategory::Lines,
            Self::ScopeOpen | Self::ScopeClose => EventCategory::Modules,
            Self::Call | Self::Return | Self::NativeCall | Self::NativeReturn => {
                EventCategory::Methods
            }
            Self::BlockCall | Self::BlockReturn => EventCategory::Blocks,
        }
    }

    /// Whether this kind belongs to `category`
    #[must_use]
    pub fn is(self, category: EventCategory) -> bool {
        self.category() == category
    }

    /// Opens a nesting level
    #[must_use]
    pub const fn begins(self) -> bool {
        matches!(
            self,
            Self::ScopeOpen | Self::Call | Self::NativeCall | Self::BlockCall
        )
    }

    /// Closes a nesting level
    #[must_use]
    pub const fn ends(self) -> bool {
        matches!(
            self,
            Self::ScopeClose | Self::Return | Self::NativeReturn | Self::BlockReturn
        )
    }

    /// Wire tag of this kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::ScopeOpen => "scope_open",
            Self::ScopeClose => "scope_close",
            Self::Call => "call",
            Self::Return => "return",
            Self::NativeCall => "native_call",
            Self::NativeReturn => "native_return",
            Self::BlockCall => "block_call",
            Self::BlockReturn => "block_return",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TraceError::UnknownKind(s.to_string()))
    }
}

/// Group of kinds that are recorded or filtered together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// `line`
    Lines,
    /// `scope_open`, `scope_close`
    Modules,
    /// `call`, `return`, `native_call`, `native_return`
    Methods,
    /// `block_call`, `block_return`
    Blocks,
}

/// Which categories a recorder emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindFilter {
    /// Record line events
    pub lines: bool,
    /// Record scope open/close events
    pub modules: bool,
    /// Record method call/return events
    pub methods: bool,
    /// Record block call/return events
    pub blocks: bool,
}

impl KindFilter {
    /// Filter that lets every event through
    #[must_use]
    pub const fn all() -> Self {
        Self {
            lines: true,
            modules: true,
            methods: true,
            blocks: true,
        }
    }

    /// Filter that drops every event
    #[must_use]
    pub const fn none() -> Self {
        Self {
            lines: false,
            modules: false,
            methods: false,
            blocks: false,
        }
    }

    /// Filter that lets a single category through
    #[must_use]
    pub fn only(category: EventCategory) -> Self {
        Self::none().with(category, true)
    }

    /// Enable or disable one category
    #[must_use]
    pub fn with(mut self, category: EventCategory, enabled: bool) -> Self {
        match category {
            EventCategory::Lines => self.lines = enabled,
            EventCategory::Modules => self.modules = enabled,
            EventCategory::Methods => self.methods = enabled,
            EventCategory::Blocks => self.blocks = enabled,
        }
        self
    }

    /// Whether `kind` passes the filter
    #[must_use]
    pub fn allows(&self, kind: EventKind) -> bool {
        match kind.category() {
            EventCategory::Lines => self.lines,
            EventCategory::Modules => self.modules,
            EventCategory::Methods => self.methods,
            EventCategory::Blocks => self.blocks,
        }
    }

    /// Enabled kinds in declaration order
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(|kind| self.allows(*kind))
            .collect()
    }
}

impl Default for KindFilter {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begins_ends_exclusive() {
        for kind in EventKind::ALL {
            let flags = [kind.begins(), kind.ends(), kind == EventKind::Line];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{kind}");
        }
    }

    #[test]
    fn test_categories() {
        assert!(EventKind::Line.is(EventCategory::Lines));
        assert!(EventKind::ScopeClose.is(EventCategory::Modules));
        assert!(EventKind::NativeReturn.is(EventCategory::Methods));
        assert!(EventKind::BlockCall.is(EventCategory::Blocks));
        assert!(!EventKind::BlockCall.is(EventCategory::Methods));
    }

    #[test]
    fn test_kind_tag_roundtrip() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
        assert_eq!(
            "c_call".parse::<EventKind>(),
            Err(TraceError::UnknownKind("c_call".to_string()))
        );
    }

    #[test]
    fn test_filter_default_allows_everything() {
        let filter = KindFilter::default();
        assert_eq!(filter.kinds(), EventKind::ALL.to_vec());
    }

    #[test]
    fn test_filter_only() {
        let filter = KindFilter::only(EventCategory::Methods);
        assert_eq!(
            filter.kinds(),
            vec![
                EventKind::Call,
                EventKind::Return,
                EventKind::NativeCall,
                EventKind::NativeReturn
            ]
        );
        assert!(!filter.allows(EventKind::Line));
        assert!(KindFilter::none().kinds().is_empty());
    }

    #[test]
    fn test_filter_partial_config() {
        let filter: KindFilter = serde_json::from_str(r#"{"blocks": false}"#).unwrap();
        assert!(filter.lines && filter.modules && filter.methods);
        assert!(!filter.allows(EventKind::BlockReturn));
    }
}
