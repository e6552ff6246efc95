//! Matchers used to parameterize skip and search.

use regex::Regex;
use tracewalk_core::{EventKind, TraceError, TraceResult};
use tracewalk_log::TraceEvent;

/// Test against an event's path
#[derive(Debug, Clone)]
pub enum PathMatcher {
    /// Path contains this text
    Literal(String),
    /// Path matches this regular expression
    Pattern(Regex),
}

impl PathMatcher {
    /// Substring matcher
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Regular expression matcher
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if `pattern` does not compile
    pub fn pattern(pattern: &str) -> TraceResult<Self> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| TraceError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    /// Parse user input: `/re/` is a pattern, anything else a literal
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if a `/re/` body does not compile
    pub fn parse(input: &str) -> TraceResult<Self> {
        match input
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(body) => Self::pattern(body),
            None => Ok(Self::literal(input)),
        }
    }

    /// Whether `path` matches
    #[must_use]
    pub fn matches_path(&self, path: &str) -> bool {
        match self {
            Self::Literal(text) => path.contains(text.as_str()),
            Self::Pattern(regex) => regex.is_match(path),
        }
    }

    /// Whether the event's path matches
    #[must_use]
    pub fn matches(&self, event: &TraceEvent) -> bool {
        self.matches_path(&event.path)
    }
}

impl PartialEq for PathMatcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for PathMatcher {}

/// Test against an event's path or kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Match on the path
    Path(PathMatcher),
    /// Match on the kind
    Kind(EventKind),
}

impl Matcher {
    /// Parse user input: `:kind` selects a kind, otherwise as [`PathMatcher::parse`]
    ///
    /// # Errors
    ///
    /// Returns `UnknownKind` for an unknown `:kind`, `InvalidPattern` for a bad `/re/`
    pub fn parse(input: &str) -> TraceResult<Self> {
        match input.strip_prefix(':') {
            Some(kind) => kind.parse().map(Self::Kind),
            None => PathMatcher::parse(input).map(Self::Path),
        }
    }

    /// Whether the event matches
    #[must_use]
    pub fn matches(&self, event: &TraceEvent) -> bool {
        match self {
            Self::Path(path) => path.matches(event),
            Self::Kind(kind) => event.kind == *kind,
        }
    }
}

impl From<PathMatcher> for Matcher {
    fn from(matcher: PathMatcher) -> Self {
        Self::Path(matcher)
    }
}

impl From<EventKind> for Matcher {
    fn from(kind: EventKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<&str> for Matcher {
    fn from(text: &str) -> Self {
        Self::Path(PathMatcher::literal(text))
    }
}
