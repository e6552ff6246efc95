//! Commands understood by the play loop, one per input line.

use std::str::FromStr;
use tracewalk_core::{EventKind, TraceError};
use tracewalk_nav::{Matcher, PathMatcher};

/// Key reference shown by `h` and at startup
pub const HELP: &str = "\
Controls
  j   To next (also an empty line)
  k   To previous
  #N  To event number N
  g   To beginning
  G   To end
  s   Skip forward while the path matches: s TEXT, s /REGEX/
  l   Skip to next line event
  /   Find forward: /TEXT, //REGEX/, /:KIND
  ?   Find backward: ?TEXT, ?/REGEX/
  t   Walk the subtree from here
  r   Redraw
  h   Help
  q   Quit";

/// A parsed play command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Step forward
    Next,
    /// Step backward
    Prev,
    /// Go to the first event
    First,
    /// Go to the last event
    Last,
    /// Go to an event number
    Jump(isize),
    /// Skip forward while the path matches
    Skip(PathMatcher),
    /// Search forward (`l` is a search for the next `line` event)
    SearchForward(Matcher),
    /// Search backward
    SearchBackward(PathMatcher),
    /// List the subtree rooted at the current event
    Tree,
    /// Show the current event again
    Redraw,
    /// Show the controls
    Help,
    /// Leave the loop
    Quit,
}

/// Input that is not a command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Unrecognized input
    #[error("Unknown command: {0:?} (h for help)")]
    Unknown(String),

    /// `#` not followed by an integer
    #[error("Expected an event number, got {0:?}")]
    BadIndex(String),

    /// Command needs an argument
    #[error("Missing argument for '{0}'")]
    MissingArgument(char),

    /// Matcher did not parse
    #[error(transparent)]
    Matcher(#[from] TraceError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim_end_matches(['\r', '\n']);
        let mut chars = input.chars();
        let Some(key) = chars.next() else {
            return Ok(Self::Next);
        };
        let arg = chars.as_str();

        let command = match (key, arg) {
            ('j', "") => Self::Next,
            ('k', "") => Self::Prev,
            ('g', "") => Self::First,
            ('G', "") => Self::Last,
            ('l', "") => Self::SearchForward(Matcher::Kind(EventKind::Line)),
            ('t', "") => Self::Tree,
            ('r', "") => Self::Redraw,
            ('h', "") => Self::Help,
            ('q', "") => Self::Quit,
            ('#', number) => {
                let number = number.trim();
                number
                    .parse()
                    .map(Self::Jump)
                    .map_err(|_| CommandError::BadIndex(number.to_string()))?
            }
            ('s', rest) => Self::Skip(PathMatcher::parse(required(key, rest.trim_start())?)?),
            ('/', rest) => Self::SearchForward(Matcher::parse(required(key, rest)?)?),
            ('?', rest) => Self::SearchBackward(PathMatcher::parse(required(key, rest)?)?),
            _ => return Err(CommandError::Unknown(input.to_string())),
        };
        Ok(command)
    }
}

fn required(key: char, arg: &str) -> Result<&str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(key))
    } else {
        Ok(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Command {
        input.parse().unwrap()
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(parse("j"), Command::Next);
        assert_eq!(parse(""), Command::Next);
        assert_eq!(parse("\n"), Command::Next);
        assert_eq!(parse("k"), Command::Prev);
        assert_eq!(parse("g"), Command::First);
        assert_eq!(parse("G"), Command::Last);
        assert_eq!(parse("q\n"), Command::Quit);
    }

    #[test]
    fn test_jump() {
        assert_eq!(parse("#12"), Command::Jump(12));
        assert_eq!(parse("# 3"), Command::Jump(3));
        assert_eq!(parse("#-1"), Command::Jump(-1));
        assert_eq!(
            "#12a".parse::<Command>(),
            Err(CommandError::BadIndex("12a".to_string()))
        );
    }

    #[test]
    fn test_next_line() {
        assert_eq!(parse("l"), Command::SearchForward(Matcher::Kind(EventKind::Line)));
    }

    #[test]
    fn test_skip_and_search() {
        assert_eq!(parse("s gems/"), Command::Skip(PathMatcher::literal("gems/")));
        assert_eq!(
            parse("s /^lib/"),
            Command::Skip(PathMatcher::pattern("^lib").unwrap())
        );
        assert_eq!(parse("/app.rb"), Command::SearchForward(Matcher::from("app.rb")));
        assert_eq!(
            parse("/:block_call"),
            Command::SearchForward(Matcher::Kind(EventKind::BlockCall))
        );
        assert_eq!(
            parse("?app"),
            Command::SearchBackward(PathMatcher::literal("app"))
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!("s".parse::<Command>(), Err(CommandError::MissingArgument('s')));
        assert_eq!("/".parse::<Command>(), Err(CommandError::MissingArgument('/')));
        assert!(matches!("x".parse::<Command>(), Err(CommandError::Unknown(_))));
        assert!(matches!("jj".parse::<Command>(), Err(CommandError::Unknown(_))));
        assert!(matches!(
            "/:nope".parse::<Command>(),
            Err(CommandError::Matcher(TraceError::UnknownKind(_)))
        ));
    }
}
