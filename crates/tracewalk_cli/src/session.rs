//! Line-driven play loop over a navigator.

use crate::command::{Command, HELP};
use crate::report::write_tree;
use std::io::{self, BufRead, Write};
use tracewalk_nav::Navigator;

/// An interactive walk through one log
pub struct Session<W: Write> {
    nav: Navigator,
    name: String,
    out: W,
}

impl<W: Write> Session<W> {
    /// Create a session writing to `out`
    pub fn new(nav: Navigator, name: impl Into<String>, out: W) -> Self {
        Self {
            nav,
            name: name.into(),
            out,
        }
    }

    /// The navigator being driven
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// Consume and return the output
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Read commands from `input` until `q` or end of input
    ///
    /// # Errors
    ///
    /// Returns error if reading input or writing output fails
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.banner()?;
        self.show()?;
        for line in input.lines() {
            let line = line?;
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    self.apply(command)?;
                    self.show()?;
                }
                Err(err) => writeln!(self.out, "error: {}", err)?,
            }
        }
        self.out.flush()
    }

    /// Execute one command
    ///
    /// # Errors
    ///
    /// Returns error if writing output fails
    pub fn apply(&mut self, command: Command) -> io::Result<()> {
        tracing::debug!(?command, index = self.nav.index(), "play command");
        match command {
            Command::Next => {
                self.nav.step_forward();
            }
            Command::Prev => {
                self.nav.step_backward();
            }
            Command::First => {
                self.nav.to_first();
            }
            Command::Last => {
                self.nav.to_last();
            }
            Command::Jump(index) => {
                self.nav.jump_to(index);
            }
            Command::Skip(matcher) => {
                self.nav.skip_while(&matcher);
            }
            Command::SearchForward(matcher) => {
                self.nav.search_forward(matcher);
            }
            Command::SearchBackward(matcher) => {
                self.nav.search_backward(&matcher);
            }
            Command::Tree => {
                write_tree(&mut self.out, self.nav.prefix_traverse().with_depth())?;
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Redraw | Command::Quit => {}
        }
        Ok(())
    }

    fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "Information")?;
        writeln!(self.out, "  log-file {}", self.name)?;
        writeln!(self.out, "  num-logs {}", self.nav.len())?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", HELP)
    }

    fn show(&mut self) -> io::Result<()> {
        match self.nav.current() {
            Ok(event) => writeln!(self.out, "{}. {}", self.nav.index(), event),
            Err(err) => writeln!(self.out, "({})", err),
        }
    }
}
