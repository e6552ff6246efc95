//! tracewalk CLI
//!
//! Step through a recorded execution trace like a debugger, after the fact.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod discover;
mod report;
mod session;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use std::io;
use std::path::{Path, PathBuf};
use tracewalk_log::EventLog;
use tracewalk_nav::Navigator;
use tracing_subscriber::EnvFilter;

use crate::report::{Summary, write_tree};
use crate::session::Session;

#[derive(Parser)]
#[command(name = "tracewalk")]
#[command(about = "tracewalk - step through recorded execution traces", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a log interactively, one command per line
    Play {
        /// Path to log file (default: newest *.log here)
        log: Option<PathBuf>,
    },
    /// Summarize a log
    Inspect {
        /// Path to log file (default: newest *.log here)
        log: Option<PathBuf>,
    },
    /// Print the subtree rooted at an event
    Tree {
        /// Path to log file (default: newest *.log here)
        log: Option<PathBuf>,
        /// Event number to start from
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        at: isize,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play { log } => {
            let path = resolve_log(log)?;
            let nav = Navigator::open(&path)?;
            let stdin = io::stdin();
            let mut session = Session::new(nav, path.display().to_string(), io::stdout().lock());
            session.run(stdin.lock())?;
            tracing::debug!(index = session.navigator().index(), "play finished");
            Ok(())
        }
        Commands::Inspect { log } => {
            let path = resolve_log(log)?;
            let log = EventLog::open(&path)?;
            println!("log     {}", path.display());
            println!("{}", Summary::of(&log));
            Ok(())
        }
        Commands::Tree { log, at } => {
            let path = resolve_log(log)?;
            let mut nav = Navigator::open(&path)?;
            nav.jump_to(at);
            let written = write_tree(&mut io::stdout().lock(), nav.prefix_traverse().with_depth())?;
            tracing::debug!(written, end = nav.index(), "tree printed");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "tracewalk=debug" } else { "tracewalk=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn resolve_log(log: Option<PathBuf>) -> Result<PathBuf> {
    match log {
        Some(path) => Ok(path),
        None => discover::newest_log(Path::new("."))?
            .ok_or_else(|| eyre!("No log file provided or found!")),
    }
}
