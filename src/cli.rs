// Command-line interface.
// `-c` refreshes the cache from upstream; `-g` greps release notes.

use std::path::PathBuf;

use clap::Parser;

use crate::search::NotesSource;

/// Fetch, cache, and grep HashiCorp release notes.
///
/// Examples:
///   horn -c                 idempotently fetch all release notes
///   horn -g "un-failing"    list releases whose notes contain the string
#[derive(Debug, Parser)]
#[command(name = "horn", version, about)]
pub struct Cli {
    /// Check all tool releases and fetch notes for new ones
    #[arg(short = 'c', long = "check")]
    pub check: bool,

    /// Search for a literal pattern in release notes
    #[arg(short = 'g', long = "grep", value_name = "PATTERN")]
    pub grep: Option<String>,

    /// Search cached notes only, without re-fetching
    #[arg(long, requires = "grep")]
    pub cached: bool,

    /// Cache root (default: ~/.horn)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Config file (default: platform config dir, horn/config.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn notes_source(&self) -> NotesSource {
        if self.cached {
            NotesSource::Cache
        } else {
            NotesSource::Network
        }
    }
}
