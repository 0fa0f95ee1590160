//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "matchstats")]
#[command(about = "Collect per-player match statistics from rendered match pages", long_about = None)]
pub(crate) struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where pages come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProviderKind {
    /// Fetch pages over HTTP, re-fetching until the statistics are present
    Http,
    /// Render pages in headless Chrome (needs the `browser` feature)
    Browser,
    /// Read saved pages from a directory (`<match_id>.html`, `listing.html`)
    Snapshot,
}

/// How pages are loaded, shared by every command that opens pages.
#[derive(Args, Clone)]
pub(crate) struct SessionArgs {
    /// Page source (default: browser when built with it, otherwise http)
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Directory of saved pages for `--provider snapshot`
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,

    /// Seconds to wait for a page to become ready
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Options of an extraction run.
#[derive(Args, Clone)]
pub(crate) struct RunArgs {
    /// Number of parallel workers (one page session each)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Process only the first N identifiers
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output CSV of player records
    #[arg(short, long, default_value = "player_stats.csv")]
    pub output: PathBuf,

    /// Failure log CSV (default: <output stem>.failures.csv)
    #[arg(long)]
    pub failures: Option<PathBuf>,

    /// Milliseconds each worker waits between pages
    #[arg(long)]
    pub delay: Option<u64>,

    /// Do not write the periodic <output stem>.progress.csv checkpoint
    #[arg(long)]
    pub no_checkpoint: bool,

    /// Prefix the output CSV with a UTF-8 byte order mark (for Excel)
    #[arg(long)]
    pub excel_bom: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Collect match page identifiers from a listing page
    Discover {
        /// Listing page URL (default: listing_url from settings)
        #[arg(long)]
        listing_url: Option<String>,

        /// File to write identifiers to, one per line
        #[arg(short, long, default_value = "matches.txt")]
        output: PathBuf,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Extract player statistics for every identifier in a list
    Extract {
        /// Identifier list (one match URL or id per line, `#` comments allowed)
        #[arg(default_value = "matches.txt")]
        input: PathBuf,

        #[command(flatten)]
        run: RunArgs,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Discover identifiers, then extract them
    Run {
        /// Listing page URL (default: listing_url from settings)
        #[arg(long)]
        listing_url: Option<String>,

        /// File the discovered identifiers are written to
        #[arg(long, default_value = "matches.txt")]
        identifiers: PathBuf,

        #[command(flatten)]
        run: RunArgs,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,
    /// Print the settings file path
    Path,
    /// Write a settings file with the default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extract_arguments() {
        let cli = Cli::try_parse_from([
            "matchstats", "extract", "ids.txt", "-w", "2", "--limit", "5", "--provider", "snapshot",
            "--snapshot-dir", "pages",
        ])
        .unwrap();
        let Commands::Extract {
            input,
            run,
            session,
        } = cli.command
        else {
            panic!("expected extract");
        };
        assert_eq!(input, PathBuf::from("ids.txt"));
        assert_eq!(run.workers, Some(2));
        assert_eq!(run.limit, Some(5));
        assert_eq!(run.output, PathBuf::from("player_stats.csv"));
        assert_eq!(session.provider, Some(ProviderKind::Snapshot));
        assert_eq!(session.snapshot_dir, Some(PathBuf::from("pages")));
    }

    #[test]
    fn global_flags_after_the_subcommand() {
        let cli = Cli::try_parse_from(["matchstats", "config", "path", "--config", "alt.toml", "--quiet"])
            .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }
}
