//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use workbook_dl::config::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

/// List and download published Tableau Public workbooks.
#[derive(Parser, Debug)]
#[command(name = "workbook-dl")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Platform base URL (defaults to $WORKBOOK_DL_BASE_URL, then the public host)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, global = true, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: u64,

    /// HTTP request timeout in seconds, including body transfer (1-3600)
    #[arg(long, global = true, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every workbook published by a user
    List {
        /// Profile handle
        username: String,

        /// Print the listing as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Download a single workbook by repository identifier
    Download {
        /// Repository identifier (the `workbookRepoUrl` listing field)
        repository_id: String,

        /// Existing directory to write the workbook into
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Download every workbook published by a user
    Sync {
        /// Profile handle
        username: String,

        /// Directory to write workbooks into (created if missing)
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: PathBuf,

        /// Disable the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}
