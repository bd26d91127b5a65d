//! Exit code logic for the `sync` command.

use super::ProcessExit;

/// Counts collected while syncing a user's workbooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SyncStats {
    /// Workbooks written to disk.
    pub downloaded: usize,
    /// Listed workbooks skipped: missing on the export endpoint or named
    /// with an identifier unusable as a file name.
    pub not_found: usize,
    /// Whether the listing reached its final short page.
    pub listing_complete: bool,
}

/// Determines the process exit outcome from sync counts.
pub(crate) fn determine_exit_outcome(stats: SyncStats) -> ProcessExit {
    if stats.listing_complete && stats.not_found == 0 {
        ProcessExit::Success
    } else if stats.downloaded > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}
