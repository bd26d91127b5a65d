//! Progress bar for `sync` runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Creates the sync progress bar, or a hidden one when `enabled` is false.
pub(crate) fn sync_progress_bar(enabled: bool, total: usize) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{pos}/{len}] Downloading {msg}...")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
