//! CLI command routing: runs the List, Download, and Sync subcommands.
//!
//! This is the call site that composes the listing and download clients;
//! the library itself never feeds one into the other.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use workbook_dl::{ClientConfig, DownloadError, Workbook, WorkbookDownloader, WorkbookLister};

use super::ProcessExit;
use super::exit_handler::{SyncStats, determine_exit_outcome};
use super::progress_manager::sync_progress_bar;
use crate::cli::Command;

/// Runs `command` against the platform described by `config`.
pub(crate) async fn run(command: Command, config: &ClientConfig, quiet: bool) -> Result<ProcessExit> {
    match command {
        Command::List { username, json } => {
            let lister = WorkbookLister::with_config(config)?;
            run_list(&lister, &username, json).await
        }
        Command::Download {
            repository_id,
            output_dir,
        } => {
            let downloader = WorkbookDownloader::with_config(config)?;
            run_download(&downloader, &repository_id, &output_dir).await
        }
        Command::Sync {
            username,
            output_dir,
            no_progress,
        } => {
            let lister = WorkbookLister::with_config(config)?;
            let downloader = WorkbookDownloader::with_config(config)?;
            let show_progress = !no_progress && !quiet && std::io::stderr().is_terminal();
            run_sync(&lister, &downloader, &username, &output_dir, show_progress).await
        }
    }
}

async fn run_list(lister: &WorkbookLister, username: &str, json: bool) -> Result<ProcessExit> {
    match lister.list_all_workbooks(username).await {
        Ok(workbooks) => {
            print_workbooks(&workbooks, json)?;
            Ok(ProcessExit::Success)
        }
        Err(list_error) => {
            // Print what arrived before the failing page, then report the failure.
            print_workbooks(list_error.partial(), json)?;
            Err(list_error).with_context(|| format!("failed to list workbooks for '{username}'"))
        }
    }
}

fn print_workbooks(workbooks: &[Workbook], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(workbooks)?);
    } else {
        for workbook in workbooks {
            println!("{}", format_workbook_line(workbook));
        }
    }
    Ok(())
}

fn format_workbook_line(workbook: &Workbook) -> String {
    format!(
        "{}\t{}\t{}",
        workbook.repository_id(),
        workbook.size_bytes(),
        workbook.title()
    )
}

async fn run_download(
    downloader: &WorkbookDownloader,
    repository_id: &str,
    output_dir: &Path,
) -> Result<ProcessExit> {
    match downloader.download_workbook(repository_id, output_dir).await {
        Ok(path) => {
            println!("{}", path.display());
            Ok(ProcessExit::Success)
        }
        Err(download_error) if download_error.is_not_found() => {
            error!(repository_id, "{download_error}");
            Ok(ProcessExit::NotFound)
        }
        Err(download_error) => Err(download_error)
            .with_context(|| format!("failed to download workbook '{repository_id}'")),
    }
}

async fn run_sync(
    lister: &WorkbookLister,
    downloader: &WorkbookDownloader,
    username: &str,
    output_dir: &Path,
    show_progress: bool,
) -> Result<ProcessExit> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("failed to create output directory '{}'", output_dir.display()))?;

    let mut stats = SyncStats::default();
    let workbooks = match lister.list_all_workbooks(username).await {
        Ok(workbooks) => {
            stats.listing_complete = true;
            workbooks
        }
        Err(list_error) => {
            let (kind, partial) = list_error.into_parts();
            warn!(
                error = %kind,
                received = partial.len(),
                "listing incomplete; downloading the workbooks received so far"
            );
            partial
        }
    };
    info!(username, total = workbooks.len(), "syncing workbooks");

    let progress = sync_progress_bar(show_progress, workbooks.len());
    for workbook in &workbooks {
        let repository_id = workbook.repository_id();
        progress.set_message(repository_id.to_string());

        match downloader.download_workbook(repository_id, output_dir).await {
            Ok(path) => {
                stats.downloaded += 1;
                debug!(repository_id, path = %path.display(), "synced workbook");
            }
            Err(download_error) if download_error.is_not_found() => {
                stats.not_found += 1;
                progress.suspend(|| {
                    warn!(repository_id, "workbook not available for download; skipping");
                });
            }
            Err(DownloadError::UnsafeRepositoryId { .. }) => {
                stats.not_found += 1;
                progress.suspend(|| {
                    warn!(repository_id, "listed identifier is not a safe file name; skipping");
                });
            }
            Err(download_error) => {
                progress.finish_and_clear();
                return Err(download_error)
                    .with_context(|| format!("failed to download workbook '{repository_id}'"));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    info!(
        downloaded = stats.downloaded,
        not_found = stats.not_found,
        listing_complete = stats.listing_complete,
        "sync complete"
    );

    Ok(determine_exit_outcome(stats))
}

#[cfg(test)]
mod tests {
    use super::format_workbook_line;
    use workbook_dl::Workbook;

    #[test]
    fn test_format_workbook_line_is_tab_separated() {
        let workbook: Workbook = serde_json::from_value(serde_json::json!({
            "workbookRepoUrl": "Superstore",
            "size": 1024,
            "title": "Superstore Sales"
        }))
        .unwrap();

        assert_eq!(
            format_workbook_line(&workbook),
            "Superstore\t1024\tSuperstore Sales"
        );
    }
}
