//! Fetch then (optionally) package
//!
//! The collector and the archive builder know nothing about each other; this
//! module chains them the way the command line uses them.

use std::sync::Arc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::archive::{ArchiveBuilder, ArchiveError, ArchiveSummary};
use crate::config::Config;
use crate::fetch::{DownloadError, FetchCollector, FetchError, FetchReport, HttpClient, ProgressSink};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] DownloadError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("Archive task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub report: FetchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveSummary>,
}

/// Download all pages, log the results and build the CBZ if enabled
pub async fn run(config: &Config, progress: Arc<dyn ProgressSink>) -> Result<RunSummary> {
    let client = HttpClient::new(&config.http_config())?;
    let collector = FetchCollector::new(config.fetch_config(), client).with_progress(progress);

    let report = collector.run().await?;
    log_results(&report, config);

    let archive = match config.archive_path() {
        Some(path) => Some(build_archive(config.fetch.output_dir.clone(), path).await?),
        None => None,
    };

    Ok(RunSummary { report, archive })
}

/// Package `root` into `archive_path` on the blocking pool
pub async fn build_archive(
    root: std::path::PathBuf,
    archive_path: std::path::PathBuf,
) -> Result<ArchiveSummary> {
    let summary =
        tokio::task::spawn_blocking(move || ArchiveBuilder::new(root).build(&archive_path))
            .await??;
    Ok(summary)
}

fn log_results(report: &FetchReport, config: &Config) {
    info!(
        saved = report.saved_count,
        requested = report.requested,
        output_dir = %config.fetch.output_dir.display(),
        "{} of {} images downloaded to {}.",
        report.saved_count,
        report.requested,
        config.fetch.output_dir.display()
    );

    if !report.failed_filenames.is_empty() {
        info!("Failed downloads: {}", report.failed_filenames.join(", "));
    }

    for page in &report.unsupported {
        warn!(
            index = page.index,
            url = %page.url,
            content_type = page.content_type.as_deref().unwrap_or(""),
            "Skipped page with unsupported content type"
        );
    }
}
