use std::sync::Arc;
use tracing::{error, info, warn};

use super::http::{FetchedResponse, ImageSource};
use super::progress::{ProgressSink, SilentProgress};
use super::store::ImageStore;
use super::types::{FailureReason, FetchConfig, FetchOutcome, FetchReport, FetchStatus};
use super::{FetchError, Result};
use crate::content_type::classify_header;

/// Sequential page collector
///
/// Requests indices `1..=image_count` strictly in order, one request at a
/// time. Per-index problems are recorded in the report; only failing to
/// prepare the output directory aborts the run.
pub struct FetchCollector<S> {
    config: FetchConfig,
    source: S,
    store: ImageStore,
    progress: Arc<dyn ProgressSink>,
}

impl<S: ImageSource> FetchCollector<S> {
    pub fn new(config: FetchConfig, source: S) -> Self {
        let store = ImageStore::new(config.output_dir.clone());
        Self {
            config,
            source,
            store,
            progress: Arc::new(SilentProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch every page and return the tally
    pub async fn run(&self) -> Result<FetchReport> {
        let total = self.config.image_count;

        self.store
            .ensure_root()
            .await
            .map_err(|source| FetchError::OutputDir {
                path: self.config.output_dir.clone(),
                source,
            })?;

        let mut report = FetchReport::new(total);
        self.progress.on_progress(0, total);

        for index in 1..=total {
            let (outcome, nominal_name) = self.fetch_one(index).await;
            report.record(outcome, nominal_name);
            self.progress.on_progress(index, total);
        }

        Ok(report)
    }

    /// Process one index; never fails
    ///
    /// Returns the outcome plus the nominal filename to list when the page
    /// counts as failed.
    async fn fetch_one(&self, index: u32) -> (FetchOutcome, Option<String>) {
        let url = self.config.url_for(index);

        let response = match self.source.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(index, url = %url, error = %e, "Failed to fetch image");
                let name = self
                    .config
                    .filename_for(index, &self.config.fallback_extension);
                let outcome = FetchOutcome {
                    index,
                    url,
                    status: FetchStatus::Failed {
                        reason: FailureReason::Transport(e.to_string()),
                    },
                    saved_path: None,
                    extension: None,
                };
                return (outcome, Some(name));
            }
        };

        self.classify_and_persist(index, url, response).await
    }

    async fn classify_and_persist(
        &self,
        index: u32,
        url: String,
        response: FetchedResponse,
    ) -> (FetchOutcome, Option<String>) {
        let kind = classify_header(response.content_type.as_deref());
        let extension = kind.map(|k| k.extension().to_string());

        // Status decides failure before the content type is considered, so
        // error pages served as text/html are still counted as failures.
        if !response.status.is_success() {
            let ext = extension
                .as_deref()
                .unwrap_or(&self.config.fallback_extension);
            let name = self.config.filename_for(index, ext);
            warn!(
                index,
                url = %url,
                status = response.status.as_u16(),
                "Failed to fetch image"
            );
            let outcome = FetchOutcome {
                index,
                url,
                status: FetchStatus::Failed {
                    reason: FailureReason::HttpStatus(response.status.as_u16()),
                },
                saved_path: None,
                extension,
            };
            return (outcome, Some(name));
        }

        let Some(ext) = extension else {
            error!(
                index,
                url = %url,
                content_type = response.content_type.as_deref().unwrap_or(""),
                "Unexpected content type"
            );
            let outcome = FetchOutcome {
                index,
                url,
                status: FetchStatus::UnsupportedType {
                    content_type: response.content_type,
                },
                saved_path: None,
                extension: None,
            };
            return (outcome, None);
        };

        let name = self.config.filename_for(index, &ext);
        match self.store.save(&name, &response.body).await {
            Ok(path) => {
                info!(index, path = %path.display(), size = response.body.len(), "Image saved");
                let outcome = FetchOutcome {
                    index,
                    url,
                    status: FetchStatus::Saved,
                    saved_path: Some(path),
                    extension: Some(ext),
                };
                (outcome, None)
            }
            Err(e) => {
                error!(index, url = %url, file = %name, error = %e, "Failed to write image");
                let outcome = FetchOutcome {
                    index,
                    url,
                    status: FetchStatus::Failed {
                        reason: FailureReason::Write(e.to_string()),
                    },
                    saved_path: None,
                    extension: Some(ext),
                };
                (outcome, Some(name))
            }
        }
    }
}
