use serde::Serialize;
use std::path::PathBuf;

/// Immutable input for one collection run
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub image_count: u32,
    pub output_dir: PathBuf,
    /// Appended after the index when building the URL (e.g. `.jpg`, or empty)
    pub url_suffix: String,
    /// Width of the zero-padded index in filenames
    pub pad_width: usize,
    /// Extension used to name a failed page whose response declared no image type
    pub fallback_extension: String,
}

impl FetchConfig {
    pub fn url_for(&self, index: u32) -> String {
        format!("{}{}{}", self.base_url, index, self.url_suffix)
    }

    pub fn filename_for(&self, index: u32, extension: &str) -> String {
        format!("{:0width$}{}", index, extension, width = self.pad_width)
    }
}

/// Why a page was not obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// Server answered with a non-2xx status
    HttpStatus(u16),
    /// Request never produced a response (DNS, refused, timeout, ...)
    Transport(String),
    /// Response was fine but the file could not be written
    Write(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    Saved,
    Failed { reason: FailureReason },
    UnsupportedType { content_type: Option<String> },
}

/// Result of processing a single index
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome {
    pub index: u32,
    pub url: String,
    #[serde(flatten)]
    pub status: FetchStatus,
    /// Present iff the page was saved
    pub saved_path: Option<PathBuf>,
    pub extension: Option<String>,
}

impl FetchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self.status, FetchStatus::Saved)
    }
}

/// Page skipped because its content type has no extension mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedPage {
    pub index: u32,
    pub url: String,
    pub content_type: Option<String>,
}

/// Final tally of a run
///
/// Every requested index lands in exactly one bucket:
/// `saved_count + failed_filenames.len() + unsupported.len() == requested`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchReport {
    pub requested: u32,
    pub saved_count: u32,
    /// Nominal filenames of pages that were not obtained, ascending by index
    pub failed_filenames: Vec<String>,
    pub unsupported: Vec<UnsupportedPage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<FetchOutcome>,
}

impl FetchReport {
    pub fn new(requested: u32) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    pub fn failed_count(&self) -> usize {
        self.failed_filenames.len()
    }

    pub fn unsupported_count(&self) -> usize {
        self.unsupported.len()
    }

    /// All requested pages were saved
    pub fn is_complete(&self) -> bool {
        self.saved_count == self.requested
    }

    pub(crate) fn record(&mut self, outcome: FetchOutcome, nominal_name: Option<String>) {
        match &outcome.status {
            FetchStatus::Saved => self.saved_count += 1,
            FetchStatus::Failed { .. } => {
                if let Some(name) = nominal_name {
                    self.failed_filenames.push(name);
                }
            }
            FetchStatus::UnsupportedType { content_type } => {
                self.unsupported.push(UnsupportedPage {
                    index: outcome.index,
                    url: outcome.url.clone(),
                    content_type: content_type.clone(),
                });
            }
        }
        self.outcomes.push(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> FetchConfig {
        FetchConfig {
            base_url: "https://example.com/ch1/".to_string(),
            image_count: 12,
            output_dir: PathBuf::from("out"),
            url_suffix: ".jpg".to_string(),
            pad_width: 3,
            fallback_extension: ".jpg".to_string(),
        }
    }

    #[test]
    fn test_url_for() {
        let config = sample_config();
        assert_eq!(config.url_for(7), "https://example.com/ch1/7.jpg");

        let bare = FetchConfig {
            url_suffix: String::new(),
            ..config
        };
        assert_eq!(bare.url_for(12), "https://example.com/ch1/12");
    }

    #[test]
    fn test_filename_for() {
        let config = sample_config();
        assert_eq!(config.filename_for(7, ".jpg"), "007.jpg");
        assert_eq!(config.filename_for(42, ".png"), "042.png");
        assert_eq!(config.filename_for(1234, ".gif"), "1234.gif");
    }

    #[test]
    fn test_report_buckets() {
        let mut report = FetchReport::new(3);

        report.record(
            FetchOutcome {
                index: 1,
                url: "u1".to_string(),
                status: FetchStatus::Saved,
                saved_path: Some(PathBuf::from("out/001.jpg")),
                extension: Some(".jpg".to_string()),
            },
            None,
        );
        report.record(
            FetchOutcome {
                index: 2,
                url: "u2".to_string(),
                status: FetchStatus::Failed {
                    reason: FailureReason::HttpStatus(404),
                },
                saved_path: None,
                extension: Some(".jpg".to_string()),
            },
            Some("002.jpg".to_string()),
        );
        report.record(
            FetchOutcome {
                index: 3,
                url: "u3".to_string(),
                status: FetchStatus::UnsupportedType {
                    content_type: Some("text/html".to_string()),
                },
                saved_path: None,
                extension: None,
            },
            None,
        );

        assert_eq!(report.saved_count, 1);
        assert_eq!(report.failed_filenames, vec!["002.jpg"]);
        assert_eq!(report.unsupported_count(), 1);
        assert_eq!(report.outcomes.len(), 3);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_serializes_status_tags() {
        let outcome = FetchOutcome {
            index: 2,
            url: "u2".to_string(),
            status: FetchStatus::Failed {
                reason: FailureReason::HttpStatus(500),
            },
            saved_path: None,
            extension: Some(".png".to_string()),
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["reason"]["kind"], "http_status");
        assert_eq!(value["reason"]["detail"], 500);
    }
}
