//! Sequential fetch-classify-persist pipeline
//!
//! [`FetchCollector`] walks indices `1..=image_count`, requests
//! `base_url + index + url_suffix` through an [`ImageSource`], names each page
//! from its declared content type and writes it to the output directory.
//! Every index ends up in exactly one bucket of the [`FetchReport`]:
//! saved, failed, or unsupported content type.

mod collector;
pub mod http;
mod progress;
mod store;
mod types;

pub use collector::FetchCollector;
pub use http::{DownloadError, FetchedResponse, HttpClient, HttpConfig, ImageSource};
pub use progress::{ProgressSink, SilentProgress};
pub use store::ImageStore;
pub use types::{
    FailureReason, FetchConfig, FetchOutcome, FetchReport, FetchStatus, UnsupportedPage,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole run
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Cannot prepare output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FetchError>;
