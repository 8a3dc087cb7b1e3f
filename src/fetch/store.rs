//! Local persistence of fetched pages

use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output directory writer
///
/// All page writes go through [`ImageStore::save`]. Existing files with the
/// same name are replaced without warning.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directory if it is missing
    ///
    /// Returns `true` when the directory had to be created.
    pub async fn ensure_root(&self) -> io::Result<bool> {
        if tokio::fs::try_exists(&self.root).await? {
            if !tokio::fs::metadata(&self.root).await?.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} exists and is not a directory", self.root.display()),
                ));
            }
            return Ok(false);
        }

        tokio::fs::create_dir_all(&self.root).await?;
        info!(path = %self.root.display(), "Created directory");
        Ok(true)
    }

    /// Write `data` as `filename` under the root
    pub async fn save(&self, filename: &str, data: &[u8]) -> io::Result<PathBuf> {
        let path = self.root.join(filename);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }
}
