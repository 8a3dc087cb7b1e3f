use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{ArchiveError, Result};

/// Filename suffixes that qualify a file for the archive (case-sensitive)
pub const IMAGE_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg"];

/// `<dir>/<name>.cbz`
pub fn cbz_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.cbz", name))
}

/// What ended up in the archive
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Entry names in archive order
    pub entries: Vec<String>,
    /// Names seen more than once; the last file walked was kept
    pub replaced: Vec<String>,
}

/// Packs every image below a root directory into a flat ZIP
pub struct ArchiveBuilder {
    root: PathBuf,
}

impl ArchiveBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Collect qualifying files keyed by base filename
    ///
    /// Walks in ascending file-name order at every level, so when two
    /// subdirectories hold the same name, the lexically later path wins.
    fn collect(&self) -> Result<(BTreeMap<String, PathBuf>, Vec<String>)> {
        let mut members = BTreeMap::new();
        let mut replaced = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|source| ArchiveError::Walk {
                root: self.root.clone(),
                source,
            })?;

            if !entry.path().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                debug!(path = %entry.path().display(), "Skipping non UTF-8 filename");
                continue;
            };

            if !is_image_name(name) {
                continue;
            }

            if let Some(previous) = members.insert(name.to_string(), entry.path().to_path_buf()) {
                warn!(
                    entry = name,
                    replaced = %previous.display(),
                    by = %entry.path().display(),
                    "Duplicate archive entry, keeping last"
                );
                replaced.push(name.to_string());
            }
        }

        Ok((members, replaced))
    }

    /// Write a fresh archive at `archive_path`, replacing any existing file
    pub fn build(&self, archive_path: &Path) -> Result<ArchiveSummary> {
        let (members, replaced) = self.collect()?;

        let file = File::create(archive_path).map_err(|source| ArchiveError::Create {
            path: archive_path.to_path_buf(),
            source,
        })?;

        let mut writer = ZipWriter::new(BufWriter::new(file));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, path) in &members {
            let data = std::fs::read(path).map_err(|source| ArchiveError::Read {
                path: path.clone(),
                source,
            })?;
            writer.start_file(name.as_str(), options)?;
            writer.write_all(&data).map_err(|source| ArchiveError::Create {
                path: archive_path.to_path_buf(),
                source,
            })?;
        }

        let mut inner = writer.finish()?;
        inner.flush().map_err(|source| ArchiveError::Create {
            path: archive_path.to_path_buf(),
            source,
        })?;

        info!(path = %archive_path.display(), entries = members.len(), "CBZ file created");

        Ok(ArchiveSummary {
            path: archive_path.to_path_buf(),
            entries: members.into_keys().collect(),
            replaced,
        })
    }
}

fn is_image_name(name: &str) -> bool {
    IMAGE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
