//! Local filesystem storage implementation.
//!
//! Every save writes its own hidden temp file in the output directory and
//! persists it under the final name once complete. Concurrent saves of the
//! same name never share a temp file. An unpersisted temp file is removed
//! when it is dropped.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tempfile::NamedTempFile;

use crate::error::{AppError, Result};
use crate::storage::{FileSink, SavedFile};
use crate::utils::sanitize_filename;

/// Most numbered variants tried before giving up on a free name.
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    overwrite: bool,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            overwrite: true,
        }
    }

    /// Keep existing files and pick a numbered name instead.
    pub fn keep_existing(mut self) -> Self {
        self.overwrite = false;
        self
    }

    /// Set overwrite behavior explicitly.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

/// `Report.pdf` becomes `Report (1).pdf`, `Report (2).pdf`, ...
fn numbered_name(filename: &str, n: usize) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({n}).{ext}"),
        _ => format!("{filename} ({n})"),
    }
}

/// Write `bytes` to a fresh temp file in `root`.
fn write_temp(root: &Path, filename: &str, bytes: &[u8]) -> Result<NamedTempFile> {
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{filename}."))
        .suffix(".part")
        .tempfile_in(root)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    Ok(tmp)
}

/// Write and persist one file, returning the name it ended up under.
///
/// With `overwrite` the rename replaces any existing file. Otherwise each
/// candidate name is claimed with a no-clobber persist, so two concurrent
/// saves can never settle on the same name.
fn store(root: &Path, filename: &str, bytes: &[u8], overwrite: bool) -> Result<String> {
    let mut tmp = write_temp(root, filename, bytes)?;

    if overwrite {
        tmp.persist(root.join(filename)).map_err(|e| e.error)?;
        return Ok(filename.to_string());
    }

    for n in 0..=MAX_NAME_ATTEMPTS {
        let candidate = if n == 0 {
            filename.to_string()
        } else {
            numbered_name(filename, n)
        };
        match tmp.persist_noclobber(root.join(&candidate)) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => tmp = e.file,
            Err(e) => return Err(e.error.into()),
        }
    }
    Err(AppError::config(format!(
        "no free file name for {filename} in {}",
        root.display()
    )))
}

#[async_trait]
impl FileSink for LocalStorage {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<SavedFile> {
        let filename = sanitize_filename(filename)
            .ok_or_else(|| AppError::validation(format!("invalid file name '{filename}'")))?;

        tokio::fs::create_dir_all(&self.root_dir).await?;

        let root = self.root_dir.clone();
        let data = bytes.to_vec();
        let overwrite = self.overwrite;
        let filename =
            tokio::task::spawn_blocking(move || store(&root, &filename, &data, overwrite))
                .await
                .map_err(|e| AppError::Io(std::io::Error::other(e)))??;

        let path = self.root_dir.join(&filename);
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        Ok(SavedFile {
            filename,
            location: path.display().to_string(),
            length: bytes.len(),
            saved_at: Utc::now(),
        })
    }
}
