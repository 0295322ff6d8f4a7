use super::path::is_safe_filename;
use super::types::{FileError, FileInfo};

use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Flat directory of uploaded files.
///
/// Every operation that takes a filename checks it with `is_safe_filename`
/// before touching the disk, so nothing outside `root` is ever reached.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the upload directory (and parents) if it does not exist.
    pub async fn ensure_dir(&self) -> Result<(), FileError> {
        match fs::create_dir_all(&self.root).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists regular files in the upload directory, sorted by name.
    pub async fn list(&self) -> Result<Vec<FileInfo>, FileError> {
        let mut files = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            files.push(FileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
                created: metadata.created().ok().map(DateTime::<Utc>::from),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, FileError> {
        let path = self.existing_file(name).await?;
        fs::read(&path)
            .await
            .map_err(|e| not_found_or_io(e, name))
    }

    /// Writes (or replaces) a file and returns the number of bytes stored.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<u64, FileError> {
        let path = self.resolve(name)?;
        fs::write(&path, contents).await?;
        Ok(contents.len() as u64)
    }

    pub async fn delete(&self, name: &str) -> Result<(), FileError> {
        let path = self.existing_file(name).await?;
        fs::remove_file(&path)
            .await
            .map_err(|e| not_found_or_io(e, name))
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, FileError> {
        if name.is_empty() || !is_safe_filename(name) {
            return Err(FileError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    async fn existing_file(&self, name: &str) -> Result<PathBuf, FileError> {
        let path = self.resolve(name)?;
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(path),
            Ok(_) => Err(FileError::NotFound(name.to_string())),
            Err(e) => Err(not_found_or_io(e, name)),
        }
    }
}

fn not_found_or_io(err: std::io::Error, name: &str) -> FileError {
    if err.kind() == ErrorKind::NotFound {
        FileError::NotFound(name.to_string())
    } else {
        FileError::Io(err)
    }
}
