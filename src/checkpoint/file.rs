//! File-backed checkpoint store

use crate::checkpoint::traits::{CheckpointError, CheckpointResult, CheckpointStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the watermark as the decimal string of one integer
#[derive(Debug, Clone)]
pub struct FileCheckpoint {
    path: PathBuf,
}

impl FileCheckpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_err(&self, source: std::io::Error) -> CheckpointError {
        CheckpointError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl CheckpointStore for FileCheckpoint {
    fn load(&self) -> Option<u64> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No checkpoint at {}", self.path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    "Unreadable checkpoint {}, treating as absent: {}",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        match content.trim().parse::<u64>() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(
                    "Corrupt checkpoint {} ({:?}), treating as absent: {}",
                    self.path.display(),
                    content.trim(),
                    e
                );
                None
            }
        }
    }

    fn save(&self, id: u64) -> CheckpointResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;
        }

        // Rename over the old file so readers never see a half-written id
        let temp = self.temp_path();
        fs::write(&temp, id.to_string()).map_err(|e| self.write_err(e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.write_err(e))?;

        tracing::debug!("Saved checkpoint {} to {}", id, self.path.display());
        Ok(())
    }

    fn clear(&self) -> CheckpointResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CheckpointError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
