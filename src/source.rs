//! Dataset source abstraction: a file on disk or text already in memory.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local};

use crate::error::LoadError;

/// Where the injector dataset comes from.
pub trait DataSource {
    /// Fetch the raw dataset bytes. Transport failures are [`LoadError::Network`];
    /// decoding is left to the caller.
    fn read_dataset(&mut self) -> Result<Vec<u8>, LoadError>;

    /// Human-readable "last updated" date of the dataset (decorative).
    fn last_updated(&mut self) -> Result<String>;
}

/// Reads the dataset from a JSON file.
pub struct FsSource {
    path: Utf8PathBuf,
}

impl FsSource {
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl DataSource for FsSource {
    fn read_dataset(&mut self) -> Result<Vec<u8>, LoadError> {
        std::fs::read(self.path.as_std_path())
            .map_err(|e| LoadError::Network(format!("{}: {}", self.path, e)))
    }

    fn last_updated(&mut self) -> Result<String> {
        let modified = std::fs::metadata(self.path.as_std_path())
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to read modification time of {}", self.path))?;
        let date: DateTime<Local> = modified.into();
        Ok(date.format("%Y-%m-%d").to_string())
    }
}

/// Dataset text held in memory, e.g. embedded at build time.
pub struct StaticSource {
    text: String,
    updated: Option<String>,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            updated: None,
        }
    }

    pub fn with_last_updated(mut self, updated: impl Into<String>) -> Self {
        self.updated = Some(updated.into());
        self
    }
}

impl DataSource for StaticSource {
    fn read_dataset(&mut self) -> Result<Vec<u8>, LoadError> {
        Ok(self.text.as_bytes().to_vec())
    }

    fn last_updated(&mut self) -> Result<String> {
        self.updated
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No last-updated date for in-memory dataset"))
    }
}
