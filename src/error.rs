//! Error taxonomy for loading the catalog and interacting with rendered cards.

use thiserror::Error;

/// Failure while obtaining the dataset. Terminal for the process lifetime.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The dataset could not be fetched (missing file, I/O failure, ...).
    #[error("failed to load data: {0}")]
    Network(String),

    /// The dataset was fetched but its structure is malformed.
    #[error("failed to parse data: {0}")]
    Parse(String),
}

impl LoadError {
    /// Message shown to the user in a notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::Network(_) => "Failed to load data!",
            LoadError::Parse(_) => "Failed to parse data!",
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => LoadError::Network(err.to_string()),
            _ => LoadError::Parse(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard access denied: {0}")]
    Denied(String),

    #[error("clipboard not available")]
    Unavailable,
}

/// Invalid interaction with the rendered card set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("card {0} does not belong to the current render")]
    StaleCard(crate::view::CardId),

    #[error("card {0} is collapsed; its offsets table is not shown")]
    Collapsed(crate::view::CardId),

    #[error("pressure tab {index} out of range (card has {len} tabs)")]
    TabOutOfRange { index: usize, len: usize },

    #[error("table cell {column} out of range (table has {len} columns)")]
    CellOutOfRange { column: usize, len: usize },
}
