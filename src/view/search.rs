//! Search input handling: keystroke debouncing and persistence of the
//! committed search term.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Quiet period after the last keystroke before a search is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces rapid input into one committed term. Last write wins.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<String>,
    last_input: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_input: None,
        }
    }

    pub fn push(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some(term.into());
        self.last_input = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the latest term once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let last = self.last_input?;
        if now.saturating_duration_since(last) < self.delay {
            return None;
        }
        self.last_input = None;
        self.pending.take()
    }

    /// Time left until [`Debouncer::poll`] would fire.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.last_input
            .map(|last| self.delay.saturating_sub(now.saturating_duration_since(last)))
    }

    /// Take the pending term immediately.
    pub fn flush(&mut self) -> Option<String> {
        self.last_input = None;
        self.pending.take()
    }
}

/// A place the committed search term is remembered.
pub trait TermStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, term: &str) -> Result<()>;
}

/// In-memory store; stands in for a URL query parameter.
#[derive(Debug, Clone, Default)]
pub struct MemoryTermStore {
    value: Option<String>,
}

impl MemoryTermStore {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }
}

impl TermStore for MemoryTermStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, term: &str) -> Result<()> {
        self.value = Some(term.to_string());
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSearch {
    search: String,
}

/// Search term kept in a small JSON file between runs.
#[derive(Debug, Clone)]
pub struct FileTermStore {
    path: Utf8PathBuf,
}

impl FileTermStore {
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read(&self) -> Result<StoredSearch> {
        let text = std::fs::read_to_string(self.path.as_std_path())
            .with_context(|| format!("Failed to read {}", self.path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON {}", self.path))
    }
}

impl TermStore for FileTermStore {
    fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        match self.read() {
            Ok(stored) => Some(stored.search),
            Err(e) => {
                log::warn!("Ignoring stored search term: {:#}", e);
                None
            }
        }
    }

    fn save(&mut self, term: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(&StoredSearch {
            search: term.to_string(),
        })?;
        std::fs::write(self.path.as_std_path(), json)
            .with_context(|| format!("Failed to write {}", self.path))
    }
}

/// Stores in precedence order: the first one holding a term provides the
/// initial term; every committed term is written to all of them.
#[derive(Default)]
pub struct TermStores {
    stores: Vec<Box<dyn TermStore>>,
}

impl TermStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, store: impl TermStore + 'static) -> Self {
        self.stores.push(Box::new(store));
        self
    }

    pub fn initial_term(&self) -> String {
        self.stores
            .iter()
            .find_map(|s| s.load())
            .unwrap_or_default()
    }

    pub fn persist_term(&mut self, term: &str) {
        for store in &mut self.stores {
            if let Err(e) = store.save(term) {
                log::warn!("Failed to persist search term: {:#}", e);
            }
        }
    }
}
