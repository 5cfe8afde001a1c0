//! Shortcut Index: add and two-tier find
//!
//! # Resolution Policy
//!
//! ```text
//! query ──► exact tier (shortForm term) ──hits──► FindResult { sole: true }
//!               │
//!             no hits
//!               ▼
//!           fuzzy tier (full text, all fields) ──► FindResult { sole: false }
//! ```
//!
//! A store failure at either tier is returned as-is; there is no fallback
//! from a failed exact tier to the fuzzy tier.

use std::path::Path;
use std::sync::Arc;

use tantivy::tokenizer::MAX_TOKEN_LEN;
use tracing::{debug, info};

use crate::domain::{FindResult, Shortcut, ShortcutStore};
use crate::error::{Result, ShortcutError};
use crate::infrastructure::tantivy_store::TantivyShortcutStore;
use crate::normalize::normalize_url;

/// Tuning knobs for the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Maximum hits returned per tier
    pub max_results: usize,
    /// Writer memory budget in bytes
    pub writer_heap_bytes: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_results: 10,
            writer_heap_bytes: 50_000_000,
        }
    }
}

/// Searchable collection of shortcuts.
///
/// Cheap to clone: clones share the same store. Construct once at startup and
/// hand it to request handlers.
#[derive(Clone)]
pub struct ShortcutIndex {
    store: Arc<dyn ShortcutStore>,
}

impl ShortcutIndex {
    /// Open (or create) the on-disk index at `index_dir`.
    ///
    /// # Errors
    /// `StoreInit` when the directory or index cannot be created or opened.
    pub fn open(index_dir: impl AsRef<Path>, options: IndexOptions) -> Result<Self> {
        let store = TantivyShortcutStore::open(index_dir.as_ref(), &options)?;
        info!(
            path = %index_dir.as_ref().display(),
            documents = store.num_docs(),
            "Shortcut index ready"
        );
        Ok(Self::with_store(Arc::new(store)))
    }

    /// Build an index over any store implementation.
    pub fn with_store(store: Arc<dyn ShortcutStore>) -> Self {
        Self { store }
    }

    /// Normalize the URL, store the shortcut, and return the normalized URL.
    ///
    /// Re-adding an existing alias replaces it (last write wins); callers that
    /// want unique aliases check [`ShortcutIndex::contains`] first.
    pub fn add_shortcut(&self, mut shortcut: Shortcut) -> Result<String> {
        if shortcut.short_form.is_empty() {
            return Err(ShortcutError::invalid_input("shortForm cannot be empty"));
        }
        // Longer terms are dropped by the indexer and could never be looked up
        if shortcut.short_form.len() > MAX_TOKEN_LEN {
            return Err(ShortcutError::invalid_input(format!(
                "shortForm exceeds {} bytes",
                MAX_TOKEN_LEN
            )));
        }

        let normalized = normalize_url(&shortcut.url);
        shortcut.url = normalized.clone();

        self.store.put(&shortcut)?;
        info!(
            short_form = %shortcut.short_form,
            url = %normalized,
            "Stored shortcut"
        );
        Ok(normalized)
    }

    /// Resolve `query` as an alias, falling back to full-text search.
    pub fn find_shortcut(&self, query: &str) -> Result<FindResult> {
        let exact = self.store.find_exact(query)?;
        if !exact.is_empty() {
            return Ok(FindResult::exact(exact));
        }

        let fuzzy = self.store.find_full_text(query)?;
        debug!(query, hits = fuzzy.len(), "Alias not found, full-text fallback");
        Ok(FindResult::fuzzy(fuzzy))
    }

    /// True when `short_form` is already taken.
    pub fn contains(&self, short_form: &str) -> Result<bool> {
        Ok(!self.store.find_exact(short_form)?.is_empty())
    }
}
