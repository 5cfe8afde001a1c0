//! Domain layer for the shortcut index
//!
//! # Domain Models
//!
//! - `Shortcut`: alias → URL mapping with optional free-text description
//! - `FindResult`: outcome of a two-tier lookup
//!
//! # Port Trait
//!
//! - `ShortcutStore`: durable, searchable document store behind the index
//!
//! # Examples
//!
//! ```rust
//! use shortlink_core::domain::Shortcut;
//!
//! let shortcut = Shortcut::new("red", "reddit.com")
//!     .with_description("The front page of the internet");
//! assert_eq!(shortcut.short_form, "red");
//! ```

use serde::{Deserialize, Serialize};

use crate::Result;

// Field names shared by the store schema, templates and form handling.
pub const FIELD_SHORT_FORM: &str = "shortForm";
pub const FIELD_URL: &str = "url";
pub const FIELD_DESCRIPTION: &str = "description";

// ═══════════════════════════════════════════════════════════════════════════
// Domain Models
// ═══════════════════════════════════════════════════════════════════════════

/// A mapping from a short alias to a full URL.
///
/// `url` is stored normalized (see [`crate::normalize_url`]); `description` is
/// only used for full-text matching and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    /// Alias typed by the user
    pub short_form: String,
    /// Target URL
    pub url: String,
    /// Free text for fuzzy lookups
    #[serde(default)]
    pub description: String,
}

impl Shortcut {
    pub fn new(short_form: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            short_form: short_form.into(),
            url: url.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Result of [`crate::ShortcutIndex::find_shortcut`].
///
/// `sole` is true only when the alias matched exactly; fuzzy matches are
/// returned in engine relevance order with `sole == false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FindResult {
    pub shortcuts: Vec<Shortcut>,
    pub sole: bool,
}

impl FindResult {
    pub fn exact(shortcuts: Vec<Shortcut>) -> Self {
        Self {
            shortcuts,
            sole: true,
        }
    }

    pub fn fuzzy(shortcuts: Vec<Shortcut>) -> Self {
        Self {
            shortcuts,
            sole: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    /// URL to redirect to, present only for an exact alias match.
    pub fn redirect_target(&self) -> Option<&str> {
        if self.sole {
            self.shortcuts.first().map(|s| s.url.as_str())
        } else {
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Durable document store for shortcuts.
///
/// Implementations do their own internal locking: `put` must not block
/// concurrent `find_*` calls, and a find running alongside a put may observe
/// either the old or the new state.
pub trait ShortcutStore: Send + Sync {
    /// Write a single document keyed by `short_form`. The newest write for a
    /// key is the one returned by `find_exact`.
    fn put(&self, shortcut: &Shortcut) -> Result<()>;

    /// Documents whose alias equals `short_form` exactly.
    fn find_exact(&self, short_form: &str) -> Result<Vec<Shortcut>>;

    /// Full-text search over every field, best match first.
    fn find_full_text(&self, query: &str) -> Result<Vec<Shortcut>>;
}
