//! Shortcut resolution core
//!
//! Maps short aliases ("shortforms") to full URLs, persisted in a tantivy
//! index. Lookups try an exact alias match first and fall back to full-text
//! search over every stored field.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shortlink_core::{IndexOptions, Shortcut, ShortcutIndex};
//!
//! let index = ShortcutIndex::open("links.tantivy", IndexOptions::default())?;
//!
//! // 1. Add (URL is normalized: "reddit.com" → "http://reddit.com")
//! let url = index.add_shortcut(
//!     Shortcut::new("red", "reddit.com").with_description("The front page of the internet"),
//! )?;
//!
//! // 2. Exact alias → sole result
//! let found = index.find_shortcut("red")?;
//! assert_eq!(found.redirect_target(), Some(url.as_str()));
//!
//! // 3. No such alias → full-text matches, sole == false
//! let found = index.find_shortcut("internet")?;
//! assert!(!found.sole);
//! # Ok::<(), shortlink_core::ShortcutError>(())
//! ```

pub mod domain;
pub mod error;
pub mod index;
pub mod infrastructure;
pub mod normalize;

pub use domain::{
    FindResult, Shortcut, ShortcutStore, FIELD_DESCRIPTION, FIELD_SHORT_FORM, FIELD_URL,
};
pub use error::{ErrorKind, Result, ShortcutError};
pub use index::{IndexOptions, ShortcutIndex};
pub use infrastructure::TantivyShortcutStore;
pub use normalize::{normalize_url, DEFAULT_SCHEME};
