//! Text analysis for shortcut descriptions
//!
//! # Pipeline
//!
//! 1. **SimpleTokenizer**: split on non-alphanumeric characters
//! 2. **RemoveLongFilter**: drop tokens over 40 bytes (base64 blobs, hashes)
//! 3. **LowerCaser**: case-insensitive search
//! 4. **StopWordFilter**: drop English function words ("of", "the", ...)
//! 5. **Stemmer**: English stemming ("pages" → "page")
//!
//! Aliases are *not* analyzed: the `shortForm` field uses tantivy's built-in
//! `raw` tokenizer so that exact lookups match the whole alias verbatim.

use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter,
    TextAnalyzer,
};

/// Name under which the description analyzer is registered on the index.
pub const DESCRIPTION_ANALYZER: &str = "shortcut_text";

/// Name of tantivy's built-in single-token tokenizer.
pub const KEYWORD_TOKENIZER: &str = "raw";

const MAX_TOKEN_BYTES: usize = 40;

// Lucene's English stop set.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Build the analyzer used for the `description` field and for the
/// description side of full-text queries.
pub fn build_description_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_BYTES))
        .filter(LowerCaser)
        .filter(StopWordFilter::remove(
            ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()),
        ))
        .filter(Stemmer::new(Language::English))
        .build()
}
