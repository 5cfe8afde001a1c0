//! Tantivy Shortcut Store
//!
//! # Architecture
//!
//! ```text
//! Shortcut → TantivyDocument → IndexWriter (mutex) → commit → IndexReader.reload
//!                                                                  ↓
//!                                  find_exact / find_full_text ← Searcher
//! ```
//!
//! Readers never take the writer lock: a search runs against the last
//! reloaded segment set while a commit is in flight.

pub mod analyzer;
pub mod schema;

use std::path::Path;

use parking_lot::Mutex;
use tantivy::{
    collector::TopDocs,
    directory::MmapDirectory,
    doc,
    query::{Query, QueryParser, TermQuery},
    schema::{IndexRecordOption, Value},
    Index, IndexReader, IndexSettings, IndexWriter, ReloadPolicy, Searcher, TantivyDocument,
    Term,
};
use tracing::{debug, info, warn};

use crate::domain::{Shortcut, ShortcutStore};
use crate::error::{Result, ShortcutError};
use crate::index::IndexOptions;

use analyzer::{build_description_analyzer, DESCRIPTION_ANALYZER};
use schema::SchemaFields;

/// On-disk shortcut store backed by a tantivy index directory.
pub struct TantivyShortcutStore {
    index: Index,
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    fields: SchemaFields,
    max_results: usize,
}

impl TantivyShortcutStore {
    /// Open the index at `index_dir`, creating it if no index exists there.
    ///
    /// Every failure is reported as a `StoreInit` error.
    pub fn open(index_dir: &Path, options: &IndexOptions) -> Result<Self> {
        std::fs::create_dir_all(index_dir).map_err(|e| {
            ShortcutError::store_init(format!(
                "Failed to create index dir {}: {}",
                index_dir.display(),
                e
            ))
            .with_source(e)
        })?;

        let directory = MmapDirectory::open(index_dir).map_err(|e| {
            ShortcutError::store_init(format!("Failed to open index dir: {}", e)).with_source(e)
        })?;

        let exists = Index::exists(&directory).map_err(|e| {
            ShortcutError::store_init(format!("Failed to inspect index dir: {}", e)).with_source(e)
        })?;

        let index = if exists {
            info!(path = %index_dir.display(), "Opening existing shortcut index");
            Index::open(directory).map_err(|e| {
                ShortcutError::store_init(format!("Failed to open index: {}", e)).with_source(e)
            })?
        } else {
            info!(path = %index_dir.display(), "Creating shortcut index");
            Index::create(
                directory,
                SchemaFields::build().schema,
                IndexSettings::default(),
            )
            .map_err(|e| {
                ShortcutError::store_init(format!("Failed to create index: {}", e)).with_source(e)
            })?
        };

        Self::from_index(index, options)
    }

    /// Wrap an index held in RAM. Nothing is persisted.
    pub fn in_memory(options: &IndexOptions) -> Result<Self> {
        let index = Index::create_in_ram(SchemaFields::build().schema);
        Self::from_index(index, options)
    }

    fn from_index(index: Index, options: &IndexOptions) -> Result<Self> {
        let fields = SchemaFields::from_schema(index.schema()).map_err(|e| {
            ShortcutError::store_init(format!("Index schema is not a shortcut schema: {}", e))
                .with_source(e)
        })?;

        // Tokenizers are not persisted with the index
        index
            .tokenizers()
            .register(DESCRIPTION_ANALYZER, build_description_analyzer());

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e: tantivy::TantivyError| {
                ShortcutError::store_init(format!("Failed to create reader: {}", e)).with_source(e)
            })?;

        let writer = index
            .writer_with_num_threads(1, options.writer_heap_bytes)
            .map_err(|e| {
                ShortcutError::store_init(format!("Failed to create writer: {}", e)).with_source(e)
            })?;

        Ok(Self {
            index,
            reader,
            writer: Mutex::new(writer),
            fields,
            max_results: options.max_results.max(1),
        })
    }

    /// Number of live documents visible to readers.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    fn build_document(&self, shortcut: &Shortcut) -> TantivyDocument {
        doc!(
            self.fields.short_form => shortcut.short_form.clone(),
            self.fields.url => shortcut.url.clone(),
            self.fields.description => shortcut.description.clone(),
        )
    }

    fn collect(&self, searcher: &Searcher, query: &dyn Query) -> Result<Vec<Shortcut>> {
        let top_docs = searcher
            .search(query, &TopDocs::with_limit(self.max_results))
            .map_err(|e| ShortcutError::search(format!("Search failed: {}", e)).with_source(e))?;

        let mut shortcuts = Vec::with_capacity(top_docs.len());
        for (_score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| {
                ShortcutError::search(format!("Failed to retrieve doc: {}", e)).with_source(e)
            })?;
            shortcuts.push(self.to_shortcut(&doc));
        }
        Ok(shortcuts)
    }

    fn to_shortcut(&self, doc: &TantivyDocument) -> Shortcut {
        let text = |field| {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Shortcut {
            short_form: text(self.fields.short_form),
            url: text(self.fields.url),
            description: text(self.fields.description),
        }
    }
}

impl ShortcutStore for TantivyShortcutStore {
    /// Upsert: any previous document with the same alias is deleted in the
    /// same commit.
    fn put(&self, shortcut: &Shortcut) -> Result<()> {
        let document = self.build_document(shortcut);
        let key = Term::from_field_text(self.fields.short_form, &shortcut.short_form);

        let mut writer = self.writer.lock();
        writer.delete_term(key);
        if let Err(e) = writer.add_document(document) {
            let _ = writer.rollback();
            return Err(
                ShortcutError::write(format!("Failed to add document: {}", e)).with_source(e)
            );
        }
        if let Err(e) = writer.commit() {
            let _ = writer.rollback();
            return Err(ShortcutError::write(format!("Failed to commit: {}", e)).with_source(e));
        }
        drop(writer);

        // The commit is durable; a failed reload only delays visibility
        if let Err(e) = self.reader.reload() {
            warn!(error = %e, "Reader reload after commit failed");
        }
        Ok(())
    }

    fn find_exact(&self, short_form: &str) -> Result<Vec<Shortcut>> {
        let searcher = self.reader.searcher();
        let query = TermQuery::new(
            Term::from_field_text(self.fields.short_form, short_form),
            IndexRecordOption::Basic,
        );
        self.collect(&searcher, &query)
    }

    fn find_full_text(&self, query: &str) -> Result<Vec<Shortcut>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();
        let query_parser = QueryParser::for_index(&self.index, self.fields.all());

        // User text is not query syntax: keep whatever parses
        let (parsed_query, errors) = query_parser.parse_query_lenient(query);
        if !errors.is_empty() {
            debug!(query, ?errors, "Lenient query parse dropped clauses");
        }

        self.collect(&searcher, parsed_query.as_ref())
    }
}
