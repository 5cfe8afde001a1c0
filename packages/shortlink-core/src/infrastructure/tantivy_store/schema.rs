//! Tantivy Schema Definition
//!
//! # 3-Field Schema
//!
//! 1. `shortForm` - Alias (STORED, keyword: one token, no analysis)
//! 2. `url` - Normalized target URL (STORED, default text analysis)
//! 3. `description` - Free text (STORED, description analyzer, positions)

use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, TEXT,
};

use super::analyzer::{DESCRIPTION_ANALYZER, KEYWORD_TOKENIZER};
use crate::domain::{FIELD_DESCRIPTION, FIELD_SHORT_FORM, FIELD_URL};

/// Field handles (resolved once per index)
#[derive(Debug, Clone)]
pub struct SchemaFields {
    pub schema: Schema,
    pub short_form: Field,
    pub url: Field,
    pub description: Field,
}

impl SchemaFields {
    /// Build the schema for a fresh index.
    pub fn build() -> Self {
        let mut schema_builder = Schema::builder();

        let keyword = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(KEYWORD_TOKENIZER)
                    .set_index_option(IndexRecordOption::Basic),
            )
            .set_stored();
        let short_form = schema_builder.add_text_field(FIELD_SHORT_FORM, keyword);

        let url = schema_builder.add_text_field(FIELD_URL, TEXT | STORED);

        let text = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(DESCRIPTION_ANALYZER)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();
        let description = schema_builder.add_text_field(FIELD_DESCRIPTION, text);

        Self {
            schema: schema_builder.build(),
            short_form,
            url,
            description,
        }
    }

    /// Resolve field handles from the schema of an existing index.
    pub fn from_schema(schema: Schema) -> tantivy::Result<Self> {
        Ok(Self {
            short_form: schema.get_field(FIELD_SHORT_FORM)?,
            url: schema.get_field(FIELD_URL)?,
            description: schema.get_field(FIELD_DESCRIPTION)?,
            schema,
        })
    }

    /// Fields searched by the full-text tier.
    pub fn all(&self) -> Vec<Field> {
        vec![self.short_form, self.url, self.description]
    }
}
