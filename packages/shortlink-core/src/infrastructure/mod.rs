//! Infrastructure layer: concrete `ShortcutStore` implementations

pub mod tantivy_store;

pub use tantivy_store::TantivyShortcutStore;
