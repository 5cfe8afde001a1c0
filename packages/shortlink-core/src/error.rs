//! Error types for shortlink-core

use std::fmt;
use thiserror::Error;

/// Shortcut error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Backing store could not be created or opened (fatal at startup)
    StoreInit,
    /// Query execution failed (per request)
    Search,
    /// Document write or commit failed
    Write,
    /// Record violates an invariant (e.g. empty alias)
    InvalidInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::StoreInit => "store_init",
            ErrorKind::Search => "search",
            ErrorKind::Write => "write",
            ErrorKind::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shortcut index error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct ShortcutError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl ShortcutError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn store_init(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreInit, message)
    }

    pub fn search(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Search, message)
    }

    pub fn write(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Write, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// True for errors that must stop the process from serving.
    pub fn is_fatal(&self) -> bool {
        self.kind == ErrorKind::StoreInit
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ShortcutError>;
