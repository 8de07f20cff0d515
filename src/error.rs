//! Error handling for the dialog host
//!
//! This module defines the host error type and a Result alias for use
//! throughout the crate.

use crate::registry::{Handle, HandleKind};
use thiserror::Error;

/// Main error type for dialog host operations
#[derive(Error, Debug)]
pub enum HostError {
    /// An operation referenced a handle that was never registered
    #[error("{kind} handle {handle} not found")]
    HandleNotFound { kind: HandleKind, handle: Handle },

    /// A handle was registered twice for the same kind
    #[error("{kind} handle {handle} is already registered")]
    AlreadyRegistered { kind: HandleKind, handle: Handle },

    /// A page object that was never registered under any handle
    #[error("wizard page {0} has no registered handle")]
    UnregisteredPage(String),

    /// A page listed twice, or added to the wizard that already holds it
    #[error("wizard page {page} is already attached to wizard {wizard}")]
    PageAlreadyAttached { page: Handle, wizard: Handle },

    /// A page position outside the wizard's page list
    #[error("page index {index} out of range for wizard with {len} page(s)")]
    PageIndexOutOfRange { index: usize, len: usize },

    /// An operation that is intentionally not supported
    #[error("Not implemented: {0}")]
    Unimplemented(&'static str),

    /// The remote caller failed or abandoned a forwarded request
    #[error("Remote error: {0}")]
    Remote(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// Timeout errors
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<HostError>,
    },
}

impl HostError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        HostError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Strip any context wrappers and return the underlying error
    pub fn root(&self) -> &HostError {
        match self {
            HostError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for HostError {
    fn from(err: serde_json::Error) -> Self {
        HostError::Serialization(err.to_string())
    }
}

/// Result type alias for dialog host operations
pub type Result<T> = std::result::Result<T, HostError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_not_found_display() {
        let err = HostError::HandleNotFound {
            kind: HandleKind::Wizard,
            handle: Handle(7),
        };
        assert_eq!(err.to_string(), "wizard handle 7 not found");
    }

    #[test]
    fn test_error_with_context() {
        let err = HostError::Remote("connection reset".to_string());
        let with_ctx = err.with_context("Failed to open editor");
        assert!(with_ctx.to_string().contains("Failed to open editor"));
        assert!(matches!(with_ctx.root(), HostError::Remote(_)));
    }

    #[test]
    fn test_page_index_error() {
        let err = HostError::PageIndexOutOfRange { index: 4, len: 2 };
        assert!(err.to_string().contains("index 4"));
        assert!(err.to_string().contains("2 page(s)"));
    }
}
