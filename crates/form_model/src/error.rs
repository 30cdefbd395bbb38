//! Error types for building structure entries

use thiserror::Error;

/// Errors raised by a [`ComponentFactory`](crate::ComponentFactory)
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Factory refused to build an entry for the component
    #[error("Component factory failed: {0}")]
    Failed(String),
}

impl FactoryError {
    /// Factory failure with the given reason
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Result type for form model operations
pub type Result<T> = std::result::Result<T, FactoryError>;
