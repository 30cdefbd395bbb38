//! Error types for form export

use std::fmt;

use form_model::FactoryError;
use thiserror::Error;

/// Boxed error type renderer plugins fail with
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque failure reported by a renderer plugin.
///
/// Displays as the plugin's own error and hands it back untouched through
/// [`RendererError::into_inner`].
pub struct RendererError(BoxError);

impl RendererError {
    /// Wrap a plugin error
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }

    /// Create an error from a message
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(message.into())
    }

    /// Downcast the plugin error to a concrete type
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Take the plugin error
    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl fmt::Debug for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for RendererError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<std::io::Error> for RendererError {
    fn from(error: std::io::Error) -> Self {
        Self::new(error)
    }
}

impl From<serde_json::Error> for RendererError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error)
    }
}

/// Errors that can occur while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    /// A required option was absent
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Options were not shaped as expected
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The component factory rejected an entry
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// A renderer plugin failed
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct PrinterOnFire;

    impl fmt::Display for PrinterOnFire {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "printer on fire")
        }
    }

    impl std::error::Error for PrinterOnFire {}

    #[test]
    fn test_error_display() {
        let err = ExportError::MissingRequiredField("component".to_string());
        assert_eq!(err.to_string(), "Missing required field: component");

        let err = ExportError::InvalidOptions("expected an object, got array".to_string());
        assert_eq!(err.to_string(), "Invalid options: expected an object, got array");
    }

    #[test]
    fn test_renderer_error_is_transparent() {
        let err: ExportError = RendererError::new(PrinterOnFire).into();
        assert_eq!(err.to_string(), "printer on fire");

        let ExportError::Renderer(inner) = err else {
            panic!("expected renderer error");
        };
        assert_eq!(inner.downcast_ref::<PrinterOnFire>(), Some(&PrinterOnFire));
        assert!(inner.into_inner().downcast::<PrinterOnFire>().is_ok());
    }

    #[test]
    fn test_factory_error_conversion() {
        let err: ExportError = FactoryError::failed("no template for signature").into();
        assert!(matches!(err, ExportError::Factory(FactoryError::Failed(_))));
        assert_eq!(err.to_string(), "Component factory failed: no template for signature");
    }

    #[test]
    fn test_renderer_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such plugin");
        let err = RendererError::from(io);
        assert_eq!(err.to_string(), "no such plugin");
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }
}
