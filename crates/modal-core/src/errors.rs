//! Unified error type for modal presentation
//!
//! Every failure a caller can observe travels through [`ModalError`], whether
//! it is reported synchronously by `present` or later through the result of a
//! presentation.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Error surfaced by a modal presentation
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModalError {
    /// The presenter resolved to no anchor (window gone, view detached, ...)
    #[error("No presentation target available")]
    MissingPresentationTarget,

    /// The requested modal feature is unavailable on this device or account
    #[error("Unsupported: {feature}")]
    Unsupported {
        /// Feature that could not be offered
        feature: String,
    },

    /// An authorization gate rejected the current status
    #[error("Authorization denied: {status_type} is {status}")]
    AuthorizationDenied {
        /// Type name of the status that was checked
        status_type: &'static str,
        /// Type identity of the status that was checked
        status_type_id: TypeId,
        /// Debug rendering of the rejected status
        status: String,
    },

    /// The presentation was cancelled before an outcome arrived
    #[error("Presentation cancelled")]
    Cancelled,

    /// A dialog was built or driven with invalid input
    #[error("Invalid dialog: {message}")]
    InvalidDialog {
        /// Error message describing the invalid dialog
        message: String,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Error produced by the host platform, forwarded verbatim
    #[error("Platform error: {0}")]
    Platform(PlatformError),
}

impl ModalError {
    /// Create an unsupported feature error
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }

    /// Create an authorization denied error for a rejected status
    pub fn authorization_denied<S: fmt::Debug + 'static>(status: &S) -> Self {
        Self::AuthorizationDenied {
            status_type: std::any::type_name::<S>(),
            status_type_id: TypeId::of::<S>(),
            status: format!("{status:?}"),
        }
    }

    /// Create an invalid dialog error
    pub fn invalid_dialog(message: impl Into<String>) -> Self {
        Self::InvalidDialog {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wrap a platform error so it can be forwarded to the caller
    pub fn platform<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Platform(PlatformError::new(error))
    }

    /// Whether this error is an authorization denial for status type `S`
    pub fn is_authorization_denied_for<S: 'static>(&self) -> bool {
        matches!(
            self,
            Self::AuthorizationDenied { status_type_id, .. } if *status_type_id == TypeId::of::<S>()
        )
    }

    /// Borrow the forwarded platform error, if any
    pub fn platform_error(&self) -> Option<&PlatformError> {
        match self {
            Self::Platform(error) => Some(error),
            _ => None,
        }
    }
}

/// Shared handle to an error raised by the host platform.
///
/// Cloning shares the same underlying error, so the caller can downcast to the
/// exact value the host adapter reported.
#[derive(Clone)]
pub struct PlatformError {
    inner: Arc<dyn std::error::Error + Send + Sync>,
}

impl PlatformError {
    /// Wrap an error
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Downcast to the concrete error the platform reported
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// Whether two handles share the same underlying error value
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

/// Standard Result type for modal operations
pub type ModalResult<T> = std::result::Result<T, ModalError>;

impl From<toml::de::Error> for ModalError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<std::io::Error> for ModalError {
    fn from(err: std::io::Error) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("compose failed: {0}")]
    struct ComposeFailure(u32);

    #[derive(Debug)]
    enum CameraStatus {
        Denied,
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ModalError::MissingPresentationTarget.to_string(),
            "No presentation target available"
        );
        assert_eq!(
            ModalError::unsupported("mail").to_string(),
            "Unsupported: mail"
        );
    }

    #[test]
    fn test_platform_error_downcasts_to_original() {
        let err = ModalError::platform(ComposeFailure(7));
        let platform = err.platform_error().unwrap();
        assert_eq!(platform.downcast_ref::<ComposeFailure>(), Some(&ComposeFailure(7)));
        assert_eq!(err.to_string(), "Platform error: compose failed: 7");
    }

    #[test]
    fn test_authorization_denied_carries_type_identity() {
        let err = ModalError::authorization_denied(&CameraStatus::Denied);
        assert!(err.is_authorization_denied_for::<CameraStatus>());
        assert!(!err.is_authorization_denied_for::<u8>());
        match err {
            ModalError::AuthorizationDenied {
                status_type, status, ..
            } => {
                assert!(status_type.ends_with("CameraStatus"));
                assert_eq!(status, "Denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
