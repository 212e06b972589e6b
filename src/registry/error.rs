//! Error types for registry operations.

use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while fetching or decoding registry documents.
///
/// Every variant is terminal for the invocation that triggered it: there is
/// no retry and no partial result.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Transport-level failure reaching the registry (network error,
    /// non-2xx status other than not-found, timeout).
    #[error("Failed to fetch from registry: {message}")]
    Fetch {
        /// Description of the transport failure.
        message: String,
    },

    /// The registry responded not-found for a specific component.
    #[error("Component not found: {name}")]
    NotFound {
        /// Component name that was not found.
        name: String,
    },

    /// The response body did not satisfy the expected shape.
    #[error("Invalid registry response: {message}")]
    Parse {
        /// The validator's diagnostic.
        message: String,
    },
}
