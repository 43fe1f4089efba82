//! Errors raised while converging a plan

use thiserror::Error;

/// A resource operation that stopped convergence
#[derive(Debug, Error)]
pub enum Error {
    /// State of a resource could not be determined
    #[error("failed to look up {resource_type} {id}")]
    Lookup {
        resource_type: &'static str,
        id: String,
        #[source]
        source: anyhow::Error,
    },

    /// Resource description was rejected or creation failed
    #[error("failed to create {resource_type} {id}")]
    Create {
        resource_type: &'static str,
        id: String,
        #[source]
        source: anyhow::Error,
    },

    /// Resource could not be destroyed
    #[error("failed to destroy {resource_type} {id}")]
    Destroy {
        resource_type: &'static str,
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Result type for plan execution
pub type Result<T> = std::result::Result<T, Error>;
