//! Error types for control-plane operations.
//!
//! Errors are categorized so callers can tell an expected "not found"
//! apart from a real failure. Categories are derived from `virsh` output
//! the same way for every resource kind.

use crate::types::ResourceKind;
use thiserror::Error;

/// Categories of control-plane errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The looked-up resource does not exist
    NotFound,
    /// Resource already exists or is in use
    Conflict,
    /// Permission denied by libvirt or the host
    Permission,
    /// Could not reach the hypervisor
    Connection,
    /// Description rejected before reaching the hypervisor
    InvalidDescription,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Whether this error means the resource is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource conflict",
            Self::Permission => "Permission denied",
            Self::Connection => "Hypervisor unreachable",
            Self::InvalidDescription => "Invalid resource description",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::NotFound => "No action needed - the resource will be created",
            Self::Conflict => "Remove the conflicting resource or run teardown first",
            Self::Permission => "Run as root or add your user to the libvirt group",
            Self::Connection => "Check that libvirtd is running and the URI is correct",
            Self::InvalidDescription => "Check the scenario machine sizes and network settings",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur while talking to the virtualization control plane.
#[derive(Debug, Error)]
pub enum Error {
    /// The resource does not exist
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Kind of resource looked up
        kind: ResourceKind,
        /// Identity key used for the lookup
        key: String,
    },

    /// Resource already exists or is in use
    #[error("conflict: {message}")]
    Conflict {
        /// Control-plane message
        message: String,
    },

    /// Permission denied
    #[error("permission denied: {message}")]
    Permission {
        /// Control-plane message
        message: String,
    },

    /// Could not connect to the hypervisor
    #[error("cannot connect to {uri}: {message}")]
    Connection {
        /// Connection URI
        uri: String,
        /// Failure details
        message: String,
    },

    /// A resource description could not be built
    #[error("invalid {kind} description: {message}")]
    InvalidDescription {
        /// Kind of resource being described
        kind: ResourceKind,
        /// What is missing or malformed
        message: String,
    },

    /// Command execution failed
    #[error("{message}: {stderr}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output from the failed command
        stderr: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::Conflict { .. } => ErrorCategory::Conflict,
            Error::Permission { .. } => ErrorCategory::Permission,
            Error::Connection { .. } => ErrorCategory::Connection,
            Error::InvalidDescription { .. } => ErrorCategory::InvalidDescription,
            _ => ErrorCategory::Other,
        }
    }

    /// Whether the resource is simply absent.
    pub fn is_not_found(&self) -> bool {
        self.category().is_not_found()
    }

    /// Create an error from `virsh` stderr.
    ///
    /// `kind` and `key` identify the resource the command was about.
    pub fn from_virsh_output(stderr: &str, kind: ResourceKind, key: &str) -> Self {
        let stderr_lower = stderr.to_lowercase();

        // virsh reports e.g. "Storage pool not found: no storage pool with matching name"
        if stderr_lower.contains("not found")
            || stderr_lower.contains("no domain with matching")
            || stderr_lower.contains("no network with matching")
            || stderr_lower.contains("no storage pool with matching")
            || stderr_lower.contains("no storage vol with matching")
        {
            return Error::NotFound {
                kind,
                key: key.to_string(),
            };
        }

        if stderr_lower.contains("failed to connect to the hypervisor")
            || stderr_lower.contains("failed to connect socket")
            || stderr_lower.contains("no connection driver available")
        {
            return Error::Connection {
                uri: String::new(),
                message: stderr.trim().to_string(),
            };
        }

        if stderr_lower.contains("already exists")
            || stderr_lower.contains("already in use")
            || stderr_lower.contains("is already active")
        {
            return Error::Conflict {
                message: stderr.trim().to_string(),
            };
        }

        if stderr_lower.contains("permission denied")
            || stderr_lower.contains("access denied")
            || stderr_lower.contains("authentication failed")
        {
            return Error::Permission {
                message: stderr.trim().to_string(),
            };
        }

        Error::CommandFailed {
            message: format!("virsh failed for {kind} {key}"),
            stderr: stderr.trim().to_string(),
        }
    }
}

/// Result type for control-plane operations.
pub type Result<T> = std::result::Result<T, Error>;
