//! Error types for scenario resolution.
//!
//! Every failure in this crate is a configuration problem: the document,
//! the CIDR block or a size string does not have the expected shape.
//! None of them are retryable.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and resolving a scenario.
#[derive(Debug, Error)]
pub enum Error {
    /// Scenario document could not be read
    #[error("could not read scenario {}: {source}", .path.display())]
    Read {
        /// Path of the document
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario document is not valid YAML for the expected schema
    #[error("invalid scenario document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// CIDR block could not be parsed
    #[error("invalid CIDR '{cidr}' for network {network}: {reason}")]
    InvalidCidr {
        /// Network the CIDR belongs to
        network: String,
        /// Raw CIDR string
        cidr: String,
        /// Parser message
        reason: String,
    },

    /// Size spec does not match `<digits><optional space><unit>`
    #[error("invalid size spec '{0}', expected e.g. \"16GiB\" or \"120 GiB\"")]
    InvalidSize(String),

    /// VCPU count is not an integer
    #[error("invalid vcpu count '{value}' for machine {machine}")]
    InvalidVcpus {
        /// Machine name
        machine: String,
        /// Raw value
        value: String,
    },

    /// A name lookup found nothing
    #[error("{kind} '{name}' is not defined in scenario")]
    UnknownReference {
        /// "profile" or "network"
        kind: &'static str,
        /// Name that was looked up
        name: String,
    },

    /// Resolved scenario has no network to plan addresses on
    #[error("scenario {0} has no network")]
    NoNetwork(String),
}

/// Result type for scenario operations.
pub type Result<T> = std::result::Result<T, Error>;
