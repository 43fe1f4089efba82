//! # virtkit
//!
//! Idempotent access to a libvirt control plane.
//!
//! This crate provides:
//! - Lookup, creation and destruction of storage pools, networks,
//!   storage volumes and domains
//! - XML description builders for each of those kinds
//! - Error categories that separate "not found" from real failures
//!
//! ## Example
//!
//! ```no_run
//! use virtkit::{Client, ResourceKind};
//!
//! let client = Client::connect("qemu:///system").expect("libvirt not available");
//!
//! match client.lookup(ResourceKind::Network, "ash").expect("lookup failed") {
//!     Some(handle) => println!("found {handle}"),
//!     None => println!("network ash does not exist"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod types;
pub mod xml;

pub use error::{Error, ErrorCategory, Result};
pub use types::{Description, Handle, ResourceKind};

use backend::Backend;

/// Default libvirt connection URI.
pub const DEFAULT_URI: &str = "qemu:///system";

/// High-level client for control-plane operations.
///
/// The connection is released when the client is dropped, whether the
/// work it was used for succeeded or not.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl Client {
    /// Connect to a libvirt URI using the `virsh` backend.
    pub fn connect(uri: &str) -> Result<Self> {
        let backend = backend::default_backend(uri)?;
        Ok(Self {
            backend: Box::new(backend),
        })
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Connection URI.
    pub fn uri(&self) -> &str {
        self.backend.uri()
    }

    /// Look up a resource by identity key.
    ///
    /// `Ok(None)` means the resource does not exist; any other failure is
    /// returned as an error.
    pub fn lookup(&self, kind: ResourceKind, key: &str) -> Result<Option<Handle>> {
        match self.backend.lookup(kind, key) {
            Ok(handle) => Ok(Some(handle)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether a resource exists.
    pub fn exists(&self, kind: ResourceKind, key: &str) -> Result<bool> {
        Ok(self.lookup(kind, key)?.is_some())
    }

    /// Create a resource from its description.
    pub fn create(&self, description: &Description) -> Result<Handle> {
        log::debug!("creating {} {}", description.kind, description.key);
        self.backend.create(description)
    }

    /// Destroy a resource.
    pub fn destroy(&self, handle: &Handle) -> Result<()> {
        log::debug!("destroying {handle}");
        self.backend.destroy(handle)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("uri", &self.uri()).finish()
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.backend.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::memory::{MemoryBackend, Operation};

    #[test]
    fn test_lookup_absent_is_none() {
        let client = Client::with_backend(Box::new(MemoryBackend::new()));
        assert_eq!(client.lookup(ResourceKind::Domain, "m1").unwrap(), None);
        assert!(!client.exists(ResourceKind::Domain, "m1").unwrap());
    }

    #[test]
    fn test_lookup_error_propagates() {
        let backend =
            MemoryBackend::new().fail_on(Operation::Lookup, ResourceKind::Domain, "m1");
        let client = Client::with_backend(Box::new(backend));
        assert!(client.lookup(ResourceKind::Domain, "m1").is_err());
    }

    #[test]
    fn test_create_and_destroy() {
        let backend = MemoryBackend::new();
        let client = Client::with_backend(Box::new(backend.clone()));

        let handle = client
            .create(&Description::new(ResourceKind::Network, "ash", "<network/>".into()))
            .unwrap();
        assert!(client.exists(ResourceKind::Network, "ash").unwrap());

        client.destroy(&handle).unwrap();
        assert!(backend.resources().is_empty());
    }

    #[test]
    fn test_drop_closes_connection() {
        let backend = MemoryBackend::new();
        {
            let _client = Client::with_backend(Box::new(backend.clone()));
        }
        assert_eq!(backend.close_count(), 1);
    }

    #[test]
    fn test_uri() {
        let client = Client::with_backend(Box::new(MemoryBackend::new()));
        assert_eq!(client.uri(), "memory:///");
    }
}
