//! Backend abstraction for the virtualization control plane.
//!
//! The [`Backend`] trait is the seam between `ash` and libvirt, allowing:
//! - Real execution via the `virsh` command ([`virsh::VirshBackend`])
//! - An in-memory control plane for tests ([`memory::MemoryBackend`])

pub mod memory;
pub mod virsh;

use crate::error::Result;
use crate::types::{Description, Handle, ResourceKind};

/// Backend trait for control-plane operations.
///
/// Every call blocks until the hypervisor answers.
pub trait Backend: Send + Sync {
    /// Connection URI, for diagnostics.
    fn uri(&self) -> &str;

    /// Find an existing resource by identity key.
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) when it does not exist.
    fn lookup(&self, kind: ResourceKind, key: &str) -> Result<Handle>;

    /// Create (and for domains, start) a resource from its description.
    fn create(&self, description: &Description) -> Result<Handle>;

    /// Stop or delete a resource.
    fn destroy(&self, handle: &Handle) -> Result<()>;

    /// Release the connection. Called once when the client is dropped.
    fn close(&self) {}
}

/// Get the default backend (real `virsh` CLI).
pub fn default_backend(uri: &str) -> Result<virsh::VirshBackend> {
    virsh::VirshBackend::connect(uri)
}
