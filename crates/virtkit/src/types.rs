//! Core types for control-plane resources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of resource a scenario is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Directory-backed storage pool
    StoragePool,
    /// NAT network with DHCP
    Network,
    /// qcow2 volume inside the pool
    StorageVolume,
    /// Virtual machine
    Domain,
}

impl ResourceKind {
    /// Human-readable name, as used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::StoragePool => "storage pool",
            ResourceKind::Network => "network",
            ResourceKind::StorageVolume => "storage volume",
            ResourceKind::Domain => "domain",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A resource that exists on the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    /// Resource kind
    pub kind: ResourceKind,
    /// Identity key: the name, or the path for volumes
    pub key: String,
}

impl Handle {
    /// Create a handle.
    pub fn new(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.key)
    }
}

/// A declarative description ready to be submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    /// Resource kind
    pub kind: ResourceKind,
    /// Identity key the resource will be found under once created
    pub key: String,
    /// Containing resource (the pool, for volumes)
    pub parent: Option<String>,
    /// libvirt XML document
    pub xml: String,
}

impl Description {
    /// Create a description for a top-level resource.
    pub fn new(kind: ResourceKind, key: impl Into<String>, xml: String) -> Self {
        Self {
            kind,
            key: key.into(),
            parent: None,
            xml,
        }
    }

    /// Set the containing resource.
    pub fn in_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}
