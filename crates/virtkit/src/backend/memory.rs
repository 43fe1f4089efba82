//! In-memory control plane.
//!
//! Behaves like libvirt's identity checks (one resource per kind and key)
//! and records every call, so provisioning logic can be exercised without
//! a hypervisor. Clones share state: keep one clone to inspect after
//! handing the other to a [`Client`](crate::Client).

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{Description, Handle, ResourceKind};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// Which operation a call or an injected failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Existence check
    Lookup,
    /// Creation
    Create,
    /// Destruction
    Destroy,
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Operation performed
    pub operation: Operation,
    /// Resource kind
    pub kind: ResourceKind,
    /// Identity key
    pub key: String,
}

#[derive(Debug, Default)]
struct State {
    resources: BTreeMap<(ResourceKind, String), Option<Description>>,
    failures: HashSet<(Operation, ResourceKind, String)>,
    calls: Vec<Call>,
    closed: usize,
}

/// In-memory [`Backend`] with failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    /// Create an empty control plane.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Seed a resource as if created by an earlier run.
    pub fn with_resource(self, kind: ResourceKind, key: &str) -> Self {
        self.state().resources.insert((kind, key.to_string()), None);
        self
    }

    /// Make every `operation` on `kind`/`key` fail with a generic error.
    pub fn fail_on(self, operation: Operation, kind: ResourceKind, key: &str) -> Self {
        self.state()
            .failures
            .insert((operation, kind, key.to_string()));
        self
    }

    /// Whether a resource currently exists.
    pub fn contains(&self, kind: ResourceKind, key: &str) -> bool {
        self.state().resources.contains_key(&(kind, key.to_string()))
    }

    /// All existing resources, sorted by kind then key.
    pub fn resources(&self) -> Vec<Handle> {
        self.state()
            .resources
            .keys()
            .map(|(kind, key)| Handle::new(*kind, key))
            .collect()
    }

    /// The XML a resource was created from, if it was created here.
    pub fn description(&self, kind: ResourceKind, key: &str) -> Option<Description> {
        self.state()
            .resources
            .get(&(kind, key.to_string()))
            .cloned()
            .flatten()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Number of calls of one operation on one kind.
    pub fn count(&self, operation: Operation, kind: ResourceKind) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.operation == operation && c.kind == kind)
            .count()
    }

    /// How many times the connection was released.
    pub fn close_count(&self) -> usize {
        self.state().closed
    }

    fn record(&self, operation: Operation, kind: ResourceKind, key: &str) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call {
            operation,
            kind,
            key: key.to_string(),
        });
        if state.failures.contains(&(operation, kind, key.to_string())) {
            return Err(Error::CommandFailed {
                message: format!("injected {operation:?} failure for {kind} {key}"),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

impl Backend for MemoryBackend {
    fn uri(&self) -> &str {
        "memory:///"
    }

    fn lookup(&self, kind: ResourceKind, key: &str) -> Result<Handle> {
        self.record(Operation::Lookup, kind, key)?;
        if self.contains(kind, key) {
            Ok(Handle::new(kind, key))
        } else {
            Err(Error::NotFound {
                kind,
                key: key.to_string(),
            })
        }
    }

    fn create(&self, description: &Description) -> Result<Handle> {
        let (kind, key) = (description.kind, description.key.as_str());
        self.record(Operation::Create, kind, key)?;

        if let Some(pool) = &description.parent {
            if !self.contains(ResourceKind::StoragePool, pool) {
                return Err(Error::NotFound {
                    kind: ResourceKind::StoragePool,
                    key: pool.clone(),
                });
            }
        }

        let mut state = self.state();
        let slot = (kind, key.to_string());
        if state.resources.contains_key(&slot) {
            return Err(Error::Conflict {
                message: format!("{kind} '{key}' already exists"),
            });
        }
        state.resources.insert(slot, Some(description.clone()));
        Ok(Handle::new(kind, key))
    }

    fn destroy(&self, handle: &Handle) -> Result<()> {
        self.record(Operation::Destroy, handle.kind, &handle.key)?;
        match self.state().resources.remove(&(handle.kind, handle.key.clone())) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound {
                kind: handle.kind,
                key: handle.key.clone(),
            }),
        }
    }

    fn close(&self) {
        self.state().closed += 1;
    }
}
