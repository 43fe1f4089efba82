//! Control-plane resources provisioned for a scenario
//!
//! Each resource is identified by a fixed key (pool name, network name,
//! volume path, machine name) and implements [`declarative::Resource`]
//! over a shared [`virtkit::Client`]:
//! - Lookup by key decides whether it exists
//! - Create builds the libvirt XML and submits it
//! - Destroy removes it by key

mod domain;
mod network;
mod pool;
mod volume;

pub use domain::Domain;
pub use network::VirtualNetwork;
pub use pool::StoragePool;
pub use volume::StorageVolume;

use anyhow::Result;
use declarative::ResourceState;
use virtkit::{Client, Handle, ResourceKind};

/// Present if the control plane knows `key`, absent on "not found".
fn lookup_state(client: &Client, kind: ResourceKind, key: &str) -> Result<ResourceState> {
    Ok(ResourceState::from_exists(client.exists(kind, key)?))
}

fn destroy(client: &Client, kind: ResourceKind, key: &str) -> Result<()> {
    client.destroy(&Handle::new(kind, key))?;
    Ok(())
}
