//! Storage volume resource

use anyhow::{Context, Result};
use declarative::{Resource, ResourceState};
use scenario::SizeSpec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use virtkit::xml::VolumeBuilder;
use virtkit::{Client, Description, ResourceKind};

const KIND: ResourceKind = ResourceKind::StorageVolume;

/// A machine's qcow2 disk inside the pool
///
/// Looked up and destroyed by its key, the absolute file path. A volume
/// without a capacity can only be torn down.
#[derive(Debug)]
pub struct StorageVolume {
    client: Arc<Client>,
    pool: String,
    name: String,
    path: PathBuf,
    capacity: Option<SizeSpec>,
}

impl StorageVolume {
    pub fn new(
        client: Arc<Client>,
        pool: &str,
        pool_dir: &Path,
        name: &str,
        capacity: SizeSpec,
    ) -> Self {
        Self {
            client,
            pool: pool.to_string(),
            name: name.to_string(),
            path: pool_dir.join(name),
            capacity: Some(capacity),
        }
    }

    /// A volume known only by name, for teardown.
    pub fn existing(client: Arc<Client>, pool: &str, pool_dir: &Path, name: &str) -> Self {
        Self {
            client,
            pool: pool.to_string(),
            name: name.to_string(),
            path: pool_dir.join(name),
            capacity: None,
        }
    }

    fn key(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn build_description(&self) -> Result<Description> {
        let capacity = self
            .capacity
            .as_ref()
            .with_context(|| format!("volume {} has no capacity", self.name))?;
        let xml = VolumeBuilder::new()
            .with_name(&self.name)
            .with_capacity(capacity.amount, &capacity.unit)
            .build_xml()?;
        Ok(Description::new(KIND, self.key(), xml).in_parent(&self.pool))
    }
}

impl Resource for StorageVolume {
    fn id(&self) -> String {
        self.key()
    }

    fn description(&self) -> String {
        match &self.capacity {
            Some(capacity) => format!("Volume {} ({capacity}) in pool {}", self.name, self.pool),
            None => format!("Volume {} in pool {}", self.name, self.pool),
        }
    }

    fn resource_type(&self) -> &'static str {
        KIND.label()
    }

    fn current_state(&self) -> Result<ResourceState> {
        super::lookup_state(&self.client, KIND, &self.key())
    }

    fn create(&self) -> Result<()> {
        self.client.create(&self.build_description()?)?;
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        super::destroy(&self.client, KIND, &self.key())
    }
}
