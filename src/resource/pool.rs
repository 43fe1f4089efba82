//! Storage pool resource

use anyhow::{Context, Result};
use declarative::{Resource, ResourceState};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use virtkit::xml::PoolBuilder;
use virtkit::{Client, Description, ResourceKind};

const KIND: ResourceKind = ResourceKind::StoragePool;

/// Directory-backed pool holding every machine volume
#[derive(Debug)]
pub struct StoragePool {
    client: Arc<Client>,
    name: String,
    dir: PathBuf,
}

impl StoragePool {
    pub fn new(client: Arc<Client>, name: &str, dir: &Path) -> Self {
        Self {
            client,
            name: name.to_string(),
            dir: dir.to_path_buf(),
        }
    }

    /// Create the backing directory (and parents) with mode 0755
    fn ensure_dir(&self) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder
            .create(&self.dir)
            .with_context(|| format!("Failed to create pool directory {}", self.dir.display()))
    }

    fn build_description(&self) -> Result<Description> {
        let xml = PoolBuilder::new()
            .with_name(&self.name)
            .with_path(&self.dir)
            .build_xml()?;
        Ok(Description::new(KIND, &self.name, xml))
    }
}

impl Resource for StoragePool {
    fn id(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        format!("Storage pool {} at {}", self.name, self.dir.display())
    }

    fn resource_type(&self) -> &'static str {
        KIND.label()
    }

    fn current_state(&self) -> Result<ResourceState> {
        super::lookup_state(&self.client, KIND, &self.name)
    }

    fn create(&self) -> Result<()> {
        self.ensure_dir()?;
        self.client.create(&self.build_description()?)?;
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        super::destroy(&self.client, KIND, &self.name)
    }
}
