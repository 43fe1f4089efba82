//! Domain (virtual machine) resource

use anyhow::{Context, Result};
use declarative::{Resource, ResourceState};
use scenario::{Machine, SizeSpec};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use virtkit::xml::DomainBuilder;
use virtkit::{Client, Description, ResourceKind};

const KIND: ResourceKind = ResourceKind::Domain;

/// Hardware and attachments needed to define a domain
#[derive(Debug)]
struct DomainConfig {
    memory: SizeSpec,
    vcpus: u32,
    pool: String,
    volume: String,
    iso: PathBuf,
    mac: String,
    network: String,
}

/// A running machine booted from its pool volume with the agent ISO attached
///
/// A domain without a config can only be torn down.
#[derive(Debug)]
pub struct Domain {
    client: Arc<Client>,
    name: String,
    config: Option<DomainConfig>,
}

impl Domain {
    /// Fails if the machine's memory or vcpu count is malformed.
    pub fn new(
        client: Arc<Client>,
        machine: &Machine,
        pool: &str,
        iso: &Path,
    ) -> scenario::Result<Self> {
        Ok(Self {
            client,
            name: machine.name.clone(),
            config: Some(DomainConfig {
                memory: machine.memory_spec()?,
                vcpus: machine.vcpu_count()?,
                pool: pool.to_string(),
                volume: machine.volume_name(),
                iso: iso.to_path_buf(),
                mac: machine.mac.clone(),
                network: machine.network.clone(),
            }),
        })
    }

    /// A domain known only by name, for teardown.
    pub fn existing(client: Arc<Client>, name: &str) -> Self {
        Self {
            client,
            name: name.to_string(),
            config: None,
        }
    }

    fn config(&self) -> Result<&DomainConfig> {
        self.config
            .as_ref()
            .with_context(|| format!("domain {} has no hardware config", self.name))
    }

    fn build_description(&self) -> Result<Description> {
        let config = self.config()?;
        let xml = DomainBuilder::new()
            .with_name(&self.name)
            .with_memory(config.memory.amount, &config.memory.unit)
            .with_vcpus(config.vcpus)
            .with_disk(&config.pool, &config.volume)
            .with_iso(&config.iso)
            .with_interface(&config.mac, &config.network)
            .build_xml()?;
        Ok(Description::new(KIND, &self.name, xml))
    }
}

impl Resource for Domain {
    fn id(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        match &self.config {
            Some(config) => format!(
                "Domain {} ({} vcpus, {} memory, mac {})",
                self.name, config.vcpus, config.memory, config.mac
            ),
            None => format!("Domain {}", self.name),
        }
    }

    fn resource_type(&self) -> &'static str {
        KIND.label()
    }

    fn current_state(&self) -> Result<ResourceState> {
        super::lookup_state(&self.client, KIND, &self.name)
    }

    fn create(&self) -> Result<()> {
        let iso = &self.config()?.iso;
        if !iso.exists() {
            log::warn!("boot ISO {} does not exist", iso.display());
        }
        self.client.create(&self.build_description()?)?;
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        super::destroy(&self.client, KIND, &self.name)
    }
}
