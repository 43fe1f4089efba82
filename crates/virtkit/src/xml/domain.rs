//! KVM guest booting from a pool volume with the agent ISO attached.

use super::{escape, non_empty, required};
use crate::error::Result;
use crate::types::ResourceKind;
use std::path::{Path, PathBuf};

const DEFAULT_EMULATOR: &str = "/usr/libexec/qemu-kvm";
const DEFAULT_MACHINE_TYPE: &str = "pc-q35-rhel8.6.0";
const OS_VARIANT: &str = "http://fedoraproject.org/coreos/stable";

/// Builder for KVM domain descriptions.
#[derive(Debug, Default)]
pub struct DomainBuilder {
    name: Option<String>,
    memory: Option<(u64, String)>,
    vcpus: Option<u32>,
    pool: Option<String>,
    volume: Option<String>,
    iso: Option<PathBuf>,
    mac: Option<String>,
    network: Option<String>,
    emulator: Option<String>,
    machine_type: Option<String>,
}

impl DomainBuilder {
    /// Create a new domain builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set domain name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set memory as amount plus libvirt unit
    pub fn with_memory(mut self, amount: u64, unit: &str) -> Self {
        self.memory = Some((amount, unit.to_string()));
        self
    }

    /// Set number of virtual CPUs
    pub fn with_vcpus(mut self, vcpus: u32) -> Self {
        self.vcpus = Some(vcpus);
        self
    }

    /// Set the boot disk as a volume inside a storage pool
    pub fn with_disk(mut self, pool: &str, volume: &str) -> Self {
        self.pool = Some(pool.to_string());
        self.volume = Some(volume.to_string());
        self
    }

    /// Attach an ISO image as a read-only CD-ROM
    pub fn with_iso(mut self, path: &Path) -> Self {
        self.iso = Some(path.to_path_buf());
        self
    }

    /// Attach one interface to a network
    pub fn with_interface(mut self, mac: &str, network: &str) -> Self {
        self.mac = Some(mac.to_string());
        self.network = Some(network.to_string());
        self
    }

    /// Override the emulator binary
    pub fn with_emulator(mut self, emulator: &str) -> Self {
        self.emulator = Some(emulator.to_string());
        self
    }

    /// Override the machine type
    pub fn with_machine_type(mut self, machine_type: &str) -> Self {
        self.machine_type = Some(machine_type.to_string());
        self
    }

    /// Build the domain XML
    pub fn build_xml(self) -> Result<String> {
        let kind = ResourceKind::Domain;
        let name = non_empty(self.name, kind, "domain name")?;
        let (memory, memory_unit) = required(self.memory, kind, "memory")?;
        let vcpus = required(self.vcpus, kind, "vcpus")?;
        let pool = non_empty(self.pool, kind, "disk pool")?;
        let volume = non_empty(self.volume, kind, "disk volume")?;
        let iso = non_empty(
            self.iso.map(|p| p.to_string_lossy().to_string()),
            kind,
            "ISO path",
        )?;
        let mac = non_empty(self.mac, kind, "MAC address")?;
        let network = non_empty(self.network, kind, "network")?;
        let emulator = self.emulator.as_deref().unwrap_or(DEFAULT_EMULATOR);
        let machine_type = self.machine_type.as_deref().unwrap_or(DEFAULT_MACHINE_TYPE);

        let mut xml = format!(
            r#"<domain type="kvm">
  <name>{name}</name>
  <metadata>
    <libosinfo:libosinfo xmlns:libosinfo="http://libosinfo.org/xmlns/libvirt/domain/1.0">
      <libosinfo:os id="{OS_VARIANT}"/>
    </libosinfo:libosinfo>
  </metadata>
  <memory unit="{memory_unit}">{memory}</memory>
  <currentMemory unit="{memory_unit}">{memory}</currentMemory>
  <vcpu placement="static">{vcpus}</vcpu>
  <os>
    <type arch="x86_64" machine="{machine_type}">hvm</type>
    <boot dev="hd"/>
    <boot dev="cdrom"/>
  </os>
  <cpu mode="host-passthrough"/>
  <devices>
    <emulator>{emulator}</emulator>"#,
            name = escape(&name),
            memory_unit = escape(&memory_unit),
            machine_type = escape(machine_type),
            emulator = escape(emulator),
        );

        // Boot disk from the pool
        xml.push_str(&format!(
            r#"
    <disk type="volume" device="disk">
      <driver name="qemu" type="qcow2"/>
      <source pool="{}" volume="{}"/>
      <target dev="vda" bus="virtio"/>
    </disk>"#,
            escape(&pool),
            escape(&volume),
        ));

        // Agent ISO
        xml.push_str(&format!(
            r#"
    <disk type="file" device="cdrom">
      <driver name="qemu" type="raw"/>
      <source file="{}"/>
      <target dev="sdb" bus="sata"/>
      <readonly/>
    </disk>"#,
            escape(&iso),
        ));

        xml.push_str(&format!(
            r#"
    <interface type="network">
      <mac address="{}"/>
      <source network="{}"/>
      <model type="virtio"/>
    </interface>"#,
            escape(&mac),
            escape(&network),
        ));

        xml.push_str(
            r#"
    <graphics type="vnc" port="-1" autoport="yes"/>
    <video>
      <model type="cirrus" vram="16384" heads="1" primary="yes"/>
    </video>
  </devices>
</domain>"#,
        );

        Ok(xml)
    }
}
