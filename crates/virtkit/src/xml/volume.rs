//! File-backed qcow2 volume.

use super::{Permissions, escape, non_empty, required};
use crate::error::Result;
use crate::types::ResourceKind;

/// Bytes pre-allocated for every new volume.
pub const DEFAULT_ALLOCATION_BYTES: u64 = 51_318_784;

/// SELinux label libvirt expects on VM images.
pub const VIRT_IMAGE_LABEL: &str = "system_u:object_r:virt_image_t:s0";

/// Builder for `<volume type="file">` descriptions.
#[derive(Debug, Default)]
pub struct VolumeBuilder {
    name: Option<String>,
    capacity: Option<(u64, String)>,
}

impl VolumeBuilder {
    /// Create a new volume builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set volume file name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set capacity as amount plus libvirt unit (e.g. `120`, `"GiB"`)
    pub fn with_capacity(mut self, amount: u64, unit: &str) -> Self {
        self.capacity = Some((amount, unit.to_string()));
        self
    }

    /// Build the volume XML
    pub fn build_xml(self) -> Result<String> {
        let kind = ResourceKind::StorageVolume;
        let name = non_empty(self.name, kind, "volume name")?;
        let (amount, unit) = required(self.capacity, kind, "capacity")?;
        let permissions = Permissions::root("0600").with_label(VIRT_IMAGE_LABEL);

        Ok(format!(
            r#"<volume type="file">
  <name>{}</name>
  <capacity unit="{}">{}</capacity>
  <allocation unit="bytes">{}</allocation>
  <target>
    <format type="qcow2"/>
{}
  </target>
</volume>"#,
            escape(&name),
            escape(&unit),
            amount,
            DEFAULT_ALLOCATION_BYTES,
            permissions.render("    "),
        ))
    }
}
