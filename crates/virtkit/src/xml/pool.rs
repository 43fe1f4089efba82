//! Directory-backed storage pool.

use super::{Permissions, escape, non_empty};
use crate::error::Result;
use crate::types::ResourceKind;
use std::path::{Path, PathBuf};

/// Builder for `<pool type="dir">` descriptions.
#[derive(Debug, Default)]
pub struct PoolBuilder {
    name: Option<String>,
    path: Option<PathBuf>,
}

impl PoolBuilder {
    /// Create a new pool builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set pool name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the backing directory
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    /// Build the pool XML
    pub fn build_xml(self) -> Result<String> {
        let kind = ResourceKind::StoragePool;
        let name = non_empty(self.name, kind, "pool name")?;
        let path = non_empty(
            self.path.map(|p| p.to_string_lossy().to_string()),
            kind,
            "pool path",
        )?;
        let permissions = Permissions::root("0755");

        Ok(format!(
            r#"<pool type="dir">
  <name>{}</name>
  <target>
    <path>{}</path>
{}
  </target>
</pool>"#,
            escape(&name),
            escape(&path),
            permissions.render("    "),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_xml() {
        let xml = PoolBuilder::new()
            .with_name("ash_pool")
            .with_path(Path::new("/home/u/.cache/ash/pool"))
            .build_xml()
            .unwrap();

        assert!(xml.starts_with(r#"<pool type="dir">"#));
        assert!(xml.contains("<name>ash_pool</name>"));
        assert!(xml.contains("<path>/home/u/.cache/ash/pool</path>"));
        assert!(xml.contains("<mode>0755</mode>"));
        assert!(xml.contains("<owner>0</owner>"));
        assert!(xml.contains("<group>0</group>"));
    }

    #[test]
    fn test_pool_requires_path() {
        let result = PoolBuilder::new().with_name("ash_pool").build_xml();
        assert!(result.is_err());
    }
}
