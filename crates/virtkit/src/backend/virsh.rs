//! Real libvirt backend using `virsh` commands.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{Description, Handle, ResourceKind};
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// Backend that executes real `virsh` commands against one URI.
pub struct VirshBackend {
    /// Path to the virsh executable
    virsh_path: String,
    /// Connection URI passed with `-c`
    uri: String,
}

impl VirshBackend {
    /// Open a connection to `uri`.
    ///
    /// Fails if `virsh` is missing or the hypervisor does not answer.
    pub fn connect(uri: &str) -> Result<Self> {
        Self::with_path("virsh", uri)
    }

    /// Open a connection using a specific `virsh` executable.
    pub fn with_path(virsh_path: &str, uri: &str) -> Result<Self> {
        let backend = Self {
            virsh_path: virsh_path.to_string(),
            uri: uri.to_string(),
        };

        let output = backend.run_virsh(&["uri"]).map_err(|e| Error::Connection {
            uri: uri.to_string(),
            message: e.to_string(),
        })?;
        if !output.status.success() {
            return Err(Error::Connection {
                uri: uri.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        log::debug!("connected to {}", uri);
        Ok(backend)
    }

    /// Run a virsh command and return output.
    fn run_virsh(&self, args: &[&str]) -> Result<Output> {
        log::trace!("virsh -c {} {}", self.uri, args.join(" "));
        let output = Command::new(&self.virsh_path)
            .arg("-c")
            .arg(&self.uri)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute {}", self.virsh_path),
                stderr: e.to_string(),
            })?;
        Ok(output)
    }

    /// Run a virsh command about one resource and check for success.
    fn run_virsh_checked(&self, args: &[&str], kind: ResourceKind, key: &str) -> Result<String> {
        let output = self.run_virsh(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(match Error::from_virsh_output(&stderr, kind, key) {
                Error::Connection { message, .. } => Error::Connection {
                    uri: self.uri.clone(),
                    message,
                },
                other => other,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// virsh sub-command that shows a resource, used as the existence check.
fn info_command(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::StoragePool => "pool-info",
        ResourceKind::Network => "net-info",
        ResourceKind::StorageVolume => "vol-info",
        ResourceKind::Domain => "dominfo",
    }
}

/// virsh sub-command creating a transient resource from an XML file.
fn create_command(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::StoragePool => "pool-create",
        ResourceKind::Network => "net-create",
        ResourceKind::StorageVolume => "vol-create",
        ResourceKind::Domain => "create",
    }
}

/// virsh sub-command tearing a resource down.
fn destroy_command(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::StoragePool => "pool-destroy",
        ResourceKind::Network => "net-destroy",
        ResourceKind::StorageVolume => "vol-delete",
        ResourceKind::Domain => "destroy",
    }
}

impl Backend for VirshBackend {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn lookup(&self, kind: ResourceKind, key: &str) -> Result<Handle> {
        self.run_virsh_checked(&[info_command(kind), key], kind, key)?;
        Ok(Handle::new(kind, key))
    }

    fn create(&self, description: &Description) -> Result<Handle> {
        let kind = description.kind;
        let mut file = NamedTempFile::new()?;
        file.write_all(description.xml.as_bytes())?;
        file.flush()?;

        let path = file.path().to_string_lossy().to_string();
        let mut args = vec![create_command(kind)];
        if kind == ResourceKind::StorageVolume {
            let pool = description
                .parent
                .as_deref()
                .ok_or_else(|| Error::InvalidDescription {
                    kind,
                    message: format!("volume {} has no pool", description.key),
                })?;
            args.push(pool);
        }
        args.push(&path);

        self.run_virsh_checked(&args, kind, &description.key)?;
        Ok(Handle::new(kind, &description.key))
    }

    fn destroy(&self, handle: &Handle) -> Result<()> {
        self.run_virsh_checked(&[destroy_command(handle.kind), &handle.key], handle.kind, &handle.key)?;
        Ok(())
    }

    fn close(&self) {
        log::debug!("released connection to {}", self.uri);
    }
}
