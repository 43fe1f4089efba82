//! libvirt XML descriptions for the four resource kinds.
//!
//! Each builder collects the values a description needs and renders the
//! document with [`build_xml`](DomainBuilder::build_xml). Missing required
//! values are reported as [`Error::InvalidDescription`] instead of
//! producing a document libvirt would reject later.

mod domain;
mod network;
mod pool;
mod volume;

pub use domain::DomainBuilder;
pub use network::{DhcpHost, NetworkBuilder};
pub use pool::PoolBuilder;
pub use volume::VolumeBuilder;

use crate::error::{Error, Result};
use crate::types::ResourceKind;

/// Escape text for use in XML content and attribute values.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Take a required builder field, or fail naming it.
fn required<T>(value: Option<T>, kind: ResourceKind, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::InvalidDescription {
        kind,
        message: format!("{field} is required"),
    })
}

/// Reject empty strings in required fields.
fn non_empty(value: Option<String>, kind: ResourceKind, field: &str) -> Result<String> {
    let value = required(value, kind, field)?;
    if value.trim().is_empty() {
        return Err(Error::InvalidDescription {
            kind,
            message: format!("{field} must not be empty"),
        });
    }
    Ok(value)
}

/// Owner, group and mode applied to pool and volume targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permissions {
    /// Octal mode, e.g. `0755`
    pub mode: String,
    /// Owner uid
    pub owner: String,
    /// Group gid
    pub group: String,
    /// SELinux label
    pub label: Option<String>,
}

impl Permissions {
    /// Root-owned with the given mode.
    pub fn root(mode: &str) -> Self {
        Self {
            mode: mode.to_string(),
            owner: "0".to_string(),
            group: "0".to_string(),
            label: None,
        }
    }

    /// Add a security label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    fn render(&self, indent: &str) -> String {
        let mut xml = format!(
            "{indent}<permissions>\n{indent}  <mode>{}</mode>\n{indent}  <owner>{}</owner>\n{indent}  <group>{}</group>",
            escape(&self.mode),
            escape(&self.owner),
            escape(&self.group),
        );
        if let Some(label) = &self.label {
            xml.push_str(&format!("\n{indent}  <label>{}</label>", escape(label)));
        }
        xml.push_str(&format!("\n{indent}</permissions>"));
        xml
    }
}
