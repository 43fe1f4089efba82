//! # scenario
//!
//! Reading and resolving `ash` scenario documents.
//!
//! A scenario document names a set of machines; everything else (sizing,
//! network, addresses) is filled in by two pure phases:
//!
//! 1. [`normalize`] appends the built-in profile and network and copies
//!    profile sizes into machines that leave them blank.
//! 2. [`plan_addresses`] gives every machine without one an IP from the
//!    network CIDR (base + 80 onwards) and a random QEMU MAC.
//!
//! ## Example
//!
//! ```
//! let doc = "name: demo\nmachines:\n  - name: m1\n";
//! let scenario = scenario::resolve_str(doc).unwrap();
//!
//! assert_eq!(scenario.machines[0].ip, "192.168.200.80");
//! assert_eq!(scenario.machines[0].memory, "16GiB");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod defaults;
pub mod error;
pub mod mac;
pub mod normalize;
pub mod size;
#[allow(missing_docs)]
pub mod types;

pub use address::{AddressPlan, plan_addresses, plan_addresses_with};
pub use defaults::Defaults;
pub use error::{Error, Result};
pub use mac::generate_mac;
pub use normalize::{SelectionPolicy, normalize};
pub use size::SizeSpec;
pub use types::{Machine, MachineProfile, Network, Scenario};

use std::fs;
use std::path::Path;

/// File name of the scenario document inside the assets directory.
pub const SCENARIO_FILENAME: &str = "scenario.yaml";

/// Decode a raw scenario document without resolving it.
pub fn parse_str(content: &str) -> Result<Scenario> {
    Ok(serde_yaml::from_str(content)?)
}

/// Read and decode a raw scenario document without resolving it.
pub fn load_file(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&content)
}

/// Normalize and address-plan a raw scenario.
pub fn resolve(raw: &Scenario, policy: SelectionPolicy) -> Result<Scenario> {
    let normalized = normalize(raw, Defaults::get(), policy)?;
    plan_addresses(&normalized)
}

/// Decode and fully resolve a scenario document with the shipped policy.
pub fn resolve_str(content: &str) -> Result<Scenario> {
    resolve(&parse_str(content)?, SelectionPolicy::default())
}

/// Read and fully resolve a scenario document with the shipped policy.
pub fn resolve_file(path: &Path) -> Result<Scenario> {
    let raw = load_file(path)?;
    log::debug!("loaded scenario {} from {}", raw.name, path.display());
    resolve(&raw, SelectionPolicy::default())
}
