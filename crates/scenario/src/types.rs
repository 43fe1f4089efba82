//! Scenario data model.
//!
//! These types mirror the `scenario.yaml` schema. Every string field
//! defaults to empty so that partially specified machines decode cleanly;
//! the normalizer fills the gaps afterwards.

use crate::error::{Error, Result};
use crate::size::SizeSpec;
use serde::{Deserialize, Serialize};

/// A named VM test cluster: machines plus the profiles and networks they use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub machines: Vec<Machine>,

    /// Sizing templates. Accepted in documents but not selectable yet.
    #[serde(default, rename = "profiles", alias = "machineprofiles")]
    pub machine_profiles: Vec<MachineProfile>,

    /// Networks. Accepted in documents but not selectable yet.
    #[serde(default)]
    pub networks: Vec<Network>,
}

impl Scenario {
    /// Find a profile by name.
    pub fn profile(&self, name: &str) -> Option<&MachineProfile> {
        self.machine_profiles.iter().find(|p| p.name == name)
    }

    /// Find a network by name.
    pub fn network(&self, name: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.name == name)
    }

    /// Find a machine by name.
    pub fn machine(&self, name: &str) -> Option<&Machine> {
        self.machines.iter().find(|m| m.name == name)
    }

    /// The network every machine is attached to.
    ///
    /// A resolved scenario always has exactly one network in use; this
    /// returns the network referenced by the first machine, falling back
    /// to the first declared network for machine-less scenarios.
    pub fn primary_network(&self) -> Result<&Network> {
        match self.machines.first() {
            Some(machine) => self.network(&machine.network).ok_or_else(|| {
                Error::UnknownReference {
                    kind: "network",
                    name: machine.network.clone(),
                }
            }),
            None => self
                .networks
                .first()
                .ok_or_else(|| Error::NoNetwork(self.name.clone())),
        }
    }
}

/// One VM to create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Machine {
    pub name: String,
    pub profile: String,
    pub ip: String,
    pub mac: String,

    // Profile overrides
    pub vcpus: String,
    pub memory: String,
    pub disk: String,
    pub network: String,
}

impl Machine {
    /// Create a machine with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// File name of the machine's primary volume inside the storage pool.
    pub fn volume_name(&self) -> String {
        format!("{}.qcow2", self.name)
    }

    /// Parsed disk size.
    pub fn disk_spec(&self) -> Result<SizeSpec> {
        self.disk.parse()
    }

    /// Parsed memory size.
    pub fn memory_spec(&self) -> Result<SizeSpec> {
        self.memory.parse()
    }

    /// Parsed VCPU count.
    pub fn vcpu_count(&self) -> Result<u32> {
        self.vcpus
            .trim()
            .parse()
            .map_err(|_| Error::InvalidVcpus {
                machine: self.name.clone(),
                value: self.vcpus.clone(),
            })
    }
}

/// Reusable sizing template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineProfile {
    pub name: String,
    pub vcpus: String,
    pub memory: String,
    pub disk: String,
    pub network: String,
}

/// One isolated L2/L3 segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub name: String,
    pub cidr: String,
    /// Reserved, informational only.
    pub disconnected: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_decodes_with_missing_fields() {
        let machine: Machine = serde_yaml::from_str("name: m1\nmemory: 32GiB\n").unwrap();
        assert_eq!(machine.name, "m1");
        assert_eq!(machine.memory, "32GiB");
        assert!(machine.ip.is_empty());
        assert!(machine.disk.is_empty());
    }

    #[test]
    fn test_scenario_requires_machines() {
        let result: std::result::Result<Scenario, _> = serde_yaml::from_str("name: t\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_volume_name() {
        assert_eq!(Machine::named("master-0").volume_name(), "master-0.qcow2");
    }

    #[test]
    fn test_vcpu_count() {
        let mut machine = Machine::named("m1");
        machine.vcpus = "8".into();
        assert_eq!(machine.vcpu_count().unwrap(), 8);

        machine.vcpus = "eight".into();
        assert!(matches!(
            machine.vcpu_count(),
            Err(Error::InvalidVcpus { .. })
        ));
    }

    #[test]
    fn test_lookup_by_name() {
        let scenario = Scenario {
            name: "t".into(),
            machines: vec![Machine::named("m1")],
            machine_profiles: vec![MachineProfile {
                name: "small".into(),
                ..Default::default()
            }],
            networks: vec![Network {
                name: "lan".into(),
                ..Default::default()
            }],
        };

        assert!(scenario.profile("small").is_some());
        assert!(scenario.profile("large").is_none());
        assert!(scenario.network("lan").is_some());
        assert!(scenario.machine("m1").is_some());
    }

    #[test]
    fn test_primary_network_without_machines() {
        let scenario = Scenario {
            name: "t".into(),
            networks: vec![Network {
                name: "lan".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(scenario.primary_network().unwrap().name, "lan");

        let empty = Scenario::default();
        assert!(matches!(empty.primary_network(), Err(Error::NoNetwork(_))));
    }
}
