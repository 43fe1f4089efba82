//! Scenario normalization: fill in defaults so nothing downstream has to
//! deal with missing fields.

use crate::defaults::Defaults;
use crate::error::{Error, Result};
use crate::types::{Machine, MachineProfile, Scenario};

/// How machines pick their profile and network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Every machine gets the built-in profile and network, whatever the
    /// document says. This is the behavior `ash` ships with.
    #[default]
    ForceDefaults,
    /// Machines keep the profile/network named in the document, falling
    /// back to the built-in ones when the field is empty.
    ByName,
}

/// Resolve a raw scenario into one where every machine has a valid
/// profile, network and non-empty size fields.
///
/// The built-in network and profile are always appended to the lists.
pub fn normalize(raw: &Scenario, defaults: &Defaults, policy: SelectionPolicy) -> Result<Scenario> {
    let mut scenario = raw.clone();
    scenario.networks.push(defaults.network.clone());
    scenario.machine_profiles.push(defaults.profile.clone());

    let machines = raw
        .machines
        .iter()
        .map(|machine| resolve_machine(machine, &scenario, defaults, policy))
        .collect::<Result<Vec<_>>>()?;
    scenario.machines = machines;

    log::debug!(
        "normalized scenario {} ({} machines, policy {:?})",
        scenario.name,
        scenario.machines.len(),
        policy
    );
    Ok(scenario)
}

fn resolve_machine(
    machine: &Machine,
    scenario: &Scenario,
    defaults: &Defaults,
    policy: SelectionPolicy,
) -> Result<Machine> {
    let (profile, network) = match policy {
        SelectionPolicy::ForceDefaults => (&defaults.profile, defaults.network.name.clone()),
        SelectionPolicy::ByName => {
            let profile = lookup_profile(scenario, &machine.profile, defaults)?;
            let network = first_non_empty(&[&machine.network, &profile.network])
                .unwrap_or(&defaults.network.name)
                .to_string();
            if scenario.network(&network).is_none() {
                return Err(Error::UnknownReference {
                    kind: "network",
                    name: network,
                });
            }
            (profile, network)
        }
    };

    let mut resolved = machine.clone();
    resolved.profile = profile.name.clone();
    resolved.network = network;

    // Copy values from the profile if missing
    if resolved.vcpus.is_empty() {
        resolved.vcpus = profile.vcpus.clone();
    }
    if resolved.memory.is_empty() {
        resolved.memory = profile.memory.clone();
    }
    if resolved.disk.is_empty() {
        resolved.disk = profile.disk.clone();
    }

    Ok(resolved)
}

fn lookup_profile<'a>(
    scenario: &'a Scenario,
    name: &str,
    defaults: &Defaults,
) -> Result<&'a MachineProfile> {
    let name = if name.is_empty() {
        defaults.profile.name.as_str()
    } else {
        name
    };
    scenario.profile(name).ok_or_else(|| Error::UnknownReference {
        kind: "profile",
        name: name.to_string(),
    })
}

fn first_non_empty<'a>(candidates: &[&'a String]) -> Option<&'a str> {
    candidates
        .iter()
        .find(|c| !c.is_empty())
        .map(|c| c.as_str())
}
