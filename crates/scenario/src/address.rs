//! Network address planning.
//!
//! Every address the tool hands out is derived from the network address
//! of the scenario CIDR by adding a fixed offset to the last octet:
//!
//! | offset  | use                       |
//! |---------|---------------------------|
//! | 1       | gateway (bridge address)  |
//! | 20..60  | dynamic DHCP range        |
//! | 80..    | machines, in declared order |

use crate::error::{Error, Result};
use crate::mac::generate_mac;
use crate::types::{Network, Scenario};
use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;

/// Offset of the gateway address.
pub const GATEWAY_OFFSET: u8 = 1;
/// Offset of the first dynamic DHCP address.
pub const DHCP_START_OFFSET: u8 = 20;
/// Offset of the last dynamic DHCP address.
pub const DHCP_END_OFFSET: u8 = 60;
/// Machines addresses start from CIDR + 80.
pub const MACHINES_BASE_OFFSET: u8 = 80;

/// Addressing layout of one scenario network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPlan {
    network: Ipv4Network,
}

impl AddressPlan {
    /// Parse the network's CIDR block.
    ///
    /// The prefix length is mandatory; a bare address is rejected.
    pub fn for_network(network: &Network) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidCidr {
            network: network.name.clone(),
            cidr: network.cidr.clone(),
            reason,
        };

        let cidr = network.cidr.trim();
        if !cidr.contains('/') {
            return Err(invalid("missing prefix length".to_string()));
        }
        let parsed = cidr
            .parse::<Ipv4Network>()
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self { network: parsed })
    }

    /// Network address with the mask applied.
    pub fn base(&self) -> Ipv4Addr {
        self.network.network()
    }

    /// Netmask of the block, dotted quad.
    pub fn netmask(&self) -> Ipv4Addr {
        self.network.mask()
    }

    /// Gateway address, assigned to the bridge.
    pub fn gateway(&self) -> Ipv4Addr {
        self.at(GATEWAY_OFFSET)
    }

    /// Inclusive dynamic DHCP range.
    pub fn dhcp_range(&self) -> (Ipv4Addr, Ipv4Addr) {
        (self.at(DHCP_START_OFFSET), self.at(DHCP_END_OFFSET))
    }

    /// First address handed to machines.
    pub fn machines_start(&self) -> Ipv4Addr {
        self.at(MACHINES_BASE_OFFSET)
    }

    /// Whether an address lies inside the block.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.network.contains(addr)
    }

    /// Base address plus `offset` on the last octet.
    ///
    /// The addition wraps within the octet; whether the result still lies
    /// in the block is not checked here.
    pub fn at(&self, offset: u8) -> Ipv4Addr {
        bump_last_octet(self.base(), offset)
    }
}

fn bump_last_octet(addr: Ipv4Addr, by: u8) -> Ipv4Addr {
    let [a, b, c, d] = addr.octets();
    Ipv4Addr::new(a, b, c, d.wrapping_add(by))
}

/// Assign an IP and a MAC to every machine that lacks one.
///
/// Returns a new scenario; the input is left untouched.
pub fn plan_addresses(scenario: &Scenario) -> Result<Scenario> {
    plan_addresses_with(scenario, generate_mac)
}

/// Like [`plan_addresses`], with a caller-supplied MAC source.
pub fn plan_addresses_with<F>(scenario: &Scenario, mut next_mac: F) -> Result<Scenario>
where
    F: FnMut() -> String,
{
    let plan = AddressPlan::for_network(scenario.primary_network()?)?;
    let mut next_ip = plan.machines_start();
    let mut planned = scenario.clone();

    for machine in &mut planned.machines {
        // Generate a mac if missing
        if machine.mac.is_empty() {
            machine.mac = next_mac();
        }

        // Auto assign an IP; pre-set addresses don't consume a slot
        if machine.ip.is_empty() {
            if !plan.contains(next_ip) {
                log::warn!(
                    "address {} for machine {} is outside {}",
                    next_ip,
                    machine.name,
                    plan.network
                );
            }
            machine.ip = next_ip.to_string();
            next_ip = bump_last_octet(next_ip, 1);
        }
    }

    Ok(planned)
}
