//! Virtual network resource

use anyhow::Result;
use declarative::{Resource, ResourceState};
use scenario::{AddressPlan, Machine, Network};
use std::sync::Arc;
use virtkit::xml::{DhcpHost, NetworkBuilder};
use virtkit::{Client, Description, ResourceKind};

const KIND: ResourceKind = ResourceKind::Network;

/// NAT network with one DHCP reservation per machine
#[derive(Debug)]
pub struct VirtualNetwork {
    client: Arc<Client>,
    name: String,
    base_domain: String,
    addresses: AddressPlan,
    hosts: Vec<DhcpHost>,
}

impl VirtualNetwork {
    /// Fails if the network CIDR does not parse.
    pub fn new(
        client: Arc<Client>,
        network: &Network,
        machines: &[Machine],
        base_domain: &str,
    ) -> scenario::Result<Self> {
        let hosts = machines
            .iter()
            .map(|m| DhcpHost {
                mac: m.mac.clone(),
                ip: m.ip.clone(),
                name: m.name.clone(),
            })
            .collect();

        Ok(Self {
            client,
            name: network.name.clone(),
            base_domain: base_domain.to_string(),
            addresses: AddressPlan::for_network(network)?,
            hosts,
        })
    }

    fn build_description(&self) -> Result<Description> {
        let (dhcp_start, dhcp_end) = self.addresses.dhcp_range();
        let mut builder = NetworkBuilder::new()
            .with_name(&self.name)
            .with_base_domain(&self.base_domain)
            .with_gateway(self.addresses.gateway(), self.addresses.netmask())
            .with_dhcp_range(dhcp_start, dhcp_end);
        for host in &self.hosts {
            builder = builder.with_host(host.clone());
        }
        Ok(Description::new(KIND, &self.name, builder.build_xml()?))
    }
}

impl Resource for VirtualNetwork {
    fn id(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        format!(
            "Network {} ({} hosts, gateway {})",
            self.name,
            self.hosts.len(),
            self.addresses.gateway()
        )
    }

    fn resource_type(&self) -> &'static str {
        KIND.label()
    }

    fn current_state(&self) -> Result<ResourceState> {
        super::lookup_state(&self.client, KIND, &self.name)
    }

    fn create(&self) -> Result<()> {
        self.client.create(&self.build_description()?)?;
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        super::destroy(&self.client, KIND, &self.name)
    }
}
