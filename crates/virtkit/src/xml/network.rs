//! NAT network with static DHCP reservations.

use super::{escape, non_empty, required};
use crate::error::Result;
use crate::types::ResourceKind;
use std::net::Ipv4Addr;
use uuid::Uuid;

/// Loopback resolver that `apps.` lookups are forwarded to.
const APPS_FORWARDER: &str = "127.0.0.1";

/// One static DHCP reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpHost {
    /// Interface MAC
    pub mac: String,
    /// Reserved address
    pub ip: String,
    /// DHCP hostname
    pub name: String,
}

/// Builder for NAT-forwarded, bridged network descriptions.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    name: Option<String>,
    uuid: Option<String>,
    base_domain: Option<String>,
    gateway: Option<Ipv4Addr>,
    netmask: Option<Ipv4Addr>,
    dhcp_range: Option<(Ipv4Addr, Ipv4Addr)>,
    hosts: Vec<DhcpHost>,
}

impl NetworkBuilder {
    /// Create a new network builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set network (and bridge) name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set a fixed UUID instead of a generated one
    pub fn with_uuid(mut self, uuid: &str) -> Self {
        self.uuid = Some(uuid.to_string());
        self
    }

    /// Set the DNS base domain; the network serves `<name>.<base_domain>`
    pub fn with_base_domain(mut self, base_domain: &str) -> Self {
        self.base_domain = Some(base_domain.to_string());
        self
    }

    /// Set gateway address and netmask
    pub fn with_gateway(mut self, gateway: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        self.gateway = Some(gateway);
        self.netmask = Some(netmask);
        self
    }

    /// Set the dynamic DHCP range (inclusive)
    pub fn with_dhcp_range(mut self, start: Ipv4Addr, end: Ipv4Addr) -> Self {
        self.dhcp_range = Some((start, end));
        self
    }

    /// Add a static DHCP host
    pub fn with_host(mut self, host: DhcpHost) -> Self {
        self.hosts.push(host);
        self
    }

    /// Build the network XML
    pub fn build_xml(self) -> Result<String> {
        let kind = ResourceKind::Network;
        let name = non_empty(self.name, kind, "network name")?;
        let base_domain = non_empty(self.base_domain, kind, "base domain")?;
        let gateway = required(self.gateway, kind, "gateway")?;
        let netmask = required(self.netmask, kind, "netmask")?;
        let (dhcp_start, dhcp_end) = required(self.dhcp_range, kind, "DHCP range")?;
        let uuid = self.uuid.unwrap_or_else(|| Uuid::new_v4().to_string());

        let domain = format!("{name}.{base_domain}");

        let mut xml = format!(
            r#"<network>
  <name>{name}</name>
  <uuid>{uuid}</uuid>
  <forward mode="nat">
    <nat>
      <port start="1024" end="65535"/>
    </nat>
  </forward>
  <bridge name="{name}" stp="on" delay="0"/>
  <domain name="{domain}"/>
  <dns>
    <forwarder domain="apps.{domain}" addr="{APPS_FORWARDER}"/>
  </dns>
  <ip address="{gateway}" netmask="{netmask}">
    <dhcp>
      <range start="{dhcp_start}" end="{dhcp_end}"/>"#,
            name = escape(&name),
            uuid = escape(&uuid),
            domain = escape(&domain),
        );

        // DHCP configuration, one fixed address per machine
        for host in &self.hosts {
            xml.push_str(&format!(
                "\n      <host mac=\"{}\" name=\"{}\" ip=\"{}\"/>",
                escape(&host.mac),
                escape(&host.name),
                escape(&host.ip),
            ));
        }

        xml.push_str(
            r#"
    </dhcp>
  </ip>
</network>"#,
        );

        Ok(xml)
    }
}
