//! Built-in defaults shared by every invocation.
//!
//! Initialized once on first access and never mutated afterwards.

use crate::types::{MachineProfile, Network};
use std::sync::OnceLock;

/// Label used for the default profile, network and bridge.
pub const DEFAULT_LABEL: &str = "ash";

/// Process-wide immutable defaults.
#[derive(Debug, Clone)]
pub struct Defaults {
    /// Profile appended to every scenario
    pub profile: MachineProfile,
    /// Network appended to every scenario
    pub network: Network,
    /// DNS base domain; networks get `<network>.<base_domain>`
    pub base_domain: String,
    /// Name of the storage pool holding every machine volume
    pub pool_name: String,
    /// Pool sub-directory inside the cache directory
    pub pool_folder: String,
}

static DEFAULTS: OnceLock<Defaults> = OnceLock::new();

impl Defaults {
    /// The shared defaults instance.
    pub fn get() -> &'static Defaults {
        DEFAULTS.get_or_init(Self::builtin)
    }

    fn builtin() -> Self {
        Self {
            profile: MachineProfile {
                name: DEFAULT_LABEL.to_string(),
                vcpus: "8".to_string(),
                memory: "16GiB".to_string(),
                disk: "120GiB".to_string(),
                network: DEFAULT_LABEL.to_string(),
            },
            network: Network {
                name: DEFAULT_LABEL.to_string(),
                cidr: "192.168.200.0/24".to_string(),
                disconnected: "no".to_string(),
            },
            base_domain: "test.agent.org".to_string(),
            pool_name: "ash_pool".to_string(),
            pool_folder: "pool".to_string(),
        }
    }
}
