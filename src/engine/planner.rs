//! Execution planner - orders a scenario's resources for setup and teardown

use crate::resource::{Domain, StoragePool, StorageVolume, VirtualNetwork};
use declarative::ExecutionPlan;
use scenario::{Defaults, Scenario};
use std::sync::Arc;
use virtkit::Client;

use super::Layout;

/// Everything needed to build a plan
pub struct PlanContext<'a> {
    pub client: &'a Arc<Client>,
    pub layout: &'a Layout,
    pub defaults: &'a Defaults,
}

/// One machine's volume and domain
struct MachineResources {
    volume: StorageVolume,
    domain: Domain,
}

/// Build every resource up front so malformed sizes fail before any change.
fn machine_resources(
    ctx: &PlanContext<'_>,
    scenario: &Scenario,
) -> scenario::Result<Vec<MachineResources>> {
    let pool_dir = ctx.layout.pool_dir(ctx.defaults);
    scenario
        .machines
        .iter()
        .map(|machine| {
            Ok(MachineResources {
                volume: StorageVolume::new(
                    Arc::clone(ctx.client),
                    &ctx.defaults.pool_name,
                    &pool_dir,
                    &machine.volume_name(),
                    machine.disk_spec()?,
                ),
                domain: Domain::new(
                    Arc::clone(ctx.client),
                    machine,
                    &ctx.defaults.pool_name,
                    &ctx.layout.iso,
                )?,
            })
        })
        .collect()
}

fn pool(ctx: &PlanContext<'_>) -> StoragePool {
    StoragePool::new(
        Arc::clone(ctx.client),
        &ctx.defaults.pool_name,
        &ctx.layout.pool_dir(ctx.defaults),
    )
}

fn network(ctx: &PlanContext<'_>, scenario: &Scenario) -> scenario::Result<VirtualNetwork> {
    VirtualNetwork::new(
        Arc::clone(ctx.client),
        scenario.primary_network()?,
        &scenario.machines,
        &ctx.defaults.base_domain,
    )
}

/// Pool, network, then each machine's volume followed by its domain
pub fn setup_plan(ctx: &PlanContext<'_>, scenario: &Scenario) -> scenario::Result<ExecutionPlan> {
    let machines = machine_resources(ctx, scenario)?;

    let mut plan = ExecutionPlan::new();
    plan.push(Box::new(pool(ctx)));
    plan.push(Box::new(network(ctx, scenario)?));
    for MachineResources { volume, domain } in machines {
        plan.push(Box::new(volume));
        plan.push(Box::new(domain));
    }
    Ok(plan)
}

/// Each machine's domain followed by its volume, then pool, then network
///
/// Machines are torn down by name, so malformed sizes never block teardown.
pub fn teardown_plan(
    ctx: &PlanContext<'_>,
    scenario: &Scenario,
) -> scenario::Result<ExecutionPlan> {
    let pool_dir = ctx.layout.pool_dir(ctx.defaults);

    let mut plan = ExecutionPlan::new();
    for machine in &scenario.machines {
        plan.push(Box::new(Domain::existing(
            Arc::clone(ctx.client),
            &machine.name,
        )));
        plan.push(Box::new(StorageVolume::existing(
            Arc::clone(ctx.client),
            &ctx.defaults.pool_name,
            &pool_dir,
            &machine.volume_name(),
        )));
    }
    plan.push(Box::new(pool(ctx)));
    plan.push(Box::new(network(ctx, scenario)?));
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use virtkit::backend::memory::MemoryBackend;

    fn layout() -> Layout {
        Layout {
            cache_dir: PathBuf::from("/c/ash"),
            iso: PathBuf::from("/w/cluster/agent.iso"),
        }
    }

    fn scenario() -> Scenario {
        scenario::resolve_str("name: t\nmachines:\n  - name: m1\n  - name: m2\n").unwrap()
    }

    #[test]
    fn test_setup_order() {
        let client = Arc::new(Client::with_backend(Box::new(MemoryBackend::new())));
        let layout = layout();
        let ctx = PlanContext {
            client: &client,
            layout: &layout,
            defaults: Defaults::get(),
        };

        let plan = setup_plan(&ctx, &scenario()).unwrap();
        assert_eq!(
            plan.ids(),
            vec![
                "storage pool ash_pool",
                "network ash",
                "storage volume /c/ash/pool/m1.qcow2",
                "domain m1",
                "storage volume /c/ash/pool/m2.qcow2",
                "domain m2",
            ]
        );
    }

    #[test]
    fn test_teardown_order() {
        let client = Arc::new(Client::with_backend(Box::new(MemoryBackend::new())));
        let layout = layout();
        let ctx = PlanContext {
            client: &client,
            layout: &layout,
            defaults: Defaults::get(),
        };

        let plan = teardown_plan(&ctx, &scenario()).unwrap();
        assert_eq!(
            plan.ids(),
            vec![
                "domain m1",
                "storage volume /c/ash/pool/m1.qcow2",
                "domain m2",
                "storage volume /c/ash/pool/m2.qcow2",
                "storage pool ash_pool",
                "network ash",
            ]
        );
    }

    #[test]
    fn test_malformed_disk_fails_planning() {
        let client = Arc::new(Client::with_backend(Box::new(MemoryBackend::new())));
        let layout = layout();
        let ctx = PlanContext {
            client: &client,
            layout: &layout,
            defaults: Defaults::get(),
        };
        let scenario =
            scenario::resolve_str("name: t\nmachines:\n  - name: m1\n    disk: big\n").unwrap();

        assert!(matches!(
            setup_plan(&ctx, &scenario),
            Err(scenario::Error::InvalidSize(_))
        ));
    }

    #[test]
    fn test_malformed_sizes_do_not_block_teardown_planning() {
        let client = Arc::new(Client::with_backend(Box::new(MemoryBackend::new())));
        let layout = layout();
        let ctx = PlanContext {
            client: &client,
            layout: &layout,
            defaults: Defaults::get(),
        };
        let scenario = scenario::resolve_str(
            "name: t\nmachines:\n  - name: m1\n    memory: 16 GB RAM\n    vcpus: many\n",
        )
        .unwrap();

        let plan = teardown_plan(&ctx, &scenario).unwrap();
        assert_eq!(plan.len(), 4);
    }
}
