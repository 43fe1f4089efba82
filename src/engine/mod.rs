//! Provisioning engine for ash
//!
//! The engine orchestrates:
//! 1. Planning - Order a resolved scenario's resources
//! 2. Setup - Converge the plan, stopping at the first failure
//! 3. Teardown - Destroy the plan in reverse dependency order, best-effort

pub mod planner;

use anyhow::{Context, Result};
use declarative::{ProgressCallback, SetupSummary, TeardownReport};
use planner::PlanContext;
use scenario::{Defaults, Scenario};
use std::path::PathBuf;
use std::sync::Arc;
use virtkit::Client;

use crate::paths;

/// Where ash keeps its files on the host
#[derive(Debug, Clone)]
pub struct Layout {
    /// Cache root; the pool lives underneath
    pub cache_dir: PathBuf,
    /// Boot ISO attached to every domain
    pub iso: PathBuf,
}

impl Layout {
    /// Resolve from the environment (see [`crate::paths`])
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            cache_dir: paths::cache_dir()?,
            iso: paths::agent_iso()?,
        })
    }

    /// Directory backing the storage pool
    pub fn pool_dir(&self, defaults: &Defaults) -> PathBuf {
        self.cache_dir.join(&defaults.pool_folder)
    }
}

/// Drives setup and teardown over one control-plane connection
///
/// The connection is released when the orchestrator (and any plan built
/// from it) is dropped.
pub struct Orchestrator {
    client: Arc<Client>,
    layout: Layout,
    defaults: &'static Defaults,
}

impl Orchestrator {
    pub fn new(client: Client, layout: Layout) -> Self {
        Self {
            client: Arc::new(client),
            layout,
            defaults: Defaults::get(),
        }
    }

    fn context(&self) -> PlanContext<'_> {
        PlanContext {
            client: &self.client,
            layout: &self.layout,
            defaults: self.defaults,
        }
    }

    /// Create whatever the scenario needs that does not exist yet.
    pub fn setup(
        &self,
        scenario: &Scenario,
        progress: &mut dyn ProgressCallback,
    ) -> Result<SetupSummary> {
        log::info!("Setting up scenario {}", scenario.name);
        let plan = planner::setup_plan(&self.context(), scenario)
            .context("Invalid scenario")?;
        Ok(declarative::converge(&plan, progress)?)
    }

    /// Destroy everything the scenario names, recording each outcome.
    pub fn teardown(
        &self,
        scenario: &Scenario,
        progress: &mut dyn ProgressCallback,
    ) -> Result<TeardownReport> {
        log::info!("Cleaning up scenario {}", scenario.name);
        let plan = planner::teardown_plan(&self.context(), scenario)
            .context("Invalid scenario")?;
        Ok(declarative::teardown(&plan, progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::{NoProgress, TeardownOutcome};
    use tempfile::TempDir;
    use virtkit::ResourceKind;
    use virtkit::backend::memory::{MemoryBackend, Operation};

    const DOC: &str = "name: t\nmachines:\n  - name: m1\n  - name: m2\n  - name: m3\n";

    fn orchestrator(backend: &MemoryBackend, temp: &TempDir) -> Orchestrator {
        let layout = Layout {
            cache_dir: temp.path().join("ash"),
            iso: temp.path().join("agent.iso"),
        };
        Orchestrator::new(Client::with_backend(Box::new(backend.clone())), layout)
    }

    fn scenario() -> Scenario {
        scenario::resolve_str(DOC).unwrap()
    }

    #[test]
    fn test_setup_creates_everything_in_order() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        let summary = orchestrator(&backend, &temp)
            .setup(&scenario(), &mut NoProgress)
            .unwrap();

        assert_eq!(summary.created(), 8);
        assert_eq!(summary.existing(), 0);
        assert!(temp.path().join("ash").join("pool").is_dir());

        let creates: Vec<_> = backend
            .calls()
            .into_iter()
            .filter(|c| c.operation == Operation::Create)
            .map(|c| c.kind)
            .collect();
        assert_eq!(&creates[..2], &[ResourceKind::StoragePool, ResourceKind::Network]);
        assert_eq!(
            &creates[2..4],
            &[ResourceKind::StorageVolume, ResourceKind::Domain]
        );
    }

    #[test]
    fn test_setup_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        let orchestrator = orchestrator(&backend, &temp);
        let scenario = scenario();

        orchestrator.setup(&scenario, &mut NoProgress).unwrap();
        let second = orchestrator.setup(&scenario, &mut NoProgress).unwrap();

        assert_eq!(second.created(), 0);
        assert_eq!(second.existing(), 8);
        for kind in [
            ResourceKind::StoragePool,
            ResourceKind::Network,
            ResourceKind::StorageVolume,
            ResourceKind::Domain,
        ] {
            let expected = if matches!(kind, ResourceKind::StoragePool | ResourceKind::Network) {
                1
            } else {
                3
            };
            assert_eq!(backend.count(Operation::Create, kind), expected, "{kind}");
        }
    }

    #[test]
    fn test_setup_keeps_existing_resources() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new()
            .with_resource(ResourceKind::StoragePool, "ash_pool")
            .with_resource(ResourceKind::Network, "ash");

        let summary = orchestrator(&backend, &temp)
            .setup(&scenario(), &mut NoProgress)
            .unwrap();

        assert_eq!(summary.existing(), 2);
        assert_eq!(summary.created(), 6);
        assert_eq!(backend.count(Operation::Create, ResourceKind::Network), 0);
    }

    #[test]
    fn test_setup_fails_fast_without_rollback() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new().fail_on(Operation::Create, ResourceKind::Domain, "m2");

        let err = orchestrator(&backend, &temp)
            .setup(&scenario(), &mut NoProgress)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<declarative::Error>(),
            Some(declarative::Error::Create { .. })
        ));
        assert!(backend.contains(ResourceKind::Domain, "m1"));
        assert!(!backend.contains(ResourceKind::Domain, "m3"));
        assert_eq!(
            backend.count(Operation::Lookup, ResourceKind::Domain),
            2,
            "nothing after m2 is attempted"
        );
    }

    #[test]
    fn test_setup_lookup_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new().fail_on(Operation::Lookup, ResourceKind::Network, "ash");

        let err = orchestrator(&backend, &temp)
            .setup(&scenario(), &mut NoProgress)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<declarative::Error>(),
            Some(declarative::Error::Lookup { .. })
        ));
        assert_eq!(backend.resources().len(), 1, "only the pool exists");
    }

    #[test]
    fn test_teardown_on_empty_plane_only_skips() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new();

        let report = orchestrator(&backend, &temp)
            .teardown(&scenario(), &mut NoProgress)
            .unwrap();

        assert_eq!(report.skipped(), 8);
        assert_eq!(report.destroyed(), 0);
        assert!(report.is_clean());
        assert!(
            backend
                .calls()
                .iter()
                .all(|c| c.operation == Operation::Lookup)
        );
    }

    #[test]
    fn test_setup_then_teardown_leaves_plane_empty() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        let orchestrator = orchestrator(&backend, &temp);
        let scenario = scenario();

        orchestrator.setup(&scenario, &mut NoProgress).unwrap();
        let report = orchestrator.teardown(&scenario, &mut NoProgress).unwrap();

        assert_eq!(report.destroyed(), 8);
        assert!(backend.resources().is_empty());
    }

    #[test]
    fn test_teardown_continues_past_failures() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        let scenario = scenario();
        orchestrator(&backend, &temp)
            .setup(&scenario, &mut NoProgress)
            .unwrap();

        let failing = backend
            .clone()
            .fail_on(Operation::Destroy, ResourceKind::Domain, "m1");
        let report = orchestrator(&failing, &temp)
            .teardown(&scenario, &mut NoProgress)
            .unwrap();

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, "m1");
        assert!(matches!(failures[0].outcome, TeardownOutcome::Failed { .. }));
        assert_eq!(report.destroyed(), 7);
        assert_eq!(
            backend.resources(),
            vec![virtkit::Handle::new(ResourceKind::Domain, "m1")]
        );
    }

    #[test]
    fn test_teardown_lookup_failure_is_recorded_and_skipped() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        let scenario = scenario::resolve_str("name: t\nmachines:\n  - name: m1\n").unwrap();
        orchestrator(&backend, &temp)
            .setup(&scenario, &mut NoProgress)
            .unwrap();

        let failing = backend
            .clone()
            .fail_on(Operation::Lookup, ResourceKind::Domain, "m1");
        let report = orchestrator(&failing, &temp)
            .teardown(&scenario, &mut NoProgress)
            .unwrap();

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, "m1");
        assert!(matches!(failures[0].outcome, TeardownOutcome::Failed { .. }));
        assert_eq!(report.destroyed(), 3);
        assert_eq!(backend.count(Operation::Destroy, ResourceKind::Domain), 0);
        assert_eq!(
            backend.resources(),
            vec![virtkit::Handle::new(ResourceKind::Domain, "m1")]
        );
    }

    #[test]
    fn test_teardown_ignores_malformed_sizes() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new()
            .with_resource(ResourceKind::StoragePool, "ash_pool")
            .with_resource(ResourceKind::Network, "ash")
            .with_resource(ResourceKind::Domain, "m1");
        let scenario =
            scenario::resolve_str("name: t\nmachines:\n  - name: m1\n    memory: 16 GB RAM\n")
                .unwrap();

        let report = orchestrator(&backend, &temp)
            .teardown(&scenario, &mut NoProgress)
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(report.destroyed(), 3);
        assert_eq!(report.skipped(), 1);
        assert!(backend.resources().is_empty());
    }

    #[test]
    fn test_teardown_order() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        let orchestrator = orchestrator(&backend, &temp);
        let scenario = scenario::resolve_str("name: t\nmachines:\n  - name: m1\n").unwrap();
        orchestrator.setup(&scenario, &mut NoProgress).unwrap();

        orchestrator.teardown(&scenario, &mut NoProgress).unwrap();

        let destroyed: Vec<_> = backend
            .calls()
            .into_iter()
            .filter(|c| c.operation == Operation::Destroy)
            .map(|c| c.kind)
            .collect();
        assert_eq!(
            destroyed,
            vec![
                ResourceKind::Domain,
                ResourceKind::StorageVolume,
                ResourceKind::StoragePool,
                ResourceKind::Network,
            ]
        );
    }

    #[test]
    fn test_connection_released_on_failure() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new().fail_on(Operation::Create, ResourceKind::Network, "ash");
        {
            let orchestrator = orchestrator(&backend, &temp);
            assert!(orchestrator.setup(&scenario(), &mut NoProgress).is_err());
        }
        assert_eq!(backend.close_count(), 1);
    }
}
