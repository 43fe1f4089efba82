//! Execution engine - converges or tears down a plan, one resource at a time

use crate::context::{NoProgress, ProgressCallback};
use crate::error::{Error, Result};
use crate::planner::ExecutionPlan;
use crate::resource::Resource;
use crate::types::{ApplyResult, ResourceState, SetupSummary, TeardownOutcome, TeardownReport};

/// Bring every resource in the plan into existence, in order
///
/// Resources that already exist are left alone. The first lookup or
/// creation failure stops the run; resources created before it are kept.
pub fn converge<P: ProgressCallback + ?Sized>(
    plan: &ExecutionPlan,
    progress: &mut P,
) -> Result<SetupSummary> {
    let mut summary = SetupSummary::default();
    progress.on_start(plan.len());

    for resource in plan.iter() {
        let result = converge_resource(resource, progress)?;
        summary.add_result(resource.resource_type(), &resource.id(), result);
    }

    progress.on_complete();
    Ok(summary)
}

fn converge_resource<P: ProgressCallback + ?Sized>(
    resource: &dyn Resource,
    progress: &mut P,
) -> Result<ApplyResult> {
    let resource_type = resource.resource_type();
    let id = resource.id();
    progress.on_resource_start(resource_type, &id);

    let state = resource.current_state().map_err(|source| Error::Lookup {
        resource_type,
        id: id.clone(),
        source,
    })?;

    let result = match state {
        ResourceState::Present => {
            log::info!("skipping {resource_type} creation, {id} already exists");
            ApplyResult::Existing
        }
        ResourceState::Absent => {
            resource.create().map_err(|source| Error::Create {
                resource_type,
                id: id.clone(),
                source,
            })?;
            log::info!("{resource_type} {id} created");
            ApplyResult::Created
        }
    };

    progress.on_applied(resource_type, &id, result);
    Ok(result)
}

/// Remove every resource in the plan, in order, as far as possible
///
/// Absent resources are skipped. Failures are recorded in the report and
/// the run continues with the next resource.
pub fn teardown<P: ProgressCallback + ?Sized>(
    plan: &ExecutionPlan,
    progress: &mut P,
) -> TeardownReport {
    let mut report = TeardownReport::default();
    progress.on_start(plan.len());

    for resource in plan.iter() {
        let resource_type = resource.resource_type();
        let id = resource.id();
        progress.on_resource_start(resource_type, &id);

        let outcome = match teardown_resource(resource) {
            Ok(outcome) => outcome,
            Err(e) => {
                let reason = format!("{:#}", anyhow::Error::new(e));
                log::warn!("{reason}");
                TeardownOutcome::Failed { reason }
            }
        };

        progress.on_torn_down(resource_type, &id, &outcome);
        report.add_outcome(resource_type, &id, outcome);
    }

    progress.on_complete();
    report
}

fn teardown_resource(resource: &dyn Resource) -> Result<TeardownOutcome> {
    let resource_type = resource.resource_type();
    let id = resource.id();

    let state = resource.current_state().map_err(|source| Error::Lookup {
        resource_type,
        id: id.clone(),
        source,
    })?;

    if state.is_absent() {
        log::debug!("{resource_type} {id} not found, nothing to destroy");
        return Ok(TeardownOutcome::SkippedNotFound);
    }

    resource.destroy().map_err(|source| Error::Destroy {
        resource_type,
        id: id.clone(),
        source,
    })?;
    log::info!("{resource_type} {id} destroyed");
    Ok(TeardownOutcome::Destroyed)
}

/// Converge without progress reporting
pub fn converge_simple(plan: &ExecutionPlan) -> Result<SetupSummary> {
    converge(plan, &mut NoProgress)
}

/// Tear down without progress reporting
pub fn teardown_simple(plan: &ExecutionPlan) -> TeardownReport {
    teardown(plan, &mut NoProgress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::{Arc, Mutex};

    type World = Arc<Mutex<BTreeSet<String>>>;

    #[derive(Debug)]
    struct TestResource {
        id: String,
        world: World,
        fail_lookup: bool,
        fail_create: bool,
        fail_destroy: bool,
    }

    impl TestResource {
        fn boxed(id: &str, world: &World) -> Box<Self> {
            Box::new(Self {
                id: id.into(),
                world: Arc::clone(world),
                fail_lookup: false,
                fail_create: false,
                fail_destroy: false,
            })
        }
    }

    impl Resource for TestResource {
        fn id(&self) -> String {
            self.id.clone()
        }

        fn description(&self) -> String {
            format!("Test resource {}", self.id)
        }

        fn resource_type(&self) -> &'static str {
            "test"
        }

        fn current_state(&self) -> anyhow::Result<ResourceState> {
            if self.fail_lookup {
                anyhow::bail!("lookup exploded");
            }
            Ok(ResourceState::from_exists(
                self.world.lock().unwrap().contains(&self.id),
            ))
        }

        fn create(&self) -> anyhow::Result<()> {
            if self.fail_create {
                anyhow::bail!("create exploded");
            }
            self.world.lock().unwrap().insert(self.id.clone());
            Ok(())
        }

        fn destroy(&self) -> anyhow::Result<()> {
            if self.fail_destroy {
                anyhow::bail!("destroy exploded");
            }
            self.world.lock().unwrap().remove(&self.id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ProgressCallback for Recorder {
        fn on_applied(&mut self, _resource_type: &str, id: &str, result: ApplyResult) {
            self.events.push(format!("{id}:{result:?}"));
        }

        fn on_torn_down(&mut self, _resource_type: &str, id: &str, outcome: &TeardownOutcome) {
            self.events.push(format!("{id}:{outcome:?}"));
        }
    }

    fn plan_of(world: &World, ids: &[&str]) -> ExecutionPlan {
        ids.iter()
            .map(|id| TestResource::boxed(id, world) as Box<dyn Resource>)
            .collect()
    }

    #[test]
    fn test_converge_empty_plan() {
        let summary = converge_simple(&ExecutionPlan::new()).unwrap();
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_converge_creates_missing_only() {
        let world = World::default();
        world.lock().unwrap().insert("b".into());

        let mut progress = Recorder::default();
        let summary = converge(&plan_of(&world, &["a", "b", "c"]), &mut progress).unwrap();

        assert_eq!(summary.created(), 2);
        assert_eq!(summary.existing(), 1);
        assert_eq!(progress.events, vec!["a:Created", "b:Existing", "c:Created"]);
    }

    #[test]
    fn test_converge_twice_is_idempotent() {
        let world = World::default();
        let plan = plan_of(&world, &["a", "b"]);

        converge_simple(&plan).unwrap();
        let second = converge_simple(&plan).unwrap();

        assert_eq!(second.created(), 0);
        assert_eq!(second.existing(), 2);
    }

    #[test]
    fn test_converge_stops_at_first_failure() {
        let world = World::default();
        let mut failing = TestResource::boxed("b", &world);
        failing.fail_create = true;

        let mut plan = ExecutionPlan::new();
        plan.push(TestResource::boxed("a", &world));
        plan.push(failing);
        plan.push(TestResource::boxed("c", &world));

        let err = converge_simple(&plan).unwrap_err();
        assert!(matches!(err, Error::Create { ref id, .. } if id == "b"));

        let world = world.lock().unwrap();
        assert!(world.contains("a"));
        assert!(!world.contains("c"));
    }

    #[test]
    fn test_converge_lookup_failure() {
        let world = World::default();
        let mut failing = TestResource::boxed("a", &world);
        failing.fail_lookup = true;

        let mut plan = ExecutionPlan::new();
        plan.push(failing);

        let err = converge_simple(&plan).unwrap_err();
        assert!(matches!(err, Error::Lookup { .. }));
        assert!(world.lock().unwrap().is_empty());
    }

    #[test]
    fn test_teardown_empty_world_skips_everything() {
        let world = World::default();
        let report = teardown_simple(&plan_of(&world, &["a", "b"]));

        assert_eq!(report.skipped(), 2);
        assert_eq!(report.destroyed(), 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_teardown_continues_after_failure() {
        let world = World::default();
        world.lock().unwrap().extend(["a".to_string(), "b".to_string()]);

        let mut failing = TestResource::boxed("a", &world);
        failing.fail_destroy = true;

        let mut plan = ExecutionPlan::new();
        plan.push(failing);
        plan.push(TestResource::boxed("b", &world));

        let report = teardown_simple(&plan);

        assert_eq!(report.destroyed(), 1);
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, "a");
        match &failures[0].outcome {
            TeardownOutcome::Failed { reason } => assert!(reason.contains("destroy exploded")),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!world.lock().unwrap().contains("b"));
    }

    #[test]
    fn test_teardown_lookup_failure_does_not_stop_the_run() {
        let world = World::default();
        world.lock().unwrap().extend(["a".to_string(), "b".to_string()]);

        let mut failing = TestResource::boxed("a", &world);
        failing.fail_lookup = true;

        let mut plan = ExecutionPlan::new();
        plan.push(failing);
        plan.push(TestResource::boxed("b", &world));

        let mut progress = Recorder::default();
        let report = teardown(&plan, &mut progress);

        assert_eq!(report.destroyed(), 1);
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        match &failures[0].outcome {
            TeardownOutcome::Failed { reason } => assert!(reason.contains("lookup exploded")),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(progress.events[1], "b:Destroyed");
        let world = world.lock().unwrap();
        assert!(world.contains("a"));
        assert!(!world.contains("b"));
    }

    #[test]
    fn test_converge_then_teardown_leaves_nothing() {
        let world = World::default();
        let plan = plan_of(&world, &["a", "b", "c"]);

        converge_simple(&plan).unwrap();
        let report = teardown_simple(&plan);

        assert_eq!(report.destroyed(), 3);
        assert!(world.lock().unwrap().is_empty());
    }
}
