use anyhow::Result;
use declarative::{ProgressCallback, SetupSummary};
use scenario::Scenario;

use crate::Context;
use crate::engine::{Layout, Orchestrator};
use crate::ui;

pub fn run(ctx: &Context) -> Result<()> {
    let scenario = super::load_scenario()?;
    let orchestrator = super::connect(Layout::from_env()?)?;
    let mut progress = super::progress(ctx);

    if !ctx.quiet {
        ui::header(&format!("Setting up scenario {}", scenario.name));
    }
    let summary = execute(&orchestrator, &scenario, progress.as_mut())?;

    if !ctx.quiet {
        print_summary(&scenario, &summary);
    }
    Ok(())
}

fn execute(
    orchestrator: &Orchestrator,
    scenario: &Scenario,
    progress: &mut dyn ProgressCallback,
) -> Result<SetupSummary> {
    orchestrator.setup(scenario, progress)
}

fn print_summary(scenario: &Scenario, summary: &SetupSummary) {
    println!();
    ui::success(&format!(
        "Scenario {} is up: {} created, {} already present",
        scenario.name,
        ui::plural(summary.created(), "resource"),
        summary.existing()
    ));

    ui::header("Machines");
    for machine in &scenario.machines {
        ui::kv(
            &machine.name,
            &format!(
                "{} ({}, {} vcpus, {}, disk {})",
                machine.ip, machine.mac, machine.vcpus, machine.memory, machine.disk
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use virtkit::backend::memory::MemoryBackend;
    use virtkit::{Client, ResourceKind};

    #[test]
    fn test_execute_against_memory_backend() {
        let temp = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        let orchestrator = Orchestrator::new(
            Client::with_backend(Box::new(backend.clone())),
            Layout {
                cache_dir: temp.path().to_path_buf(),
                iso: temp.path().join("agent.iso"),
            },
        );
        let scenario = scenario::resolve_str("name: t\nmachines:\n  - name: m1\n").unwrap();

        let summary = execute(&orchestrator, &scenario, &mut declarative::NoProgress).unwrap();

        assert_eq!(summary.created(), 4);
        assert!(backend.contains(ResourceKind::Domain, "m1"));
        print_summary(&scenario, &summary);
    }
}
