pub mod setup;
pub mod teardown;

use anyhow::{Context as _, Result};
use declarative::{NoProgress, ProgressCallback};
use scenario::Scenario;
use virtkit::Client;

use crate::Context;
use crate::engine::{Layout, Orchestrator};
use crate::paths;
use crate::progress::StepProgress;

/// Load and resolve the scenario document from the assets directory.
fn load_scenario() -> Result<Scenario> {
    let path = paths::scenario_file()?;
    scenario::resolve_file(&path)
        .with_context(|| format!("Failed to load scenario from {}", path.display()))
}

/// Open the control-plane connection used for one command.
fn connect(layout: Layout) -> Result<Orchestrator> {
    let uri = paths::libvirt_uri();
    let client =
        Client::connect(&uri).with_context(|| format!("Failed to connect to libvirt at {uri}"))?;
    Ok(Orchestrator::new(client, layout))
}

fn progress(ctx: &Context) -> Box<dyn ProgressCallback> {
    if ctx.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(StepProgress::new())
    }
}
