use anyhow::Result;
use declarative::{TeardownOutcome, TeardownReport};

use crate::Context;
use crate::engine::Layout;
use crate::ui;

pub fn run(ctx: &Context) -> Result<()> {
    let scenario = super::load_scenario()?;
    let orchestrator = super::connect(Layout::from_env()?)?;
    let mut progress = super::progress(ctx);

    if !ctx.quiet {
        ui::header(&format!("Cleaning up scenario {}", scenario.name));
    }
    let report = orchestrator.teardown(&scenario, progress.as_mut())?;

    print_report(&report);
    Ok(())
}

/// Failures are always shown, even in quiet mode.
fn print_report(report: &TeardownReport) {
    println!();
    for entry in report.failures() {
        if let TeardownOutcome::Failed { reason } = &entry.outcome {
            ui::warn(&format!("{} {}: {}", entry.resource_type, entry.id, reason));
        }
    }

    let summary = format!(
        "{} destroyed, {} already gone",
        ui::plural(report.destroyed(), "resource"),
        report.skipped()
    );
    if report.is_clean() {
        ui::success(&summary);
    } else {
        let failed = report.failures().count();
        ui::warn(&format!(
            "{summary}, {} left behind",
            ui::plural(failed, "resource")
        ));
    }
}
