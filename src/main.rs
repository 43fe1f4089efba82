mod cli;
mod commands;
mod engine;
mod paths;
mod progress;
mod resource;
mod ui;

use clap::Parser;
use cli::{Cli, Command};

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // RUST_LOG, when set, takes precedence over the flags
    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Command::Setup => commands::setup::run(&ctx),
        Command::Teardown => commands::teardown::run(&ctx),
    };

    // Operation errors are reported but do not change the exit status.
    if let Err(e) = result {
        report_error(&ctx, &e);
    }
}

fn report_error(ctx: &Context, error: &anyhow::Error) {
    ui::error(&format!("{error:#}"));

    let category = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<virtkit::Error>())
        .map(virtkit::Error::category);
    if let Some(category) = category {
        ui::dim(&format!("{}: {}", category.description(), category.advice()));
    }

    if ctx.verbose > 0 {
        ui::dim(&format!("{error:?}"));
    }
}
