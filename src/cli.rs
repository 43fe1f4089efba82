use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ash")]
#[command(author = "ash contributors")]
#[command(version)]
#[command(about = "Agent scenario helper - provision and tear down local VM test clusters", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create the pool, network, volumes and domains described by cluster/scenario.yaml
    Setup,

    /// Destroy every resource the scenario describes
    Teardown,
}
