use std::path::PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use crate::schedule::WorkloadPolicy;

#[derive(Parser, Debug)]
#[command(name = "shift-planner")]
#[command(about = "Weekly shift planner balancing workload across employees", long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the planner over HTTP
    Web(ServerConfig),
    /// Plan the sample roster once, print it and write the text export
    Generate(GenerateConfig),
}

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    #[arg(long, env = "SHIFT_PLANNER_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(long, env = "SHIFT_PLANNER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Start with the demo employees loaded
    #[arg(long)]
    pub sample_data: bool,

    #[arg(long, value_enum, default_value_t = PolicyArg::Projected)]
    pub policy: PolicyArg,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateConfig {
    /// Export path; defaults to schedule-<today>.txt
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = PolicyArg::Projected)]
    pub policy: PolicyArg,
}

/// Command-line spelling of `WorkloadPolicy`
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyArg {
    #[default]
    Projected,
    Running,
}

impl From<PolicyArg> for WorkloadPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Projected => WorkloadPolicy::Projected,
            PolicyArg::Running => WorkloadPolicy::Running,
        }
    }
}
