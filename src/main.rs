use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use shift_planner::config::{Cli, Command, GenerateConfig};
use shift_planner::display::{export_file_name, print_schedule, write_schedule_to_file};
use shift_planner::roster::Roster;
use shift_planner::web::{self, Workspace};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Command::Web(config)) => {
            let roster = if config.sample_data {
                Roster::with_sample_data()
            } else {
                Roster::new()
            };
            let workspace = Workspace::new(roster, config.policy.into());
            println!("Access the planner API at http://localhost:{}/api", config.port);
            web::start_server(&config.bind, config.port, workspace).await?;
        }
        Some(Command::Generate(config)) => generate(config)?,
        None => generate(GenerateConfig::default())?,
    }

    Ok(())
}

fn generate(config: GenerateConfig) -> Result<()> {
    let roster = Roster::with_sample_data();
    println!("Loaded {} employees (sample roster)", roster.len());

    let schedule = roster.generate_schedule(config.policy.into())?;
    print_schedule(&schedule);

    let path = config
        .output
        .unwrap_or_else(|| export_file_name(chrono::Local::now().date_naive()).into());
    write_schedule_to_file(&schedule, &path)?;
    info!(path = %path.display(), "schedule exported");
    println!("\nSchedule saved to {}", path.display());
    Ok(())
}
