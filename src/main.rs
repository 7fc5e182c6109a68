use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use swot::cli::{Cli, Commands};
use swot::{Config, PlannerStore, Profile};

#[tokio::main]
async fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    // Initialize the planner store
    let data_path = config.get_data_path(profile);
    let store = PlannerStore::new(data_path)?;

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            swot::server::serve(store, &config.host, port).await?;
        }
        Commands::AddTask { name, due, subject } => {
            swot::cli::handle_add_task(name, due, subject, &store)?;
        }
        Commands::AddSubject { name } => {
            swot::cli::handle_add_subject(name, &store)?;
        }
        Commands::Journal { entry } => {
            swot::cli::handle_journal(entry, &store)?;
        }
    }

    Ok(())
}
