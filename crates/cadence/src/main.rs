//! Cadence CLI binary.
//!
//! This binary provides command-line access to Cadence:
//! - Serve the HTTP API in front of the serialized worker
//! - Inspect skill matching and backoff computation offline

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, print_backoff, print_skills, run_server};

    // Pick up GEMINI_API_KEY and CADENCE_* from a local .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, bind } => {
            run_server(config.as_deref(), bind, cli.verbose).await?;
        }

        Commands::Skills { file } => {
            init_cli_logging(cli.verbose);
            print_skills(&file)?;
        }

        Commands::Backoff { message } => {
            init_cli_logging(cli.verbose);
            print_backoff(&message)?;
        }
    }

    Ok(())
}

fn init_cli_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
