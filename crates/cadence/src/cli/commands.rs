//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cadence - paced, rate-limit-aware front end for Gemini text generation
#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(about = "Paced, rate-limit-aware front end for Gemini text generation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server and the serialized worker
    Serve {
        /// Configuration file layered over the bundled defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen address, overriding server.bind
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print the vocabulary skills found in a text file
    Skills {
        /// Path to a plain-text CV
        file: PathBuf,
    },

    /// Print the backoff computed for a rate-limit message
    Backoff {
        /// Upstream error message, e.g. "Please retry in 2.5s."
        message: String,
    },
}
