use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reko")]
#[command(version)]
#[command(about = "Corpus-driven chat assistant that learns from ratings")]
pub struct Cli {
    /// Config file (defaults to ~/.reko/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a document folder and print corpus statistics
    Stats {
        /// Folder containing .txt documents
        dir: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show next-word candidates for a context
    Predict {
        dir: PathBuf,

        /// Context tokens
        #[arg(required = true)]
        context: Vec<String>,
    },

    /// Generate a single reply
    Reply {
        dir: PathBuf,

        query: String,

        /// Token budget, query included
        #[arg(short = 'n', long)]
        max_length: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Interactive session with reply rating
    Chat {
        dir: PathBuf,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the effective configuration
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing config file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },

    /// View the rating journal
    Feedback {
        /// Show statistics summary
        #[arg(long)]
        stats: bool,
    },

    /// Print version information
    Version,
}
