use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datareview")]
#[command(about = "Review records with per-field validation annotations and export them to CSV")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the records with flagged cells and a list of every issue
    Check {
        /// JSON file or http(s) URL serving {"records": [...]}
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Export the records to <output>/<filename>.csv
    Export {
        /// JSON file or http(s) URL serving {"records": [...]}
        #[arg(short, long)]
        source: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name without the .csv extension
        #[arg(short, long)]
        filename: Option<String>,
    },

    /// Launch terminal UI to review records interactively
    Tui {
        /// JSON file or http(s) URL serving {"records": [...]}
        #[arg(short, long)]
        source: Option<String>,
    },
}

impl Commands {
    /// Whether the command owns the terminal, so logs must not go to stderr
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Tui { .. })
    }
}
