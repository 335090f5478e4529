//! Review TUI binary entry point

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use datareview::{config::Config, review_tui};

#[derive(Parser)]
#[command(name = "review-tui")]
#[command(about = "Record review Terminal User Interface")]
#[command(version)]
pub struct Cli {
    /// JSON file or http(s) URL serving {"records": [...]}
    #[arg(short, long)]
    pub source: Option<String>,

    /// Directory that CSV exports are written to
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "review_tui=info,datareview=info");
    }

    // Log to file only so the display is left alone
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("review_tui.log")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting review TUI...");

    let config = Config::from_env()?
        .with_source(cli.source)
        .with_export(cli.output, None);
    config.validate()?;

    match review_tui::run_tui(config).await {
        Ok(_) => {
            info!("Review TUI exited successfully");
        }
        Err(e) => {
            error!("Review TUI encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
