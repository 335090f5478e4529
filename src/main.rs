use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use datareview::{config::Config, export, report, review_tui, source};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "datareview=info");
    }

    let cli = Cli::parse();

    // Log to file always, and to the console unless the TUI owns the terminal
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", "datareview.log");
    let console_layer = (!cli.command.is_interactive()).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    let config = Config::from_env()?;

    match cli.command {
        Commands::Check { source } => {
            let config = config.with_source(source);
            let records = load(&config).await?;
            print!("{}", report::text_report(&records));
        }

        Commands::Export {
            source,
            output,
            filename,
        } => {
            let config = config.with_source(source).with_export(output, filename);
            config.validate()?;

            let records = load(&config).await?;
            match export::export_to_csv(&records, &config.export_name, &config.export_dir) {
                Ok(path) => println!("Exported {} records to {}", records.len(), path.display()),
                Err(e) => {
                    error!("Export failed: {}", e);
                    eprintln!("Export failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Tui { source } => {
            let config = config.with_source(source);
            config.validate()?;
            info!("Launching TUI interface");

            match review_tui::run_tui(config).await {
                Ok(_) => info!("TUI exited successfully"),
                Err(e) => error!("TUI failed: {}", e),
            }
        }
    }

    Ok(())
}

async fn load(config: &Config) -> Result<datareview::RecordSet> {
    let source = source::source_for(&config.source, config)?;
    info!("Loading records from {}", source.describe());

    match source.fetch().await {
        Ok(records) => Ok(records),
        Err(e) => {
            error!("Error fetching records: {}", e);
            Err(e.into())
        }
    }
}
