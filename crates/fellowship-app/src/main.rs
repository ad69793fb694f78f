use clap::Parser;
use fellowship_app::cli::Cli;
use fellowship_app::commands::run;
use fellowship_core::config::{Settings, load_config};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = match &cli.config {
        Some(path) => Settings::load_from_path(path)?,
        None => load_config()?,
    };

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping warn");
    }

    tracing::debug!(config = ?config, "Configuration loaded");

    let output = run(&cli.command, &config)?;
    println!("{output}");

    Ok(())
}
