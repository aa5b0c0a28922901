use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kairos_core::config::load_config;
use kairos_recur::RecurrenceSubmission;
use kairos_service::recurrence::{InstanceQuery, RecurrenceService};
use kairos_service::store::MemoryPatternStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kairos")]
#[command(about = "Expand a recurrence pattern into concrete instances", long_about = None)]
struct Cli {
    /// JSON file holding the recurrence submission
    submission: PathBuf,

    /// First date of the window, defaults to today
    #[arg(long)]
    from: Option<String>,

    /// Last date of the window, defaults to today plus the configured window
    #[arg(long)]
    to: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let body = std::fs::read_to_string(&cli.submission)
        .with_context(|| format!("reading {}", cli.submission.display()))?;
    let submission = RecurrenceSubmission::from_json(&body)?;

    let service = RecurrenceService::new(MemoryPatternStore::new(), config.expansion);
    let view = service.create_recurrence(&submission)?;

    let query = InstanceQuery::new(cli.from.as_deref(), cli.to.as_deref());
    let today = chrono::Local::now().date_naive();
    let response = service.recurrence_instances(view.id, &query, today)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
