//! Minerva binary entrypoint.

use anyhow::Context;
use clap::Parser;
use futures::StreamExt;
use minerva::cli::output::Output;
use minerva::cli::Cli;
use minerva::llm::OpenAIClient;
use minerva::research::{FileReportStore, ResearchConfig, ResearchCoordinator};
use minerva::types::ProgressUpdate;
use minerva::utils::Config;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "minerva=debug" } else { "minerva=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli);

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };
    output.banner();

    let client = Arc::new(OpenAIClient::new(
        config.model.api_key.clone(),
        config.model.api_base.clone(),
        config.model.model.clone(),
        config.model.search_model.clone(),
    ));
    let store = Arc::new(FileReportStore::new(&config.research.output_dir));
    let coordinator = ResearchCoordinator::new(
        client,
        store,
        ResearchConfig {
            how_many_searches: config.research.searches,
            search_timeout: config.research.search_timeout(),
            abort_when_no_summaries: config.research.abort_when_no_summaries,
        },
    );

    let mut updates = Box::pin(coordinator.run(cli.query));
    let mut failed = false;
    while let Some(update) = updates.next().await {
        failed = matches!(update, ProgressUpdate::Failed { .. });
        output.progress(&update);
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(searches) = cli.searches {
        config.research.searches = searches;
    }
    if let Some(dir) = &cli.output_dir {
        config.research.output_dir = dir.display().to_string();
    }
    if let Some(secs) = cli.timeout_secs {
        config.research.search_timeout_secs = Some(secs);
    }
    if let Some(model) = &cli.model {
        config.model.model = model.clone();
    }
    if let Some(search_model) = &cli.search_model {
        config.model.search_model = Some(search_model.clone());
    }
    if cli.abort_when_no_summaries {
        config.research.abort_when_no_summaries = true;
    }
}
