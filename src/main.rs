use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod aggregate;
mod categorize;
mod cli;
mod github;
mod models;
mod overview;
mod seed;
mod server;
mod snapshot;
mod stats;

#[cfg(test)]
mod test_support;

use cli::{Cli, Command};
use github::GithubClient;
use overview::{OverviewService, OverviewSource};
use server::AppState;
use snapshot::SnapshotSource;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let token = cli.token.or_else(|| std::env::var("GH_TOKEN").ok());
    let github = GithubClient::new(&cli.api_url, token).context("Failed to create GitHub client")?;

    match cli.command {
        Command::Serve {
            bind,
            snapshot,
            featured,
        } => {
            let snapshot = SnapshotSource::parse(&snapshot);
            tracing::info!("Snapshot fallback: {}", snapshot);
            let service = OverviewService::new(github, &cli.username, Some(snapshot));
            serve(service, featured, &bind).await
        }
        Command::Snapshot { output } => {
            let service = OverviewService::new(github, &cli.username, None);
            generate_snapshot(&service, &output).await
        }
    }
}

async fn serve(service: OverviewService, featured: Vec<String>, addr: &str) -> Result<()> {
    let featured = if featured.is_empty() {
        seed::seed_repo_names()
    } else {
        featured
    };

    tracing::info!("Serving GitHub overview for {}", service.username());

    let state = AppState {
        overview: Arc::new(service),
        featured: Arc::new(featured),
    };
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Overview service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn generate_snapshot(service: &OverviewService, output: &std::path::Path) -> Result<()> {
    let resolved = service.generate().await;
    match resolved.source {
        OverviewSource::Live => tracing::info!(
            "Generated GitHub overview for {} with {} repos",
            service.username(),
            resolved.overview.repos.len()
        ),
        _ => tracing::warn!("Live GitHub overview unavailable, writing seed snapshot"),
    }

    snapshot::write_snapshot(output, &resolved.overview)
        .await
        .with_context(|| format!("Failed to write snapshot to {}", output.display()))?;
    tracing::info!("Snapshot written to {}", output.display());

    Ok(())
}
