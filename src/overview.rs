//! Resolves an [`Overview`] by trying each data tier in order until one
//! succeeds. Seed data always succeeds, so resolution never fails.

use chrono::{DateTime, Utc};

use crate::aggregate::build_overview;
use crate::github::{GithubClient, GithubError};
use crate::models::Overview;
use crate::seed::seed_overview;
use crate::snapshot::{load_snapshot, SnapshotError, SnapshotSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewSource {
    Live,
    Snapshot,
    Seed,
}

impl OverviewSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Snapshot => "snapshot",
            Self::Seed => "seed",
        }
    }
}

/// Tiers tried by the runtime service before falling back to seed data.
const RUNTIME_TIERS: &[OverviewSource] = &[OverviewSource::Live, OverviewSource::Snapshot];
/// The generator produces the snapshot, so it never reads one.
const GENERATOR_TIERS: &[OverviewSource] = &[OverviewSource::Live];

#[derive(Debug, thiserror::Error)]
pub enum OverviewError {
    #[error(transparent)]
    Github(#[from] GithubError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("no snapshot source configured")]
    NoSnapshot,
}

#[derive(Debug)]
pub struct Resolved {
    pub overview: Overview,
    pub source: OverviewSource,
}

pub struct OverviewService {
    github: GithubClient,
    username: String,
    snapshot: Option<SnapshotSource>,
}

impl OverviewService {
    pub fn new(github: GithubClient, username: &str, snapshot: Option<SnapshotSource>) -> Self {
        Self {
            github,
            username: username.to_string(),
            snapshot,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Runtime resolution: live, then snapshot, then seed.
    pub async fn load(&self) -> Resolved {
        self.resolve(RUNTIME_TIERS, Utc::now()).await
    }

    /// Build-time resolution: live, then seed.
    pub async fn generate(&self) -> Resolved {
        self.resolve(GENERATOR_TIERS, Utc::now()).await
    }

    async fn resolve(&self, tiers: &[OverviewSource], now: DateTime<Utc>) -> Resolved {
        for &source in tiers {
            match self.try_tier(source, now).await {
                Ok(overview) => {
                    tracing::info!(
                        "Resolved GitHub overview for {} from {} data ({} repos)",
                        self.username,
                        source.as_str(),
                        overview.repos.len()
                    );
                    return Resolved { overview, source };
                }
                Err(e) => tracing::warn!(
                    "Failed to load {} GitHub overview for {}: {}",
                    source.as_str(),
                    self.username,
                    e
                ),
            }
        }

        tracing::warn!("Using seed data for {}", self.username);
        Resolved {
            overview: seed_overview(&self.username, now),
            source: OverviewSource::Seed,
        }
    }

    async fn try_tier(&self, source: OverviewSource, now: DateTime<Utc>) -> Result<Overview, OverviewError> {
        match source {
            OverviewSource::Live => {
                let inputs = self.github.fetch_overview_inputs(&self.username).await?;
                Ok(build_overview(Some(inputs.user), inputs.repos, &inputs.events, now))
            }
            OverviewSource::Snapshot => {
                let snapshot = self.snapshot.as_ref().ok_or(OverviewError::NoSnapshot)?;
                Ok(load_snapshot(snapshot, self.github.http(), &self.username).await?)
            }
            OverviewSource::Seed => Ok(seed_overview(&self.username, now)),
        }
    }
}
