use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{LanguageShare, Overview, RecentCommit};

/// Figures behind the stat cards, language chart and activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub repos_count: u64,
    pub stars: u64,
    pub commits: u64,
    pub followers: u64,
    pub following: u64,
    pub language_data: Vec<LanguageShare>,
    pub recent_commits: Vec<RecentCommit>,
    pub last_updated: DateTime<Utc>,
}

impl StatsSummary {
    pub fn from_overview(overview: &Overview) -> Self {
        let user = overview.user.as_ref();

        // an empty chart still needs one slice
        let language_data = if overview.language_breakdown.is_empty() {
            vec![LanguageShare {
                name: "No Data".to_string(),
                value: 1,
            }]
        } else {
            overview.language_breakdown.clone()
        };

        Self {
            repos_count: user.map_or(overview.repos.len() as u64, |u| u.public_repos),
            stars: overview.total_stars,
            commits: overview.total_commits_this_year,
            followers: user.map_or(0, |u| u.followers),
            following: user.map_or(0, |u| u.following),
            language_data,
            recent_commits: overview.recent_commits.clone(),
            last_updated: overview.last_updated,
        }
    }
}
