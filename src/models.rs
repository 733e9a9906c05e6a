use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository as returned by `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub avatar_url: String,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
}

/// An entry of `GET /users/{username}/events/public`. Only the fields the
/// aggregation reads are kept; payloads of other event kinds are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub repo: EventRepo,
    #[serde(default)]
    pub payload: Option<EventPayload>,
}

impl GitHubEvent {
    pub fn is_push(&self) -> bool {
        self.kind == "PushEvent"
    }

    pub fn commits(&self) -> &[PushCommit] {
        self.payload
            .as_ref()
            .and_then(|p| p.commits.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Option<Vec<PushCommit>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushCommit {
    pub sha: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCommit {
    pub id: String,
    pub repo_name: String,
    pub message: String,
    pub url: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub value: u64,
}

/// Presentation-ready summary of a GitHub account. This is also the on-disk
/// snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    #[serde(default)]
    pub user: Option<GitHubUser>,
    pub repos: Vec<GitHubRepo>,
    #[serde(default)]
    pub total_stars: u64,
    #[serde(default)]
    pub total_forks: u64,
    #[serde(default)]
    pub total_commits_this_year: u64,
    pub language_breakdown: Vec<LanguageShare>,
    #[serde(default)]
    pub recent_commits: Vec<RecentCommit>,
    pub last_updated: DateTime<Utc>,
}
