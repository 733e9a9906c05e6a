use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::{GitHubEvent, GitHubRepo, GitHubUser};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("portfolio-overview/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("GitHub API request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GitHub API request to {url} failed: {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to decode GitHub API response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Everything the aggregation needs for one account.
#[derive(Debug)]
pub struct OverviewInputs {
    pub user: GitHubUser,
    pub repos: Vec<GitHubRepo>,
    pub events: Vec<GitHubEvent>,
}

pub struct GithubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self, GithubError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(GithubError::Client)?;

        match &token {
            Some(token) => tracing::info!("Using token for GitHub API (length: {})", token.len()),
            None => tracing::warn!("No GitHub token provided, using unauthenticated rate limits"),
        }

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Shared connection pool, also used to fetch remote snapshots.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub async fn fetch_user(&self, username: &str) -> Result<GitHubUser, GithubError> {
        self.fetch_json(&format!("/users/{username}")).await
    }

    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<GitHubRepo>, GithubError> {
        self.fetch_json(&format!(
            "/users/{username}/repos?per_page=100&sort=updated&type=owner"
        ))
        .await
    }

    pub async fn fetch_events(&self, username: &str) -> Result<Vec<GitHubEvent>, GithubError> {
        self.fetch_json(&format!("/users/{username}/events/public?per_page=100"))
            .await
    }

    /// Fetch user, repositories and events concurrently. The first failure
    /// wins and the other requests are dropped.
    pub async fn fetch_overview_inputs(&self, username: &str) -> Result<OverviewInputs, GithubError> {
        let (user, repos, events) = tokio::try_join!(
            self.fetch_user(username),
            self.fetch_repos(username),
            self.fetch_events(username),
        )?;

        tracing::debug!(
            "Fetched {} repos and {} events for {}",
            repos.len(),
            events.len(),
            username
        );

        Ok(OverviewInputs { user, repos, events })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GithubError> {
        let url = format!("{}{}", self.api_url, path);

        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| GithubError::Request {
            url: url.clone(),
            source,
        })?;

        if let Some(remaining) = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
        {
            tracing::debug!("GitHub rate limit remaining: {}", remaining);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| GithubError::Decode { url, source })
    }
}
