use std::path::{Path, PathBuf};

use reqwest::Client;
use serde_json::Value;

use crate::models::Overview;
use crate::seed::synthetic_user;

pub const DEFAULT_SNAPSHOT_PATH: &str = "public/github-overview.json";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch snapshot from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot has an invalid shape: {0}")]
    InvalidShape(&'static str),
}

/// Where a previously generated overview lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    File(PathBuf),
    Url(String),
}

impl SnapshotSource {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    async fn read(&self, http: &Client) -> Result<Vec<u8>, SnapshotError> {
        match self {
            Self::File(path) => tokio::fs::read(path).await.map_err(|source| SnapshotError::Io {
                path: path.clone(),
                source,
            }),
            Self::Url(url) => {
                let fetch_err = |message: String| SnapshotError::Fetch {
                    url: url.clone(),
                    message,
                };
                let response = http
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| fetch_err(e.to_string()))?;
                if !response.status().is_success() {
                    return Err(fetch_err(response.status().to_string()));
                }
                let body = response.bytes().await.map_err(|e| fetch_err(e.to_string()))?;
                Ok(body.to_vec())
            }
        }
    }
}

impl std::fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Load and validate a snapshot. A missing user is replaced by a synthetic
/// profile for `username`.
pub async fn load_snapshot(
    source: &SnapshotSource,
    http: &Client,
    username: &str,
) -> Result<Overview, SnapshotError> {
    let bytes = source.read(http).await?;
    parse_snapshot(&bytes, username)
}

pub fn parse_snapshot(bytes: &[u8], username: &str) -> Result<Overview, SnapshotError> {
    let value: Value = serde_json::from_slice(bytes)?;
    validate_shape(&value)?;

    let mut overview: Overview = serde_json::from_value(value)?;
    if overview.user.is_none() {
        overview.user = Some(synthetic_user(username, overview.repos.len()));
    }
    Ok(overview)
}

fn validate_shape(value: &Value) -> Result<(), SnapshotError> {
    let object = value
        .as_object()
        .ok_or(SnapshotError::InvalidShape("expected a JSON object"))?;

    if !object.get("repos").is_some_and(Value::is_array) {
        return Err(SnapshotError::InvalidShape("repos must be an array"));
    }
    if !object.get("languageBreakdown").is_some_and(Value::is_array) {
        return Err(SnapshotError::InvalidShape("languageBreakdown must be an array"));
    }
    if !object.get("lastUpdated").is_some_and(Value::is_string) {
        return Err(SnapshotError::InvalidShape("lastUpdated must be a string"));
    }
    Ok(())
}

/// Write `overview` as pretty JSON with a trailing newline, creating parent
/// directories as needed.
pub async fn write_snapshot(path: &Path, overview: &Overview) -> Result<(), SnapshotError> {
    let io_err = |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let mut json = serde_json::to_string_pretty(overview)?;
    json.push('\n');
    tokio::fs::write(path, json).await.map_err(io_err)
}
