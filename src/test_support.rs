//! In-process stand-in for the GitHub REST API.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
pub struct MockGithub {
    pub fail_user: bool,
    pub fail_repos: bool,
    pub fail_events: bool,
    pub require_token: Option<String>,
    pub snapshot: Option<Value>,
}

impl MockGithub {
    pub fn failing() -> Self {
        Self {
            fail_user: true,
            fail_repos: true,
            fail_events: true,
            ..Self::default()
        }
    }

    fn reject(&self, fail: bool, headers: &HeaderMap) -> Option<Response> {
        if fail {
            return Some(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }
        if let Some(token) = &self.require_token {
            let expected = format!("Bearer {token}");
            let sent = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
            if sent != Some(expected.as_str()) {
                return Some(StatusCode::UNAUTHORIZED.into_response());
            }
        }
        None
    }
}

/// Serve the mock on an ephemeral port and return its base URL.
pub async fn spawn_github_mock(mock: MockGithub) -> String {
    let app = Router::new()
        .route("/users/:username", get(user))
        .route("/users/:username/repos", get(repos))
        .route("/users/:username/events/public", get(events))
        .route("/github-overview.json", get(snapshot))
        .with_state(Arc::new(mock));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn user(
    State(mock): State<Arc<MockGithub>>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejected) = mock.reject(mock.fail_user, &headers) {
        return rejected;
    }
    Json(json!({
        "login": username,
        "avatar_url": format!("https://avatars.githubusercontent.com/u/1?u={username}"),
        "public_repos": 12,
        "followers": 34,
        "following": 5,
        "bio": "ignored"
    }))
    .into_response()
}

async fn repos(
    State(mock): State<Arc<MockGithub>>,
    Path(username): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    if let Some(rejected) = mock.reject(mock.fail_repos, &headers) {
        return rejected;
    }
    if query.as_deref() != Some("per_page=100&sort=updated&type=owner") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(json!([
        {
            "id": 1,
            "name": "rag-chatbot",
            "full_name": format!("{username}/rag-chatbot"),
            "description": "Retrieval augmented chat",
            "html_url": format!("https://github.com/{username}/rag-chatbot"),
            "homepage": null,
            "stargazers_count": 5,
            "forks_count": 1,
            "language": "Python",
            "topics": ["llm"],
            "updated_at": "2024-05-01T08:00:00Z",
            "pushed_at": "2024-05-01T08:00:00Z",
            "fork": false,
            "archived": false
        },
        {
            "id": 2,
            "name": "portfolio-site",
            "full_name": format!("{username}/portfolio-site"),
            "description": null,
            "html_url": format!("https://github.com/{username}/portfolio-site"),
            "homepage": "https://example.dev",
            "stargazers_count": 2,
            "forks_count": 0,
            "language": "TypeScript",
            "topics": [],
            "updated_at": "2024-06-01T08:00:00Z",
            "pushed_at": null,
            "fork": true,
            "archived": false
        },
        {
            "id": 3,
            "name": "legacy-tool",
            "full_name": format!("{username}/legacy-tool"),
            "description": "Old scripts",
            "html_url": format!("https://github.com/{username}/legacy-tool"),
            "homepage": null,
            "stargazers_count": 10,
            "forks_count": 3,
            "language": "Perl",
            "topics": [],
            "updated_at": "2024-07-01T08:00:00Z",
            "pushed_at": "2024-07-01T08:00:00Z",
            "fork": false,
            "archived": true
        }
    ]))
    .into_response()
}

async fn events(
    State(mock): State<Arc<MockGithub>>,
    Path(username): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    if let Some(rejected) = mock.reject(mock.fail_events, &headers) {
        return rejected;
    }
    if query.as_deref() != Some("per_page=100") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let now = Utc::now().to_rfc3339();
    Json(json!([
        {
            "id": "100",
            "type": "PushEvent",
            "created_at": now,
            "repo": { "name": format!("{username}/rag-chatbot") },
            "payload": {
                "commits": [
                    { "sha": "abc", "message": "Add retriever\n\nDetails", "url": "https://api.github.com/x" },
                    { "sha": "def", "message": "Fix prompt", "url": "https://api.github.com/y" }
                ]
            }
        },
        {
            "id": "99",
            "type": "WatchEvent",
            "created_at": now,
            "repo": { "name": "someone/else" },
            "payload": { "action": "started" }
        }
    ]))
    .into_response()
}

async fn snapshot(State(mock): State<Arc<MockGithub>>) -> Response {
    match &mock.snapshot {
        Some(body) => Json(body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
