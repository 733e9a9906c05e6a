//! Last-resort data used when neither the live API nor a snapshot is usable.

use chrono::{DateTime, Duration, Utc};

use crate::aggregate::build_overview;
use crate::models::{GitHubRepo, GitHubUser, Overview};

struct SeedRepo {
    name: &'static str,
    description: &'static str,
    language: &'static str,
    topics: &'static [&'static str],
}

const SEED_REPOS: [SeedRepo; 5] = [
    SeedRepo {
        name: "skin-disease-detection-build-by-using-ml",
        description: "Machine learning project for skin disease detection using Python-based classification workflows.",
        language: "Python",
        topics: &["ai", "ml", "healthcare", "classification"],
    },
    SeedRepo {
        name: "inventory-managment",
        description: "Inventory management application developed during internship with practical Python automation.",
        language: "Python",
        topics: &["python", "inventory", "automation"],
    },
    SeedRepo {
        name: "python-game",
        description: "Game development mini-project built with Python fundamentals and interactive logic.",
        language: "Python",
        topics: &["python", "game", "project"],
    },
    SeedRepo {
        name: "vaultofcode-python-internship-",
        description: "Internship repository containing Python scripts, mini-projects, and learning outcomes.",
        language: "Python",
        topics: &["python", "internship", "projects"],
    },
    SeedRepo {
        name: "preethamofficial",
        description: "Profile repository and developer overview with portfolio and activity context.",
        language: "Markdown",
        topics: &["profile", "readme"],
    },
];

const SEED_ID_BASE: u64 = 900_000;

pub fn seed_repo_names() -> Vec<String> {
    SEED_REPOS.iter().map(|seed| seed.name.to_string()).collect()
}

/// Seed repositories owned by `username`, each one day older than the last.
pub fn seed_repos(username: &str, now: DateTime<Utc>) -> Vec<GitHubRepo> {
    SEED_REPOS
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            let timestamp = now - Duration::days(index as i64);
            GitHubRepo {
                id: SEED_ID_BASE + index as u64,
                name: seed.name.to_string(),
                full_name: format!("{}/{}", username, seed.name),
                description: Some(seed.description.to_string()),
                html_url: format!("https://github.com/{}/{}", username, seed.name),
                homepage: None,
                stargazers_count: 0,
                forks_count: 0,
                language: Some(seed.language.to_string()),
                topics: seed.topics.iter().map(|t| t.to_string()).collect(),
                updated_at: timestamp,
                pushed_at: Some(timestamp),
                fork: false,
                archived: false,
            }
        })
        .collect()
}

/// Placeholder profile with zeroed social counts.
pub fn synthetic_user(username: &str, repo_count: usize) -> GitHubUser {
    GitHubUser {
        login: username.to_string(),
        avatar_url: format!("https://avatars.githubusercontent.com/{username}"),
        public_repos: repo_count as u64,
        followers: 0,
        following: 0,
    }
}

pub fn seed_overview(username: &str, now: DateTime<Utc>) -> Overview {
    let repos = seed_repos(username, now);
    let user = synthetic_user(username, repos.len());
    build_overview(Some(user), repos, &[], now)
}
