//! Shapes raw GitHub data into an [`Overview`]. Shared by the snapshot
//! generator and the runtime service.

use chrono::{DateTime, Datelike, Utc};

use crate::models::{GitHubEvent, GitHubRepo, GitHubUser, LanguageShare, Overview, RecentCommit};

pub const UNKNOWN_LANGUAGE: &str = "Unknown";
pub const MAX_LANGUAGES: usize = 6;
pub const MAX_RECENT_COMMITS: usize = 5;

pub fn normalize_language(language: Option<&str>) -> &str {
    match language {
        Some(lang) if !lang.is_empty() => lang,
        _ => UNKNOWN_LANGUAGE,
    }
}

/// Build an overview from the three fetched inputs. Archived repositories are
/// dropped before any aggregate is computed.
pub fn build_overview(
    user: Option<GitHubUser>,
    repos: Vec<GitHubRepo>,
    events: &[GitHubEvent],
    now: DateTime<Utc>,
) -> Overview {
    let repos: Vec<GitHubRepo> = repos.into_iter().filter(|r| !r.archived).collect();

    let total_stars = repos.iter().map(|r| r.stargazers_count).sum();
    let total_forks = repos.iter().map(|r| r.forks_count).sum();
    let language_breakdown = build_language_breakdown(&repos);
    let stats = extract_commit_stats(events, now);
    let last_updated = latest_repo_update(&repos, now);

    Overview {
        user,
        repos,
        total_stars,
        total_forks,
        total_commits_this_year: stats.total_commits_this_year,
        language_breakdown,
        recent_commits: stats.recent_commits,
        last_updated,
    }
}

/// Count repositories per language, most common first. Equal counts keep the
/// order in which the language was first seen.
pub fn build_language_breakdown(repos: &[GitHubRepo]) -> Vec<LanguageShare> {
    let mut counts: Vec<LanguageShare> = Vec::new();

    for repo in repos {
        let name = normalize_language(repo.language.as_deref());
        match counts.iter_mut().find(|share| share.name == name) {
            Some(share) => share.value += 1,
            None => counts.push(LanguageShare {
                name: name.to_string(),
                value: 1,
            }),
        }
    }

    // sort_by is stable, which gives the first-seen tie break
    counts.sort_by(|a, b| b.value.cmp(&a.value));
    counts.truncate(MAX_LANGUAGES);
    counts
}

#[derive(Debug, Default, PartialEq)]
pub struct CommitStats {
    pub total_commits_this_year: u64,
    pub recent_commits: Vec<RecentCommit>,
}

/// Scan events in API order (newest first). Every push event of the current
/// year counts toward the yearly total; at most five commits are flattened
/// into the recent list.
pub fn extract_commit_stats(events: &[GitHubEvent], now: DateTime<Utc>) -> CommitStats {
    let mut stats = CommitStats::default();

    for event in events.iter().filter(|e| e.is_push()) {
        let commits = event.commits();

        if event.created_at.year() == now.year() {
            stats.total_commits_this_year += commits.len() as u64;
        }

        let room = MAX_RECENT_COMMITS.saturating_sub(stats.recent_commits.len());
        stats
            .recent_commits
            .extend(commits.iter().take(room).map(|commit| RecentCommit {
                id: format!("{}-{}", event.id, commit.sha),
                repo_name: event.repo.name.clone(),
                message: first_line(&commit.message).to_string(),
                url: format!("https://github.com/{}/commit/{}", event.repo.name, commit.sha),
                date: event.created_at,
            }));
    }

    stats
}

/// Most recent `updated_at`, or `now` when there are no repositories.
pub fn latest_repo_update(repos: &[GitHubRepo], now: DateTime<Utc>) -> DateTime<Utc> {
    repos.iter().map(|r| r.updated_at).max().unwrap_or(now)
}

fn first_line(message: &str) -> &str {
    message.split('\n').next().unwrap_or_default()
}
