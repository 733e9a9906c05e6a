use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::aggregate::normalize_language;
use crate::models::GitHubRepo;

const AI_ML_KEYWORDS: &[&str] = &[
    "ai", "ml", "llm", "rag", "transformer", "prompt", "neural", "model", "disease",
];
const WEB_KEYWORDS: &[&str] = &["web", "react", "frontend", "backend", "api", "vite", "site"];
const WEB_LANGUAGES: &[&str] = &["javascript", "typescript", "html", "css"];

const DEFAULT_LANGUAGE_COLOR: &str = "#64748B";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectCategory {
    AiMl,
    Python,
    Web,
    Tools,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 4] = [Self::AiMl, Self::Python, Self::Web, Self::Tools];

    pub fn label(self) -> &'static str {
        match self {
            Self::AiMl => "AI/ML",
            Self::Python => "Python",
            Self::Web => "Web",
            Self::Tools => "Tools",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown project category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for ProjectCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for ProjectCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Assign a repository to exactly one category. Keyword matches on the name,
/// description and topics take priority over the primary language.
pub fn categorize_project(repo: &GitHubRepo) -> ProjectCategory {
    let search_text = format!(
        "{} {} {}",
        repo.name,
        repo.description.as_deref().unwrap_or_default(),
        repo.topics.join(" ")
    )
    .to_lowercase();
    let language = normalize_language(repo.language.as_deref()).to_lowercase();

    let mentions = |keywords: &[&str]| keywords.iter().any(|k| search_text.contains(k));

    if mentions(AI_ML_KEYWORDS) {
        ProjectCategory::AiMl
    } else if language == "python" {
        ProjectCategory::Python
    } else if mentions(WEB_KEYWORDS) || WEB_LANGUAGES.contains(&language.as_str()) {
        ProjectCategory::Web
    } else {
        ProjectCategory::Tools
    }
}

pub fn language_color(language: Option<&str>) -> &'static str {
    match language {
        Some("Python") => "#3776AB",
        Some("TypeScript") => "#3178C6",
        Some("JavaScript") => "#F7DF1E",
        Some("HTML") => "#E34F26",
        Some("CSS") => "#1572B6",
        Some("Jupyter") | Some("Jupyter Notebook") => "#F37626",
        Some("Shell") => "#89E051",
        Some("SQL") => "#336791",
        Some("PHP") => "#777BB4",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}

/// A repository decorated for the projects grid.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    #[serde(flatten)]
    pub repo: GitHubRepo,
    pub category: ProjectCategory,
    pub language_color: &'static str,
    pub featured: bool,
    pub tech_tags: Vec<String>,
}

impl ProjectCard {
    fn new(repo: GitHubRepo, featured: bool) -> Self {
        let tech_tags = std::iter::once(normalize_language(repo.language.as_deref()).to_string())
            .chain(repo.topics.iter().take(3).cloned())
            .collect();

        Self {
            category: categorize_project(&repo),
            language_color: language_color(repo.language.as_deref()),
            featured,
            tech_tags,
            repo,
        }
    }
}

/// Owned (non-fork) repositories, featured names first and then most recently
/// updated, optionally narrowed to one category.
pub fn project_cards(
    repos: &[GitHubRepo],
    featured: &[String],
    filter: Option<ProjectCategory>,
) -> Vec<ProjectCard> {
    let mut cards: Vec<ProjectCard> = repos
        .iter()
        .filter(|repo| !repo.fork)
        .map(|repo| ProjectCard::new(repo.clone(), featured.contains(&repo.name)))
        .filter(|card| filter.map_or(true, |category| card.category == category))
        .collect();

    cards.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| b.repo.updated_at.cmp(&a.repo.updated_at))
    });
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::repo;

    #[test]
    fn test_keyword_beats_language() {
        let r = repo("rag-chatbot", Some("Python"));
        assert_eq!(categorize_project(&r), ProjectCategory::AiMl);
        assert_eq!(categorize_project(&r).to_string(), "AI/ML");
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(categorize_project(&repo("scraper", Some("python"))), ProjectCategory::Python);

        let mut web = repo("dashboard", Some("Python"));
        web.topics = vec!["react".to_string()];
        assert_eq!(categorize_project(&web), ProjectCategory::Python);

        assert_eq!(categorize_project(&repo("dashboard", Some("TypeScript"))), ProjectCategory::Web);
        assert_eq!(categorize_project(&repo("personal-site", Some("Go"))), ProjectCategory::Web);
        assert_eq!(categorize_project(&repo("dotfiles", None)), ProjectCategory::Tools);
    }

    #[test]
    fn test_description_and_topics_are_searched() {
        let mut r = repo("scanner", Some("Go"));
        r.description = Some("Neural network toolkit".to_string());
        assert_eq!(categorize_project(&r), ProjectCategory::AiMl);

        let mut r = repo("x", Some("Go"));
        r.topics = vec!["Frontend".to_string()];
        assert_eq!(categorize_project(&r), ProjectCategory::Web);
    }

    #[test]
    fn test_categorize_is_deterministic() {
        let r = repo("data-pipeline", Some("Rust"));
        assert_eq!(categorize_project(&r), categorize_project(&r.clone()));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("AI/ML".parse::<ProjectCategory>().unwrap(), ProjectCategory::AiMl);
        assert_eq!("tools".parse::<ProjectCategory>().unwrap(), ProjectCategory::Tools);
        assert!("Games".parse::<ProjectCategory>().is_err());
    }

    #[test]
    fn test_language_color() {
        assert_eq!(language_color(Some("Python")), "#3776AB");
        assert_eq!(language_color(Some("Jupyter Notebook")), "#F37626");
        assert_eq!(language_color(Some("Rust")), "#64748B");
        assert_eq!(language_color(None), "#64748B");
    }

    #[test]
    fn test_project_cards_order_and_filter() {
        let mut old_featured = repo("python-game", Some("Python"));
        old_featured.updated_at = "2020-01-01T00:00:00Z".parse().unwrap();
        let mut recent = repo("cli-tool", Some("Rust"));
        recent.updated_at = "2024-09-01T00:00:00Z".parse().unwrap();
        let mut forked = repo("fork-of-something", Some("Rust"));
        forked.fork = true;
        let mut older = repo("old-tool", Some("C"));
        older.updated_at = "2022-01-01T00:00:00Z".parse().unwrap();
        older.topics = vec!["a".into(), "b".into(), "c".into(), "d".into()];

        let repos = vec![older, forked, recent, old_featured];
        let featured = vec!["python-game".to_string()];

        let cards = project_cards(&repos, &featured, None);
        let names: Vec<_> = cards.iter().map(|c| c.repo.name.as_str()).collect();
        assert_eq!(names, vec!["python-game", "cli-tool", "old-tool"]);
        assert!(cards[0].featured);
        assert_eq!(cards[2].tech_tags, vec!["C", "a", "b", "c"]);

        let tools = project_cards(&repos, &featured, Some(ProjectCategory::Tools));
        assert_eq!(tools.len(), 2);
        assert!(tools.iter().all(|c| c.category == ProjectCategory::Tools));
    }
}
