use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::github::DEFAULT_API_URL;
use crate::snapshot::DEFAULT_SNAPSHOT_PATH;

pub const DEFAULT_USERNAME: &str = "preethamofficial";

#[derive(Parser, Debug)]
#[command(name = "portfolio-overview", about = "GitHub overview data for the portfolio site")]
pub struct Cli {
    /// GitHub account to summarize
    #[arg(long, env = "GITHUB_USERNAME", default_value = DEFAULT_USERNAME, global = true)]
    pub username: String,

    /// Token for authenticated GitHub API requests (falls back to GH_TOKEN)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve overview, stats and project data over HTTP
    Serve {
        #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8080")]
        bind: String,

        /// Snapshot file path or http(s) URL used when the live API fails
        #[arg(long, env = "SNAPSHOT_SOURCE", default_value = DEFAULT_SNAPSHOT_PATH)]
        snapshot: String,

        /// Repository names listed first in the projects grid
        #[arg(long, env = "FEATURED_PROJECTS", value_delimiter = ',')]
        featured: Vec<String>,
    },

    /// Write a static overview snapshot
    Snapshot {
        #[arg(long, short, env = "SNAPSHOT_OUTPUT", default_value = DEFAULT_SNAPSHOT_PATH)]
        output: PathBuf,
    },
}
