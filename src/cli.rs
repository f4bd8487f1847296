use crate::github::{API_BASE_URL, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::search::DEFAULT_MAX_PAGES;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "guess-the-stars")]
#[command(about = "Guess the star count of the most starred GitHub repositories created this week")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,

    /// GitHub token, raises the search rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Language to play with, skips the selection menu
    #[arg(long, env = "GUESS_LANGUAGE")]
    pub language: Option<String>,

    /// Search pages to scan before giving up
    #[arg(long, env = "GUESS_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// How many days back a repository may have been created
    #[arg(
        long,
        env = "GUESS_WINDOW_DAYS",
        default_value_t = DEFAULT_WINDOW_DAYS,
        value_parser = clap::value_parser!(i64).range(0..=MAX_WINDOW_DAYS)
    )]
    pub window_days: i64,
}
