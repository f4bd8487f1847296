use anyhow::Context;
use clap::Parser;
use colored::*;
use guess_the_stars::cli::Cli;
use guess_the_stars::console::{print_banner, select_language};
use guess_the_stars::game::{play, shuffle_repositories};
use guess_the_stars::github::GitHubClient;
use guess_the_stars::models::Language;
use guess_the_stars::search::RepositoryFetcher;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Diagnostics go to stderr so they stay out of the prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    print_banner(&mut output, "Welcome to GUESS THE STARS")?;

    let language = match &cli.language {
        Some(name) => Language::from_name(name)?,
        None => select_language(&mut input, &mut output)?,
    };
    writeln!(output, "Looking for new {} repositories...", language.to_string().cyan())?;
    output.flush()?;

    let client = GitHubClient::new(cli.api_url.clone(), cli.token.clone())
        .context("Failed to create GitHub client")?;
    let today = chrono::Utc::now().date_naive();

    let mut repositories = RepositoryFetcher::new(&client)
        .max_pages(cli.max_pages)
        .window_days(cli.window_days)
        .fetch(language, today)
        .await
        .with_context(|| format!("Failed to fetch {} repositories", language))?;

    shuffle_repositories(&mut repositories);
    let scorecard = play(&repositories, &mut input, &mut output)?;
    info!(
        correct = scorecard.correct,
        total = scorecard.total,
        outcome = ?scorecard.outcome(),
        "Game finished"
    );

    Ok(())
}
