use crate::console::{print_banner, read_number};
use crate::error::Result;
use crate::models::Repository;
use colored::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::debug;

pub const TOLERANCE_PERCENTAGE: f64 = 10.0;

/// Correct guesses needed to win a game
pub const WIN_THRESHOLD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn from_correct(correct: usize) -> Self {
        if correct >= WIN_THRESHOLD {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scorecard {
    pub correct: usize,
    pub total: usize,
}

impl Scorecard {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_correct(self.correct)
    }
}

/// Allowed absolute deviation for a repository with `stars` stars
pub fn tolerance(stars: u64) -> f64 {
    (TOLERANCE_PERCENTAGE / 100.0) * stars as f64
}

pub fn is_correct_guess(guess: i64, stars: u64) -> bool {
    (guess as f64 - stars as f64).abs() <= tolerance(stars)
}

/// Shuffle with the thread-local generator.
pub fn shuffle_repositories(repositories: &mut [Repository]) {
    shuffle_with(repositories, &mut rand::rng());
}

pub fn shuffle_with<R: Rng + ?Sized>(repositories: &mut [Repository], rng: &mut R) {
    repositories.shuffle(rng);
}

/// Ask for a guess per repository, in the given order, and print the verdict.
pub fn play<R: BufRead, W: Write>(
    repositories: &[Repository],
    input: &mut R,
    output: &mut W,
) -> Result<Scorecard> {
    let mut scorecard = Scorecard::default();

    for repository in repositories {
        writeln!(
            output,
            "\nGuess the stars for the repository : {}",
            repository.full_name.bold()
        )?;
        output.flush()?;

        let guess = read_number(input)?;
        let correct = is_correct_guess(guess, repository.stars);
        debug!(
            repository = %repository.full_name,
            guess,
            stars = repository.stars,
            correct,
            "Scored guess"
        );
        scorecard.record(correct);

        if correct {
            writeln!(output, "{}", "You've guessed it correctly!!!".green())?;
        } else {
            writeln!(output, "{}", "Your answer is incorrect!!!".red())?;
        }
        writeln!(
            output,
            "{} has {} stars",
            repository.full_name,
            repository.stars.to_string().yellow()
        )?;
        writeln!(output, "{}\n", repository.html_url.dimmed())?;
    }

    print_banner(output, "Final Result")?;
    match scorecard.outcome() {
        Outcome::Win => writeln!(output, "{}", "YOU WIN!!!".green().bold())?,
        Outcome::Loss => writeln!(output, "{}", "Sorry, You Lost!!!".red().bold())?,
    }
    writeln!(
        output,
        "{} of {} guesses were correct\n",
        scorecard.correct, scorecard.total
    )?;

    Ok(scorecard)
}
