use crate::error::{GuessStarsError, Result};
use crate::models::Language;
use colored::*;
use std::io::{BufRead, ErrorKind, Write};
use tracing::debug;

pub const DASH_WIDTH: usize = 26;

pub fn dashes() -> String {
    "-".repeat(DASH_WIDTH)
}

/// Print `title` between two dashed lines
pub fn print_banner<W: Write>(output: &mut W, title: &str) -> Result<()> {
    writeln!(output, "{}", dashes().dimmed())?;
    writeln!(output, "{}", title.bold())?;
    writeln!(output, "{}", dashes().dimmed())?;
    Ok(())
}

pub fn print_language_menu<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "\nYou have following languages to choose from : ")?;
    for (index, language) in Language::ALL.iter().enumerate() {
        writeln!(output, "{} : {}", index.to_string().cyan(), language)?;
    }
    writeln!(output, "\nChoose the index for the language you want to guess: ")?;
    output.flush()?;
    Ok(())
}

/// Read one line without its trailing line break.
pub fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(GuessStarsError::IoError(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            "input closed while waiting for an answer",
        )));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Read an integer answer. Anything that does not parse counts as 0.
pub fn read_number<R: BufRead>(input: &mut R) -> Result<i64> {
    let line = read_line(input)?;
    Ok(line.trim().parse::<i64>().unwrap_or_else(|e| {
        debug!(input = %line, error = %e, "Non-numeric answer, using 0");
        0
    }))
}

/// Show the menu and read the player's language choice.
pub fn select_language<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Language> {
    print_language_menu(output)?;
    Language::from_index(read_number(input)?)
}
