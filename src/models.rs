use crate::error::{GuessStarsError, Result};
use crate::types::SearchItem;
use std::fmt;

/// A repository the player has to guess the stars of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub full_name: String,
    pub html_url: String,
    pub language: String,
    pub stars: u64,
}

impl Repository {
    /// Builds a repository from a search item that declares a language.
    pub fn from_item(item: &SearchItem) -> Option<Self> {
        let language = item.language.as_ref()?;
        Some(Repository {
            full_name: item.full_name.clone(),
            html_url: item.html_url.clone(),
            language: language.clone(),
            stars: item.stargazers_count,
        })
    }
}

/// Languages offered in the selection menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Javascript,
    Go,
    Java,
    Python,
    Scala,
    Rust,
    C,
    CSharp,
    Cpp,
    Perl,
    Ruby,
    Php,
}

impl Language {
    /// Menu order; the index shown to the player is the position here.
    pub const ALL: [Language; 12] = [
        Language::Javascript,
        Language::Go,
        Language::Java,
        Language::Python,
        Language::Scala,
        Language::Rust,
        Language::C,
        Language::CSharp,
        Language::Cpp,
        Language::Perl,
        Language::Ruby,
        Language::Php,
    ];

    /// Name as GitHub reports it in the `language` field
    pub fn name(self) -> &'static str {
        match self {
            Language::Javascript => "Javascript",
            Language::Go => "Go",
            Language::Java => "Java",
            Language::Python => "Python",
            Language::Scala => "Scala",
            Language::Rust => "Rust",
            Language::C => "C",
            Language::CSharp => "C#",
            Language::Cpp => "C++",
            Language::Perl => "Perl",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
        }
    }

    pub fn from_index(index: i64) -> Result<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| {
                GuessStarsError::InvalidSelection(format!(
                    "{} is not a menu index (expected 0 to {})",
                    index,
                    Self::ALL.len() - 1
                ))
            })
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|language| language.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| {
                GuessStarsError::InvalidSelection(format!("unsupported language: {}", name))
            })
    }

    pub fn matches(self, reported: &str) -> bool {
        self.name().eq_ignore_ascii_case(reported)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rate limit state reported by the last search response
#[derive(Debug, Clone)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: chrono::DateTime<chrono::Utc>,
    pub is_limited: bool,
}

impl Default for RateLimitState {
    // Unauthenticated search allows 10 requests per minute
    fn default() -> Self {
        Self {
            remaining: 10,
            limit: 10,
            reset_time: chrono::Utc::now() + chrono::Duration::minutes(1),
            is_limited: false,
        }
    }
}
