use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuessStarsError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed search response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Search results exhausted: {0}")]
    SearchExhausted(String),

    #[error("Not enough {language} repositories: no page out of {pages_searched} searched had 5 matches")]
    InsufficientRepositories {
        language: String,
        pages_searched: u32,
    },
}

pub type Result<T> = std::result::Result<T, GuessStarsError>;
