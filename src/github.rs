use crate::error::{GuessStarsError, Result};
use crate::models::RateLimitState;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
pub const PER_PAGE: u32 = 100;
pub const DEFAULT_WINDOW_DAYS: i64 = 7;
pub const MAX_WINDOW_DAYS: i64 = 36_500;

// Body of the 422 GitHub answers for pages past the first 1000 results
const RESULT_CAP_MESSAGE: &str = "Only the first 1000 search results are available";

/// One page of the "recently created, most starred" repository search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub created_after: NaiveDate,
    pub page: u32,
    pub per_page: u32,
}

impl SearchRequest {
    /// Request for `page` covering repositories created in the `window_days`
    /// days before `today`.
    pub fn for_page(page: u32, today: NaiveDate, window_days: i64) -> Result<Self> {
        let created_after = ChronoDuration::try_days(window_days)
            .and_then(|window| today.checked_sub_signed(window))
            .ok_or_else(|| {
                GuessStarsError::InvalidConfig(format!(
                    "a {} day window before {} is out of range",
                    window_days, today
                ))
            })?;

        Ok(SearchRequest {
            created_after,
            page,
            per_page: PER_PAGE,
        })
    }

    pub fn query_term(&self) -> String {
        format!("created:>{}", self.created_after.format("%Y-%m-%d"))
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query_term()),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }

    pub fn url(&self, api_base: &str) -> Result<Url> {
        let endpoint = format!("{}/search/repositories", api_base.trim_end_matches('/'));
        Url::parse_with_params(&endpoint, self.query_pairs())
            .map_err(|e| GuessStarsError::ApiError(format!("Invalid API URL {}: {}", endpoint, e)))
    }
}

/// A source of raw search result pages.
#[allow(async_fn_in_trait)]
pub trait SearchSource {
    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchPage>;
}

/// Raw response body of one search page
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub body: Vec<u8>,
    pub rate_limit: RateLimitState,
}

pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_base: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Guess The Stars/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient {
            client,
            api_base: api_base.into(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Issues a single search request. Failures are returned, never retried.
    pub async fn search_repositories(&self, request: &SearchRequest) -> Result<SearchPage> {
        let url = request.url(&self.api_base)?;
        info!(%url, page = request.page, "Searching repositories");

        let mut builder = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("token {}", token));
        }

        let response = builder.send().await?;
        let rate_limit = get_rate_limit_state(response.headers());
        debug!(
            remaining = rate_limit.remaining,
            limit = rate_limit.limit,
            "Search rate limit"
        );

        match response.status() {
            status if status.is_success() => {
                if rate_limit.remaining < 2 {
                    warn!(
                        remaining = rate_limit.remaining,
                        reset = %rate_limit.reset_time,
                        "Search rate limit almost exhausted"
                    );
                }
                let body = response.bytes().await?.to_vec();
                Ok(SearchPage { body, rate_limit })
            }
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if rate_limit.is_limited => {
                Err(GuessStarsError::RateLimitExceeded(format!(
                    "search API rate limit exceeded. Reset at: {}",
                    rate_limit.reset_time
                )))
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let error_text = response.text().await.unwrap_or_default();
                if error_text.contains(RESULT_CAP_MESSAGE) {
                    Err(GuessStarsError::SearchExhausted(format!(
                        "page {} rejected: {}",
                        request.page, error_text
                    )))
                } else {
                    Err(GuessStarsError::ApiError(format!(
                        "API request failed with status {}: {}",
                        StatusCode::UNPROCESSABLE_ENTITY,
                        error_text
                    )))
                }
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(GuessStarsError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }
}

impl SearchSource for GitHubClient {
    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchPage> {
        self.search_repositories(request).await
    }
}

/// Read the rate limit state from response headers
pub fn get_rate_limit_state(headers: &HeaderMap) -> RateLimitState {
    let header = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

    let remaining = header("X-RateLimit-Remaining").and_then(|s| s.parse::<u32>().ok());
    let limit = header("X-RateLimit-Limit")
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(10);
    let reset = header("X-RateLimit-Reset")
        .and_then(|s| s.parse::<i64>().ok())
        .map(|timestamp| DateTime::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now))
        .unwrap_or_else(|| Utc::now() + ChronoDuration::minutes(1));

    RateLimitState {
        remaining: remaining.unwrap_or(limit),
        limit,
        reset_time: reset,
        is_limited: remaining == Some(0),
    }
}
