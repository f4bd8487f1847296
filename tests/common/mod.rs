#![allow(dead_code)]

use guess_the_stars::error::{GuessStarsError, Result};
use guess_the_stars::github::{GitHubClient, SearchPage, SearchRequest, SearchSource};
use guess_the_stars::models::{RateLimitState, Repository};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use wiremock::MockServer;

pub struct TestContext {
    pub mock_server: MockServer,
    pub client: GitHubClient,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        let mock_server = MockServer::start().await;
        let client = GitHubClient::new(mock_server.uri(), Some("test_token".to_string()))?;
        Ok(TestContext { mock_server, client })
    }
}

pub fn item(full_name: &str, language: Option<&str>, stars: u64) -> Value {
    json!({
        "full_name": full_name,
        "html_url": format!("https://github.com/{}", full_name),
        "language": language,
        "stargazers_count": stars,
    })
}

pub fn search_body(total_count: u64, items: Vec<Value>) -> Value {
    json!({
        "total_count": total_count,
        "incomplete_results": false,
        "items": items,
    })
}

/// A page of `count` items where only the first `matching` are in `language`.
pub fn page_with_matches(language: &str, matching: usize, count: usize, page: u32) -> Value {
    let items = (0..count)
        .map(|i| {
            let name = format!("owner{}/repo{}", page, i);
            if i < matching {
                item(&name, Some(language), 1000 - i as u64)
            } else {
                item(&name, Some("Haskell"), 1000 - i as u64)
            }
        })
        .collect();
    search_body(10_000, items)
}

pub fn repository(full_name: &str, stars: u64) -> Repository {
    Repository {
        full_name: full_name.to_string(),
        html_url: format!("https://github.com/{}", full_name),
        language: "Rust".to_string(),
        stars,
    }
}

/// In-memory search source serving canned pages by page number.
#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<u32, Value>,
    exhausted_after: Option<u32>,
    requests: RefCell<Vec<SearchRequest>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, body: Value) -> Self {
        self.pages.insert(page, body);
        self
    }

    /// Pages after `page` are answered the way GitHub answers past the
    /// 1000-result cap.
    pub fn exhausted_after(mut self, page: u32) -> Self {
        self.exhausted_after = Some(page);
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.borrow().iter().map(|r| r.page).collect()
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.borrow().clone()
    }
}

impl SearchSource for FakeSource {
    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchPage> {
        self.requests.borrow_mut().push(request.clone());

        if self.exhausted_after.is_some_and(|last| request.page > last) {
            return Err(GuessStarsError::SearchExhausted(format!(
                "page {} is past the result cap",
                request.page
            )));
        }

        let body = self
            .pages
            .get(&request.page)
            .cloned()
            .unwrap_or_else(|| search_body(10_000, Vec::new()));

        Ok(SearchPage {
            body: serde_json::to_vec(&body)?,
            rate_limit: RateLimitState::default(),
        })
    }
}
