use crate::error::{GuessStarsError, Result};
use crate::github::{SearchRequest, SearchSource, DEFAULT_WINDOW_DAYS};
use crate::models::{Language, Repository};
use crate::types::{SearchItem, SearchResponse};
use chrono::NaiveDate;
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Number of repositories a game is played with
pub const REPOSITORIES_PER_GAME: usize = 5;

/// GitHub serves at most 1000 search results, 10 pages of 100.
pub const DEFAULT_MAX_PAGES: u32 = 10;

struct PageMatches {
    repositories: Vec<Repository>,
    total_count: Option<u64>,
    item_count: usize,
    incomplete: bool,
}

/// Decode a search page and keep the first five repositories in `language`.
///
/// Items without a language are skipped. Scanning stops at the fifth match,
/// so items after it are never looked at. An item before that point whose
/// language is not a string, or a matching item missing its name, URL or star
/// count, is an error.
pub fn filter_page(body: &[u8], language: Language) -> Result<Vec<Repository>> {
    Ok(scan_page(body, language)?.repositories)
}

fn scan_page(body: &[u8], language: Language) -> Result<PageMatches> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    let mut repositories = Vec::with_capacity(REPOSITORIES_PER_GAME);

    for item in &response.items {
        if repositories.len() == REPOSITORIES_PER_GAME {
            break;
        }

        let fields = item
            .as_object()
            .ok_or_else(|| serde_json::Error::custom("search item is not an object"))?;
        let reported = match fields.get("language") {
            None | Some(Value::Null) => continue,
            Some(value) => String::deserialize(value)?,
        };
        if !language.matches(&reported) {
            continue;
        }

        let item = SearchItem::deserialize(item)?;
        repositories.extend(Repository::from_item(&item));
    }

    Ok(PageMatches {
        repositories,
        total_count: response.total_count,
        item_count: response.items.len(),
        incomplete: response.incomplete_results,
    })
}

/// Walks the search pages until one of them holds five repositories in the
/// selected language.
pub struct RepositoryFetcher<'a, S> {
    source: &'a S,
    max_pages: u32,
    window_days: i64,
}

impl<'a, S: SearchSource> RepositoryFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            max_pages: DEFAULT_MAX_PAGES,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn window_days(mut self, window_days: i64) -> Self {
        self.window_days = window_days;
        self
    }

    /// Returns exactly five repositories taken from one page, or
    /// `InsufficientRepositories` once the page cap or the end of the
    /// results is reached.
    pub async fn fetch(&self, language: Language, today: NaiveDate) -> Result<Vec<Repository>> {
        let insufficient = |pages_searched: u32| GuessStarsError::InsufficientRepositories {
            language: language.to_string(),
            pages_searched,
        };

        for page in 1..=self.max_pages {
            let request = SearchRequest::for_page(page, today, self.window_days)?;

            let fetched = match self.source.fetch_page(&request).await {
                Ok(fetched) => fetched,
                Err(GuessStarsError::SearchExhausted(reason)) => {
                    debug!(page, %reason, "Search exhausted");
                    return Err(insufficient(page - 1));
                }
                Err(e) => return Err(e),
            };

            let matches = scan_page(&fetched.body, language)?;
            info!(
                page,
                language = %language,
                matches = matches.repositories.len(),
                items = matches.item_count,
                rate_limit_remaining = fetched.rate_limit.remaining,
                "Scanned search page"
            );
            if matches.incomplete {
                warn!(page, "GitHub returned incomplete search results");
            }

            if matches.repositories.len() == REPOSITORIES_PER_GAME {
                return Ok(matches.repositories);
            }

            let seen = u64::from(page) * u64::from(request.per_page);
            let exhausted = matches.total_count.is_some_and(|total| seen >= total);
            if matches.item_count == 0 || exhausted {
                debug!(page, total_count = ?matches.total_count, "No more search results");
                return Err(insufficient(page));
            }
        }

        Err(insufficient(self.max_pages))
    }
}
