use serde::Deserialize;
use serde_json::Value;

// GitHub search API response structures
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub incomplete_results: bool,
    // Decoded item by item, only once an item's language matches
    pub items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
    pub stargazers_count: u64,
}
