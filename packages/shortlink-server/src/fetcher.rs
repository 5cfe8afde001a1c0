//! Best-effort page description fetcher.
//!
//! Downloads a page and collects its `<title>` plus the `author`,
//! `description`, `keywords` and `creator` meta tags, joined by newlines. The
//! result feeds the full-text tier of the shortcut index, so failure is never
//! an error: it degrades to an empty description.

use std::time::Duration;

use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

/// Meta tag names worth indexing.
pub const META_NAMES: [&str; 4] = ["author", "description", "keywords", "creator"];

const DESCRIPTIVE_ELEMENTS: &str = "title, meta[name][content]";

const USER_AGENT: &str = concat!("shortlink/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Pooled HTTP client plus retry budget.
#[derive(Debug, Clone)]
pub struct DescriptionFetcher {
    client: reqwest::Client,
    attempts: u32,
}

impl DescriptionFetcher {
    pub fn new(attempts: u32, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            attempts: attempts.max(1),
        })
    }

    /// Fetch `url` and extract its description; `""` when every attempt fails.
    pub async fn fetch_description(&self, url: &str) -> String {
        for attempt in 1..=self.attempts {
            match self.fetch_html(url).await {
                Ok(html) => {
                    let description = extract_description(&html);
                    debug!(url, attempt, bytes = description.len(), "Fetched description");
                    return description;
                }
                Err(e) => warn!(url, attempt, error = %e, "Description fetch failed"),
            }
        }
        String::new()
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Collect title and descriptive meta contents in document order.
pub fn extract_description(html: &str) -> String {
    let Ok(selector) = Selector::parse(DESCRIPTIVE_ELEMENTS) else {
        return String::new();
    };
    let document = Html::parse_document(html);

    let mut parts: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        let value = element.value();
        if value.name() == "title" {
            let title = element.text().collect::<String>();
            let title = title.trim();
            if !title.is_empty() {
                parts.push(title.to_string());
            }
            continue;
        }

        let name = value.attr("name").unwrap_or("");
        let content = value.attr("content").unwrap_or("").trim();
        if !content.is_empty() && META_NAMES.iter().any(|m| m.eq_ignore_ascii_case(name)) {
            parts.push(content.to_string());
        }
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_and_meta_in_document_order() {
        let html = r#"<html><head>
            <meta name="author" content="Danver">
            <title>The front page</title>
            <meta name="description" content="Links and discussion">
            <meta name="keywords" content="news, links">
            <meta name="creator" content="Somebody">
        </head><body><p>ignored</p></body></html>"#;

        assert_eq!(
            extract_description(html),
            "Danver\nThe front page\nLinks and discussion\nnews, links\nSomebody"
        );
    }

    #[test]
    fn test_ignores_other_meta_names() {
        let html = r#"<head>
            <meta name="viewport" content="width=device-width">
            <meta property="og:title" content="Open Graph">
            <meta charset="utf-8">
            <meta name="Description" content="Case-insensitive name">
        </head>"#;

        assert_eq!(extract_description(html), "Case-insensitive name");
    }

    #[test]
    fn test_skips_empty_values() {
        let html = r#"<head><title>  </title><meta name="author" content=""></head>"#;
        assert_eq!(extract_description(html), "");
    }

    #[test]
    fn test_no_markup_yields_empty() {
        assert_eq!(extract_description("plain text body"), "");
    }

    #[tokio::test]
    async fn test_unreachable_host_degrades_to_empty() {
        let fetcher = DescriptionFetcher::new(2, Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on loopback: connection refused
        assert_eq!(fetcher.fetch_description("http://127.0.0.1:9/").await, "");
    }

    #[tokio::test]
    async fn test_malformed_url_degrades_to_empty() {
        let fetcher = DescriptionFetcher::new(1, Duration::from_secs(1)).unwrap();
        assert_eq!(fetcher.fetch_description("not a url").await, "");
    }
}
