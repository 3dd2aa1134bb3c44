//! HTTP client for the BookStack REST API.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::SyncError;
use crate::types::{PageContent, ServiceConfig};

/// Client for fetching page content and shelf membership from BookStack.
pub struct BookStackClient {
    client: Client,
    base_url: String,
    auth_header: String,
}

/// Page payload from `GET api/pages/{id}`.
#[derive(Debug, Deserialize)]
struct PageResponse {
    id: i64,
    book_id: i64,
    name: String,
    #[serde(default)]
    chapter_id: Option<i64>,
    #[serde(default)]
    markdown: String,
}

/// Shelf payload from `GET api/shelves/{id}`.
#[derive(Debug, Deserialize)]
struct ShelfResponse {
    #[serde(default)]
    books: Vec<ShelfBook>,
}

#[derive(Debug, Deserialize)]
struct ShelfBook {
    id: i64,
}

impl BookStackClient {
    /// Create a new client. The base URL is normalized to end with `/`.
    pub fn new(base_url: &str, token_id: &str, token_secret: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
            auth_header: format!("Token {}:{}", token_id, token_secret),
        }
    }

    /// Create a client from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            &config.bookstack_base_url,
            &config.bookstack_token_id,
            &config.bookstack_token_secret,
        )
    }

    /// Fetch a page and assemble it into a [`PageContent`].
    ///
    /// Reads the `markdown` field of the page; a page without markdown yields
    /// empty `raw_text`, which the processor treats as an empty page rather
    /// than an error.
    pub async fn fetch_page(&self, page_id: i64) -> Result<PageContent, SyncError> {
        let url = format!("{}api/pages/{}", self.base_url, page_id);
        debug!(page_id, %url, "Fetching page from BookStack");

        let page: PageResponse = self.get_json(&url).await?;

        Ok(PageContent {
            page_id: page.id,
            book_id: page.book_id,
            title: page.name,
            url: self.page_url(page.id),
            raw_text: page.markdown,
            // BookStack reports pages outside chapters with chapter_id 0
            chapter_id: page.chapter_id.filter(|&id| id != 0),
        })
    }

    /// Resolve a shelf into the ids of the books it contains.
    pub async fn fetch_shelf_books(&self, shelf_id: i64) -> Result<Vec<i64>, SyncError> {
        let url = format!("{}api/shelves/{}", self.base_url, shelf_id);
        debug!(shelf_id, %url, "Fetching shelf from BookStack");

        let shelf: ShelfResponse = self.get_json(&url).await?;
        Ok(shelf.books.into_iter().map(|b| b.id).collect())
    }

    /// Permalink for a page, used as chunk metadata.
    pub fn page_url(&self, page_id: i64) -> String {
        format!("{}view/{}", self.base_url, page_id)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SyncError> {
        let response = self
            .client
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(SyncError::fetch)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SyncError::Fetch(format!(
                "BookStack returned {}: {}",
                status, text
            )));
        }

        response.json().await.map_err(SyncError::fetch)
    }
}
