//! HTTP client for the Notion API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::properties::PropertyWrite;
use super::types::{Page, QueryFilter};
use super::{NotionError, PageDatabase};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API version header value.
const NOTION_VERSION: &str = "2022-06-28";

/// Maximum page size accepted by the query endpoint.
const PAGE_SIZE: u32 = 100;

/// Notion API client.
pub struct NotionClient {
    client: Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    /// Create a new client with the given integration token.
    pub fn new(token: String, base_url: Option<String>) -> Result<Self, NotionError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token,
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, NotionError> {
        let status = response.status();
        if status == 401 {
            return Err(NotionError::Unauthorized);
        }
        if status == 404 {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::NotFound(body));
        }
        if status == 429 {
            return Err(NotionError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }

    /// Run one query request, returning one page of results plus the cursor.
    async fn query_page(
        &self,
        database_id: &str,
        filter: Option<&QueryFilter>,
        start_cursor: Option<&str>,
    ) -> Result<QueryResponse, NotionError> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);

        let mut body = Map::new();
        body.insert("page_size".to_string(), json!(PAGE_SIZE));
        if let Some(filter) = filter {
            body.insert("filter".to_string(), filter.to_json());
        }
        if let Some(cursor) = start_cursor {
            body.insert("start_cursor".to_string(), json!(cursor));
        }

        debug!("Querying database {} (cursor={:?})", database_id, start_cursor);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&Value::Object(body))
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| NotionError::ParseError(format!("Failed to parse query response: {}", e)))
    }
}

#[async_trait]
impl PageDatabase for NotionClient {
    async fn query_all(
        &self,
        database_id: &str,
        filter: Option<QueryFilter>,
    ) -> Result<Vec<Page>, NotionError> {
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let response = self
                .query_page(database_id, filter.as_ref(), cursor.as_deref())
                .await?;

            pages.extend(response.results);

            if !response.has_more {
                break;
            }
            cursor = response.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        Ok(pages)
    }

    async fn update_page(
        &self,
        page_id: &str,
        updates: HashMap<String, PropertyWrite>,
    ) -> Result<(), NotionError> {
        let url = format!("{}/pages/{}", self.base_url, page_id);

        debug!("Updating page {} ({} properties)", page_id, updates.len());

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&json!({ "properties": updates }))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Page>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}
