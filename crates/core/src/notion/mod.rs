//! Page-database integration.
//!
//! Wraps the hosted database API behind the [`PageDatabase`] trait: query a
//! database with an optional filter (pagination walked internally) and update
//! the properties of a single page.

mod client;
mod properties;
mod types;

pub use client::{NotionClient, DEFAULT_BASE_URL};
pub use properties::*;
pub use types::*;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the page database API.
#[derive(Debug, Error)]
pub enum NotionError {
    /// The request timed out. The only error class the genre linker retries.
    #[error("Request timed out")]
    Timeout,

    /// HTTP transport failure other than a timeout.
    #[error("HTTP request failed: {0}")]
    HttpError(reqwest::Error),

    /// Invalid or missing integration token.
    #[error("Unauthorized: check the integration token")]
    Unauthorized,

    /// Database or page does not exist or is not shared with the integration.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for NotionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NotionError::Timeout
        } else {
            NotionError::HttpError(e)
        }
    }
}

impl NotionError {
    /// Whether this is a timeout-class failure worth a single retry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, NotionError::Timeout)
    }
}

/// Trait for page database clients.
#[async_trait]
pub trait PageDatabase: Send + Sync {
    /// Fetch every page of a database matching the filter, walking
    /// pagination to exhaustion. `None` fetches the whole database.
    async fn query_all(
        &self,
        database_id: &str,
        filter: Option<QueryFilter>,
    ) -> Result<Vec<Page>, NotionError>;

    /// Apply a property update set to a single page.
    async fn update_page(
        &self,
        page_id: &str,
        updates: HashMap<String, PropertyWrite>,
    ) -> Result<(), NotionError>;
}
