//! Metadata provider integration (TMDB).
//!
//! Provides movie search, detail and credit lookups used to enrich the
//! movie database. The provider's own relevance ranking is trusted: search
//! callers take the first result.

mod client;
mod types;

pub use client::{TmdbClient, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the metadata provider API.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for metadata provider clients.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search for movies by query, optionally constrained to a release year.
    /// Results come back in the provider's relevance order.
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<MovieSummary>, TmdbError>;

    /// Get full details for a movie by provider ID.
    async fn get_details(&self, movie_id: u64) -> Result<MovieDetails, TmdbError>;

    /// Get crew and cast credits for a movie by provider ID.
    async fn get_credits(&self, movie_id: u64) -> Result<MovieCredits, TmdbError>;
}
