//! Mock metadata provider for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::tmdb::{MetadataProvider, MovieCredits, MovieDetails, MovieSummary, TmdbError};

/// Mock implementation of the MetadataProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable movie details and credits
/// - Track search queries for assertions
/// - Simulate failures
pub struct MockMetadataProvider {
    /// Movie details by provider ID.
    movies: Arc<RwLock<HashMap<u64, MovieDetails>>>,
    /// Credits by provider ID.
    credits: Arc<RwLock<HashMap<u64, MovieCredits>>>,
    /// Recorded search queries (query, year).
    searches: Arc<RwLock<Vec<(String, Option<u32>)>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<TmdbError>>>,
}

impl Default for MockMetadataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMetadataProvider {
    /// Create a new empty mock provider.
    pub fn new() -> Self {
        Self {
            movies: Arc::new(RwLock::new(HashMap::new())),
            credits: Arc::new(RwLock::new(HashMap::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a movie. It becomes searchable by title substring and year.
    pub async fn add_movie(&self, details: MovieDetails) {
        self.movies.write().await.insert(details.id, details);
    }

    /// Add credits for a movie ID.
    pub async fn add_credits(&self, movie_id: u64, credits: MovieCredits) {
        self.credits.write().await.insert(movie_id, credits);
    }

    /// Get all recorded search queries.
    pub async fn recorded_searches(&self) -> Vec<(String, Option<u32>)> {
        self.searches.read().await.clone()
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: TmdbError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<TmdbError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl MetadataProvider for MockMetadataProvider {
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<MovieSummary>, TmdbError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.searches.write().await.push((query.to_string(), year));

        let movies = self.movies.read().await;
        let query_lower = query.to_lowercase();

        let mut results: Vec<MovieSummary> = movies
            .values()
            .filter(|m| {
                let release_year = m
                    .release_date
                    .as_ref()
                    .and_then(|d| d.split('-').next())
                    .and_then(|y| y.parse::<u32>().ok());
                let title_match = m.title.to_lowercase().contains(&query_lower);
                let year_match = year.is_none() || release_year == year;
                title_match && year_match
            })
            .map(|m| MovieSummary {
                id: m.id,
                title: m.title.clone(),
                release_date: m.release_date.clone(),
            })
            .collect();

        // Stable order so "first result" is deterministic in tests.
        results.sort_by_key(|m| m.id);
        Ok(results)
    }

    async fn get_details(&self, movie_id: u64) -> Result<MovieDetails, TmdbError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.movies
            .read()
            .await
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| TmdbError::NotFound(format!("Movie {} not found", movie_id)))
    }

    async fn get_credits(&self, movie_id: u64) -> Result<MovieCredits, TmdbError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.credits
            .read()
            .await
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| TmdbError::NotFound(format!("Credits for {} not found", movie_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_search_movies() {
        let provider = MockMetadataProvider::new();
        provider
            .add_movie(fixtures::movie_details(603, "The Matrix", 1999))
            .await;
        provider
            .add_movie(fixtures::movie_details(604, "The Matrix Reloaded", 2003))
            .await;

        let results = provider.search_movies("matrix", None).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 603);

        let results = provider.search_movies("matrix", Some(2003)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Matrix Reloaded");
    }

    #[tokio::test]
    async fn test_error_injection_consumed_once() {
        let provider = MockMetadataProvider::new();
        provider.set_next_error(TmdbError::RateLimitExceeded).await;

        assert!(provider.search_movies("x", None).await.is_err());
        assert!(provider.search_movies("x", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_details_not_found() {
        let provider = MockMetadataProvider::new();
        let result = provider.get_details(99999).await;
        assert!(matches!(result, Err(TmdbError::NotFound(_))));
    }
}
