//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::types::{CastMember, CrewMember, MovieCredits, MovieDetails, MovieSummary};
use super::{MetadataProvider, TmdbError};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default base URL for poster images, at a width the movie database
/// renders well.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(api_key: String, base_url: Option<String>) -> Result<Self, TmdbError> {
        if api_key.is_empty() {
            return Err(TmdbError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        let status = response.status();
        if status == 401 {
            return Err(TmdbError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 429 {
            return Err(TmdbError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TmdbError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<MovieSummary>, TmdbError> {
        let url = format!("{}/search/movie", self.base_url);

        debug!("TMDB movie search: query='{}', year={:?}", query, year);

        let mut request = self.client.get(&url).query(&[
            ("api_key", &self.api_key),
            ("query", &query.to_string()),
            ("include_adult", &"false".to_string()),
        ]);

        if let Some(y) = year {
            request = request.query(&[("year", &y.to_string())]);
        }

        let response = Self::check_status(request.send().await?).await?;

        let search_result: SearchResponse = response.json().await.map_err(|e| {
            TmdbError::ParseError(format!("Failed to parse movie search response: {}", e))
        })?;

        Ok(search_result.results)
    }

    async fn get_details(&self, movie_id: u64) -> Result<MovieDetails, TmdbError> {
        let url = format!("{}/movie/{}", self.base_url, movie_id);

        debug!("TMDB get movie details: id={}", movie_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key)])
            .send()
            .await?;

        if response.status() == 404 {
            return Err(TmdbError::NotFound(format!("Movie ID {}", movie_id)));
        }
        let response = Self::check_status(response).await?;

        let details: MovieDetailsResult = response.json().await.map_err(|e| {
            TmdbError::ParseError(format!("Failed to parse movie details response: {}", e))
        })?;

        Ok(details.into())
    }

    async fn get_credits(&self, movie_id: u64) -> Result<MovieCredits, TmdbError> {
        let url = format!("{}/movie/{}/credits", self.base_url, movie_id);

        debug!("TMDB get movie credits: id={}", movie_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key)])
            .send()
            .await?;

        if response.status() == 404 {
            return Err(TmdbError::NotFound(format!("Movie ID {}", movie_id)));
        }
        let response = Self::check_status(response).await?;

        let credits: CreditsResult = response.json().await.map_err(|e| {
            TmdbError::ParseError(format!("Failed to parse credits response: {}", e))
        })?;

        Ok(credits.into())
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<MovieSummary>,
}

#[derive(Debug, Deserialize)]
struct MovieDetailsResult {
    id: u64,
    title: String,
    release_date: Option<String>,
    runtime: Option<u32>,
    vote_average: Option<f64>,
    revenue: Option<u64>,
    overview: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    genres: Vec<NamedEntry>,
    #[serde(default)]
    production_companies: Vec<NamedEntry>,
}

#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreditsResult {
    #[serde(default)]
    crew: Vec<CrewEntry>,
    #[serde(default)]
    cast: Vec<CastEntry>,
}

#[derive(Debug, Deserialize)]
struct CrewEntry {
    name: String,
    job: String,
}

#[derive(Debug, Deserialize)]
struct CastEntry {
    name: String,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<MovieDetailsResult> for MovieDetails {
    fn from(d: MovieDetailsResult) -> Self {
        Self {
            id: d.id,
            title: d.title,
            release_date: d.release_date,
            runtime_minutes: d.runtime,
            vote_average: d.vote_average,
            revenue: d.revenue,
            overview: d.overview,
            poster_path: d.poster_path,
            genres: d.genres.into_iter().map(|g| g.name).collect(),
            production_companies: d.production_companies.into_iter().map(|c| c.name).collect(),
        }
    }
}

impl From<CreditsResult> for MovieCredits {
    fn from(c: CreditsResult) -> Self {
        Self {
            crew: c
                .crew
                .into_iter()
                .map(|m| CrewMember {
                    name: m.name,
                    job: m.job,
                })
                .collect(),
            cast: c.cast.into_iter().map(|m| CastMember { name: m.name }).collect(),
        }
    }
}
