//! Types for metadata provider API responses.

use serde::{Deserialize, Serialize};

/// A movie summary from a search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    /// Provider movie ID.
    pub id: u64,
    /// Movie title.
    pub title: String,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl MovieSummary {
    /// Get the release year from the release date.
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_ref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }
}

/// Full movie details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    /// Provider movie ID.
    pub id: u64,
    /// Movie title.
    pub title: String,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    /// Average vote (0-10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    /// Worldwide box office revenue in dollars. The provider reports 0 when
    /// it has no figure, which callers must treat as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<u64>,
    /// Movie overview/synopsis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Poster path (relative to the image base URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Genre names, in provider order.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Production company names, in provider order.
    #[serde(default)]
    pub production_companies: Vec<String>,
}

/// Credits for a movie: ordered crew and cast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCredits {
    /// Crew members, in provider order.
    #[serde(default)]
    pub crew: Vec<CrewMember>,
    /// Cast members, in billing order.
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

impl MovieCredits {
    /// Name of the first crew member credited with the given job.
    pub fn first_with_job(&self, job: &str) -> Option<&str> {
        self.crew
            .iter()
            .find(|c| c.job == job)
            .map(|c| c.name.as_str())
    }
}

/// A crew member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

/// A cast member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_year() {
        let summary = MovieSummary {
            id: 603,
            title: "The Matrix".to_string(),
            release_date: Some("1999-03-30".to_string()),
        };
        assert_eq!(summary.year(), Some(1999));

        let undated = MovieSummary {
            id: 1,
            title: "Unknown".to_string(),
            release_date: None,
        };
        assert_eq!(undated.year(), None);
    }

    #[test]
    fn test_first_with_job() {
        let credits = MovieCredits {
            crew: vec![
                CrewMember {
                    name: "Jane Editor".to_string(),
                    job: "Editor".to_string(),
                },
                CrewMember {
                    name: "Michael Mann".to_string(),
                    job: "Director".to_string(),
                },
                CrewMember {
                    name: "Second Unit".to_string(),
                    job: "Director".to_string(),
                },
            ],
            cast: vec![],
        };

        assert_eq!(credits.first_with_job("Director"), Some("Michael Mann"));
        assert_eq!(credits.first_with_job("Composer"), None);
    }
}
