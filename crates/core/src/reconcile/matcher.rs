//! Record matching against the metadata provider.

use tracing::{debug, info};

use crate::tmdb::MetadataProvider;

/// Resolves a local movie record to one provider identifier.
pub struct MovieMatcher<'a> {
    provider: &'a dyn MetadataProvider,
}

impl<'a> MovieMatcher<'a> {
    pub fn new(provider: &'a dyn MetadataProvider) -> Self {
        Self { provider }
    }

    /// Resolve a title (and optional year) to a provider movie ID.
    ///
    /// Searches with the year constraint first, then falls back to a pure
    /// title search when the constrained search comes back empty or fails.
    /// The first result of whichever attempt succeeded wins. Returns `None`
    /// when both attempts yield nothing.
    pub async fn resolve(&self, title: &str, year: Option<u32>) -> Option<u64> {
        let query = clean_title(title);
        if query.is_empty() {
            return None;
        }

        info!("Searching metadata provider: '{}' | year: {:?}", query, year);

        if let Some(year) = year {
            match self.provider.search_movies(&query, Some(year)).await {
                Ok(results) if !results.is_empty() => return Some(results[0].id),
                Ok(_) => debug!("No results with year constraint"),
                Err(e) => debug!("Year-constrained search failed: {}", e),
            }
            info!("Retrying without year: '{}'", query);
        }

        match self.provider.search_movies(&query, None).await {
            Ok(results) if !results.is_empty() => Some(results[0].id),
            Ok(_) => None,
            Err(e) => {
                debug!("Title search failed: {}", e);
                None
            }
        }
    }
}

/// Strip characters that confuse the search endpoint, keeping letters,
/// digits, whitespace and colons. Unicode letters survive.
pub fn clean_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == ':')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockMetadataProvider};

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("Mission: Impossible"), "Mission: Impossible");
        assert_eq!(clean_title("What's Up, Doc?"), "Whats Up Doc");
        assert_eq!(clean_title("Amélie"), "Amélie");
        assert_eq!(clean_title("  !?  "), "");
    }

    #[tokio::test]
    async fn test_resolve_with_year() {
        let provider = MockMetadataProvider::new();
        provider
            .add_movie(fixtures::movie_details(603, "The Matrix", 1999))
            .await;

        let matcher = MovieMatcher::new(&provider);
        assert_eq!(matcher.resolve("The Matrix", Some(1999)).await, Some(603));
    }

    #[tokio::test]
    async fn test_resolve_falls_back_without_year() {
        let provider = MockMetadataProvider::new();
        // Stored with a 2002 release date, so the 2001-constrained search
        // misses and the title-only fallback has to find it.
        provider
            .add_movie(fixtures::movie_details(194, "Amélie", 2002))
            .await;

        let matcher = MovieMatcher::new(&provider);
        assert_eq!(matcher.resolve("Amélie", Some(2001)).await, Some(194));

        let queries = provider.recorded_searches().await;
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], ("Amélie".to_string(), Some(2001)));
        assert_eq!(queries[1], ("Amélie".to_string(), None));
    }

    #[tokio::test]
    async fn test_resolve_miss() {
        let provider = MockMetadataProvider::new();
        let matcher = MovieMatcher::new(&provider);
        assert_eq!(matcher.resolve("Nonexistent", None).await, None);
    }

    #[tokio::test]
    async fn test_resolve_empty_after_cleaning() {
        let provider = MockMetadataProvider::new();
        let matcher = MovieMatcher::new(&provider);
        assert_eq!(matcher.resolve("?!", None).await, None);
        assert!(provider.recorded_searches().await.is_empty());
    }
}
