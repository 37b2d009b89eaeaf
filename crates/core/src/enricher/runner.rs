//! Drives the enrichment batch.
//!
//! Queries the movie database for incomplete records, resolves each one
//! against the metadata provider, reconciles the fields, and applies the
//! update set. Fully sequential; a fixed delay after each record keeps the
//! batch under the provider rate limits. A per-record failure never aborts
//! the batch.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::notion::{NotionError, PageDatabase, QueryFilter};
use crate::reconcile::{MovieMatcher, Reconciler};
use crate::tmdb::MetadataProvider;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([0-9]{4})\b").unwrap());

/// Pull a 4-digit year out of a free-text field. Anything else is treated
/// as no year at all.
pub fn extract_year(text: &str) -> Option<u32> {
    YEAR_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Debug, Error)]
pub enum EnrichError {
    /// The initial candidate query failed; nothing was processed.
    #[error("Failed to query movie database: {0}")]
    QueryFailed(#[from] NotionError),
}

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    /// Candidate records returned by the completeness filter.
    pub found: usize,
    /// Records that received an update.
    pub updated: usize,
    /// Records skipped (no title, no match, or nothing to fill).
    pub skipped: usize,
    /// Records where an update or lookup failed.
    pub failed: usize,
}

/// The enrichment batch driver.
pub struct Enricher {
    db: Arc<dyn PageDatabase>,
    provider: Arc<dyn MetadataProvider>,
    reconciler: Reconciler,
    movies_database_id: String,
    record_delay: Duration,
}

impl Enricher {
    pub fn new(
        db: Arc<dyn PageDatabase>,
        provider: Arc<dyn MetadataProvider>,
        reconciler: Reconciler,
        movies_database_id: String,
        record_delay: Duration,
    ) -> Self {
        Self {
            db,
            provider,
            reconciler,
            movies_database_id,
            record_delay,
        }
    }

    /// The completeness filter: a record is a candidate when its Overview
    /// is empty or its Art has no files.
    fn candidate_filter() -> QueryFilter {
        QueryFilter::Or(vec![
            QueryFilter::RichTextIsEmpty("Overview".to_string()),
            QueryFilter::FilesIsEmpty("Art".to_string()),
        ])
    }

    /// Run one enrichment batch over all candidate records.
    pub async fn run(&self) -> Result<EnrichSummary, EnrichError> {
        info!("Checking movie database for missing metadata");

        let pages = self
            .db
            .query_all(&self.movies_database_id, Some(Self::candidate_filter()))
            .await?;

        let mut summary = EnrichSummary {
            found: pages.len(),
            ..EnrichSummary::default()
        };
        info!("Found {} movies to process", pages.len());

        let matcher = MovieMatcher::new(self.provider.as_ref());

        for (idx, page) in pages.iter().enumerate() {
            let Some(title) = page.plain_text("Title") else {
                warn!("Skipping record with no title: {}", page.id);
                summary.skipped += 1;
                self.pause().await;
                continue;
            };

            let year = page.plain_text("Year").and_then(|y| extract_year(&y));
            info!("[{}/{}] Processing: {} ({:?})", idx + 1, pages.len(), title, year);

            let Some(movie_id) = matcher.resolve(&title, year).await else {
                info!("Movie not found: {}", title);
                summary.skipped += 1;
                self.pause().await;
                continue;
            };

            // Details and credits are fetched independently. Either may be
            // missing; reconciliation proceeds with whatever arrived.
            let details = match self.provider.get_details(movie_id).await {
                Ok(details) => Some(details),
                Err(e) => {
                    warn!("Failed to fetch details for '{}': {}", title, e);
                    None
                }
            };
            let credits = match self.provider.get_credits(movie_id).await {
                Ok(credits) => Some(credits),
                Err(e) => {
                    warn!("Failed to fetch credits for '{}': {}", title, e);
                    None
                }
            };

            let updates = self
                .reconciler
                .reconcile(page, details.as_ref(), credits.as_ref());

            if updates.is_empty() {
                info!("No updates needed: {}", title);
                summary.skipped += 1;
            } else {
                match self.db.update_page(&page.id, updates).await {
                    Ok(()) => {
                        info!("Updated: {}", title);
                        summary.updated += 1;
                    }
                    Err(e) => {
                        // No retry at this layer; the record stays as-is.
                        warn!("Update failed for '{}': {}", title, e);
                        summary.failed += 1;
                    }
                }
            }

            self.pause().await;
        }

        info!(
            "Enrichment finished: {} found, {} updated, {} skipped, {} failed",
            summary.found, summary.updated, summary.skipped, summary.failed
        );

        Ok(summary)
    }

    async fn pause(&self) {
        tokio::time::sleep(self.record_delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("1999"), Some(1999));
        assert_eq!(extract_year("  2001  "), Some(2001));
        assert_eq!(extract_year("circa 1987, restored"), Some(1987));
        assert_eq!(extract_year("unknown"), None);
        assert_eq!(extract_year("99"), None);
        assert_eq!(extract_year("19999"), None);
    }

    #[test]
    fn test_candidate_filter_shape() {
        let filter = Enricher::candidate_filter();
        assert_eq!(
            filter,
            QueryFilter::Or(vec![
                QueryFilter::RichTextIsEmpty("Overview".to_string()),
                QueryFilter::FilesIsEmpty("Art".to_string()),
            ])
        );
    }
}
