//! Links genre tags on movie pages to the canonical genre database.
//!
//! Movies carry genre names as multi-select tags; the genres database holds
//! one page per canonical genre. This job resolves tags to page ids and
//! writes the relation, once, for movies that have tags but no relations
//! yet. Name matching is case-insensitive: both sides are lowercased when
//! the lookup is built and probed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::notion::{NotionError, PageDatabase, PropertyWrite};

/// Field holding the tag-style genre names on a movie page.
const TAG_FIELD: &str = "Genre";

/// Field holding the relations to the genres database.
const RELATION_FIELD: &str = "Genres";

/// Field holding the canonical name on a genre page.
const NAME_FIELD: &str = "Name";

#[derive(Debug, Error)]
pub enum LinkError {
    /// One of the two full-database scans failed; nothing was linked.
    #[error("Failed to query database: {0}")]
    QueryFailed(#[from] NotionError),
}

/// Outcome counts for one linking run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSummary {
    /// Movie pages scanned.
    pub scanned: usize,
    /// Pages whose relation field was written.
    pub linked: usize,
    /// Pages skipped (already linked or no tags).
    pub skipped: usize,
    /// Pages with tags but no matching genre entries.
    pub unmatched: usize,
    /// Pages where the relation write failed after the retry.
    pub failed: usize,
}

/// The genre linking batch job.
pub struct GenreLinker {
    db: Arc<dyn PageDatabase>,
    movies_database_id: String,
    genres_database_id: String,
    write_delay: Duration,
    retry_delay: Duration,
}

impl GenreLinker {
    pub fn new(
        db: Arc<dyn PageDatabase>,
        movies_database_id: String,
        genres_database_id: String,
        write_delay: Duration,
        retry_delay: Duration,
    ) -> Self {
        Self {
            db,
            movies_database_id,
            genres_database_id,
            write_delay,
            retry_delay,
        }
    }

    /// Build the lowercase genre-name -> page-id lookup from the genres
    /// database. Pages without a readable name are skipped silently.
    async fn build_genre_lookup(&self) -> Result<HashMap<String, String>, NotionError> {
        let pages = self.db.query_all(&self.genres_database_id, None).await?;

        let mut lookup = HashMap::new();
        for page in pages {
            if let Some(name) = page.plain_text(NAME_FIELD) {
                lookup.insert(name.to_lowercase(), page.id);
            }
        }
        Ok(lookup)
    }

    /// Run one linking pass over the whole movie database.
    pub async fn run(&self) -> Result<LinkSummary, LinkError> {
        info!("Linking genre tags to genre database relations");

        let lookup = self.build_genre_lookup().await?;
        info!("Genre lookup built: {} entries", lookup.len());

        let movies = self.db.query_all(&self.movies_database_id, None).await?;

        let mut summary = LinkSummary {
            scanned: movies.len(),
            ..LinkSummary::default()
        };

        for movie in movies {
            let title = movie
                .plain_text("Title")
                .unwrap_or_else(|| "Untitled".to_string());

            let tags = movie
                .property(TAG_FIELD)
                .map(|p| p.multi_select_names())
                .unwrap_or_default();
            let existing = movie
                .property(RELATION_FIELD)
                .map(|p| p.relation_ids())
                .unwrap_or_default();

            // Precondition: never touch a page that is already linked, and
            // there is nothing to do without tags.
            if tags.is_empty() || !existing.is_empty() {
                debug!("Skipped: {} (already linked or no tags)", title);
                summary.skipped += 1;
                continue;
            }

            // Unmatched tags are dropped silently.
            let resolved: Vec<String> = tags
                .iter()
                .filter_map(|tag| lookup.get(&tag.to_lowercase()).cloned())
                .collect();

            if resolved.is_empty() {
                warn!("No matching genres found for: {}", title);
                summary.unmatched += 1;
                continue;
            }

            // The precondition guarantees the relation was empty, so the
            // resolved set replaces rather than merges.
            match self.update_with_retry(&movie.id, &title, resolved).await {
                Ok(()) => {
                    info!("Linked: {}", title);
                    summary.linked += 1;
                    tokio::time::sleep(self.write_delay).await;
                }
                Err(e) => {
                    warn!("Linking failed for '{}': {}", title, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Genre linking finished: {} scanned, {} linked, {} skipped, {} unmatched, {} failed",
            summary.scanned, summary.linked, summary.skipped, summary.unmatched, summary.failed
        );

        Ok(summary)
    }

    /// Write the relation, retrying exactly once after a short delay when
    /// the first attempt times out. Other error classes are not retried.
    async fn update_with_retry(
        &self,
        page_id: &str,
        title: &str,
        resolved: Vec<String>,
    ) -> Result<(), NotionError> {
        let updates = || {
            HashMap::from([(
                RELATION_FIELD.to_string(),
                PropertyWrite::relation(resolved.clone()),
            )])
        };

        match self.db.update_page(page_id, updates()).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_timeout() => {
                info!("Timeout on: {}, retrying", title);
                tokio::time::sleep(self.retry_delay).await;
                self.db.update_page(page_id, updates()).await
            }
            Err(e) => Err(e),
        }
    }
}
