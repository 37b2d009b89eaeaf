//! Mock page database for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notion::{NotionError, Page, PageDatabase, Property, PropertyWrite, QueryFilter};

use super::fixtures::applied_property;

/// Mock implementation of the PageDatabase trait.
///
/// Pages live in memory per database id. Updates are applied to the stored
/// pages (so a second query sees their effect) and recorded for assertions.
/// Errors can be queued to fail upcoming update calls, which is how the
/// linker's timeout retry is exercised.
pub struct MockPageDatabase {
    /// Pages keyed by database id.
    databases: Arc<RwLock<HashMap<String, Vec<Page>>>>,
    /// Recorded update calls (page id, update set).
    updates: Arc<RwLock<Vec<(String, HashMap<String, PropertyWrite>)>>>,
    /// Errors consumed by upcoming update calls, in order.
    update_errors: Arc<RwLock<VecDeque<NotionError>>>,
}

impl Default for MockPageDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPageDatabase {
    /// Create a new empty mock database.
    pub fn new() -> Self {
        Self {
            databases: Arc::new(RwLock::new(HashMap::new())),
            updates: Arc::new(RwLock::new(Vec::new())),
            update_errors: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Add a page to a database.
    pub async fn add_page(&self, database_id: &str, page: Page) {
        self.databases
            .write()
            .await
            .entry(database_id.to_string())
            .or_default()
            .push(page);
    }

    /// Fetch a stored page by id.
    pub async fn page(&self, page_id: &str) -> Option<Page> {
        self.databases
            .read()
            .await
            .values()
            .flatten()
            .find(|p| p.id == page_id)
            .cloned()
    }

    /// Get all recorded update calls.
    pub async fn recorded_updates(&self) -> Vec<(String, HashMap<String, PropertyWrite>)> {
        self.updates.read().await.clone()
    }

    /// Queue an error for the next update call. Queue more to fail several
    /// calls in a row.
    pub async fn push_update_error(&self, error: NotionError) {
        self.update_errors.write().await.push_back(error);
    }

    fn matches(page: &Page, filter: &QueryFilter) -> bool {
        match filter {
            QueryFilter::Or(filters) => filters.iter().any(|f| Self::matches(page, f)),
            QueryFilter::RichTextIsEmpty(property) => page
                .property(property)
                .map(|p| matches!(p, Property::RichText { rich_text } if rich_text.is_empty()))
                .unwrap_or(false),
            QueryFilter::FilesIsEmpty(property) => page
                .property(property)
                .map(|p| matches!(p, Property::Files { files } if files.is_empty()))
                .unwrap_or(false),
        }
    }
}

#[async_trait]
impl PageDatabase for MockPageDatabase {
    async fn query_all(
        &self,
        database_id: &str,
        filter: Option<QueryFilter>,
    ) -> Result<Vec<Page>, NotionError> {
        let databases = self.databases.read().await;
        let pages = databases
            .get(database_id)
            .ok_or_else(|| NotionError::NotFound(format!("Database {} not found", database_id)))?;

        Ok(pages
            .iter()
            .filter(|p| filter.as_ref().map_or(true, |f| Self::matches(p, f)))
            .cloned()
            .collect())
    }

    async fn update_page(
        &self,
        page_id: &str,
        updates: HashMap<String, PropertyWrite>,
    ) -> Result<(), NotionError> {
        if let Some(err) = self.update_errors.write().await.pop_front() {
            return Err(err);
        }

        let mut databases = self.databases.write().await;
        let page = databases
            .values_mut()
            .flatten()
            .find(|p| p.id == page_id)
            .ok_or_else(|| NotionError::NotFound(format!("Page {} not found", page_id)))?;

        for (field, write) in &updates {
            page.properties
                .insert(field.clone(), applied_property(write));
        }

        self.updates
            .write()
            .await
            .push((page_id.to_string(), updates));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_query_with_filter() {
        let db = MockPageDatabase::new();
        db.add_page("movies", fixtures::movie_page("p1", "Heat", Some("1995")))
            .await;

        let mut complete = fixtures::movie_page("p2", "Done", None);
        complete.properties.insert(
            "Overview".to_string(),
            applied_property(&PropertyWrite::rich_text("synopsis")),
        );
        complete.properties.insert(
            "Art".to_string(),
            applied_property(&PropertyWrite::external_file("poster", "http://x/p.jpg")),
        );
        db.add_page("movies", complete).await;

        let filter = QueryFilter::Or(vec![
            QueryFilter::RichTextIsEmpty("Overview".to_string()),
            QueryFilter::FilesIsEmpty("Art".to_string()),
        ]);

        let results = db.query_all("movies", Some(filter)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "p1");
    }

    #[tokio::test]
    async fn test_update_applies_to_stored_page() {
        let db = MockPageDatabase::new();
        db.add_page("movies", fixtures::movie_page("p1", "Heat", None))
            .await;

        let updates = HashMap::from([(
            "Overview".to_string(),
            PropertyWrite::rich_text("Obsessive master thief..."),
        )]);
        db.update_page("p1", updates).await.unwrap();

        let page = db.page("p1").await.unwrap();
        assert_eq!(
            page.plain_text("Overview").as_deref(),
            Some("Obsessive master thief...")
        );
        assert_eq!(db.recorded_updates().await.len(), 1);
    }

    #[tokio::test]
    async fn test_queued_update_errors() {
        let db = MockPageDatabase::new();
        db.add_page("movies", fixtures::movie_page("p1", "Heat", None))
            .await;
        db.push_update_error(NotionError::Timeout).await;

        let updates = HashMap::from([("Overview".to_string(), PropertyWrite::rich_text("x"))]);
        let result = db.update_page("p1", updates.clone()).await;
        assert!(matches!(result, Err(NotionError::Timeout)));

        // Next call succeeds.
        assert!(db.update_page("p1", updates).await.is_ok());
    }
}
