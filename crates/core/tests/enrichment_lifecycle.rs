//! End-to-end enrichment batch tests against the mock collaborators.

use std::sync::Arc;
use std::time::Duration;

use cinesync_core::testing::{fixtures, MockMetadataProvider, MockPageDatabase};
use cinesync_core::{
    EnrichSummary, Enricher, NotionError, Property, Reconciler, ReconcilerConfig, RichTextItem,
};

const MOVIES_DB: &str = "movies-db";

fn enricher(db: &Arc<MockPageDatabase>, provider: &Arc<MockMetadataProvider>) -> Enricher {
    Enricher::new(
        db.clone(),
        provider.clone(),
        Reconciler::new(ReconcilerConfig::default()),
        MOVIES_DB.to_string(),
        Duration::ZERO,
    )
}

#[tokio::test]
async fn test_enrich_fills_incomplete_record() {
    let db = Arc::new(MockPageDatabase::new());
    let provider = Arc::new(MockMetadataProvider::new());

    db.add_page(MOVIES_DB, fixtures::movie_page("p1", "Heat", Some("1995")))
        .await;
    provider
        .add_movie(fixtures::movie_details(949, "Heat", 1995))
        .await;
    provider
        .add_credits(
            949,
            fixtures::movie_credits("Michael Mann", &["Al Pacino", "Robert De Niro"]),
        )
        .await;

    let summary = enricher(&db, &provider).run().await.unwrap();

    assert_eq!(
        summary,
        EnrichSummary {
            found: 1,
            updated: 1,
            skipped: 0,
            failed: 0,
        }
    );

    let page = db.page("p1").await.unwrap();
    assert_eq!(
        page.plain_text("Overview").as_deref(),
        Some("A movie about heat.")
    );
    assert_eq!(page.plain_text("Director").as_deref(), Some("Michael Mann"));
    assert_eq!(page.plain_text("Star1").as_deref(), Some("Al Pacino"));
    assert_eq!(page.plain_text("Star2").as_deref(), Some("Robert De Niro"));
    assert_eq!(page.plain_text("Star3"), None);
    assert_eq!(page.plain_text("Gross").as_deref(), Some("$187,436,818"));
    assert!(!page.property("Art").unwrap().is_empty());
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let db = Arc::new(MockPageDatabase::new());
    let provider = Arc::new(MockMetadataProvider::new());

    db.add_page(MOVIES_DB, fixtures::movie_page("p1", "Heat", Some("1995")))
        .await;
    provider
        .add_movie(fixtures::movie_details(949, "Heat", 1995))
        .await;
    provider
        .add_credits(949, fixtures::movie_credits("Michael Mann", &["Al Pacino"]))
        .await;

    let first = enricher(&db, &provider).run().await.unwrap();
    assert_eq!(first.updated, 1);

    // Everything the provider can supply is now filled, so the record no
    // longer matches the completeness filter and nothing is written.
    let second = enricher(&db, &provider).run().await.unwrap();
    assert_eq!(second.updated, 0);
    assert_eq!(db.recorded_updates().await.len(), 1);
}

#[tokio::test]
async fn test_populated_fields_survive_enrichment() {
    let db = Arc::new(MockPageDatabase::new());
    let provider = Arc::new(MockMetadataProvider::new());

    // Overview is human-written; Art is still empty so the record is a
    // candidate via the OR filter.
    let mut page = fixtures::movie_page("p1", "Heat", Some("1995"));
    page.properties.insert(
        "Overview".to_string(),
        Property::RichText {
            rich_text: vec![RichTextItem {
                plain_text: "My own take on this one.".to_string(),
            }],
        },
    );
    db.add_page(MOVIES_DB, page).await;

    provider
        .add_movie(fixtures::movie_details(949, "Heat", 1995))
        .await;

    let summary = enricher(&db, &provider).run().await.unwrap();
    assert_eq!(summary.updated, 1);

    let page = db.page("p1").await.unwrap();
    assert_eq!(
        page.plain_text("Overview").as_deref(),
        Some("My own take on this one.")
    );
    assert!(!page.property("Art").unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_title_and_match_are_skipped() {
    let db = Arc::new(MockPageDatabase::new());
    let provider = Arc::new(MockMetadataProvider::new());

    let mut untitled = fixtures::movie_page("p1", "x", None);
    untitled
        .properties
        .insert("Title".to_string(), Property::Title { title: vec![] });
    db.add_page(MOVIES_DB, untitled).await;
    db.add_page(
        MOVIES_DB,
        fixtures::movie_page("p2", "No Such Film", None),
    )
    .await;

    let summary = enricher(&db, &provider).run().await.unwrap();

    assert_eq!(summary.found, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.updated, 0);
    assert!(db.recorded_updates().await.is_empty());
}

#[tokio::test]
async fn test_update_failure_does_not_abort_batch() {
    let db = Arc::new(MockPageDatabase::new());
    let provider = Arc::new(MockMetadataProvider::new());

    db.add_page(MOVIES_DB, fixtures::movie_page("p1", "Heat", Some("1995")))
        .await;
    db.add_page(MOVIES_DB, fixtures::movie_page("p2", "Ronin", Some("1998")))
        .await;
    provider
        .add_movie(fixtures::movie_details(949, "Heat", 1995))
        .await;
    provider
        .add_movie(fixtures::movie_details(8195, "Ronin", 1998))
        .await;

    // First update call fails with a non-timeout error; no retry happens.
    db.push_update_error(NotionError::ApiError {
        status: 500,
        message: "server error".to_string(),
    })
    .await;

    let summary = enricher(&db, &provider).run().await.unwrap();

    assert_eq!(summary.found, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.updated, 1);

    // The second record still went through.
    let page = db.page("p2").await.unwrap();
    assert!(!page.property("Overview").unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_credits_still_fills_details() {
    let db = Arc::new(MockPageDatabase::new());
    let provider = Arc::new(MockMetadataProvider::new());

    db.add_page(MOVIES_DB, fixtures::movie_page("p1", "Heat", Some("1995")))
        .await;
    // Details are registered but credits are not, so the credits fetch
    // fails and only detail-backed fields fill.
    provider
        .add_movie(fixtures::movie_details(949, "Heat", 1995))
        .await;

    let summary = enricher(&db, &provider).run().await.unwrap();
    assert_eq!(summary.updated, 1);

    let page = db.page("p1").await.unwrap();
    assert!(!page.property("Overview").unwrap().is_empty());
    assert!(page.property("Director").unwrap().is_empty());
    assert!(page.property("Star1").unwrap().is_empty());
}
