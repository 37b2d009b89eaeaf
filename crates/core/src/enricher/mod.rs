//! The enrichment batch driver.

mod runner;

pub use runner::{extract_year, EnrichError, EnrichSummary, Enricher};
