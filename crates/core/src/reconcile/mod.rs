//! The reconciliation engine.
//!
//! [`MovieMatcher`] resolves a local record to one provider identifier and
//! [`Reconciler`] computes the minimal fill-only update set for a page from
//! whatever provider data is available. Neither performs any I/O of its own
//! beyond the matcher's search calls.

mod matcher;
mod reconciler;
mod studio;

pub use matcher::{clean_title, MovieMatcher};
pub use reconciler::{format_currency, Reconciler, ReconcilerConfig, StudioFieldKind};
pub use studio::canonical_studio;
