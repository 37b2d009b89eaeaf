//! The genre linking batch job.

mod runner;

pub use runner::{GenreLinker, LinkError, LinkSummary};
