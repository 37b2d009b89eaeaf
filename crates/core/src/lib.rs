pub mod config;
pub mod enricher;
pub mod linker;
pub mod notion;
pub mod reconcile;
pub mod testing;
pub mod tmdb;

pub use config::{
    load_config, load_config_from_str, validate_config, validate_linker_config, Config,
    ConfigError, NotionConfig, PacingConfig, SanitizedConfig, SchemaConfig, TmdbConfig,
};
pub use enricher::{EnrichError, EnrichSummary, Enricher};
pub use linker::{GenreLinker, LinkError, LinkSummary};
pub use notion::{
    NotionClient, NotionError, Page, PageDatabase, Property, PropertyWrite, QueryFilter,
    RelationRef, RichTextItem, SelectOption,
};
pub use reconcile::{
    canonical_studio, MovieMatcher, Reconciler, ReconcilerConfig, StudioFieldKind,
};
pub use tmdb::{
    MetadataProvider, MovieCredits, MovieDetails, MovieSummary, TmdbClient, TmdbError,
};
