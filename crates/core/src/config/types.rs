use serde::{Deserialize, Serialize};

use crate::reconcile::StudioFieldKind;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub tmdb: TmdbConfig,
    pub notion: NotionConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// TMDB API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL used to build poster attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
}

/// Notion API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotionConfig {
    /// Notion integration token (required).
    pub api_key: String,
    /// Database holding the movie pages (required).
    pub movies_database_id: String,
    /// Database holding the canonical genre pages (required for link-genres).
    #[serde(default)]
    pub genres_database_id: String,
    /// Base URL (default: https://api.notion.com/v1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Self-imposed pacing between external calls.
///
/// Both APIs rate limit; the delays are fixed, not adaptive.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PacingConfig {
    /// Delay after each record in the enrichment batch (default: 250).
    #[serde(default = "default_enrich_delay_ms")]
    pub enrich_delay_ms: u64,
    /// Delay after each relation write in the genre linker (default: 400).
    #[serde(default = "default_link_delay_ms")]
    pub link_delay_ms: u64,
    /// Delay before the single timeout retry in the genre linker (default: 1000).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enrich_delay_ms: default_enrich_delay_ms(),
            link_delay_ms: default_link_delay_ms(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_enrich_delay_ms() -> u64 {
    250
}

fn default_link_delay_ms() -> u64 {
    400
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// Per-deployment schema declarations for the movie database.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaConfig {
    /// Whether the Studio field is a select or a rich-text property.
    /// `auto` follows whatever type the live page reports.
    #[serde(default)]
    pub studio_field: StudioFieldKind,
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub tmdb: SanitizedTmdbConfig,
    pub notion: SanitizedNotionConfig,
    pub pacing: PacingConfig,
    pub schema: SchemaConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedNotionConfig {
    pub api_key_configured: bool,
    pub movies_database_id: String,
    pub genres_database_id: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            tmdb: SanitizedTmdbConfig {
                api_key_configured: !config.tmdb.api_key.is_empty(),
                base_url: config.tmdb.base_url.clone(),
            },
            notion: SanitizedNotionConfig {
                api_key_configured: !config.notion.api_key.is_empty(),
                movies_database_id: config.notion.movies_database_id.clone(),
                genres_database_id: config.notion.genres_database_id.clone(),
            },
            pacing: config.pacing.clone(),
            schema: config.schema.clone(),
        }
    }
}
