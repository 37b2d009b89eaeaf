use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides.
///
/// Environment keys use a double underscore as the section separator,
/// e.g. `CINESYNC_NOTION__API_KEY` overrides `notion.api_key`. The file
/// may be absent as long as every required key arrives via environment.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed("CINESYNC_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[tmdb]
api_key = "tmdb-key"

[notion]
api_key = "notion-key"
movies_database_id = "movies-db"
genres_database_id = "genres-db"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.tmdb.api_key, "tmdb-key");
        assert_eq!(config.notion.movies_database_id, "movies-db");
        assert_eq!(config.pacing.enrich_delay_ms, 250);
        assert_eq!(config.pacing.link_delay_ms, 400);
    }

    #[test]
    fn test_load_config_from_str_missing_notion() {
        let toml = r#"
[tmdb]
api_key = "tmdb-key"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[tmdb]
api_key = "k"

[notion]
api_key = "n"
movies_database_id = "m"
genres_database_id = "g"

[pacing]
enrich_delay_ms = 100
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.pacing.enrich_delay_ms, 100);
        assert_eq!(config.pacing.link_delay_ms, 400);
    }
}
