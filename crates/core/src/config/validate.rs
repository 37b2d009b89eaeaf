use super::{types::Config, ConfigError};

/// Validate configuration.
///
/// The credentials cannot be defaulted, so a blank value means the
/// corresponding environment variable or file entry is missing. Fails
/// before any network I/O happens.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tmdb.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.api_key is required".to_string(),
        ));
    }

    if config.notion.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "notion.api_key is required".to_string(),
        ));
    }

    if config.notion.movies_database_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "notion.movies_database_id is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate the extra requirements of the genre linker.
pub fn validate_linker_config(config: &Config) -> Result<(), ConfigError> {
    if config.notion.genres_database_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "notion.genres_database_id is required for genre linking".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn valid_config() -> Config {
        load_config_from_str(
            r#"
[tmdb]
api_key = "k"

[notion]
api_key = "n"
movies_database_id = "m"
genres_database_id = "g"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        let config = valid_config();
        assert!(validate_config(&config).is_ok());
        assert!(validate_linker_config(&config).is_ok());
    }

    #[test]
    fn test_validate_blank_api_key_fails() {
        let mut config = valid_config();
        config.tmdb.api_key = "".to_string();
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_missing_genres_db_only_fails_linker() {
        let mut config = valid_config();
        config.notion.genres_database_id = "".to_string();
        assert!(validate_config(&config).is_ok());
        assert!(validate_linker_config(&config).is_err());
    }
}
