use super::{types::Config, ConfigError};

/// Upper bound on the number of downloads requested at once.
const MAX_DOWNLOAD_LIMIT: u32 = 5000;

/// Validate configuration
/// Currently validates:
/// - API credentials are set and are not template placeholders
/// - Download limit is within 1..=5000
/// - Timeouts are not 0
/// - Truncation lengths are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    check_secret("real_debrid.api_token", &config.real_debrid.api_token)?;
    check_secret("tmdb.api_key", &config.tmdb.api_key)?;

    if config.real_debrid.limit == 0 || config.real_debrid.limit > MAX_DOWNLOAD_LIMIT {
        return Err(ConfigError::ValidationError(format!(
            "real_debrid.limit must be between 1 and {}",
            MAX_DOWNLOAD_LIMIT
        )));
    }

    if config.real_debrid.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "real_debrid.timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.tmdb.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tmdb.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.resolver.truncation_lengths.contains(&0) {
        return Err(ConfigError::ValidationError(
            "resolver.truncation_lengths cannot contain 0".to_string(),
        ));
    }

    Ok(())
}

/// Reject empty values and the `your_..._here` placeholders of the sample config.
fn check_secret(key: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::ValidationError(format!("{} is required", key)));
    }

    let lower = value.to_lowercase();
    if lower.starts_with("your_") && lower.ends_with("_here") {
        return Err(ConfigError::ValidationError(format!(
            "{} still holds the placeholder value",
            key
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TmdbConfig;
    use crate::config::OutputConfig;
    use crate::normalizer::NormalizerConfig;
    use crate::resolver::ResolverConfig;
    use crate::source::RealDebridConfig;

    fn valid_config() -> Config {
        Config {
            real_debrid: RealDebridConfig {
                api_token: "rd-token".to_string(),
                base_url: None,
                limit: 1000,
                timeout_secs: 30,
            },
            tmdb: TmdbConfig {
                api_key: "tmdb-key".to_string(),
                base_url: None,
                language: None,
                timeout_secs: 30,
            },
            resolver: ResolverConfig::default(),
            normalizer: NormalizerConfig::default(),
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_empty_token_fails() {
        let mut config = valid_config();
        config.real_debrid.api_token = "  ".to_string();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_placeholder_fails() {
        let mut config = valid_config();
        config.tmdb.api_key = "your_tmdb_api_key_here".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("tmdb.api_key"));
    }

    #[test]
    fn test_validate_limit_bounds() {
        let mut config = valid_config();
        config.real_debrid.limit = 0;
        assert!(validate_config(&config).is_err());

        config.real_debrid.limit = MAX_DOWNLOAD_LIMIT + 1;
        assert!(validate_config(&config).is_err());

        config.real_debrid.limit = MAX_DOWNLOAD_LIMIT;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = valid_config();
        config.tmdb.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_truncation_fails() {
        let mut config = valid_config();
        config.resolver.truncation_lengths = vec![3, 0];
        assert!(validate_config(&config).is_err());
    }
}
