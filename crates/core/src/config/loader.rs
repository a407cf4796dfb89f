use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variables starting with this prefix override file values.
const ENV_PREFIX: &str = "REWATCH_";

/// Separates nested keys in override variables: `REWATCH_TMDB__API_KEY`
/// sets `tmdb.api_key`. A single underscore stays part of the key name.
const ENV_KEY_SEPARATOR: &str = "__";

/// Read `path`, then apply `REWATCH_*` overrides.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    layered(path)
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Parse a TOML document without environment overrides.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn layered(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split(ENV_KEY_SEPARATOR))
}
