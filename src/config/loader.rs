//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::PullerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the repository owner.
pub const ENV_ORG: &str = "GITHUB_ORG";
/// Environment variable naming the repository.
pub const ENV_REPO: &str = "GITHUB_REPO";
/// Environment variable holding the bearer token.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable overriding the API root.
pub const ENV_API_URL: &str = "GITHUB_API_URL";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then the `GITHUB_*` environment
/// overlay, then validation.
pub fn load_config(path: Option<&Path>) -> Result<PullerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => PullerConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<PullerConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay environment values onto `config`.
///
/// The repository triple always comes from the environment when no file
/// provided it: an unset variable becomes the empty string rather than an
/// error. A variable that is set wins over the file.
pub fn apply_env<F>(config: &mut PullerConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let github = &mut config.github;
    for (key, slot) in [
        (ENV_ORG, &mut github.org),
        (ENV_REPO, &mut github.repo),
        (ENV_TOKEN, &mut github.token),
    ] {
        if let Some(value) = lookup(key) {
            *slot = value;
        }
    }

    if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.is_empty()) {
        github.api_base_url = url;
    }
}
