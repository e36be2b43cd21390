use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Errors raised while loading the credentials config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config file: {0}")]
    Malformed(#[from] toml::de::Error),
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),
    #[error("Missing required config key '{key}' in profile '{profile}'")]
    MissingKey { profile: String, key: &'static str },
}

#[derive(Debug, Default, Deserialize)]
struct RawProfile {
    aws_access_key_id: Option<String>,
    aws_secret_access_key: Option<String>,
    region: Option<String>,
}

/// Credentials and default region for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Optional; the `--region` flag must supply one when absent.
    pub region: Option<String>,
}

/// Parses config content shaped as one TOML table per profile:
///
/// ```toml
/// [default]
/// aws_access_key_id = "..."
/// aws_secret_access_key = "..."
/// region = "us-west-2"
/// ```
pub fn read_config(content: &str, profile: &str) -> Result<ProfileConfig, ConfigError> {
    let mut profiles: HashMap<String, RawProfile> = toml::from_str(content)?;
    let raw = profiles
        .remove(profile)
        .ok_or_else(|| ConfigError::UnknownProfile(profile.to_string()))?;

    let missing = |key| ConfigError::MissingKey {
        profile: profile.to_string(),
        key,
    };
    Ok(ProfileConfig {
        aws_access_key_id: raw
            .aws_access_key_id
            .ok_or_else(|| missing("aws_access_key_id"))?,
        aws_secret_access_key: raw
            .aws_secret_access_key
            .ok_or_else(|| missing("aws_secret_access_key"))?,
        region: raw.region,
    })
}

pub fn load_config(path: &Path, profile: &str) -> Result<ProfileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    read_config(&content, profile)
}
