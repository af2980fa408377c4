// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reading [`ServerConfig`] files.

use super::env_interpolation::{self, InterpolationError};
use super::types::ServerConfig;
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment variable interpolation failed: {0}")]
    Interpolation(#[from] InterpolationError),

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    Parse {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] anyhow::Error),
}

/// Interpolate environment references in `s`, then parse it as YAML.
///
/// ```
/// use cities_server::config::{from_yaml_str, ServerConfig};
///
/// std::env::set_var("DOC_CITIES_PORT", "3100");
/// let config: ServerConfig = from_yaml_str("port: ${DOC_CITIES_PORT}").unwrap();
/// assert_eq!(config.port, 3100);
/// ```
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_yaml::from_str(&interpolated)?)
}

/// JSON counterpart of [`from_yaml_str`].
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_json::from_str(&interpolated)?)
}

/// Load and validate a configuration file.
///
/// The content is interpolated first, then parsed as YAML with JSON as the
/// fallback, so either format works regardless of the file extension.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ServerConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let interpolated = env_interpolation::interpolate(&content)?;

    let config = serde_yaml::from_str::<ServerConfig>(&interpolated).or_else(|yaml_err| {
        serde_json::from_str::<ServerConfig>(&interpolated).map_err(|json_err| ConfigError::Parse {
            path: path.display().to_string(),
            yaml_err: yaml_err.to_string(),
            json_err: json_err.to_string(),
        })
    })?;

    config.validate()?;
    debug!(
        "Loaded config from {} (store: {})",
        path.display(),
        config.store.kind()
    );

    Ok(config)
}
