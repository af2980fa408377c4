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

//! `${VAR}` / `${VAR:-default}` substitution for configuration text.
//!
//! ```
//! use cities_server::config::env_interpolation::interpolate;
//!
//! std::env::set_var("DOC_MONGO_HOST", "db.internal");
//! let text = interpolate("url: mongodb://${DOC_MONGO_HOST}:${DOC_MONGO_PORT:-27017}").unwrap();
//! assert_eq!(text, "url: mongodb://db.internal:27017");
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use std::env;

/// Upper bound on the size of an interpolated document.
const MAX_INTERPOLATED_LENGTH: usize = 1024 * 1024;

lazy_static! {
    /// `${NAME}` or `${NAME:-default}`, NAME following POSIX rules.
    static ref ENV_REFERENCE: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("valid pattern");
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpolationError {
    #[error("environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("environment variable '{name}' is not valid unicode")]
    InvalidUnicode { name: String },

    #[error("interpolated configuration exceeds {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

/// Replace every environment reference in `input`.
///
/// Unset and empty variables fall back to their default; without one the
/// whole call fails. Substituted values are not expanded again.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut failure = None;
    let mut used = Vec::new();

    let output = ENV_REFERENCE.replace_all(input, |caps: &Captures| {
        let name = &caps[1];
        match resolve(name, caps.get(2).map(|m| m.as_str())) {
            Ok(value) => {
                used.push(name.to_string());
                value
            }
            Err(err) => {
                failure.get_or_insert(err);
                String::new()
            }
        }
    });

    if let Some(err) = failure {
        return Err(err);
    }
    if output.len() > MAX_INTERPOLATED_LENGTH {
        return Err(InterpolationError::ResultTooLarge);
    }
    if !used.is_empty() {
        debug!("Interpolated environment variables: {}", used.join(", "));
    }

    Ok(output.into_owned())
}

fn resolve(name: &str, default: Option<&str>) -> Result<String, InterpolationError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Err(env::VarError::NotUnicode(_)) => Err(InterpolationError::InvalidUnicode {
            name: name.to_string(),
        }),
        _ => default
            .map(str::to_string)
            .ok_or_else(|| InterpolationError::MissingVariable {
                name: name.to_string(),
            }),
    }
}
