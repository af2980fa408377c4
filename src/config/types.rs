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

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::pagination::DEFAULT_PAGE_LIMIT;
use crate::store::{Filter, MatchMode};

/// Top-level server configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub api: ApiSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            store: StoreConfig::default(),
            api: ApiSettings::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which record store backs the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Fixed in-memory array, optionally seeded from a JSON array file.
    /// Relative paths are resolved against the config file's directory.
    Memory {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed_file: Option<PathBuf>,
    },
    /// Remote MongoDB collection.
    Mongo {
        connection_url: String,
        #[serde(default = "default_database")]
        database: String,
        #[serde(default = "default_collection")]
        collection: String,
        #[serde(default = "default_connect_timeout_ms")]
        connect_timeout_ms: u64,
        #[serde(default = "default_server_selection_timeout_ms")]
        server_selection_timeout_ms: u64,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory { seed_file: None }
    }
}

impl StoreConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreConfig::Memory { .. } => "memory",
            StoreConfig::Mongo { .. } => "mongo",
        }
    }
}

fn default_database() -> String {
    "zips".to_string()
}

fn default_collection() -> String {
    "city".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_server_selection_timeout_ms() -> u64 {
    5_000
}

/// The field an endpoint filters on, and how it compares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub field: String,
    #[serde(default, rename = "match")]
    pub mode: MatchMode,
}

impl FilterSettings {
    pub fn new(field: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            field: field.into(),
            mode,
        }
    }

    /// Build the per-request filter for a path value.
    pub fn filter(&self, value: impl Into<String>) -> Filter {
        Filter::new(self.field.clone(), value, self.mode)
    }
}

/// HTTP behaviour of the cities API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Default and maximum number of items per page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u64,
    /// Filter behind `/api/state/{state}`, its count and `/api/states`.
    #[serde(default = "default_state_filter")]
    pub state_filter: FilterSettings,
    /// Filter behind `/api/cities/{name}`.
    #[serde(default = "default_name_filter")]
    pub name_filter: FilterSettings,
    /// Attach an `ETag` to state pages and honour `If-None-Match`.
    #[serde(default = "default_true")]
    pub etag: bool,
    /// Gzip responses for clients that accept it.
    #[serde(default = "default_true")]
    pub compression: bool,
    /// `Cache-Control: max-age` for the state list.
    #[serde(default = "default_states_max_age_secs")]
    pub states_max_age_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            page_limit: default_page_limit(),
            state_filter: default_state_filter(),
            name_filter: default_name_filter(),
            etag: true,
            compression: true,
            states_max_age_secs: default_states_max_age_secs(),
        }
    }
}

fn default_page_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

fn default_state_filter() -> FilterSettings {
    FilterSettings::new("state", MatchMode::Exact)
}

fn default_name_filter() -> FilterSettings {
    FilterSettings::new("city", MatchMode::Contains)
}

fn default_true() -> bool {
    true
}

fn default_states_max_age_secs() -> u64 {
    30
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("Invalid port: {} (cannot be 0)", self.port));
        }

        if self.host.trim().is_empty() {
            return Err(anyhow!("Host cannot be empty"));
        }

        if self.api.page_limit == 0 {
            return Err(anyhow!("api.page_limit must be greater than 0"));
        }

        for (name, filter) in [
            ("state_filter", &self.api.state_filter),
            ("name_filter", &self.api.name_filter),
        ] {
            if filter.field.trim().is_empty() {
                return Err(anyhow!("api.{name}.field cannot be empty"));
            }
        }

        if let StoreConfig::Mongo {
            connection_url,
            database,
            collection,
            ..
        } = &self.store
        {
            if connection_url.trim().is_empty() {
                return Err(anyhow!("store.connection_url cannot be empty"));
            }
            if database.trim().is_empty() || collection.trim().is_empty() {
                return Err(anyhow!("store.database and store.collection cannot be empty"));
            }
        }

        Ok(())
    }
}
