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

//! Server configuration.
//!
//! Files are YAML or JSON and may reference the environment with
//! `${VAR}` or `${VAR:-default}`:
//!
//! ```yaml
//! host: ${CITIES_HOST:-0.0.0.0}
//! port: ${PORT:-3000}
//! store:
//!   kind: mongo
//!   connection_url: ${MONGO_URL}
//!   database: zips
//!   collection: city
//! api:
//!   page_limit: 20
//!   state_filter: { field: state, match: exact }
//!   name_filter: { field: city, match: contains }
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod types;

pub use loader::{from_json_str, from_yaml_str, load_config_file, ConfigError};
pub use types::{ApiSettings, FilterSettings, ServerConfig, StoreConfig};
