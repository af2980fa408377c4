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

//! Builds the configured [`RecordStore`].

use anyhow::{anyhow, Result};
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::store::{MemoryStore, RecordStore};

/// Create the record store described by `config`.
///
/// Relative seed paths are resolved against `config_dir`, the directory that
/// holds the configuration file.
pub async fn create_store(config: &StoreConfig, config_dir: &Path) -> Result<Arc<dyn RecordStore>> {
    match config {
        StoreConfig::Memory { seed_file: None } => {
            info!("Using empty in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreConfig::Memory {
            seed_file: Some(seed_file),
        } => {
            let path = if seed_file.is_relative() {
                config_dir.join(seed_file)
            } else {
                seed_file.clone()
            };
            let store = MemoryStore::from_json_file(&path).map_err(|e| {
                anyhow!("Failed to seed in-memory store from '{}': {e}", path.display())
            })?;
            info!(
                "Seeded in-memory store with {} record(s) from {}",
                store.len().await,
                path.display()
            );
            Ok(Arc::new(store))
        }
        #[cfg(feature = "mongo")]
        StoreConfig::Mongo {
            connection_url,
            database,
            collection,
            connect_timeout_ms,
            server_selection_timeout_ms,
        } => {
            use crate::store::mongo::{MongoConnectOptions, MongoStore};
            use std::time::Duration;

            let store = MongoStore::connect(MongoConnectOptions {
                connection_url: connection_url.clone(),
                database: database.clone(),
                collection: collection.clone(),
                connect_timeout: Duration::from_millis(*connect_timeout_ms),
                server_selection_timeout: Duration::from_millis(*server_selection_timeout_ms),
            })
            .await
            .map_err(|e| anyhow!("Failed to connect to MongoDB: {e}"))?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongo"))]
        StoreConfig::Mongo { .. } => Err(anyhow!(
            "store kind 'mongo' requires building with the 'mongo' feature"
        )),
    }
}
