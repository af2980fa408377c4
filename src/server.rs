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

use anyhow::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api;
use crate::config::{load_config_file, ApiSettings, ServerConfig};
use crate::factories::create_store;
use crate::pagination::ReadPath;
use crate::store::RecordStore;

pub struct CitiesServer {
    read_path: ReadPath,
    settings: ApiSettings,
    host: String,
    port: u16,
    config_file_path: Option<PathBuf>,
}

impl CitiesServer {
    /// Create a server from a configuration file.
    ///
    /// A missing file means the defaults: an empty in-memory store.
    pub async fn new(config_path: PathBuf, port_override: Option<u16>) -> Result<Self> {
        let config = if config_path.exists() {
            load_config_file(&config_path)?
        } else {
            warn!(
                "Config file '{}' not found, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        };

        let config_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let store = create_store(&config.store, &config_dir).await?;

        let mut server = Self::from_store(store, &config);
        if let Some(port) = port_override {
            server.port = port;
        }
        server.config_file_path = Some(config_path);
        Ok(server)
    }

    /// Create a server around an existing store.
    pub fn from_store(store: Arc<dyn RecordStore>, config: &ServerConfig) -> Self {
        Self {
            read_path: ReadPath::new(store),
            settings: config.api.clone(),
            host: config.host.clone(),
            port: config.port,
            config_file_path: None,
        }
    }

    pub fn router(&self) -> axum::Router {
        api::build_router(self.read_path.clone(), self.settings.clone())
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until ctrl-c.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        self.serve(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {e}");
            }
        })
        .await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: tokio::net::TcpListener, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        if let Some(config_file) = &self.config_file_path {
            info!("Config file: {}", config_file.display());
        }
        info!(
            "Record store: {} (page limit {})",
            self.read_path.store().kind(),
            self.settings.page_limit
        );
        info!("Cities API listening on http://{addr}/api/");
        info!("Swagger UI available at http://{addr}/api/docs/");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Cities server stopped");
        Ok(())
    }
}
