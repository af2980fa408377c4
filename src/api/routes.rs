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

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use super::openapi::ApiDoc;
use crate::config::ApiSettings;
use crate::pagination::ReadPath;

/// Build the application router.
///
/// Resource routes are nested under `/api`; `/health` stays at the root.
pub fn build_router(read_path: ReadPath, settings: ApiSettings) -> Router {
    let compression = settings.compression;

    let api_routes = Router::new()
        .route("/states", get(handlers::list_states))
        // explicit HEAD so the GET handler never runs for it
        .route(
            "/state/:state",
            get(handlers::get_state_page).head(handlers::head_state),
        )
        .route("/state/:state/count", get(handlers::count_state))
        .route("/cities/:name", get(handlers::search_cities))
        .route("/city", post(handlers::create_city))
        .route("/city/:cityId", get(handlers::get_city));

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(Extension(read_path))
        .layer(Extension(Arc::new(settings)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    if compression {
        app.layer(CompressionLayer::new())
    } else {
        app
    }
}
