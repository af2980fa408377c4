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

//! OpenAPI document, served at `/api/openapi.json` with Swagger UI at
//! `/api/docs/`.

use utoipa::OpenApi;

use super::error::ErrorResponse;
use super::responses::{CitySchema, CountResponse, HealthResponse};
use super::validation::NewCity;
use crate::pagination::RangeResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::health_check,
        super::handlers::list_states,
        super::handlers::head_state,
        super::handlers::get_state_page,
        super::handlers::count_state,
        super::handlers::search_cities,
        super::handlers::get_city,
        super::handlers::create_city,
    ),
    components(
        schemas(
            HealthResponse,
            CountResponse,
            CitySchema,
            NewCity,
            RangeResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "States", description = "Cities grouped by state, paginated with `Range: items=<first>-<last>`"),
        (name = "Cities", description = "City lookup, search and creation"),
    ),
    info(
        title = "Cities API",
        version = "1.0.0",
        description = "Range-paginated access to a cities and zip code collection.\n\n## Pagination\n\nList endpoints answer `206 Partial Content`. Send `Range: items=<first>-<last>` to pick a page; the response carries `Content-Range: items <first>-<last>/<total>` so clients can compute the remaining pages. Pages are capped at the configured page limit (20 by default).",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    )
)]
pub struct ApiDoc;
