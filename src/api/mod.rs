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

//! REST API of the cities server.
//!
//! ```text
//! /health                     - Health check
//! /api/states                 - Distinct state codes
//! /api/state/{state}          - Cities in a state (range-paginated, HEAD supported)
//! /api/state/{state}/count    - Number of cities in a state
//! /api/cities/{name}          - Cities whose name contains {name} (range-paginated)
//! /api/city/{cityId}          - A single city
//! /api/city                   - Add a city (POST)
//! /api/openapi.json           - OpenAPI document
//! /api/docs                   - Swagger UI
//! ```

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod routes;
pub mod validation;

pub use error::{error_codes, ErrorResponse};
pub use openapi::ApiDoc;
pub use responses::{CountResponse, HealthResponse};
pub use routes::build_router;
pub use validation::{NewCity, ValidationError};
