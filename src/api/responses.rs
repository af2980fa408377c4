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

//! Response bodies of the cities API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Health status of the server
    pub status: String,
    /// Backend serving the records
    pub store: String,
    /// Current server timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Number of cities in a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    /// State code, upper-cased
    #[schema(example = "CA")]
    pub state: String,
    /// Number of matching cities
    #[schema(example = 1516)]
    pub cities: u64,
}

/// A stored city record.
///
/// Only documents the well-known attributes; records are returned as stored.
#[derive(Serialize, ToSchema)]
#[schema(as = City)]
pub struct CitySchema {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    #[schema(example = "01001")]
    pub id: String,
    #[schema(example = "AGAWAM")]
    pub city: String,
    #[schema(example = "MA")]
    pub state: String,
    /// `[longitude, latitude]`
    pub loc: Vec<f64>,
    pub pop: i64,
}
