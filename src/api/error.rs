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

//! Error responses of the cities API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::ValidationError;
use crate::pagination::{RangeError, ReadError};
use crate::store::StoreError;

/// Error codes for API responses
pub mod error_codes {
    pub const RECORD_NOT_FOUND: &str = "RECORD_NOT_FOUND";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const RANGE_NOT_SATISFIABLE: &str = "RANGE_NOT_SATISFIABLE";
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const STORE_FAILURE: &str = "STORE_FAILURE";
}

/// API error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }

    pub fn invalid_request(error: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_REQUEST, error)
    }

    pub fn status(&self) -> StatusCode {
        status_from_code(&self.code)
    }

    pub fn with_status(self) -> (StatusCode, Json<Self>) {
        (self.status(), Json(self))
    }
}

fn status_from_code(code: &str) -> StatusCode {
    match code {
        error_codes::RECORD_NOT_FOUND => StatusCode::NOT_FOUND,
        error_codes::INVALID_REQUEST => StatusCode::BAD_REQUEST,
        error_codes::RANGE_NOT_SATISFIABLE => StatusCode::RANGE_NOT_SATISFIABLE,
        error_codes::STORE_UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        self.with_status().into_response()
    }
}

impl From<ReadError> for ErrorResponse {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::NotFound { id } => ErrorResponse::new(
                error_codes::RECORD_NOT_FOUND,
                format!("City '{id}' not found"),
            ),
            ReadError::Store(err) => err.into(),
        }
    }
}

impl From<StoreError> for ErrorResponse {
    fn from(err: StoreError) -> Self {
        if err.is_unavailable() {
            warn!("Record store unavailable: {err}");
            ErrorResponse::new(error_codes::STORE_UNAVAILABLE, err.to_string())
        } else {
            error!("Record store failure: {err}");
            ErrorResponse::new(error_codes::STORE_FAILURE, err.to_string())
        }
    }
}

impl From<RangeError> for ErrorResponse {
    fn from(err: RangeError) -> Self {
        ErrorResponse::new(error_codes::RANGE_NOT_SATISFIABLE, err.to_string())
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        ErrorResponse::invalid_request(err.to_string())
    }
}
