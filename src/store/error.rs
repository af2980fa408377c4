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

//! Store error types.

use std::sync::Arc;

use thiserror::Error;

/// A boxed error kept for the source chain.
pub type BoxError = Arc<dyn std::error::Error + Send + Sync>;

/// Result alias for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by a [`RecordStore`](super::RecordStore).
///
/// "No such record" is not an error at this level; lookups return `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("record store unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The backend was reached but the query or command failed.
    #[error("record store query failed: {message}")]
    Query {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A document could not be converted to or from its stored form.
    #[error("record serialization failed: {message}")]
    Serialization { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            source: None,
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(self, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        let boxed: BoxError = Arc::new(err);
        match self {
            Self::Unavailable { message, .. } => Self::Unavailable {
                message,
                source: Some(boxed),
            },
            Self::Query { message, .. } => Self::Query {
                message,
                source: Some(boxed),
            },
            other => other,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
