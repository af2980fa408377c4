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

//! Validation and coercion of new city submissions.
//!
//! Browsers post forms where every value is a string, so `loc` and `pop` are
//! accepted as numeric strings too and converted before the record is stored.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

use crate::store::NewRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body is not valid {format}: {reason}")]
    Body { format: &'static str, reason: String },

    #[error("missing required field '{0}'")]
    Missing(&'static str),

    #[error("invalid field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("unsupported content type '{0}'")]
    UnsupportedContentType(String),
}

impl ValidationError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Body of `POST /api/city`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewCity {
    /// City name
    #[schema(example = "SPRINGFIELD")]
    pub city: String,
    /// Two-letter state code; stored upper-cased
    #[schema(example = "MA")]
    pub state: String,
    /// Coordinates as `[longitude, latitude]`
    #[schema(value_type = Vec<f64>, example = json!([-72.5, 42.1]))]
    pub loc: [f64; 2],
    /// Population
    #[schema(example = 15338)]
    pub pop: i64,
}

impl NewCity {
    /// Validate an already decoded body.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        let city = required_text(fields, "city")?;
        let state = required_text(fields, "state")?.to_uppercase();
        let loc = location(fields.get("loc").ok_or(ValidationError::Missing("loc"))?)?;
        let pop = population(fields.get("pop").ok_or(ValidationError::Missing("pop"))?)?;

        Ok(Self {
            city,
            state,
            loc,
            pop,
        })
    }

    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| ValidationError::Body {
            format: "JSON",
            reason: e.to_string(),
        })?;
        match value {
            Value::Object(fields) => Self::from_fields(&fields),
            _ => Err(ValidationError::Body {
                format: "JSON",
                reason: "expected an object".to_string(),
            }),
        }
    }

    /// Decode `application/x-www-form-urlencoded`.
    ///
    /// `loc` may be given once as `"lng,lat"` or repeated (`loc=..&loc=..`,
    /// `loc[]=..` or `loc[0]=..&loc[1]=..`).
    pub fn from_form(body: &[u8]) -> Result<Self, ValidationError> {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_bytes(body).map_err(|e| ValidationError::Body {
                format: "form",
                reason: e.to_string(),
            })?;

        let mut fields = Map::new();
        let mut loc = Vec::new();
        for (key, value) in pairs {
            if key == "loc" || key.starts_with("loc[") {
                loc.push(Value::String(value));
            } else {
                fields.insert(key, Value::String(value));
            }
        }
        match loc.len() {
            0 => {}
            1 => {
                fields.insert("loc".to_string(), loc.remove(0));
            }
            _ => {
                fields.insert("loc".to_string(), Value::Array(loc));
            }
        }

        Self::from_fields(&fields)
    }

    pub fn into_record(self) -> NewRecord {
        let mut record = Map::new();
        record.insert("city".to_string(), json!(self.city));
        record.insert("state".to_string(), json!(self.state));
        record.insert("loc".to_string(), json!(self.loc));
        record.insert("pop".to_string(), json!(self.pop));
        record
    }
}

fn required_text(fields: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::String(_)) => Err(ValidationError::invalid(field, "must not be empty")),
        Some(_) => Err(ValidationError::invalid(field, "must be a string")),
    }
}

fn location(value: &Value) -> Result<[f64; 2], ValidationError> {
    let parts: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::String(s) => {
            let coords = s
                .split(',')
                .map(|part| coordinate(&Value::String(part.trim().to_string())))
                .collect::<Result<Vec<_>, _>>()?;
            return pair(coords);
        }
        _ => return Err(ValidationError::invalid("loc", "expected two coordinates")),
    };

    let coords = parts
        .into_iter()
        .map(coordinate)
        .collect::<Result<Vec<_>, _>>()?;
    pair(coords)
}

fn pair(coords: Vec<f64>) -> Result<[f64; 2], ValidationError> {
    match coords.as_slice() {
        [lng, lat] => Ok([*lng, *lat]),
        _ => Err(ValidationError::invalid(
            "loc",
            format!("expected two coordinates, got {}", coords.len()),
        )),
    }
}

fn coordinate(value: &Value) -> Result<f64, ValidationError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::invalid("loc", format!("'{value}' is not a number")))
}

fn population(value: &Value) -> Result<i64, ValidationError> {
    let pop = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match pop {
        Some(pop) if pop >= 0 => Ok(pop),
        Some(_) => Err(ValidationError::invalid("pop", "must not be negative")),
        None => Err(ValidationError::invalid(
            "pop",
            format!("'{value}' is not an integer"),
        )),
    }
}
