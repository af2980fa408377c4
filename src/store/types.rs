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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute map of a record that has not been stored yet.
pub type NewRecord = Map<String, Value>;

/// A stored document.
///
/// Only the identifier is typed; every other attribute is carried through
/// untouched and serialized next to `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: NewRecord) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// How a [`Filter`] compares the field value. Both modes ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Exact,
    Contains,
}

/// Single-field predicate applied before paging and counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
    pub mode: MatchMode,
}

impl Filter {
    pub fn new(field: impl Into<String>, value: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            mode,
        }
    }

    pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, value, MatchMode::Exact)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, value, MatchMode::Contains)
    }

    /// Evaluate the predicate against an in-memory record.
    ///
    /// Strings and numbers are compared by their textual form; any other JSON
    /// type never matches.
    pub fn matches(&self, record: &Record) -> bool {
        let candidate = match record.get(&self.field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return false,
        };

        let candidate = candidate.to_lowercase();
        let wanted = self.value.to_lowercase();
        match self.mode {
            MatchMode::Exact => candidate == wanted,
            MatchMode::Contains => candidate.contains(&wanted),
        }
    }
}
