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

//! In-memory record store.
//!
//! Records live in a vector in insertion order, which is also the paging
//! order. Cloning the store is cheap and every clone shares the same data.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Filter, NewRecord, Record, RecordStore, StoreError, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Seed the store from a JSON array of documents.
    ///
    /// Documents without an `_id` get a generated one; numeric ids are kept
    /// in their textual form.
    pub fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::unavailable(format!("failed to read seed file {}", path.display()))
                .with_source(e)
        })?;
        let records = parse_seed(&content)?;
        debug!(
            "Loaded {} record(s) from seed file {}",
            records.len(),
            path.display()
        );
        Ok(Self::with_records(records))
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn parse_seed(content: &str) -> StoreResult<Vec<Record>> {
    let documents: Vec<Value> = serde_json::from_str(content)?;
    documents.into_iter().map(record_from_document).collect()
}

fn record_from_document(document: Value) -> StoreResult<Record> {
    let Value::Object(mut fields) = document else {
        return Err(StoreError::serialization(
            "seed documents must be JSON objects",
        ));
    };

    let id = match fields.remove("_id") {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        None | Some(Value::Null) => generate_id(),
        Some(other) => {
            return Err(StoreError::serialization(format!(
                "unsupported _id value: {other}"
            )))
        }
    };

    Ok(Record::new(id, fields))
}

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn find_page(
        &self,
        filter: &Filter,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<Record>> {
        let records = self.records.read().await;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(records
            .iter()
            .filter(|r| filter.matches(r))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &Filter) -> StoreResult<u64> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_one(&self, mut record: NewRecord) -> StoreResult<Record> {
        // Callers cannot choose the identifier.
        record.remove("_id");
        let stored = Record::new(generate_id(), record);
        self.records.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn distinct(&self, field: &str) -> StoreResult<Vec<String>> {
        let records = self.records.read().await;
        let values: BTreeSet<String> = records
            .iter()
            .filter_map(|r| match r.get(field) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
            .collect();
        Ok(values.into_iter().collect())
    }
}
