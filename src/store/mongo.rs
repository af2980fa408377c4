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

//! MongoDB record store.
//!
//! Identifiers are rendered as hex strings when they are `ObjectId`s. Pages are
//! ordered by `_id` so consecutive ranges never overlap.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde_json::Value;

use super::{Filter, MatchMode, NewRecord, Record, RecordStore, StoreError, StoreResult};

/// Connection parameters for [`MongoStore::connect`].
#[derive(Debug, Clone)]
pub struct MongoConnectOptions {
    pub connection_url: String,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
    pub server_selection_timeout: Duration,
}

#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connect and ping the database so an unreachable server fails at startup.
    pub async fn connect(options: MongoConnectOptions) -> StoreResult<Self> {
        let mut client_options = ClientOptions::parse(&options.connection_url)
            .await
            .map_err(|e| map_error("failed to parse connection url", e))?;
        client_options.connect_timeout = Some(options.connect_timeout);
        client_options.server_selection_timeout = Some(options.server_selection_timeout);

        let client = Client::with_options(client_options)
            .map_err(|e| map_error("failed to create client", e))?;
        let database = client.database(&options.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| map_error("ping failed", e))?;

        info!(
            "Connected to MongoDB database '{}', collection '{}'",
            options.database, options.collection
        );

        Ok(Self {
            collection: database.collection::<Document>(&options.collection),
        })
    }
}

/// Case-insensitive `$regex` query for a filter. The value is escaped so it is
/// always matched literally.
pub fn filter_document(filter: &Filter) -> Document {
    let escaped = regex::escape(&filter.value);
    let pattern = match filter.mode {
        MatchMode::Exact => format!("^{escaped}$"),
        MatchMode::Contains => escaped,
    };

    let mut query = Document::new();
    query.insert(
        filter.field.clone(),
        doc! { "$regex": pattern, "$options": "i" },
    );
    query
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn id_query(id: &str) -> Option<Document> {
    // Seeded collections may use plain string ids (zip codes).
    match ObjectId::parse_str(id) {
        Ok(oid) => Some(doc! { "$or": [ { "_id": oid }, { "_id": id } ] }),
        Err(_) if !id.is_empty() => Some(doc! { "_id": id }),
        Err(_) => None,
    }
}

fn record_from_document(mut document: Document) -> StoreResult<Record> {
    let id = document
        .remove("_id")
        .map(id_to_string)
        .ok_or_else(|| StoreError::serialization("document has no _id"))?;

    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => Ok(Record::new(id, fields)),
        other => Err(StoreError::serialization(format!(
            "expected a document, got {other}"
        ))),
    }
}

fn map_error(context: &str, err: MongoError) -> StoreError {
    let message = format!("{context}: {err}");
    let base = match *err.kind {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
            StoreError::unavailable(message)
        }
        _ => StoreError::query(message),
    };
    base.with_source(err)
}

#[async_trait]
impl RecordStore for MongoStore {
    fn kind(&self) -> &'static str {
        "mongo"
    }

    async fn find_page(
        &self,
        filter: &Filter,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<Record>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let cursor = self
            .collection
            .find(filter_document(filter))
            .sort(doc! { "_id": 1 })
            .skip(offset)
            .limit(limit)
            .await
            .map_err(|e| map_error("find failed", e))?;
        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| map_error("cursor failed", e))?;

        debug!(
            "find_page on '{}' returned {} document(s)",
            self.collection.name(),
            documents.len()
        );
        documents.into_iter().map(record_from_document).collect()
    }

    async fn count(&self, filter: &Filter) -> StoreResult<u64> {
        self.collection
            .count_documents(filter_document(filter))
            .await
            .map_err(|e| map_error("count failed", e))
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Record>> {
        let Some(query) = id_query(id) else {
            return Ok(None);
        };

        self.collection
            .find_one(query)
            .await
            .map_err(|e| map_error("find_one failed", e))?
            .map(record_from_document)
            .transpose()
    }

    async fn insert_one(&self, mut record: NewRecord) -> StoreResult<Record> {
        record.remove("_id");
        let document =
            bson::to_document(&record).map_err(|e| StoreError::serialization(e.to_string()))?;

        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|e| map_error("insert failed", e))?;

        Ok(Record::new(id_to_string(result.inserted_id), record))
    }

    async fn distinct(&self, field: &str) -> StoreResult<Vec<String>> {
        let values = self
            .collection
            .distinct(field, doc! {})
            .await
            .map_err(|e| map_error("distinct failed", e))?;

        let mut values: Vec<String> = values
            .into_iter()
            .filter_map(|v| match v {
                Bson::String(s) => Some(s),
                Bson::Int32(n) => Some(n.to_string()),
                Bson::Int64(n) => Some(n.to_string()),
                _ => None,
            })
            .collect();
        values.sort();
        values.dedup();
        Ok(values)
    }
}
