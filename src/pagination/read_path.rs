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

use std::sync::Arc;

use log::debug;
use thiserror::Error;

use super::range::{RangeRequest, RangeResponse};
use crate::store::{Filter, NewRecord, Record, RecordStore, StoreError};

#[derive(Debug, Clone, Error)]
pub enum ReadError {
    /// The store is healthy but holds no record with this identifier.
    #[error("record '{id}' not found")]
    NotFound { id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One page of a filtered collection plus its position in the full match set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<Record>,
    pub range: RangeResponse,
}

/// Range-addressable reads (and inserts) over a [`RecordStore`].
///
/// The store is injected once at startup and shared by every request.
#[derive(Clone)]
pub struct ReadPath {
    store: Arc<dyn RecordStore>,
}

impl ReadPath {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Fetch the requested page and the total match count.
    ///
    /// Both queries run concurrently. If either fails the whole call fails;
    /// a page is never returned without its count.
    pub async fn fetch_page(&self, filter: &Filter, range: RangeRequest) -> Result<Page, ReadError> {
        let (mut records, length) = tokio::try_join!(
            self.store.find_page(filter, range.offset(), range.limit()),
            self.store.count(filter),
        )?;

        let limit = usize::try_from(range.limit()).unwrap_or(usize::MAX);
        records.truncate(limit);

        debug!(
            "Fetched {} of {} record(s) for {}={} ({})",
            records.len(),
            length,
            filter.field,
            filter.value,
            range.respond(length)
        );

        Ok(Page {
            records,
            range: range.respond(length),
        })
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<Record, ReadError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ReadError::NotFound { id: id.to_string() })
    }

    /// Store a record as given. Callers validate and coerce fields beforehand.
    pub async fn insert(&self, record: NewRecord) -> Result<Record, ReadError> {
        Ok(self.store.insert_one(record).await?)
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64, ReadError> {
        Ok(self.store.count(filter).await?)
    }

    pub async fn distinct(&self, field: &str) -> Result<Vec<String>, ReadError> {
        Ok(self.store.distinct(field).await?)
    }
}
