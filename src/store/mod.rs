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

//! Record store abstraction.
//!
//! The read path talks to persistence only through the [`RecordStore`] trait.
//! Two backends implement it:
//!
//! - [`MemoryStore`] - a fixed in-memory array, optionally seeded from a JSON file
//! - `MongoStore` - a remote MongoDB collection (requires the `mongo` feature)
//!
//! Every operation is async so callers never assume synchronous completion,
//! even when the backend is the in-memory one.

pub mod error;
pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;
pub mod types;

use async_trait::async_trait;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;
pub use types::{Filter, MatchMode, NewRecord, Record};

/// Persistence collaborator for the range-paginated read path.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name used in log output.
    fn kind(&self) -> &'static str;

    /// Fetch at most `limit` records matching `filter`, skipping the first
    /// `offset` matches, in the store's stable order.
    async fn find_page(
        &self,
        filter: &Filter,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<Record>>;

    /// Count every record matching `filter`, ignoring paging.
    async fn count(&self, filter: &Filter) -> StoreResult<u64>;

    /// Look up a single record. `Ok(None)` means the store is healthy but holds
    /// no record with this identifier.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Record>>;

    /// Persist a new record and return it with its assigned identifier.
    async fn insert_one(&self, record: NewRecord) -> StoreResult<Record>;

    /// Distinct string values of `field` across the collection, sorted ascending.
    async fn distinct(&self, field: &str) -> StoreResult<Vec<String>>;
}
