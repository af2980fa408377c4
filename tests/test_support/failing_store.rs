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

use async_trait::async_trait;
use cities_server::store::{Filter, NewRecord, Record, RecordStore, StoreError, StoreResult};

/// Store whose every operation fails, either as unreachable or as a failed query.
pub struct FailingStore {
    pub unavailable: bool,
}

impl FailingStore {
    fn error(&self) -> StoreError {
        if self.unavailable {
            StoreError::unavailable("server selection timed out")
        } else {
            StoreError::query("command failed")
        }
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    fn kind(&self) -> &'static str {
        "failing"
    }

    async fn find_page(&self, _filter: &Filter, _offset: u64, _limit: u64) -> StoreResult<Vec<Record>> {
        Err(self.error())
    }

    async fn count(&self, _filter: &Filter) -> StoreResult<u64> {
        Err(self.error())
    }

    async fn find_by_id(&self, _id: &str) -> StoreResult<Option<Record>> {
        Err(self.error())
    }

    async fn insert_one(&self, _record: NewRecord) -> StoreResult<Record> {
        Err(self.error())
    }

    async fn distinct(&self, _field: &str) -> StoreResult<Vec<String>> {
        Err(self.error())
    }
}
