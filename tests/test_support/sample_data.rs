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

use axum::Router;
use cities_server::api::build_router;
use cities_server::config::ApiSettings;
use cities_server::store::{MemoryStore, Record};
use cities_server::ReadPath;
use serde_json::json;
use std::sync::Arc;

pub const CA_CITIES: usize = 50;

/// 50 CA cities (every tenth a "SPRING VALLEY"), 3 NV and 2 MA cities.
///
/// Names containing "spring": 5 in CA, 1 in NV, 1 in MA.
pub fn sample_cities() -> Vec<Record> {
    let mut cities = Vec::new();
    for i in 0..CA_CITIES {
        let name = if i % 10 == 0 {
            format!("SPRING VALLEY {i}")
        } else {
            format!("CA TOWN {i}")
        };
        cities.push(("CA", name));
    }
    for name in ["SPRINGS", "RENO", "ELKO"] {
        cities.push(("NV", name.to_string()));
    }
    for name in ["AGAWAM", "SPRINGFIELD"] {
        cities.push(("MA", name.to_string()));
    }

    cities
        .into_iter()
        .enumerate()
        .map(|(n, (state, city))| {
            let fields = json!({
                "city": city,
                "state": state,
                "loc": [-72.0 - n as f64 / 100.0, 42.0],
                "pop": 1000 + n,
            });
            Record::new(format!("{:05}", n + 1), fields.as_object().cloned().unwrap())
        })
        .collect()
}

pub fn sample_store() -> MemoryStore {
    MemoryStore::with_records(sample_cities())
}

pub fn sample_router() -> Router {
    build_router(
        ReadPath::new(Arc::new(sample_store())),
        ApiSettings::default(),
    )
}
