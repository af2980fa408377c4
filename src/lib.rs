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

//! Range-paginated REST API over a cities collection.
//!
//! Records live behind a [`store::RecordStore`] (in-memory or MongoDB). The
//! [`pagination::ReadPath`] turns an `items` range plus a filter into a page
//! and a total count, and [`api`] exposes it over HTTP with `Content-Range`
//! headers.

pub mod api;
pub mod config;
pub mod factories;
pub mod pagination;
pub mod server;
pub mod store;

pub use config::{load_config_file, ServerConfig};
pub use pagination::{RangeRequest, RangeResponse, ReadPath};
pub use server::CitiesServer;
pub use store::{MemoryStore, RecordStore};
