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

//! Range-paginated read path.
//!
//! Translates an item range plus a single-field filter into a bounded page of
//! records and the total match count. Nothing here knows about HTTP; the API
//! layer maps [`RangeResponse`] onto `Content-Range` and [`ReadError`] onto
//! status codes.

pub mod etag;
pub mod range;
pub mod read_path;

pub use etag::{entity_tag, if_none_match};
pub use range::{RangeError, RangeRequest, RangeResponse, DEFAULT_PAGE_LIMIT, RANGE_UNIT};
pub use read_path::{Page, ReadError, ReadPath};
