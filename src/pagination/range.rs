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

//! Item range requests and responses.
//!
//! Clients ask for a page with `Range: items=<first>-<last>` (inclusive
//! indices, `last` may be omitted). The server answers with
//! `Content-Range: items <first>-<last>/<length>`, where `length` is the total
//! number of matching records.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// The only range unit this API understands.
pub const RANGE_UNIT: &str = "items";

/// Page size used when the client sends no range, and the widest page served.
pub const DEFAULT_PAGE_LIMIT: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("malformed range header '{0}'")]
    Malformed(String),

    #[error("unsupported range unit '{0}', expected '{RANGE_UNIT}'")]
    UnsupportedUnit(String),

    #[error("range end {last} is before range start {first}")]
    Inverted { first: u64, last: u64 },
}

/// Inclusive item range requested by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    first: u64,
    last: u64,
}

impl RangeRequest {
    pub fn new(first: u64, last: u64) -> Result<Self, RangeError> {
        if last < first {
            return Err(RangeError::Inverted { first, last });
        }
        Ok(Self { first, last })
    }

    /// `items=0-(page_limit - 1)`.
    pub fn first_page(page_limit: u64) -> Self {
        Self {
            first: 0,
            last: page_limit.max(1) - 1,
        }
    }

    /// Parse the value of an optional `Range` header and cap the page at
    /// `page_limit` items. A missing header means the first page.
    pub fn from_header(header: Option<&str>, page_limit: u64) -> Result<Self, RangeError> {
        match header {
            Some(value) => Self::parse(value, page_limit),
            None => Ok(Self::first_page(page_limit)),
        }
    }

    /// Parse `items=<first>-<last>` or `items=<first>-`.
    pub fn parse(header: &str, page_limit: u64) -> Result<Self, RangeError> {
        let malformed = || RangeError::Malformed(header.to_string());

        let (unit, ranges) = header.trim().split_once('=').ok_or_else(malformed)?;
        let unit = unit.trim();
        if !unit.eq_ignore_ascii_case(RANGE_UNIT) {
            return Err(RangeError::UnsupportedUnit(unit.to_string()));
        }

        // Multi-range requests are not supported.
        if ranges.contains(',') {
            return Err(malformed());
        }

        let (first, last) = ranges.trim().split_once('-').ok_or_else(malformed)?;
        let first: u64 = first.trim().parse().map_err(|_| malformed())?;
        let last = match last.trim() {
            "" => first.saturating_add(page_limit.max(1) - 1),
            value => value.parse().map_err(|_| malformed())?,
        };

        Ok(Self::new(first, last)?.clamp(page_limit))
    }

    /// Shrink the range so it spans at most `page_limit` items.
    pub fn clamp(self, page_limit: u64) -> Self {
        let page_limit = page_limit.max(1);
        if self.limit() <= page_limit {
            return self;
        }
        Self {
            first: self.first,
            last: self.first.saturating_add(page_limit - 1),
        }
    }

    pub fn first(&self) -> u64 {
        self.first
    }

    pub fn last(&self) -> u64 {
        self.last
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        self.first
    }

    /// Maximum number of records in the page.
    pub fn limit(&self) -> u64 {
        (self.last - self.first).saturating_add(1)
    }

    pub fn respond(&self, length: u64) -> RangeResponse {
        RangeResponse {
            first: self.first,
            last: self.last,
            length,
        }
    }
}

/// Position of a served page within the full match set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RangeResponse {
    /// Index of the first requested item
    pub first: u64,
    /// Index of the last requested item
    pub last: u64,
    /// Total number of matching records
    pub length: u64,
}

impl RangeResponse {
    /// Value for the `Content-Range` header.
    pub fn content_range(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RangeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{RANGE_UNIT} {}-{}/{}",
            self.first, self.last, self.length
        )
    }
}
