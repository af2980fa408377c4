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

//! Cache validators for filtered collections.
//!
//! The tag only depends on the filter value and the total match count, so it
//! is identical for every page of the same result set.

/// Strong entity tag `"<lower-cased filter value><total>"`, quotes included.
pub fn entity_tag(filter_value: &str, total: u64) -> String {
    format!("\"{}{}\"", filter_value.to_lowercase(), total)
}

/// Evaluate an `If-None-Match` header against the current tag.
///
/// Returns `true` when the client's copy is current. Comparison is weak, as
/// required for `If-None-Match`, so `W/` prefixes are ignored.
pub fn if_none_match(header: &str, current: &str) -> bool {
    let current = opaque(current);
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || (!candidate.is_empty() && opaque(candidate) == current)
    })
}

fn opaque(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}
