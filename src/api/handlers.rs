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

//! HTTP handlers for the cities API.

use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Extension, Path};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info, warn};

use super::error::ErrorResponse;
use super::responses::{CitySchema, CountResponse, HealthResponse};
use super::validation::{NewCity, ValidationError};
use crate::config::ApiSettings;
use crate::pagination::{entity_tag, if_none_match, Page, RangeError, RangeRequest, ReadPath, RANGE_UNIT};
use crate::store::{Record, StoreError};

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const GZIP: &str = "gzip";

/// Check server health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check(Extension(read_path): Extension<ReadPath>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        store: read_path.store().kind().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List the distinct state codes, sorted ascending
#[utoipa::path(
    get,
    path = "/api/states",
    responses(
        (status = 200, description = "Sorted state codes", body = [String],
            headers(("Cache-Control" = String, description = "Public, cacheable list"))),
        (status = 500, description = "Record store failure", body = ErrorResponse),
        (status = 503, description = "Record store unavailable", body = ErrorResponse),
    ),
    tag = "States"
)]
pub async fn list_states(
    Extension(read_path): Extension<ReadPath>,
    Extension(settings): Extension<Arc<ApiSettings>>,
) -> Result<Response, ErrorResponse> {
    let states = read_path.distinct(&settings.state_filter.field).await?;
    let cache_control = format!("public, max-age={}", settings.states_max_age_secs);
    Ok(([(header::CACHE_CONTROL, cache_control)], Json(states)).into_response())
}

/// Advertise range support for a state without querying it
#[utoipa::path(
    head,
    path = "/api/state/{state}",
    params(("state" = String, Path, description = "State code")),
    responses(
        (status = 200, description = "Range pagination is supported",
            headers(
                ("Accept-Ranges" = String, description = "Always `items`"),
                ("Accept-Encoding" = String, description = "Always `gzip`"),
            )),
    ),
    tag = "States"
)]
pub async fn head_state(Path(_state): Path<String>) -> impl IntoResponse {
    (StatusCode::OK, range_support_headers())
}

/// Fetch one page of the cities in a state
#[utoipa::path(
    get,
    path = "/api/state/{state}",
    params(
        ("state" = String, Path, description = "State code, matched case-insensitively"),
        ("Range" = Option<String>, Header, description = "`items=<first>-<last>` or `items=<first>-`"),
        ("If-None-Match" = Option<String>, Header, description = "Entity tag from a previous response"),
    ),
    responses(
        (status = 206, description = "Requested page", body = [CitySchema],
            headers(
                ("Content-Range" = String, description = "`items <first>-<last>/<total>`"),
                ("Accept-Ranges" = String, description = "Always `items`"),
                ("ETag" = String, description = "`\"<state><total>\"` when enabled"),
            )),
        (status = 304, description = "The client's copy is current"),
        (status = 416, description = "Malformed or unsupported range", body = ErrorResponse),
        (status = 500, description = "Record store failure", body = ErrorResponse),
        (status = 503, description = "Record store unavailable", body = ErrorResponse),
    ),
    tag = "States"
)]
pub async fn get_state_page(
    Extension(read_path): Extension<ReadPath>,
    Extension(settings): Extension<Arc<ApiSettings>>,
    Path(state): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ErrorResponse> {
    let range = requested_range(&headers, settings.page_limit)?;
    let filter = settings.state_filter.filter(state.as_str());

    if settings.etag {
        if let Some(candidates) = headers
            .get(header::IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok())
        {
            let current = entity_tag(&state, read_path.count(&filter).await?);
            if if_none_match(candidates, &current) {
                debug!("State '{state}' unchanged ({current})");
                let mut response = StatusCode::NOT_MODIFIED.into_response();
                if let Ok(value) = HeaderValue::from_str(&current) {
                    response.headers_mut().insert(header::ETAG, value);
                }
                return Ok(response);
            }
        }
    }

    let page = read_path.fetch_page(&filter, range).await?;
    let etag = settings
        .etag
        .then(|| entity_tag(&state, page.range.length));
    page_response(&headers, &settings, page, etag)
}

/// Count the cities in a state
#[utoipa::path(
    get,
    path = "/api/state/{state}/count",
    params(("state" = String, Path, description = "State code")),
    responses(
        (status = 200, description = "Number of cities", body = CountResponse),
        (status = 500, description = "Record store failure", body = ErrorResponse),
        (status = 503, description = "Record store unavailable", body = ErrorResponse),
    ),
    tag = "States"
)]
pub async fn count_state(
    Extension(read_path): Extension<ReadPath>,
    Extension(settings): Extension<Arc<ApiSettings>>,
    Path(state): Path<String>,
) -> Result<Json<CountResponse>, ErrorResponse> {
    let cities = read_path
        .count(&settings.state_filter.filter(state.as_str()))
        .await?;
    Ok(Json(CountResponse {
        state: state.to_uppercase(),
        cities,
    }))
}

/// Fetch one page of the cities whose name contains a string
#[utoipa::path(
    get,
    path = "/api/cities/{name}",
    params(
        ("name" = String, Path, description = "Part of the city name, matched case-insensitively"),
        ("Range" = Option<String>, Header, description = "`items=<first>-<last>` or `items=<first>-`"),
    ),
    responses(
        (status = 206, description = "Requested page", body = [CitySchema],
            headers(("Content-Range" = String, description = "`items <first>-<last>/<total>`"))),
        (status = 416, description = "Malformed or unsupported range", body = ErrorResponse),
        (status = 500, description = "Record store failure", body = ErrorResponse),
        (status = 503, description = "Record store unavailable", body = ErrorResponse),
    ),
    tag = "Cities"
)]
pub async fn search_cities(
    Extension(read_path): Extension<ReadPath>,
    Extension(settings): Extension<Arc<ApiSettings>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ErrorResponse> {
    let range = requested_range(&headers, settings.page_limit)?;
    let page = read_path
        .fetch_page(&settings.name_filter.filter(name), range)
        .await?;
    page_response(&headers, &settings, page, None)
}

/// Get a single city by identifier
#[utoipa::path(
    get,
    path = "/api/city/{cityId}",
    params(("cityId" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "The city", body = CitySchema),
        (status = 404, description = "No city with this identifier", body = ErrorResponse),
        (status = 500, description = "Record store failure", body = ErrorResponse),
        (status = 503, description = "Record store unavailable", body = ErrorResponse),
    ),
    tag = "Cities"
)]
pub async fn get_city(
    Extension(read_path): Extension<ReadPath>,
    Path(city_id): Path<String>,
) -> Result<Json<Record>, ErrorResponse> {
    Ok(Json(read_path.fetch_by_id(&city_id).await?))
}

/// Add a city
#[utoipa::path(
    post,
    path = "/api/city",
    request_body(
        content = NewCity,
        description = "JSON or form-encoded city",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "City created", body = CitySchema,
            headers(("Location" = String, description = "URL of the new city"))),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 500, description = "Record store failure", body = ErrorResponse),
        (status = 503, description = "Record store unavailable", body = ErrorResponse),
    ),
    tag = "Cities"
)]
pub async fn create_city(
    Extension(read_path): Extension<ReadPath>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ErrorResponse> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(JSON_CONTENT_TYPE);
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let city = match mime.as_str() {
        JSON_CONTENT_TYPE | "" => NewCity::from_json(&body)?,
        FORM_CONTENT_TYPE => NewCity::from_form(&body)?,
        other => return Err(ValidationError::UnsupportedContentType(other.to_string()).into()),
    };

    let record = read_path.insert(city.into_record()).await?;
    info!("Added city '{}'", record.id);

    let location = format!("/api/city/{}", record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    )
        .into_response())
}

fn range_support_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static(RANGE_UNIT));
    headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(GZIP));
    headers
}

fn requested_range(headers: &HeaderMap, page_limit: u64) -> Result<RangeRequest, RangeError> {
    let value = headers
        .get(header::RANGE)
        .map(|v| {
            v.to_str()
                .map_err(|_| RangeError::Malformed(String::from_utf8_lossy(v.as_bytes()).into_owned()))
        })
        .transpose()?;
    RangeRequest::from_header(value, page_limit)
}

/// 206 response for a page.
///
/// Compressed here rather than by the compression layer, which leaves any
/// response carrying `Content-Range` untouched.
fn page_response(
    request: &HeaderMap,
    settings: &ApiSettings,
    page: Page,
    etag: Option<String>,
) -> Result<Response, ErrorResponse> {
    let body = serde_json::to_vec(&page.records).map_err(StoreError::from)?;

    let mut headers = range_support_headers();
    if let Ok(value) = HeaderValue::from_str(&page.range.content_range()) {
        headers.insert(header::CONTENT_RANGE, value);
    }
    if let Some(tag) = etag {
        match HeaderValue::from_str(&tag) {
            Ok(value) => {
                headers.insert(header::ETAG, value);
            }
            Err(_) => debug!("Skipping ETag {tag}: not a valid header value"),
        }
    }

    let body = if settings.compression && accepts_gzip(request) {
        match gzip(&body) {
            Ok(compressed) => {
                headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static(GZIP));
                headers.insert(header::VARY, HeaderValue::from_static("accept-encoding"));
                compressed
            }
            Err(e) => {
                warn!("Failed to gzip page, sending it uncompressed: {e}");
                body
            }
        }
    } else {
        body
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::PARTIAL_CONTENT;
    *response.headers_mut() = headers;
    Ok(response)
}

/// `true` when `Accept-Encoding` lists gzip with a non-zero quality.
fn accepts_gzip(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|coding| {
            let mut params = coding.split(';').map(str::trim);
            let name = params.next().unwrap_or_default();
            let rejected = params.any(|p| {
                p.strip_prefix("q=")
                    .and_then(|q| q.parse::<f32>().ok())
                    .is_some_and(|q| q == 0.0)
            });
            (name.eq_ignore_ascii_case(GZIP) || name == "*") && !rejected
        })
}

fn gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}
