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

//! API integration tests
//!
//! Drive the full router over the sample data set with `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used)]

mod test_support;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use cities_server::api::build_router;
use cities_server::config::ApiSettings;
use cities_server::ReadPath;
use flate2::read::GzDecoder;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::io::Read;
use std::sync::Arc;
use test_support::{get, get_range, sample_router, send, FailingStore, CA_CITIES};

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|record| record["_id"].as_str().unwrap().to_string())
        .collect()
}

fn failing_router(unavailable: bool) -> axum::Router {
    build_router(
        ReadPath::new(Arc::new(FailingStore { unavailable })),
        ApiSettings::default(),
    )
}

#[tokio::test]
async fn test_state_first_page_without_range() {
    let router = sample_router();
    let response = get(&router, "/api/state/CA").await;

    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.header("content-range"), Some("items 0-19/50"));
    assert_eq!(response.header("accept-ranges"), Some("items"));
    assert_eq!(response.header("accept-encoding"), Some("gzip"));
    assert_eq!(response.header("etag"), Some("\"ca50\""));
    assert_eq!(response.json().as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_state_pages_are_disjoint_and_cover_all() {
    let router = sample_router();
    let mut seen = HashSet::new();

    for (range, content_range, expected) in [
        ("items=0-19", "items 0-19/50", 20),
        ("items=20-39", "items 20-39/50", 20),
        ("items=40-59", "items 40-59/50", 10),
    ] {
        let response = get_range(&router, "/api/state/CA", range).await;
        assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
        assert_eq!(response.header("content-range"), Some(content_range));

        let page = ids(&response.json());
        assert_eq!(page.len(), expected);
        for id in page {
            assert!(seen.insert(id), "record served twice");
        }
    }

    assert_eq!(seen.len(), CA_CITIES);
}

#[tokio::test]
async fn test_state_filter_ignores_case() {
    let router = sample_router();
    let response = get(&router, "/api/state/ca").await;
    assert_eq!(response.header("content-range"), Some("items 0-19/50"));
    assert_eq!(response.header("etag"), Some("\"ca50\""));
}

#[tokio::test]
async fn test_open_ended_range() {
    let router = sample_router();
    let response = get_range(&router, "/api/state/CA", "items=45-").await;

    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.header("content-range"), Some("items 45-64/50"));
    assert_eq!(response.json().as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_wide_range_is_capped_at_page_limit() {
    let router = sample_router();
    let response = get_range(&router, "/api/state/CA", "items=0-99").await;

    assert_eq!(response.header("content-range"), Some("items 0-19/50"));
    assert_eq!(response.json().as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_unknown_state_is_empty_partial_content() {
    let router = sample_router();
    let response = get(&router, "/api/state/ZZ").await;

    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.header("content-range"), Some("items 0-19/0"));
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_range_past_the_end_is_empty() {
    let router = sample_router();
    let response = get_range(&router, "/api/state/NV", "items=10-19").await;

    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.header("content-range"), Some("items 10-19/3"));
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_unsatisfiable_ranges() {
    let router = sample_router();
    for range in ["bytes=0-10", "items=5-2", "items=abc", "items=0-1,4-5"] {
        let response = get_range(&router, "/api/state/CA", range).await;
        assert_eq!(
            response.status,
            StatusCode::RANGE_NOT_SATISFIABLE,
            "range {range}"
        );
        assert_eq!(response.json()["code"], "RANGE_NOT_SATISFIABLE");
    }
}

#[tokio::test]
async fn test_head_answers_without_touching_the_store() {
    let router = failing_router(true);
    let response = send(
        &router,
        Request::builder()
            .method(Method::HEAD)
            .uri("/api/state/CA")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("accept-ranges"), Some("items"));
    assert_eq!(response.header("accept-encoding"), Some("gzip"));
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_if_none_match_current_tag_is_not_modified() {
    let router = sample_router();
    let request = |tag: &str| {
        Request::get("/api/state/CA")
            .header("If-None-Match", tag)
            .body(Body::empty())
            .unwrap()
    };

    let response = send(&router, request("\"ca50\"")).await;
    assert_eq!(response.status, StatusCode::NOT_MODIFIED);
    assert_eq!(response.header("etag"), Some("\"ca50\""));
    assert!(response.body.is_empty());

    let response = send(&router, request("\"ca49\"")).await;
    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
}

#[tokio::test]
async fn test_etag_disabled() {
    let settings = ApiSettings {
        etag: false,
        ..ApiSettings::default()
    };
    let router = build_router(
        ReadPath::new(Arc::new(test_support::sample_store())),
        settings,
    );

    let response = send(
        &router,
        Request::get("/api/state/CA")
            .header("If-None-Match", "\"ca50\"")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert!(response.header("etag").is_none());
}

#[tokio::test]
async fn test_page_is_gzipped_when_accepted() {
    let router = sample_router();
    let response = send(
        &router,
        Request::get("/api/state/CA")
            .header("Accept-Encoding", "gzip")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.header("content-encoding"), Some("gzip"));
    assert_eq!(response.header("content-range"), Some("items 0-19/50"));

    let mut json = String::new();
    GzDecoder::new(&response.body[..])
        .read_to_string(&mut json)
        .unwrap();
    let page: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(page.as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_page_not_gzipped_when_compression_disabled() {
    let settings = ApiSettings {
        compression: false,
        ..ApiSettings::default()
    };
    let router = build_router(
        ReadPath::new(Arc::new(test_support::sample_store())),
        settings,
    );
    let response = send(
        &router,
        Request::get("/api/state/CA")
            .header("Accept-Encoding", "gzip")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert!(response.header("content-encoding").is_none());
    assert_eq!(response.json().as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_count_state() {
    let router = sample_router();
    let response = get(&router, "/api/state/ca/count").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "state": "CA", "cities": 50 }));

    let response = get(&router, "/api/state/zz/count").await;
    assert_eq!(response.json(), json!({ "state": "ZZ", "cities": 0 }));
}

#[tokio::test]
async fn test_states_are_sorted_and_cacheable() {
    let router = sample_router();
    let response = get(&router, "/api/states").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!(["CA", "MA", "NV"]));
    assert_eq!(response.header("cache-control"), Some("public, max-age=30"));
}

#[tokio::test]
async fn test_search_cities_by_name() {
    let router = sample_router();
    let response = get(&router, "/api/cities/spring").await;

    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.header("content-range"), Some("items 0-19/7"));
    assert!(response.header("etag").is_none());

    let page = response.json();
    let names: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["city"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 7);
    assert!(names.iter().all(|name| name.contains("SPRING")));
}

#[tokio::test]
async fn test_search_cities_respects_range() {
    let router = sample_router();
    let response = get_range(&router, "/api/cities/spring", "items=5-9").await;

    assert_eq!(response.header("content-range"), Some("items 5-9/7"));
    assert_eq!(
        ids(&response.json()),
        vec!["00051".to_string(), "00055".to_string()]
    );
}

#[tokio::test]
async fn test_get_city_by_id() {
    let router = sample_router();
    let response = get(&router, "/api/city/00052").await;

    assert_eq!(response.status, StatusCode::OK);
    let city = response.json();
    assert_eq!(city["_id"], "00052");
    assert_eq!(city["city"], "RENO");
    assert_eq!(city["state"], "NV");
}

#[tokio::test]
async fn test_get_missing_city_is_not_found() {
    let router = sample_router();
    let response = get(&router, "/api/city/abc123").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json(),
        json!({ "error": "City 'abc123' not found", "code": "RECORD_NOT_FOUND" })
    );
}

#[tokio::test]
async fn test_create_city_from_json_then_read_back() {
    let router = sample_router();
    let response = send(
        &router,
        Request::post("/api/city")
            .header("Content-Type", "application/json")
            .body(Body::from(
                json!({ "city": "NEW TOWN", "state": "ca", "loc": [-120.5, 37.25], "pop": "1234" })
                    .to_string(),
            ))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.json();
    let id = created["_id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["state"], "CA");
    assert_eq!(created["pop"], 1234);
    assert_eq!(created["loc"], json!([-120.5, 37.25]));
    assert_eq!(response.header("location"), Some(format!("/api/city/{id}").as_str()));

    let fetched = get(&router, &format!("/api/city/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), created);

    let count = get(&router, "/api/state/CA/count").await;
    assert_eq!(count.json()["cities"], 51);
}

#[tokio::test]
async fn test_create_city_from_form() {
    let router = sample_router();
    let response = send(
        &router,
        Request::post("/api/city")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from("city=LAS+VEGAS&state=nv&loc=-115.1%2C36.2&pop=583756"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.json();
    assert_eq!(created["city"], "LAS VEGAS");
    assert_eq!(created["state"], "NV");
    assert_eq!(created["loc"], json!([-115.1, 36.2]));
    assert_eq!(created["pop"], 583756);
}

#[tokio::test]
async fn test_create_city_rejects_invalid_body() {
    let router = sample_router();
    for body in [
        json!({ "state": "CA", "loc": [1, 2], "pop": 1 }),
        json!({ "city": "X", "state": "CA", "loc": [1], "pop": 1 }),
        json!({ "city": "X", "state": "CA", "loc": [1, 2], "pop": "many" }),
    ] {
        let response = send(
            &router,
            Request::post("/api/city")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.json()["code"], "INVALID_REQUEST");
    }

    let response = send(
        &router,
        Request::post("/api/city")
            .header("Content-Type", "text/plain")
            .body(Body::from("city=X"))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // nothing was stored
    let count = get(&router, "/api/state/CA/count").await;
    assert_eq!(count.json()["cities"], 50);
}

#[tokio::test]
async fn test_unreachable_store_is_service_unavailable() {
    let router = failing_router(true);
    for uri in [
        "/api/state/CA",
        "/api/state/CA/count",
        "/api/states",
        "/api/city/00001",
        "/api/cities/spring",
    ] {
        let response = get(&router, uri).await;
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert_eq!(response.json()["code"], "STORE_UNAVAILABLE");
        assert!(response.header("content-range").is_none());
    }
}

#[tokio::test]
async fn test_failed_query_is_internal_error() {
    let router = failing_router(false);
    let response = get(&router, "/api/state/CA").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["code"], "STORE_FAILURE");

    // a failing lookup is not reported as a missing record
    let response = get(&router, "/api/city/00001").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let router = sample_router();
    let response = get(&router, "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
    assert!(body["timestamp"].is_string());
}
