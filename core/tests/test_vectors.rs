//! Verify build/parse methods against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Request and response bodies are stored as JSON
//! values, and parsed results are compared as JSON, so field ordering never
//! causes false negatives.

use publish_core::project::PROJECT;
use publish_core::{ApiError, HttpMethod, HttpResponse, Instance, PublishClient};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> PublishClient {
    PublishClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

/// Vector bodies are JSON values; string bodies pass through verbatim.
fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    let body = match &sim["body"] {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body,
    }
}

fn assert_request_matches(name: &str, req: &publish_core::HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );
    if let Some(expected_headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = expected_headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let pair = h.as_array().unwrap();
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }
    if let Some(expected_body) = expected.get("body") {
        let body: serde_json::Value =
            serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(&body, expected_body, "{name}: body");
    } else {
        assert!(req.body.is_none(), "{name}: body should be None");
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let project = Instance::from_tree(&PROJECT, &case["input"]).unwrap();

        let req = c.build_create_project(&project);
        assert_request_matches(name, &req, &case["expected_request"]);

        let content_id = c.parse_create_project(simulated_response(case)).unwrap();
        assert_eq!(content_id, case["expected_result"].as_i64().unwrap(), "{name}: result");
    }
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[test]
fn read_test_vectors() {
    let raw = include_str!("../../test-vectors/read.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        let req = c.build_read_project(id);
        assert_request_matches(name, &req, &case["expected_request"]);

        let result = c.parse_read_project(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let fetched = result.unwrap();
            assert_eq!(fetched.encode(), case["expected_result"], "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        // Cases carry either a full project body or a partial field delta.
        let req = if let Some(input_project) = case.get("input_project") {
            let project = Instance::from_tree(&PROJECT, input_project).unwrap();
            c.build_update_project(id, &project)
        } else {
            c.build_update_fields(id, &case["input"])
        };
        assert_request_matches(name, &req, &case["expected_request"]);

        let result = c.parse_update_project(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let updated = result.unwrap();
            let tree = updated.encode();
            for (field, expected) in case["expected_fields"].as_object().unwrap() {
                assert_eq!(&tree[field.as_str()], expected, "{name}: field {field}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        let req = c.build_delete_project(id);
        assert_request_matches(name, &req, &case["expected_request"]);

        let result = c.parse_delete_project(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_projects();
        assert_request_matches(name, &req, &case["expected_request"]);

        let ids = c.parse_list_projects(simulated_response(case)).unwrap();
        let expected: Vec<i64> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(ids, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Urls
// ---------------------------------------------------------------------------

#[test]
fn urls_test_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        let req = c.build_project_urls(id);
        assert_request_matches(name, &req, &case["expected_request"]);

        let result = c.parse_project_urls(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let urls = result.unwrap();
            assert_eq!(urls.contents, case["expected_result"]["contents"].as_str().unwrap(), "{name}");
            assert_eq!(urls.cover, case["expected_result"]["cover"].as_str().unwrap(), "{name}");
        }
    }
}
