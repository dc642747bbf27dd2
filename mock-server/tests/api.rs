use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_projects_empty() {
    let app = app();
    let resp = app.oneshot(get_request("/projects")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body, json!({"content_ids": []}));
}

// --- create ---

#[tokio::test]
async fn create_project_returns_201_and_content_id() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/projects",
            r#"{"project_type": "ebook", "drm": false}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert!(body["content_id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn create_project_rejects_non_object_body() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/projects", "[1, 2, 3]"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- read ---

#[tokio::test]
async fn read_project_not_found() {
    let app = app();
    let resp = app.oneshot(get_request("/projects/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn read_project_bad_id_returns_400() {
    let app = app();
    let resp = app.oneshot(get_request("/projects/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_project_not_found() {
    let app = app();
    let resp = app
        .oneshot(json_request("PUT", "/projects/999", r#"{"drm": true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_project_not_found() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/projects/999")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- urls ---

#[tokio::test]
async fn project_urls_not_found() {
    let app = app();
    let resp = app.oneshot(get_request("/projects/999/urls")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn project_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/projects",
            r#"{"project_type": "hardcover", "bibliography": {"title": "Jackets"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let id = created["content_id"].as_i64().unwrap();

    // list contains the new id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/projects"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body_json(resp).await;
    assert_eq!(listed["content_ids"], json!([id]));

    // read returns the stored document with content_id injected
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/projects/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = body_json(resp).await;
    assert_eq!(fetched["project"]["content_id"], json!(id));
    assert_eq!(fetched["project"]["bibliography"]["title"], "Jackets");

    // partial update merges top-level keys and preserves the rest
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/projects/{id}"),
            r#"{"drm": true, "content_id": 12345}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["project"]["drm"], json!(true));
    assert_eq!(updated["project"]["project_type"], "hardcover");
    // content_id cannot be reassigned by a delta
    assert_eq!(updated["project"]["content_id"], json!(id));

    // urls
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/projects/{id}/urls")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let urls = body_json(resp).await;
    assert_eq!(urls["contents"], format!("http://files.invalid/{id}/contents.pdf"));
    assert_eq!(urls["cover"], format!("http://files.invalid/{id}/cover.pdf"));

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/projects/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // read after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/projects/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list is empty again
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/projects"))
        .await
        .unwrap();
    let listed = body_json(resp).await;
    assert_eq!(listed["content_ids"], json!([]));
}
