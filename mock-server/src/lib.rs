//! In-memory mock of the publish API.
//!
//! Stores raw JSON project documents keyed by sequential content ids. The
//! server deliberately does not depend on publish-core: it treats projects
//! as opaque objects, and the core's integration tests catch any contract
//! drift between the two crates.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Default)]
pub struct Store {
    projects: RwLock<HashMap<i64, Value>>,
    next_id: AtomicI64,
}

pub type Db = Arc<Store>;

pub fn app() -> Router {
    let db: Db = Arc::new(Store {
        projects: RwLock::new(HashMap::new()),
        next_id: AtomicI64::new(1),
    });
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(read_project).put(update_project).delete(delete_project),
        )
        .route("/projects/{id}/urls", get(project_urls))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_project(
    State(db): State<Db>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let Value::Object(mut project) = body else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    let id = db.next_id.fetch_add(1, Ordering::Relaxed);
    project.insert("content_id".to_string(), json!(id));
    db.projects.write().await.insert(id, Value::Object(project));
    Ok((StatusCode::CREATED, Json(json!({ "content_id": id }))))
}

async fn list_projects(State(db): State<Db>) -> Json<Value> {
    let mut ids: Vec<i64> = db.projects.read().await.keys().copied().collect();
    ids.sort_unstable();
    Json(json!({ "content_ids": ids }))
}

async fn read_project(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let projects = db.projects.read().await;
    projects
        .get(&id)
        .map(|project| Json(json!({ "project": project })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_project(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let Value::Object(delta) = body else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    let mut projects = db.projects.write().await;
    let Some(Value::Object(current)) = projects.get_mut(&id) else {
        return Err(StatusCode::NOT_FOUND);
    };
    for (key, value) in delta {
        current.insert(key, value);
    }
    // The stored key always wins over anything the delta claimed.
    current.insert("content_id".to_string(), json!(id));
    Ok(Json(json!({ "project": current.clone() })))
}

async fn delete_project(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut projects = db.projects.write().await;
    projects
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn project_urls(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let projects = db.projects.read().await;
    if !projects.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "contents": format!("http://files.invalid/{id}/contents.pdf"),
        "cover": format!("http://files.invalid/{id}/cover.pdf"),
    })))
}
