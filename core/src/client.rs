//! Stateless request builder and response parser for the publish API.
//!
//! # Design
//! `PublishClient` holds only a `base_url`; authentication and transport
//! belong to the caller. Each operation is split into a `build_*` method
//! producing an `HttpRequest` and a `parse_*` method consuming an
//! `HttpResponse`. Project bodies travel as the schema layer's encoded JSON;
//! read/update responses are decoded back through the `project` schema, so
//! a server sending undeclared or ill-typed fields surfaces as
//! `ApiError::Model` rather than a silently wrong instance.

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::instance::Instance;
use crate::project::PROJECT;

/// Download URLs for a project's files, as returned by the urls endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadUrls {
    pub contents: String,
    pub cover: String,
}

#[derive(Deserialize)]
struct ContentIdEnvelope {
    content_id: i64,
}

#[derive(Deserialize)]
struct ContentIdsEnvelope {
    content_ids: Vec<i64>,
}

#[derive(Deserialize)]
struct ProjectEnvelope {
    project: serde_json::Value,
}

/// Synchronous, stateless client for the publish API.
#[derive(Debug, Clone)]
pub struct PublishClient {
    base_url: String,
}

impl PublishClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_create_project(&self, project: &Instance) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/projects", self.base_url),
            headers: json_headers(),
            body: Some(project.to_json()),
        }
    }

    pub fn build_read_project(&self, content_id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/projects/{content_id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Full update: the entire encoded project replaces the stored fields.
    pub fn build_update_project(&self, content_id: i64, project: &Instance) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/projects/{content_id}", self.base_url),
            headers: json_headers(),
            body: Some(project.to_json()),
        }
    }

    /// Partial update: only the supplied keys change on the server.
    pub fn build_update_fields(&self, content_id: i64, delta: &serde_json::Value) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/projects/{content_id}", self.base_url),
            headers: json_headers(),
            body: Some(delta.to_string()),
        }
    }

    pub fn build_delete_project(&self, content_id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/projects/{content_id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_projects(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/projects", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_project_urls(&self, content_id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/projects/{content_id}/urls", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Returns the content id the server assigned to the new project.
    pub fn parse_create_project(&self, response: HttpResponse) -> Result<i64, ApiError> {
        check_status(&response, 201)?;
        let envelope: ContentIdEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(envelope.content_id)
    }

    pub fn parse_read_project(&self, response: HttpResponse) -> Result<Instance, ApiError> {
        check_status(&response, 200)?;
        decode_project_envelope(&response.body)
    }

    pub fn parse_update_project(&self, response: HttpResponse) -> Result<Instance, ApiError> {
        check_status(&response, 200)?;
        decode_project_envelope(&response.body)
    }

    pub fn parse_delete_project(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    pub fn parse_list_projects(&self, response: HttpResponse) -> Result<Vec<i64>, ApiError> {
        check_status(&response, 200)?;
        let envelope: ContentIdsEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(envelope.content_ids)
    }

    pub fn parse_project_urls(&self, response: HttpResponse) -> Result<DownloadUrls, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Unwrap the `{"project": {...}}` envelope and decode through the schema.
fn decode_project_envelope(body: &str) -> Result<Instance, ApiError> {
    let envelope: ProjectEnvelope =
        serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    Ok(Instance::from_tree(&PROJECT, &envelope.project)?)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
