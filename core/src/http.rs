//! Plain-data HTTP types for the host-does-IO pattern.
//!
//! # Design
//! The core never opens a socket. `PublishClient::build_*` methods emit an
//! `HttpRequest` value; the host executes it however it likes (ureq in the
//! integration tests) and feeds the resulting `HttpResponse` back into the
//! matching `parse_*` method. Requests and responses are owned plain data,
//! so the core stays deterministic and trivially testable.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data, ready for the host to execute.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response captured by the host after executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
