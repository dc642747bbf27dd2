//! Schema-driven object model and synchronous client core for the publish
//! API.
//!
//! # Overview
//! Entity types are described by static `Schema` tables; `Instance` values
//! carry canonical typed fields, built from defaults and mutated only
//! through the coercion engine. The codec walks nested instance graphs to
//! and from JSON trees, and the diff engine reports dotted-path differences
//! between two instances of the same shape.
//!
//! # Design
//! - Schemas are immutable statics, shared freely; instances are plain
//!   mutable values with exclusive ownership of their sub-instances.
//! - Every validation failure is an explicit `ModelError` at the point of
//!   `set`/`decode`; nothing is retried or swallowed here.
//! - `PublishClient` follows the host-does-IO pattern: it builds
//!   `HttpRequest` values and parses `HttpResponse` values without touching
//!   the network, so the caller owns transport, auth and retries.

pub mod client;
pub mod diff;
pub mod error;
pub mod http;
pub mod instance;
pub mod project;
pub mod schema;
pub mod value;

pub use client::{DownloadUrls, PublishClient};
pub use error::{ApiError, ModelError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use instance::Instance;
pub use schema::{ElementKind, FieldDescriptor, FieldKind, Schema};
pub use value::{coerce, Value};
