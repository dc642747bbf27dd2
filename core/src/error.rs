//! Error types for the publish object model and API client.
//!
//! # Design
//! `ModelError` covers every way raw input can fail schema validation or
//! coercion; `ApiError` covers the HTTP envelope. The split keeps the object
//! model usable without the client: `set`/`decode` callers only ever see
//! `ModelError`, while `parse_*` callers see `ApiError`, which wraps a
//! `ModelError` when a response body fails schema validation.

use std::fmt;

/// Errors returned by schema validation, coercion and (de)serialization of
/// entity instances.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The field name is not declared in the entity's schema.
    UnknownField { entity: &'static str, field: String },

    /// The value is not a member of a choice field's enumerated set.
    InvalidChoice {
        field: String,
        value: String,
        allowed: &'static [&'static str],
    },

    /// The value cannot be converted to the declared kind.
    TypeCoercion {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// A list field was given something other than a sequence.
    NotAList { field: String, value: String },

    /// Text that should have been JSON failed to parse. Carries the
    /// offending text so callers can log what the server actually sent.
    MalformedJson { detail: String, text: String },

    /// Attempt to instantiate an abstract entity type (empty field table).
    SchemaNotImplemented { entity: &'static str },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownField { entity, field } => {
                write!(f, "no such data member on {entity}: {field}")
            }
            ModelError::InvalidChoice { field, value, allowed } => {
                write!(
                    f,
                    "invalid choice {value} for {field}; valid choices include: {}",
                    allowed.join(", ")
                )
            }
            ModelError::TypeCoercion { field, expected, value } => {
                write!(f, "cannot coerce {value} to {expected} (field: {field})")
            }
            ModelError::NotAList { field, value } => {
                write!(f, "{value} is not a list (field: {field})")
            }
            ModelError::MalformedJson { detail, text } => {
                write!(f, "malformed JSON ({detail}): <<{text}>>")
            }
            ModelError::SchemaNotImplemented { entity } => {
                write!(f, "entity type {entity} has no field descriptor and cannot be instantiated")
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// Errors returned by `PublishClient` parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the requested project does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The response envelope could not be deserialized.
    DeserializationError(String),

    /// The response body parsed as JSON but failed schema validation.
    Model(ModelError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "project not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Model(err) => write!(f, "schema validation failed: {err}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Model(err)
    }
}
