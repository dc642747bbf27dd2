//! Canonical values and the coercion engine.
//!
//! # Design
//! `Value` is the closed set of canonical field values, plus two forms that
//! only appear on the raw side: `Object` (an un-decoded data tree, produced
//! when converting from `serde_json::Value`) and `Null`. Coercion consumes a
//! raw `Value` and either produces a canonical one or a `ModelError`; a
//! canonical field never holds `Object` — nested trees become `Entity`.
//!
//! A `null` raw value coerces to `Null` for every kind. Required-ness is not
//! this layer's concern.

use std::collections::BTreeMap;

use crate::error::ModelError;
use crate::instance::Instance;
use crate::schema::{ElementKind, FieldKind, Schema};

/// A canonical field value, or (for `Object`) a raw data tree awaiting
/// decoding into an `Instance`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    /// Raw key→value tree. Only valid as coercion input; decoding turns it
    /// into `Entity`.
    Object(BTreeMap<String, Value>),
    /// An owned nested entity instance.
    Entity(Instance),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view: integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Instance> {
        match self {
            Value::Entity(instance) => Some(instance),
            _ => None,
        }
    }

    /// Convert to the plain data-tree form, recursively unwrapping nested
    /// instances.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Entity(instance) => instance.encode(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Entity(instance)
    }
}

/// Coerce a raw value to the canonical form for `kind`, or fail with a typed
/// error naming `field`.
pub fn coerce(field: &str, kind: FieldKind, raw: Value) -> Result<Value, ModelError> {
    if raw.is_null() {
        return Ok(Value::Null);
    }
    match kind {
        FieldKind::String => coerce_string(field, raw),
        FieldKind::Int => coerce_int(field, raw),
        FieldKind::Float => Ok(Value::Float(coerce_float(field, "float", raw)?)),
        FieldKind::Currency => {
            let amount = coerce_float(field, "currency", raw)?;
            Ok(Value::Float(round_currency(amount)))
        }
        FieldKind::Boolean => coerce_bool(field, raw),
        FieldKind::Choice(allowed) => coerce_choice(field, allowed, raw),
        FieldKind::List(element) => coerce_list(field, element, raw),
        FieldKind::Nested(schema) => coerce_nested(field, schema, raw),
    }
}

/// Round a monetary amount to 2 decimal places, half away from zero.
///
/// The rounding mode is pinned: `f64::round` rounds halfway cases away from
/// zero, so 0.005 becomes 0.01 and -0.005 becomes -0.01.
fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn coerce_string(field: &str, raw: Value) -> Result<Value, ModelError> {
    match raw {
        Value::String(s) => Ok(Value::String(s)),
        Value::Int(i) => Ok(Value::String(i.to_string())),
        Value::Float(f) => Ok(Value::String(f.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(type_error(field, "string", &other)),
    }
}

fn coerce_int(field: &str, raw: Value) -> Result<Value, ModelError> {
    match raw {
        Value::Int(i) => Ok(Value::Int(i)),
        // Fractional input truncates toward zero.
        Value::Float(f) => Ok(Value::Int(f as i64)),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(Value::Int(i)),
            Err(_) => Err(type_error(field, "int", &Value::String(s))),
        },
        other => Err(type_error(field, "int", &other)),
    }
}

fn coerce_float(field: &str, expected: &'static str, raw: Value) -> Result<f64, ModelError> {
    match raw {
        Value::Float(f) => Ok(f),
        Value::Int(i) => Ok(i as f64),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => Ok(f),
            Err(_) => Err(type_error(field, expected, &Value::String(s))),
        },
        other => Err(type_error(field, expected, &other)),
    }
}

fn coerce_bool(field: &str, raw: Value) -> Result<Value, ModelError> {
    match raw {
        Value::Bool(b) => Ok(Value::Bool(b)),
        Value::Int(0) => Ok(Value::Bool(false)),
        Value::Int(1) => Ok(Value::Bool(true)),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "0" => Ok(Value::Bool(false)),
            _ => Err(type_error(field, "boolean", &Value::String(s))),
        },
        other => Err(type_error(field, "boolean", &other)),
    }
}

fn coerce_choice(
    field: &str,
    allowed: &'static [&'static str],
    raw: Value,
) -> Result<Value, ModelError> {
    match raw {
        Value::String(s) if allowed.contains(&s.as_str()) => Ok(Value::String(s)),
        other => Err(ModelError::InvalidChoice {
            field: field.to_string(),
            value: render(&other),
            allowed,
        }),
    }
}

fn coerce_list(field: &str, element: ElementKind, raw: Value) -> Result<Value, ModelError> {
    let Value::List(items) = raw else {
        return Err(ModelError::NotAList {
            field: field.to_string(),
            value: render(&raw),
        });
    };
    let coerced = items
        .into_iter()
        .map(|item| coerce_element(field, element, item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::List(coerced))
}

fn coerce_element(field: &str, element: ElementKind, raw: Value) -> Result<Value, ModelError> {
    if raw.is_null() {
        return Ok(Value::Null);
    }
    match element {
        ElementKind::String => coerce_string(field, raw),
        ElementKind::Int => coerce_int(field, raw),
        ElementKind::Float => Ok(Value::Float(coerce_float(field, "float", raw)?)),
        ElementKind::Currency => {
            let amount = coerce_float(field, "currency", raw)?;
            Ok(Value::Float(round_currency(amount)))
        }
        ElementKind::Boolean => coerce_bool(field, raw),
        ElementKind::Nested(schema) => coerce_nested(field, schema, raw),
    }
}

fn coerce_nested(
    field: &str,
    schema: &'static Schema,
    raw: Value,
) -> Result<Value, ModelError> {
    match raw {
        // A raw data tree decodes recursively into a fresh instance.
        Value::Object(tree) => {
            let mut instance = Instance::new(schema)?;
            instance.decode_fields(tree)?;
            Ok(Value::Entity(instance))
        }
        // An already-constructed instance passes through, provided it was
        // built from the declared schema.
        Value::Entity(instance) => {
            if std::ptr::eq(instance.schema(), schema) {
                Ok(Value::Entity(instance))
            } else {
                Err(type_error(field, schema.name, &Value::Entity(instance)))
            }
        }
        other => Err(type_error(field, schema.name, &other)),
    }
}

fn type_error(field: &str, expected: &'static str, value: &Value) -> ModelError {
    ModelError::TypeCoercion {
        field: field.to_string(),
        expected,
        value: render(value),
    }
}

/// Render a raw value for an error message.
fn render(value: &Value) -> String {
    match value {
        Value::Entity(instance) => format!("<{} instance>", instance.schema().name),
        other => other.to_json().to_string(),
    }
}
