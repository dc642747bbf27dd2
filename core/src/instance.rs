//! Entity instances: typed field storage behind a static schema.
//!
//! # Design
//! An `Instance` owns one canonical `Value` per declared field and nothing
//! else. Construction fills every field from its default factory; mutation
//! goes through `set`, which validates via the coercion engine; `decode`
//! applies a whole data tree atomically. Instances are plain values — clone,
//! compare and drop them freely. A parent exclusively owns its nested
//! sub-instances and list elements; nothing is shared.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ModelError;
use crate::schema::Schema;
use crate::value::{coerce, Value};

static NULL: Value = Value::Null;

/// A value object holding canonical field values for one entity schema.
#[derive(Debug, Clone)]
pub struct Instance {
    schema: &'static Schema,
    values: BTreeMap<&'static str, Value>,
}

impl Instance {
    /// Construct an instance with every field at its default.
    ///
    /// Fails with `SchemaNotImplemented` if `schema` is an abstract base
    /// (empty field table).
    pub fn new(schema: &'static Schema) -> Result<Self, ModelError> {
        if schema.is_abstract() {
            return Err(ModelError::SchemaNotImplemented { entity: schema.name });
        }
        Ok(Self::fresh(schema))
    }

    /// Defaults-only constructor for schemas already known to be concrete.
    pub(crate) fn fresh(schema: &'static Schema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| (f.name, (f.default)()))
            .collect();
        Self { schema, values }
    }

    /// Construct from a data tree: defaults first, then `decode`.
    pub fn from_tree(schema: &'static Schema, tree: &serde_json::Value) -> Result<Self, ModelError> {
        let mut instance = Self::new(schema)?;
        instance.decode(tree)?;
        Ok(instance)
    }

    /// Construct from JSON text. Malformed text fails with `MalformedJson`
    /// carrying the offending input.
    pub fn from_json(schema: &'static Schema, text: &str) -> Result<Self, ModelError> {
        let tree: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ModelError::MalformedJson {
                detail: e.to_string(),
                text: text.to_string(),
            })?;
        Self::from_tree(schema, &tree)
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Read a field's canonical value.
    pub fn get(&self, field: &str) -> Result<&Value, ModelError> {
        let descriptor = self.schema.field(field).ok_or_else(|| ModelError::UnknownField {
            entity: self.schema.name,
            field: field.to_string(),
        })?;
        Ok(self.values.get(descriptor.name).unwrap_or(&NULL))
    }

    /// Mutable access to a nested sub-instance, for in-place edits that stay
    /// behind the typed `set` API.
    pub fn entity_mut(&mut self, field: &str) -> Result<&mut Instance, ModelError> {
        let descriptor = self.schema.field(field).ok_or_else(|| ModelError::UnknownField {
            entity: self.schema.name,
            field: field.to_string(),
        })?;
        match self.values.get_mut(descriptor.name) {
            Some(Value::Entity(instance)) => Ok(instance),
            _ => Err(ModelError::TypeCoercion {
                field: descriptor.name.to_string(),
                expected: "entity",
                value: format!("{} field", descriptor.kind.name()),
            }),
        }
    }

    /// Coerce `raw` and store it. The instance is unchanged on failure.
    pub fn set(&mut self, field: &str, raw: impl Into<Value>) -> Result<(), ModelError> {
        let descriptor = self.schema.field(field).ok_or_else(|| ModelError::UnknownField {
            entity: self.schema.name,
            field: field.to_string(),
        })?;
        let value = coerce(descriptor.name, descriptor.kind, raw.into())?;
        self.values.insert(descriptor.name, value);
        Ok(())
    }

    /// Apply every key of a data tree through `set`. Unknown keys are always
    /// rejected; fields absent from the tree keep their current values.
    ///
    /// Decoding is atomic: every supplied key is validated and coerced
    /// before any mutation is committed, so a failure leaves the instance
    /// exactly as it was.
    pub fn decode(&mut self, tree: &serde_json::Value) -> Result<(), ModelError> {
        match Value::from(tree.clone()) {
            Value::Object(fields) => self.decode_fields(fields),
            other => Err(ModelError::TypeCoercion {
                field: self.schema.name.to_string(),
                expected: "object",
                value: other.to_json().to_string(),
            }),
        }
    }

    pub(crate) fn decode_fields(
        &mut self,
        fields: BTreeMap<String, Value>,
    ) -> Result<(), ModelError> {
        let mut staged = Vec::with_capacity(fields.len());
        for (key, raw) in fields {
            let descriptor = self.schema.field(&key).ok_or_else(|| ModelError::UnknownField {
                entity: self.schema.name,
                field: key.clone(),
            })?;
            staged.push((descriptor.name, coerce(descriptor.name, descriptor.kind, raw)?));
        }
        for (name, value) in staged {
            self.values.insert(name, value);
        }
        Ok(())
    }

    /// Encode to the plain data-tree form, fields in declaration order,
    /// nested instances and list elements recursively unwrapped.
    pub fn encode(&self) -> serde_json::Value {
        let mut out = serde_json::Map::with_capacity(self.schema.fields.len());
        for descriptor in self.schema.fields {
            let value = self.values.get(descriptor.name).unwrap_or(&NULL);
            out.insert(descriptor.name.to_string(), value.to_json());
        }
        serde_json::Value::Object(out)
    }

    /// Encode to compact JSON text.
    pub fn to_json(&self) -> String {
        self.encode().to_string()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.values == other.values
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
