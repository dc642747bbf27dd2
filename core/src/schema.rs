//! Static schema descriptors for entity types.
//!
//! # Design
//! A `Schema` is a compile-time table of field descriptors, one static per
//! entity type (see `project`). Field kinds form a closed tagged union, so
//! restrictions that the original wire format expressed loosely (a choice
//! set, a list element kind, a nested entity reference) each have their own
//! variant. Descriptors are immutable and shared freely; instances only hold
//! a `&'static Schema` back-reference.
//!
//! Defaults are zero-argument factory functions invoked fresh at every
//! instance construction, so nested default sub-instances are never aliased
//! between parents.

use crate::value::Value;

/// The immutable field table for one entity type.
///
/// A schema with an empty field table is an abstract base: it cannot be
/// instantiated and exists only to be referenced.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl Schema {
    /// Look up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True if this schema declares no fields and must not be instantiated.
    pub fn is_abstract(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Declaration of a single field: its name, kind and default factory.
#[derive(Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: fn() -> Value,
}

/// The closed set of field kinds.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Int,
    Float,
    /// Double rounded to exactly 2 decimal places on coercion.
    Currency,
    Boolean,
    /// Exactly one of the enumerated values.
    Choice(&'static [&'static str]),
    /// Ordered sequence; every element is coerced to the element kind.
    List(ElementKind),
    /// An owned sub-instance of the referenced entity type.
    Nested(&'static Schema),
}

/// Element kinds permitted inside a `List` field. Lists of lists and lists
/// of choices are not representable.
#[derive(Debug, Clone, Copy)]
pub enum ElementKind {
    String,
    Int,
    Float,
    Currency,
    Boolean,
    Nested(&'static Schema),
}

impl FieldKind {
    /// Human-readable kind name used in coercion error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Currency => "currency",
            FieldKind::Boolean => "boolean",
            FieldKind::Choice(_) => "choice",
            FieldKind::List(_) => "list",
            FieldKind::Nested(schema) => schema.name,
        }
    }
}
