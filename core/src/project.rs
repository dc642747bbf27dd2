//! Entity schemas for the publication domain.
//!
//! A project is the top-level unit of work for the publish API; everything
//! else hangs off it. Each schema is a static field table; string fields
//! without a listed default start at null.

use crate::schema::{ElementKind, FieldDescriptor, FieldKind, Schema};
use crate::value::Value;
use crate::Instance;

pub const PROJECT_TYPES: &[&str] = &["hardcover", "softcover", "ebook"];
pub const ACCESS_TYPES: &[&str] = &["private", "direct", "public"];
pub const ISBN_INTENTS: &[&str] = &["provided", "assigned", "none"];
pub const BINDING_TYPES: &[&str] = &[
    "coil",
    "perfect",
    "saddle-stitch",
    "casewrap-hardcover",
    "jacket-hardcover",
];
pub const TRIM_SIZES: &[&str] = &[
    "US_LETTER",
    "US_TRADE",
    "COMIC",
    "POCKET",
    "LANDSCAPE",
    "SQUARE",
    "SIZE_825x1075",
    "ROYAL",
    "CROWN_QUARTO",
    "A4",
    "LARGE_SQUARE",
    "A5",
    "DIGEST",
];
pub const PAPER_TYPES: &[&str] = &["regular", "publisher-grade"];
pub const PRODUCTS: &[&str] = &["print", "download"];

/// The top-level publication datastructure.
pub static PROJECT: Schema = Schema {
    name: "project",
    fields: &[
        FieldDescriptor { name: "content_id", kind: FieldKind::Int, default: zero_int },
        FieldDescriptor { name: "allow_ratings", kind: FieldKind::Boolean, default: bool_true },
        FieldDescriptor {
            name: "project_type",
            kind: FieldKind::Choice(PROJECT_TYPES),
            default: null,
        },
        FieldDescriptor { name: "program_code", kind: FieldKind::String, default: empty_string },
        FieldDescriptor { name: "access", kind: FieldKind::Choice(ACCESS_TYPES), default: null },
        FieldDescriptor {
            name: "bibliography",
            kind: FieldKind::Nested(&BIBLIOGRAPHY),
            default: fresh_bibliography,
        },
        FieldDescriptor { name: "isbn", kind: FieldKind::Nested(&ISBN), default: fresh_isbn },
        FieldDescriptor {
            name: "physical_attributes",
            kind: FieldKind::Nested(&PHYSICAL_ATTRIBUTES),
            default: fresh_physical_attributes,
        },
        FieldDescriptor { name: "drm", kind: FieldKind::Boolean, default: bool_false },
        FieldDescriptor {
            name: "pricing",
            kind: FieldKind::List(ElementKind::Nested(&PRICING)),
            default: empty_list,
        },
        FieldDescriptor {
            name: "file_info",
            kind: FieldKind::Nested(&FILE_INFO),
            default: fresh_file_info,
        },
    ],
};

/// Representation of an author.
pub static AUTHOR_NAME: Schema = Schema {
    name: "author_name",
    fields: &[
        FieldDescriptor { name: "first_name", kind: FieldKind::String, default: empty_string },
        FieldDescriptor { name: "last_name", kind: FieldKind::String, default: empty_string },
    ],
};

/// Basic information about the book.
pub static BIBLIOGRAPHY: Schema = Schema {
    name: "bibliography",
    fields: &[
        FieldDescriptor { name: "title", kind: FieldKind::String, default: null },
        FieldDescriptor {
            name: "authors",
            kind: FieldKind::List(ElementKind::Nested(&AUTHOR_NAME)),
            default: empty_list,
        },
        FieldDescriptor { name: "category", kind: FieldKind::Int, default: null },
        FieldDescriptor { name: "copyright_year", kind: FieldKind::Int, default: null },
        FieldDescriptor { name: "description", kind: FieldKind::String, default: null },
        FieldDescriptor {
            name: "keywords",
            kind: FieldKind::List(ElementKind::String),
            default: empty_list,
        },
        FieldDescriptor { name: "license", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "copyright_citation", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "publisher", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "edition", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "language", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "country_code", kind: FieldKind::String, default: null },
    ],
};

/// The ISBN to be assigned, or intent to assign one.
pub static ISBN: Schema = Schema {
    name: "isbn",
    fields: &[
        FieldDescriptor { name: "intent", kind: FieldKind::Choice(ISBN_INTENTS), default: null },
        FieldDescriptor { name: "number", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "publisher", kind: FieldKind::String, default: null },
        FieldDescriptor {
            name: "contact_info",
            kind: FieldKind::Nested(&CONTACT_INFO),
            default: fresh_contact_info,
        },
    ],
};

/// Who provided the ISBN.
pub static CONTACT_INFO: Schema = Schema {
    name: "contact_info",
    fields: &[
        FieldDescriptor { name: "name", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "street1", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "street2", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "city", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "state", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "postal_code", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "country", kind: FieldKind::String, default: null },
        FieldDescriptor { name: "phone", kind: FieldKind::String, default: null },
    ],
};

/// Physical attributes of the book, for physical project types.
pub static PHYSICAL_ATTRIBUTES: Schema = Schema {
    name: "physical_attributes",
    fields: &[
        FieldDescriptor {
            name: "binding_type",
            kind: FieldKind::Choice(BINDING_TYPES),
            default: null,
        },
        FieldDescriptor { name: "trim_size", kind: FieldKind::Choice(TRIM_SIZES), default: null },
        FieldDescriptor { name: "paper_type", kind: FieldKind::Choice(PAPER_TYPES), default: null },
        FieldDescriptor { name: "color", kind: FieldKind::Boolean, default: bool_false },
    ],
};

/// Project pricing and revenue distribution.
pub static PRICING: Schema = Schema {
    name: "pricing",
    fields: &[
        FieldDescriptor {
            name: "product",
            kind: FieldKind::Choice(PRODUCTS),
            default: default_product,
        },
        FieldDescriptor {
            name: "currency_code",
            kind: FieldKind::String,
            default: default_currency_code,
        },
        FieldDescriptor { name: "royalty", kind: FieldKind::Currency, default: zero_currency },
        FieldDescriptor { name: "total_price", kind: FieldKind::Currency, default: zero_currency },
    ],
};

/// Uploaded cover and interior files.
pub static FILE_INFO: Schema = Schema {
    name: "file_info",
    fields: &[
        FieldDescriptor {
            name: "cover",
            kind: FieldKind::List(ElementKind::Nested(&FILE_DETAILS)),
            default: empty_list,
        },
        FieldDescriptor {
            name: "contents",
            kind: FieldKind::List(ElementKind::Nested(&FILE_DETAILS)),
            default: empty_list,
        },
    ],
};

/// Mime type and path of one file.
pub static FILE_DETAILS: Schema = Schema {
    name: "file_details",
    fields: &[
        FieldDescriptor {
            name: "mimetype",
            kind: FieldKind::String,
            default: default_mimetype,
        },
        FieldDescriptor { name: "filename", kind: FieldKind::String, default: empty_string },
    ],
};

// Default factories. Each call builds a fresh value, so nested defaults are
// never shared between instances.

fn null() -> Value {
    Value::Null
}

fn empty_string() -> Value {
    Value::String(String::new())
}

fn empty_list() -> Value {
    Value::List(Vec::new())
}

fn zero_int() -> Value {
    Value::Int(0)
}

fn zero_currency() -> Value {
    Value::Float(0.0)
}

fn bool_true() -> Value {
    Value::Bool(true)
}

fn bool_false() -> Value {
    Value::Bool(false)
}

fn default_product() -> Value {
    Value::String("print".to_string())
}

fn default_currency_code() -> Value {
    Value::String("USD".to_string())
}

fn default_mimetype() -> Value {
    Value::String("application/x-pdf".to_string())
}

fn fresh_bibliography() -> Value {
    Value::Entity(Instance::fresh(&BIBLIOGRAPHY))
}

fn fresh_isbn() -> Value {
    Value::Entity(Instance::fresh(&ISBN))
}

fn fresh_contact_info() -> Value {
    Value::Entity(Instance::fresh(&CONTACT_INFO))
}

fn fresh_physical_attributes() -> Value {
    Value::Entity(Instance::fresh(&PHYSICAL_ATTRIBUTES))
}

fn fresh_file_info() -> Value {
    Value::Entity(Instance::fresh(&FILE_INFO))
}
