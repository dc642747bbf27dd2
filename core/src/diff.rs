//! Structural diffs between two instances of the same shape.
//!
//! # Design
//! Both instances are flattened to dotted-path leaf maps over their encoded
//! trees, then the sorted union of paths is classified. Nested objects
//! recurse into dotted paths; a list field is one opaque leaf compared as a
//! whole value. That asymmetry is intentional: recursing by index would
//! shift every later path when an element is inserted, making diffs noisy
//! for exactly the ordered data lists carry.

use std::collections::BTreeMap;

use crate::instance::Instance;

impl Instance {
    /// Reduce to a single-level map of dotted field paths to leaf values.
    pub fn flatten(&self) -> BTreeMap<String, serde_json::Value> {
        let mut out = BTreeMap::new();
        flatten_tree(&self.encode(), "", &mut out);
        out
    }

    /// Report every dotted path whose leaf value or presence differs.
    ///
    /// A JSON `null` counts as absence, so a field left at a null default on
    /// one side and populated on the other reports as "key not in object N".
    /// Equal paths never appear in the result.
    ///
    /// Two instances of one schema coerce each field to a single JSON type,
    /// so "types differ" only surfaces when diffing instances of different
    /// schemas that share a path name.
    pub fn diff(&self, other: &Instance) -> BTreeMap<String, String> {
        let ours = self.flatten();
        let theirs = other.flatten();
        let mut results = BTreeMap::new();

        for path in ours.keys().chain(theirs.keys()) {
            if results.contains_key(path) {
                continue;
            }
            let a = ours.get(path).filter(|v| !v.is_null());
            let b = theirs.get(path).filter(|v| !v.is_null());
            let explanation = match (a, b) {
                (None, None) => continue,
                (Some(_), None) => "key not in object 2".to_string(),
                (None, Some(_)) => "key not in object 1".to_string(),
                (Some(a), Some(b)) => {
                    if json_type(a) != json_type(b) {
                        format!("types differ: {}, {}", json_type(a), json_type(b))
                    } else if a != b {
                        format!("values differ: {a}, {b}")
                    } else {
                        continue;
                    }
                }
            };
            results.insert(path.clone(), explanation);
        }
        results
    }

    /// Render the diff as stably-ordered, pretty-printed JSON text.
    pub fn human_diff(&self, other: &Instance) -> String {
        // A string-to-string map cannot fail to serialize.
        serde_json::to_string_pretty(&self.diff(other)).unwrap_or_default()
    }
}

fn flatten_tree(
    tree: &serde_json::Value,
    prefix: &str,
    out: &mut BTreeMap<String, serde_json::Value>,
) {
    if let serde_json::Value::Object(map) = tree {
        for (key, value) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match value {
                serde_json::Value::Object(_) => flatten_tree(value, &path, out),
                leaf => {
                    out.insert(path, leaf.clone());
                }
            }
        }
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
