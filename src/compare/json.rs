use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Top-level key set of a JSON object
pub fn top_level_keys(object: &Map<String, Value>) -> BTreeSet<String> {
    object.keys().cloned().collect()
}

/// True when both objects have the same top-level keys; values and nesting are ignored
pub fn compare_json_keys(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    top_level_keys(a) == top_level_keys(b)
}
