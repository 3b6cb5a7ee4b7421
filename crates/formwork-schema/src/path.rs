//! Dotted-path addressing over nested JSON values.
//!
//! Paths are property names joined by `.`. Empty segments produced by
//! leading, trailing, or doubled dots are filtered out before traversal,
//! so `"a..b"`, `".a.b"`, and `"a.b."` all address the same location as
//! `"a.b"`.

use serde_json::{Map, Value};

/// Splits a dotted path into its non-empty segments.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|segment| !segment.is_empty())
}

/// Joins a base path and a child name with a dot.
///
/// An empty base yields the bare name, keeping root-level paths flat.
pub fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}.{name}")
    }
}

/// Reads the value at a dotted path.
///
/// Objects are descended by key, arrays by numeric index. Returns `None`
/// for an empty or all-empty-segments path, and for any path that does
/// not resolve.
///
/// # Example
///
/// ```
/// use formwork_schema::get_nested_value;
/// use serde_json::json;
///
/// let answers = json!({"person": {"name": "Ada"}});
/// let name = get_nested_value(&answers, "person.name");
/// assert_eq!(name, Some(&json!("Ada")));
/// ```
pub fn get_nested_value<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let segments: Vec<&str> = split_path(path).collect();
    if segments.is_empty() {
        return None;
    }

    let mut current = root;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Writes a value at a dotted path, returning a new root.
///
/// The input is never mutated: the spine down to the leaf is cloned and
/// sibling branches are carried over unchanged, so a reader holding the
/// old root keeps a consistent snapshot. Missing intermediates are
/// created as fresh mappings; an existing intermediate that is neither a
/// mapping nor an array is overwritten with a fresh mapping. Arrays
/// encountered on the spine are carried over as-is and not traversed
/// further. An empty or all-empty-segments path is a no-op and returns a
/// copy of the input.
#[must_use]
pub fn set_nested_value(root: &Value, path: &str, value: Value) -> Value {
    let segments: Vec<&str> = split_path(path).collect();
    if segments.is_empty() {
        return root.clone();
    }

    let base = match root {
        Value::Object(map) => set_in(map, &segments, value),
        _ => set_in(&Map::new(), &segments, value),
    };
    Value::Object(base)
}

fn set_in(map: &Map<String, Value>, segments: &[&str], value: Value) -> Map<String, Value> {
    let mut out = map.clone();
    match segments {
        [] => out,
        [last] => {
            out.insert((*last).to_string(), value);
            out
        }
        [head, rest @ ..] => {
            let child = match out.get(*head) {
                Some(Value::Object(inner)) => Value::Object(set_in(inner, rest, value)),
                // Arrays on the spine stay intact; the write stops here.
                Some(Value::Array(items)) => Value::Array(items.clone()),
                _ => Value::Object(set_in(&Map::new(), rest, value)),
            };
            out.insert((*head).to_string(), child);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_simple_path() {
        let root = json!({"a": {"b": 1}});
        assert_eq!(get_nested_value(&root, "a.b"), Some(&json!(1)));
        assert_eq!(get_nested_value(&root, "a"), Some(&json!({"b": 1})));
    }

    #[test]
    fn test_get_missing_path() {
        let root = json!({"a": {"b": 1}});
        assert_eq!(get_nested_value(&root, "a.c"), None);
        assert_eq!(get_nested_value(&root, "x.y.z"), None);
    }

    #[test]
    fn test_get_through_leaf() {
        let root = json!({"a": "scalar"});
        assert_eq!(get_nested_value(&root, "a.b"), None);
    }

    #[test]
    fn test_get_array_index() {
        let root = json!({"tags": ["red", "blue"]});
        assert_eq!(get_nested_value(&root, "tags.1"), Some(&json!("blue")));
        assert_eq!(get_nested_value(&root, "tags.9"), None);
        assert_eq!(get_nested_value(&root, "tags.first"), None);
    }

    #[test]
    fn test_empty_path_is_undefined() {
        let root = json!({"a": 1});
        assert_eq!(get_nested_value(&root, ""), None);
        assert_eq!(get_nested_value(&root, "..."), None);
    }

    #[test]
    fn test_segment_filtering_equivalence() {
        let root = json!({"a": {"b": 7}});
        let plain = get_nested_value(&root, "a.b");
        assert_eq!(get_nested_value(&root, "a..b"), plain);
        assert_eq!(get_nested_value(&root, ".a.b."), plain);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let root = json!({});
        let updated = set_nested_value(&root, "a.b.c", json!(42));
        assert_eq!(get_nested_value(&updated, "a.b.c"), Some(&json!(42)));
    }

    #[test]
    fn test_set_preserves_siblings_and_input() {
        let root = json!({"a": {"b": 1, "c": 2}, "d": 3});
        let updated = set_nested_value(&root, "a.b", json!(99));
        assert_eq!(get_nested_value(&updated, "a.b"), Some(&json!(99)));
        assert_eq!(get_nested_value(&updated, "a.c"), Some(&json!(2)));
        assert_eq!(get_nested_value(&updated, "d"), Some(&json!(3)));
        // the original root is untouched
        assert_eq!(get_nested_value(&root, "a.b"), Some(&json!(1)));
    }

    #[test]
    fn test_set_empty_path_is_noop() {
        let root = json!({"a": 1});
        assert_eq!(set_nested_value(&root, "", json!(2)), root);
        assert_eq!(set_nested_value(&root, "..", json!(2)), root);
    }

    #[test]
    fn test_set_overwrites_scalar_intermediate() {
        let root = json!({"a": "leaf"});
        let updated = set_nested_value(&root, "a.b", json!(true));
        assert_eq!(get_nested_value(&updated, "a.b"), Some(&json!(true)));
    }

    #[test]
    fn test_set_does_not_traverse_arrays() {
        let root = json!({"a": [1, 2, 3]});
        let updated = set_nested_value(&root, "a.b", json!("x"));
        assert_eq!(get_nested_value(&updated, "a"), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn test_set_on_non_object_root() {
        let root = json!("scalar");
        let updated = set_nested_value(&root, "a", json!(1));
        assert_eq!(get_nested_value(&updated, "a"), Some(&json!(1)));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "name"), "name");
        assert_eq!(join_path("person", "name"), "person.name");
    }
}
