// Dotted-path field extraction over parsed reply trees.
//
// Reply field names contain dashes and namespace prefixes, so paths are
// plain strings split on `.` rather than anything fancier. All helpers
// are total: a missing or differently-shaped node yields `None`, which
// the record builders in `models` surface as optional fields.

use serde_json::Value;

/// Walk `path` (dot-separated object keys) from `tree`.
pub fn get<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = tree;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

/// Text content of the node at `path`: either a bare string leaf, or the
/// `#text` entry of an element that also carries attributes.
pub fn text(tree: &Value, path: &str) -> Option<String> {
    match get(tree, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => match map.get("#text") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Text content parsed as a signed integer. Unparsable text is `None`.
pub fn int(tree: &Value, path: &str) -> Option<i64> {
    text(tree, path)?.parse().ok()
}

/// Text content parsed as a float. Unparsable text is `None`.
pub fn float(tree: &Value, path: &str) -> Option<f64> {
    text(tree, path)?.parse().ok()
}

/// The controller encodes booleans as the literal strings `true`/`false`;
/// anything else present is treated as `false`.
pub fn boolean(tree: &Value, path: &str) -> Option<bool> {
    text(tree, path).map(|s| s == "true")
}

/// The node at `path` as a list: an array as-is, a single element as a
/// one-item list, an absent or empty node as nothing. Replies collapse
/// one-element lists into bare objects, so every list-shaped field goes
/// through here.
pub fn list(tree: &Value, path: &str) -> Vec<Value> {
    match get(tree, path) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "rpc-reply": {
                "data": {
                    "object": {
                        "@name": "ont-1",
                        "admin": "enabled",
                        "us-sdber-rate": "5",
                        "battery-present": "false",
                        "opt-sig-lvl": "-20.25",
                        "subscr-id": {"@lang": "en", "#text": "unit 4"}
                    }
                }
            }
        })
    }

    #[test]
    fn walks_dotted_paths_including_attribute_keys() {
        let tree = sample();
        assert_eq!(
            text(&tree, "rpc-reply.data.object.@name").as_deref(),
            Some("ont-1")
        );
        assert_eq!(
            text(&tree, "rpc-reply.data.object.admin").as_deref(),
            Some("enabled")
        );
    }

    #[test]
    fn text_prefers_hash_text_on_attributed_elements() {
        let tree = sample();
        assert_eq!(
            text(&tree, "rpc-reply.data.object.subscr-id").as_deref(),
            Some("unit 4")
        );
    }

    #[test]
    fn scalar_coercions() {
        let tree = sample();
        assert_eq!(int(&tree, "rpc-reply.data.object.us-sdber-rate"), Some(5));
        assert_eq!(
            float(&tree, "rpc-reply.data.object.opt-sig-lvl"),
            Some(-20.25)
        );
        assert_eq!(
            boolean(&tree, "rpc-reply.data.object.battery-present"),
            Some(false)
        );
    }

    #[test]
    fn missing_nodes_yield_none_not_errors() {
        let tree = sample();
        assert_eq!(text(&tree, "rpc-reply.data.object.no-such-field"), None);
        assert_eq!(int(&tree, "rpc-reply.data.object.admin"), None);
        assert_eq!(get(&tree, "rpc-reply.data.object.admin.deeper"), None);
    }

    #[test]
    fn list_normalizes_singletons_and_absence() {
        let single = json!({"reply": {"child": {"id": "1"}}});
        let many = json!({"reply": {"child": [{"id": "1"}, {"id": "2"}]}});
        let empty = json!({"reply": {"child": null}});
        assert_eq!(list(&single, "reply.child").len(), 1);
        assert_eq!(list(&many, "reply.child").len(), 2);
        assert!(list(&empty, "reply.child").is_empty());
        assert!(list(&empty, "reply.other").is_empty());
    }
}
