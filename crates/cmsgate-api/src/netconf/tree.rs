// Response tree parsing
//
// The controller's replies are deeply nested, loosely typed XML. Rather
// than model every reply shape, bodies are parsed into a generic
// `serde_json::Value` tree: attributes become `@name` keys, mixed text
// becomes `#text`, repeated sibling elements collapse into arrays, and a
// childless element becomes a plain string (or null when empty). Field
// extraction then walks dotted paths over this tree (see `extract`).

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value};

/// Literal sentinel the controller appends when a reply is partial and
/// more data can be fetched with a continuation cursor. The marker is
/// detected on the raw body by substring search -- brittle, but that is
/// what the protocol gives us; keep the check isolated here.
const MORE_MARKER: &str = "<more/>";

/// True when the raw reply body carries the partial-result marker.
pub fn detect_more(raw: &str) -> bool {
    raw.contains(MORE_MARKER)
}

/// Error for replies that are not well-formed XML.
#[derive(Debug, thiserror::Error)]
#[error("malformed XML response: {0}")]
pub struct XmlError(String);

struct PendingNode {
    name: String,
    map: Map<String, Value>,
    text: String,
}

impl PendingNode {
    fn new(name: String) -> Self {
        Self {
            name,
            map: Map::new(),
            text: String::new(),
        }
    }

    fn finish(self) -> Value {
        let mut map = self.map;
        let text = self.text.trim();
        if map.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_owned())
            }
        } else {
            if !text.is_empty() {
                map.insert("#text".to_owned(), Value::String(text.to_owned()));
            }
            Value::Object(map)
        }
    }
}

/// Insert a child under `name`, collapsing repeated siblings into an array.
fn insert(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        None => {
            map.insert(name, value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// Parse a raw XML reply body into a generic tree.
///
/// The document root becomes the single key of the returned object, so
/// extraction paths start at the root element name
/// (e.g. `soapenv:Envelope.soapenv:Body...`).
pub fn parse(raw: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(raw);
    let mut stack: Vec<PendingNode> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader.read_event().map_err(|e| XmlError(e.to_string()))?;
        match event {
            Event::Start(start) => {
                let mut node =
                    PendingNode::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                for attr in start.attributes() {
                    let attr = attr.map_err(|e| XmlError(e.to_string()))?;
                    let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
                    let value = attr
                        .unescape_value()
                        .map_err(|e| XmlError(e.to_string()))?
                        .into_owned();
                    node.map.insert(key, Value::String(value));
                }
                stack.push(node);
            }
            Event::Empty(start) => {
                let mut node =
                    PendingNode::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                for attr in start.attributes() {
                    let attr = attr.map_err(|e| XmlError(e.to_string()))?;
                    let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
                    let value = attr
                        .unescape_value()
                        .map_err(|e| XmlError(e.to_string()))?
                        .into_owned();
                    node.map.insert(key, Value::String(value));
                }
                let name = node.name.clone();
                attach(&mut stack, &mut root, name, node.finish());
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    let chunk = text.unescape().map_err(|e| XmlError(e.to_string()))?;
                    top.text.push_str(&chunk);
                }
            }
            Event::CData(cdata) => {
                if let Some(top) = stack.last_mut() {
                    top.text
                        .push_str(&String::from_utf8_lossy(cdata.into_inner().as_ref()));
                }
            }
            Event::End(_) => {
                let Some(node) = stack.pop() else { continue };
                let name = node.name.clone();
                attach(&mut stack, &mut root, name, node.finish());
            }
            Event::Eof => break,
            // Declarations, comments, PIs and doctypes carry no data.
            _ => {}
        }
    }

    let mut doc = Map::new();
    if let Some((name, value)) = root {
        doc.insert(name, value);
    }
    Ok(Value::Object(doc))
}

fn attach(
    stack: &mut [PendingNode],
    root: &mut Option<(String, Value)>,
    name: String,
    value: Value,
) {
    if let Some(parent) = stack.last_mut() {
        insert(&mut parent.map, name, value);
    } else if root.is_none() {
        *root = Some((name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leaf_elements_become_strings() {
        let tree = parse("<a><b>hello</b><c/></a>").expect("parse");
        assert_eq!(tree, json!({"a": {"b": "hello", "c": null}}));
    }

    #[test]
    fn attributes_and_text_use_literal_prefixes() {
        let tree = parse(r#"<a><prof name="802.11">12</prof></a>"#).expect("parse");
        assert_eq!(
            tree,
            json!({"a": {"prof": {"@name": "802.11", "#text": "12"}}})
        );
    }

    #[test]
    fn repeated_siblings_collapse_to_arrays() {
        let tree = parse("<top><child>1</child><child>2</child><child>3</child></top>")
            .expect("parse");
        assert_eq!(tree, json!({"top": {"child": ["1", "2", "3"]}}));
    }

    #[test]
    fn namespace_prefixes_are_kept_verbatim() {
        let tree = parse(
            r#"<soapenv:Envelope xmlns:soapenv="x"><soapenv:Body><rpc-reply><ok/></rpc-reply></soapenv:Body></soapenv:Envelope>"#,
        )
        .expect("parse");
        assert_eq!(
            tree,
            json!({
                "soapenv:Envelope": {
                    "@xmlns:soapenv": "x",
                    "soapenv:Body": {"rpc-reply": {"ok": null}}
                }
            })
        );
    }

    #[test]
    fn detects_partial_result_marker_on_raw_body() {
        assert!(detect_more("<rpc-reply><more/><data/></rpc-reply>"));
        assert!(!detect_more("<rpc-reply><data/></rpc-reply>"));
    }

    #[test]
    fn rejects_malformed_bodies() {
        assert!(parse("<a><b></a>").is_err());
    }
}
