//! Response bytes to a generic `serde_json::Value` tree.
//!
//! JSON bodies are parsed as-is. XML bodies are mapped onto the same tree so
//! the normalizer only ever sees one representation:
//!
//! - the document becomes `{root_name: root_value}`
//! - an element with child elements becomes an object keyed by child name
//! - repeated child names become an array, in document order
//! - a leaf element becomes its trimmed text (`""` when empty)
//!
//! Attributes are ignored; the feed does not use them.

use roxmltree::{Document, Node};
use serde_json::{Map, Value};

use crate::domain::PayloadFormat;
use crate::error::AppError;

const BOM: char = '\u{feff}';

pub fn parse_payload(bytes: &[u8], format: PayloadFormat) -> Result<Value, AppError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| AppError::upstream(format!("Response body is not valid UTF-8: {e}")))?;
    let text = text.trim_start_matches(BOM);

    match format {
        PayloadFormat::Json => serde_json::from_str(text)
            .map_err(|e| AppError::upstream(format!("Failed to parse JSON response: {e}"))),
        PayloadFormat::Xml => parse_xml(text),
    }
}

fn parse_xml(text: &str) -> Result<Value, AppError> {
    let doc = Document::parse(text)
        .map_err(|e| AppError::upstream(format!("Failed to parse XML response: {e}")))?;
    let root = doc.root_element();

    let mut map = Map::new();
    map.insert(root.tag_name().name().to_string(), element_value(root));
    Ok(Value::Object(map))
}

fn element_value(node: Node<'_, '_>) -> Value {
    let children: Vec<Node<'_, '_>> = node.children().filter(|c| c.is_element()).collect();

    if children.is_empty() {
        let text: String = node
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect();
        return Value::String(text.trim().to_string());
    }

    let mut map = Map::new();
    for child in children {
        let name = child.tag_name().name().to_string();
        let value = element_value(child);
        match map.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(name, value);
            }
        }
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn xml_leaves_become_trimmed_strings() {
        let xml = "<root><A> 1 </A><B/><C><![CDATA[x<y]]></C></root>";
        let tree = parse_payload(xml.as_bytes(), PayloadFormat::Xml).unwrap();
        assert_eq!(tree, json!({"root": {"A": "1", "B": "", "C": "x<y"}}));
    }

    #[test]
    fn repeated_xml_children_become_arrays_in_order() {
        let xml = "<root><row><n>1</n></row><other>x</other><row><n>2</n></row><row><n>3</n></row></root>";
        let tree = parse_payload(xml.as_bytes(), PayloadFormat::Xml).unwrap();
        assert_eq!(
            tree,
            json!({"root": {"row": [{"n": "1"}, {"n": "2"}, {"n": "3"}], "other": "x"}})
        );
    }

    #[test]
    fn json_with_bom_parses() {
        let body = "\u{feff}{\"row\": [1]}";
        let tree = parse_payload(body.as_bytes(), PayloadFormat::Json).unwrap();
        assert_eq!(tree, json!({"row": [1]}));
    }

    #[test]
    fn malformed_bodies_are_upstream_errors() {
        let err = parse_payload(b"<root><unclosed></root>", PayloadFormat::Xml).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_UPSTREAM);
        let err = parse_payload(b"{not json", PayloadFormat::Json).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_UPSTREAM);
        let err = parse_payload(&[0xff, 0xfe, 0x00], PayloadFormat::Json).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_UPSTREAM);
    }
}
