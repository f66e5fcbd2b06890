//! XML envelope decoding.
//!
//! The upstream occasionally answers in XML instead of JSON, using the same
//! logical structure (`<Response><Data>...</Data></Response>`). This module
//! converts such documents into a `serde_json::Value` tree so the rest of
//! the pipeline only ever sees one representation.
//!
//! Conversion rules:
//! - An element with child elements becomes an object keyed by child tag;
//!   repeated tags collapse into an array under that tag.
//! - A leaf element's text is coerced: `true`/`false` to booleans, numeric
//!   text to numbers, everything else to strings. Empty leaves are `null`.
//! - Attributes are not used by the vendor envelope and are ignored.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value, json};

use crate::error::{ClientError, Result};

struct Frame {
    tag: String,
    children: Vec<(String, Value)>,
    text: String,
}

/// Decode an XML document into a JSON value, `{root_tag: contents}`.
pub fn xml_to_value(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(Frame {
                    tag: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    children: Vec::new(),
                    text: String::new(),
                });
            }
            Ok(Event::Empty(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                attach(&mut stack, &mut root, tag, Value::Null);
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| ClientError::MalformedResponse(format!("invalid XML text: {e}")))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Ok(Event::End(_)) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| ClientError::MalformedResponse("unbalanced XML".to_string()))?;
                let tag = frame.tag.clone();
                let value = finish(frame);
                attach(&mut stack, &mut root, tag, value);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ClientError::MalformedResponse(format!("invalid XML: {e}")));
            }
        }
    }

    match root {
        Some((tag, value)) => Ok(json!({ tag: value })),
        None => Err(ClientError::MalformedResponse(
            "empty XML document".to_string(),
        )),
    }
}

fn attach(stack: &mut [Frame], root: &mut Option<(String, Value)>, tag: String, value: Value) {
    match stack.last_mut() {
        Some(parent) => parent.children.push((tag, value)),
        None => {
            if root.is_none() {
                *root = Some((tag, value));
            }
        }
    }
}

fn finish(frame: Frame) -> Value {
    if frame.children.is_empty() {
        return coerce_text(&frame.text);
    }
    let mut map = Map::new();
    for (key, value) in frame.children {
        match map.get_mut(&key) {
            None => {
                map.insert(key, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
    Value::Object(map)
}

fn coerce_text(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = trimmed.parse::<f64>()
        && let Some(n) = serde_json::Number::from_f64(f)
    {
        return Value::Number(n);
    }
    Value::String(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_reply() {
        let value = xml_to_value(
            "<?xml version=\"1.0\"?><Response><Data><Session><ID>32</ID>\
             <NOnce>164EF22C050F456851DC90D62791839E</NOnce></Session></Data></Response>",
        )
        .unwrap();
        assert_eq!(value["Response"]["Data"]["Session"]["ID"], 32);
        assert_eq!(
            value["Response"]["Data"]["Session"]["NOnce"],
            "164EF22C050F456851DC90D62791839E"
        );
    }

    #[test]
    fn repeated_tags_collapse_to_array() {
        let value = xml_to_value(
            "<Response><Data><Cameras>\
             <Camera><Name>Cam-1</Name><Active>true</Active></Camera>\
             <Camera><Name>Cam-2</Name><Active>false</Active></Camera>\
             </Cameras></Data></Response>",
        )
        .unwrap();
        let cameras = &value["Response"]["Data"]["Cameras"]["Camera"];
        assert!(cameras.is_array());
        assert_eq!(cameras[0]["Name"], "Cam-1");
        assert_eq!(cameras[1]["Active"], false);
    }

    #[test]
    fn leaf_coercion() {
        let value =
            xml_to_value("<Root><Port>8601</Port><Lat>12.5</Lat><On>false</On><Empty/></Root>")
                .unwrap();
        assert_eq!(value["Root"]["Port"], 8601);
        assert_eq!(value["Root"]["Lat"], 12.5);
        assert_eq!(value["Root"]["On"], false);
        assert_eq!(value["Root"]["Empty"], Value::Null);
    }

    #[test]
    fn malformed_document_rejected() {
        assert!(xml_to_value("<Response><Data></Response>").is_err());
        assert!(xml_to_value("").is_err());
    }
}
