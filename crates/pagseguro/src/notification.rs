//! Transaction Notifications
//!
//! The lookup result is handed back as a generic mapping: interpreting
//! transaction status is up to the application's webhook handler.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{PagSeguroError, Result};

/// Parsed notification lookup response
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Notification {
    /// Notification code that was looked up
    pub code: String,

    /// HTTP status of the lookup
    pub status: u16,

    /// Response body, root element included (`{"transaction": {...}}`)
    pub body: Value,
}

impl Notification {
    /// The `<transaction>` element, if the gateway sent one
    pub fn transaction(&self) -> Option<&Map<String, Value>> {
        self.body.get("transaction").and_then(Value::as_object)
    }
}

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            text: String::new(),
        }
    }

    fn into_value(self) -> Value {
        if self.children.is_empty() {
            if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            }
        } else {
            Value::Object(self.children)
        }
    }
}

/// Convert an XML document into a nested mapping
///
/// Elements with children become objects, leaf elements become strings,
/// empty elements become `null` and repeated siblings are collected into
/// an array. Attributes are dropped.
pub fn xml_to_value(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack = vec![Frame::new(String::new())];

    loop {
        let event = reader
            .read_event()
            .map_err(|e| PagSeguroError::Parse(e.to_string()))?;

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                stack.push(Frame::new(name));
            }
            Event::Empty(empty) => {
                let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    insert_child(&mut parent.children, name, Value::Null);
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| PagSeguroError::Parse(e.to_string()))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                let data = data.into_inner();
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(PagSeguroError::Parse("unexpected closing tag".into()));
                }
                if let Some(frame) = stack.pop() {
                    let name = frame.name.clone();
                    let value = frame.into_value();
                    if let Some(parent) = stack.last_mut() {
                        insert_child(&mut parent.children, name, value);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match stack.pop() {
        Some(root) if stack.is_empty() && !root.children.is_empty() => {
            Ok(Value::Object(root.children))
        }
        Some(_) if !stack.is_empty() => Err(PagSeguroError::Parse("unclosed element".into())),
        _ => Err(PagSeguroError::Parse("no root element".into())),
    }
}

fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(existing)) => existing.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}
