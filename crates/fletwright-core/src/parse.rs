//! Lenient reading of editor JSON into elements.
//!
//! The editor stores elements as loosely typed JSON objects. Reading never
//! fails on a bad field: the field falls back to its default and a
//! [`Degradation`] is recorded.

use crate::element::{Element, ElementKind, ElementType};
use crate::errors::Degradation;
use crate::style::{StyleKey, StyleMap, StyleValue};
use crate::types::{CheckState, Dimension, ElementId};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Elements read from a JSON document, plus what had to be defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub elements: Vec<Element>,
    pub degradations: Vec<Degradation>,
}

/// The element list inside a JSON document.
///
/// Accepts a bare array or an object with an `elements` array, the shape of
/// a saved designer state. Anything else has no element list.
pub fn element_list(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get("elements").and_then(Value::as_array),
        _ => None,
    }
}

/// Read the element list of a JSON document.
///
/// Returns `None` when the document has no element list at all.
pub fn elements_from_value(value: &Value) -> Option<Parsed> {
    let items = element_list(value)?;
    let mut reader = Reader::default();
    reader.reserve_ids(items);
    let elements = reader.read_list(items);
    Some(Parsed {
        elements,
        degradations: reader.degradations,
    })
}

/// Parse JSON text and read its element list.
pub fn elements_from_str(json: &str) -> Result<Option<Parsed>, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    Ok(elements_from_value(&value))
}

#[derive(Default)]
struct Reader {
    degradations: Vec<Degradation>,
    anonymous: u32,
    /// Explicit ids anywhere in the document, plus synthesized ones.
    taken: HashSet<String>,
}

impl Reader {
    fn reserve_ids(&mut self, items: &[Value]) {
        for object in items.iter().filter_map(Value::as_object) {
            match object.get("id") {
                Some(Value::String(s)) if !s.is_empty() => {
                    self.taken.insert(s.clone());
                }
                Some(Value::Number(n)) => {
                    self.taken.insert(n.to_string());
                }
                _ => {}
            }
            if let Some(Value::Array(children)) = object.get("children") {
                self.reserve_ids(children);
            }
        }
    }

    fn read_list(&mut self, items: &[Value]) -> Vec<Element> {
        let mut elements = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_object() {
                Some(object) => elements.push(self.read_element(object)),
                None => self.degradations.push(Degradation::InvalidDocument(format!(
                    "entry {} is {}, expected an object",
                    index,
                    json_kind(item)
                ))),
            }
        }
        elements
    }

    fn read_element(&mut self, object: &Map<String, Value>) -> Element {
        let id = self.read_id(object);

        let tag = match object.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            other => {
                if let Some(value) = other {
                    self.degradations.push(Degradation::malformed(&id, "type", value));
                }
                String::new()
            }
        };
        let element_type = ElementType::from_tag(&tag);
        let kind = self.read_kind(&id, element_type, tag, object);

        let x = self.read_number(&id, object, "x").unwrap_or(0.0);
        let y = self.read_number(&id, object, "y").unwrap_or(0.0);
        let width = self.read_dimension(&id, object, "width");
        let height = self.read_dimension(&id, object, "height");
        let content = self.read_content(&id, object);
        let styles = self.read_styles(&id, element_type, object);

        Element {
            id,
            kind,
            x,
            y,
            width,
            height,
            content,
            styles,
        }
    }

    fn read_id(&mut self, object: &Map<String, Value>) -> ElementId {
        match object.get("id") {
            Some(Value::String(s)) if !s.is_empty() => ElementId(s.clone()),
            Some(Value::Number(n)) => ElementId(n.to_string()),
            other => {
                let id = loop {
                    self.anonymous += 1;
                    let candidate = format!("anonymous-{}", self.anonymous);
                    if self.taken.insert(candidate.clone()) {
                        break ElementId(candidate);
                    }
                };
                if let Some(value) = other {
                    self.degradations.push(Degradation::malformed(&id, "id", value));
                }
                id
            }
        }
    }

    fn read_kind(
        &mut self,
        id: &ElementId,
        element_type: ElementType,
        tag: String,
        object: &Map<String, Value>,
    ) -> ElementKind {
        match element_type {
            ElementType::Checkbox => {
                let checked = match object.get("checked") {
                    None | Some(Value::Null) => CheckState::Unchecked,
                    Some(Value::Bool(true)) => CheckState::Checked,
                    Some(Value::Bool(false)) => CheckState::Unchecked,
                    Some(Value::String(s)) => CheckState::parse(s).unwrap_or_else(|| {
                        self.degradations
                            .push(Degradation::unknown_option(id, "checked", s.as_str()));
                        CheckState::Unchecked
                    }),
                    Some(other) => {
                        self.degradations.push(Degradation::malformed(id, "checked", other));
                        CheckState::Unchecked
                    }
                };
                ElementKind::Checkbox { checked }
            }
            ElementType::FilePicker => {
                let allow_multiple = self.read_bool(id, object, "allowMultiple");
                let allowed_extensions = match object.get("allowedExtensions") {
                    None | Some(Value::Null) => "*".to_string(),
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Array(items)) if items.iter().all(Value::is_string) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                    Some(other) => {
                        self.degradations
                            .push(Degradation::malformed(id, "allowedExtensions", other));
                        "*".to_string()
                    }
                };
                ElementKind::FilePicker {
                    allow_multiple,
                    allowed_extensions,
                }
            }
            ElementType::Input => ElementKind::Input {
                placeholder: self.read_text(id, object, "placeholder"),
                label: self.read_text(id, object, "label"),
                password: self.read_bool(id, object, "isPassword"),
            },
            ElementType::Dropdown => ElementKind::Dropdown {
                placeholder: self.read_text(id, object, "placeholder"),
                options: self.read_options(id, object),
            },
            ElementType::Slider => ElementKind::Slider {
                label: self.read_text(id, object, "label"),
                value: self.read_number(id, object, "value"),
            },
            ElementType::ProgressBar => ElementKind::ProgressBar {
                value: self.read_number(id, object, "value"),
            },
            ElementType::Container => {
                let children = match object.get("children") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(items)) => self.read_list(items),
                    Some(other) => {
                        self.degradations.push(Degradation::malformed(id, "children", other));
                        Vec::new()
                    }
                };
                ElementKind::Container { children }
            }
            ElementType::Other => ElementKind::Other(tag),
            known => ElementKind::default_for(known),
        }
    }

    fn read_number(&mut self, id: &ElementId, object: &Map<String, Value>, field: &str) -> Option<f64> {
        match object.get(field)? {
            Value::Null => None,
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v),
                _ => {
                    self.degradations.push(Degradation::malformed(id, field, s));
                    None
                }
            },
            other => {
                self.degradations.push(Degradation::malformed(id, field, other));
                None
            }
        }
    }

    fn read_dimension(&mut self, id: &ElementId, object: &Map<String, Value>, field: &str) -> Dimension {
        match object.get(field) {
            None | Some(Value::Null) => Dimension::default(),
            Some(Value::Number(n)) => Dimension::Px(n.as_f64().unwrap_or(0.0)),
            Some(Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Dimension::Px(v),
                _ => Dimension::Relative(s.clone()),
            },
            Some(other) => {
                self.degradations.push(Degradation::malformed(id, field, other));
                Dimension::default()
            }
        }
    }

    fn read_bool(&mut self, id: &ElementId, object: &Map<String, Value>, field: &str) -> bool {
        match object.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.degradations.push(Degradation::malformed(id, field, other));
                false
            }
        }
    }

    fn read_text(&mut self, id: &ElementId, object: &Map<String, Value>, field: &str) -> Option<String> {
        match object.get(field)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            other => {
                self.degradations.push(Degradation::malformed(id, field, other));
                None
            }
        }
    }

    fn read_content(&mut self, id: &ElementId, object: &Map<String, Value>) -> String {
        match object.get("content") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => {
                self.degradations.push(Degradation::malformed(id, "content", other));
                String::new()
            }
        }
    }

    fn read_options(&mut self, id: &ElementId, object: &Map<String, Value>) -> Vec<String> {
        match object.get("options") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Object(o) => o
                        .get("label")
                        .or_else(|| o.get("value"))
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Some(other) => {
                self.degradations.push(Degradation::malformed(id, "options", other));
                Vec::new()
            }
        }
    }

    fn read_styles(
        &mut self,
        id: &ElementId,
        element_type: ElementType,
        object: &Map<String, Value>,
    ) -> StyleMap {
        let entries = match object.get("styles") {
            None | Some(Value::Null) => return StyleMap::new(),
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                self.degradations.push(Degradation::malformed(id, "styles", other));
                return StyleMap::new();
            }
        };

        let mut styles = StyleMap::new();
        for (name, value) in entries {
            let key = StyleKey::from_name(name);
            let field = format!("styles.{}", name);
            if !element_type.accepts_style(&key) {
                self.degradations.push(Degradation::unknown_option(
                    id,
                    "style",
                    name.as_str(),
                ));
                continue;
            }
            let value = match value {
                Value::Null => continue,
                Value::String(s) => StyleValue::String(s.clone()),
                Value::Bool(b) => StyleValue::Bool(*b),
                Value::Number(n) => match n.as_f64() {
                    Some(v) => StyleValue::Number(v),
                    None => continue,
                },
                other => {
                    self.degradations.push(Degradation::malformed(id, field, other));
                    continue;
                }
            };
            styles.set(key, value);
        }
        styles
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_editor_records() {
        let parsed = elements_from_value(&json!([
            {
                "id": "1700000000000",
                "type": "text",
                "content": "Hi",
                "x": 10.4,
                "y": 20,
                "width": 200,
                "height": "40",
                "styles": { "color": "#000000", "fontSize": 16 }
            },
            {
                "id": 7,
                "type": "checkbox",
                "checked": "indeterminate",
                "styles": { "labelPosition": "left" }
            }
        ]))
        .unwrap();

        assert!(parsed.degradations.is_empty());
        let text = &parsed.elements[0];
        assert_eq!(text.id.as_str(), "1700000000000");
        assert_eq!(text.element_type(), ElementType::Text);
        assert_eq!(text.x, 10.4);
        assert_eq!(text.height, Dimension::Px(40.0));
        assert_eq!(text.styles.number(&StyleKey::FontSize), Some(16.0));

        let checkbox = &parsed.elements[1];
        assert_eq!(checkbox.id.as_str(), "7");
        assert_eq!(
            checkbox.kind,
            ElementKind::Checkbox {
                checked: CheckState::Indeterminate
            }
        );
    }

    #[test]
    fn test_no_element_list() {
        assert!(elements_from_value(&json!(null)).is_none());
        assert!(elements_from_value(&json!("elements")).is_none());
        assert!(elements_from_value(&json!({ "selected": 1 })).is_none());
        assert!(elements_from_value(&json!({ "elements": [] })).is_some());
    }

    #[test]
    fn test_malformed_fields_degrade() {
        let parsed = elements_from_value(&json!([
            { "id": "a", "type": "button", "x": "left", "width": "100%" },
            { "id": "b", "type": "checkbox", "checked": "sometimes" },
            42
        ]))
        .unwrap();

        assert_eq!(parsed.elements.len(), 2);
        let button = &parsed.elements[0];
        assert_eq!(button.x, 0.0);
        assert_eq!(button.width, Dimension::Relative("100%".into()));
        assert_eq!(parsed.degradations.len(), 3);
        assert!(matches!(
            &parsed.degradations[0],
            Degradation::MalformedField { field, .. } if field == "x"
        ));
        assert!(matches!(
            &parsed.degradations[1],
            Degradation::UnknownOption { field, .. } if field == "checked"
        ));
        assert!(matches!(&parsed.degradations[2], Degradation::InvalidDocument(_)));
    }

    #[test]
    fn test_unsupported_style_keys_are_dropped() {
        let parsed = elements_from_value(&json!([
            { "id": "t", "type": "text", "styles": { "objectFit": "cover", "shadow": "sm" } }
        ]))
        .unwrap();

        let text = &parsed.elements[0];
        assert!(!text.styles.contains(&StyleKey::ObjectFit));
        assert!(text.styles.contains(&StyleKey::Custom("shadow".into())));
        assert_eq!(parsed.degradations.len(), 1);
    }

    #[test]
    fn test_nested_children_and_unknown_types() {
        let parsed = elements_from_value(&json!([
            {
                "id": "box",
                "type": "container",
                "children": [
                    { "id": "inner", "type": "button" },
                    { "id": "star", "type": "rating" }
                ]
            },
            { "type": "divider" }
        ]))
        .unwrap();

        let container = &parsed.elements[0];
        assert_eq!(container.children().len(), 2);
        assert_eq!(container.children()[1].kind, ElementKind::Other("rating".into()));
        assert_eq!(parsed.elements[1].id.as_str(), "anonymous-1");
    }

    #[test]
    fn test_anonymous_ids_skip_explicit_ones() {
        let parsed = elements_from_value(&json!([
            { "type": "button" },
            { "id": "anonymous-1", "type": "button" },
            {
                "id": "box",
                "type": "container",
                "children": [
                    { "id": "anonymous-3", "type": "button" },
                    { "type": "button" }
                ]
            }
        ]))
        .unwrap();

        assert_eq!(parsed.elements[0].id.as_str(), "anonymous-2");
        assert_eq!(parsed.elements[1].id.as_str(), "anonymous-1");
        let children = parsed.elements[2].children();
        assert_eq!(children[0].id.as_str(), "anonymous-3");
        assert_eq!(children[1].id.as_str(), "anonymous-4");
    }

    #[test]
    fn test_file_picker_fields() {
        let parsed = elements_from_value(&json!([
            { "id": "f", "type": "filepicker", "allowMultiple": true, "allowedExtensions": ["png", "jpg"] },
            { "id": "g", "type": "filepicker" }
        ]))
        .unwrap();

        assert_eq!(
            parsed.elements[0].kind,
            ElementKind::FilePicker {
                allow_multiple: true,
                allowed_extensions: "png, jpg".into()
            }
        );
        assert_eq!(
            parsed.elements[1].kind,
            ElementKind::FilePicker {
                allow_multiple: false,
                allowed_extensions: "*".into()
            }
        );
    }
}
