//! Style maps attached to elements.
//!
//! Styles stay an ordered key/value map so the editor can set any key, but
//! the keys the designer knows about are typed. Unknown names are kept as
//! [`StyleKey::Custom`] and passed through untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A style property name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Color,
    BackgroundColor,
    FontSize,
    FontWeight,
    FontStyle,
    TextAlign,
    Variant,
    Size,
    LabelPosition,
    LabelColor,
    ObjectFit,
    BorderRadius,
    BorderWidth,
    BorderColor,
    Orientation,
    Min,
    Max,
    Step,
    Thickness,
    /// Any key the designer has no typed meaning for.
    Custom(String),
}

impl StyleKey {
    /// Look up a key by its editor name (camelCase).
    pub fn from_name(name: &str) -> Self {
        match name {
            "color" => Self::Color,
            "backgroundColor" => Self::BackgroundColor,
            "fontSize" => Self::FontSize,
            "fontWeight" => Self::FontWeight,
            "fontStyle" => Self::FontStyle,
            "textAlign" => Self::TextAlign,
            "variant" => Self::Variant,
            "size" => Self::Size,
            "labelPosition" => Self::LabelPosition,
            "labelColor" => Self::LabelColor,
            "objectFit" => Self::ObjectFit,
            "borderRadius" => Self::BorderRadius,
            "borderWidth" => Self::BorderWidth,
            "borderColor" => Self::BorderColor,
            "orientation" => Self::Orientation,
            "min" => Self::Min,
            "max" => Self::Max,
            "step" => Self::Step,
            "thickness" => Self::Thickness,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Editor name of the key.
    pub fn name(&self) -> &str {
        match self {
            Self::Color => "color",
            Self::BackgroundColor => "backgroundColor",
            Self::FontSize => "fontSize",
            Self::FontWeight => "fontWeight",
            Self::FontStyle => "fontStyle",
            Self::TextAlign => "textAlign",
            Self::Variant => "variant",
            Self::Size => "size",
            Self::LabelPosition => "labelPosition",
            Self::LabelColor => "labelColor",
            Self::ObjectFit => "objectFit",
            Self::BorderRadius => "borderRadius",
            Self::BorderWidth => "borderWidth",
            Self::BorderColor => "borderColor",
            Self::Orientation => "orientation",
            Self::Min => "min",
            Self::Max => "max",
            Self::Step => "step",
            Self::Thickness => "thickness",
            Self::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for StyleKey {
    fn from(name: &str) -> Self {
        StyleKey::from_name(name)
    }
}

impl Serialize for StyleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for StyleKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(StyleKey::from_name(&name))
    }
}

/// A style value: the editor only ever produces strings, numbers and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl StyleValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value; numeric strings such as `"16"` count too.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            StyleValue::Number(n) => *n,
            StyleValue::String(s) => s.trim().parse::<f64>().ok()?,
            StyleValue::Bool(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::String(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::String(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        StyleValue::Bool(b)
    }
}

/// Ordered style map of one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(IndexMap<StyleKey, StyleValue>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<StyleKey>, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<StyleKey>, value: impl Into<StyleValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &StyleKey) -> Option<&StyleValue> {
        self.0.get(key)
    }

    /// String value of `key`, ignoring empty strings.
    pub fn str(&self, key: &StyleKey) -> Option<&str> {
        self.get(key)
            .and_then(StyleValue::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn number(&self, key: &StyleKey) -> Option<f64> {
        self.get(key).and_then(StyleValue::as_number)
    }

    pub fn contains(&self, key: &StyleKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &StyleKey) -> Option<StyleValue> {
        self.0.shift_remove(key)
    }

    /// Shallow merge: every key in `update` overwrites the same key here,
    /// keys absent from `update` are left alone.
    pub fn merge(&mut self, update: &StyleMap) {
        for (key, value) in &update.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &StyleKey> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StyleKey, &StyleValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StyleKey, StyleValue)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (StyleKey, StyleValue)>>(iter: T) -> Self {
        StyleMap(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_custom_keys() {
        assert_eq!(StyleKey::from_name("fontSize"), StyleKey::FontSize);
        assert_eq!(StyleKey::from_name("fontSize").name(), "fontSize");
        let custom = StyleKey::from_name("letterSpacing");
        assert!(custom.is_custom());
        assert_eq!(custom.name(), "letterSpacing");
    }

    #[test]
    fn test_merge_is_last_write_wins() {
        let mut styles = StyleMap::new()
            .with("color", "#000000")
            .with("fontSize", 14.0);
        styles.merge(&StyleMap::new().with("color", "#ff0000"));

        assert_eq!(styles.str(&StyleKey::Color), Some("#ff0000"));
        assert_eq!(styles.number(&StyleKey::FontSize), Some(14.0));
        assert_eq!(styles.len(), 2);
    }

    #[test]
    fn test_numeric_strings_read_as_numbers() {
        let styles = StyleMap::new().with("fontSize", "18").with("step", "x");
        assert_eq!(styles.number(&StyleKey::FontSize), Some(18.0));
        assert_eq!(styles.number(&StyleKey::Step), None);
    }

    #[test]
    fn test_json_shape() {
        let styles: StyleMap =
            serde_json::from_str(r##"{"color":"#fff","fontSize":12,"bold":true}"##).unwrap();
        assert_eq!(styles.str(&StyleKey::Color), Some("#fff"));
        assert_eq!(
            styles.get(&StyleKey::Custom("bold".into())),
            Some(&StyleValue::Bool(true))
        );
        let back = serde_json::to_string(&styles).unwrap();
        assert_eq!(back, r##"{"color":"#fff","fontSize":12.0,"bold":true}"##);
    }
}
