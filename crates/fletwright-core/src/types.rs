//! Core value types for the element model.

use std::fmt;

/// Stable identifier of an element.
///
/// The editor assigns ids as strings; numeric ids coming from JSON are
/// stringified on read so every id compares the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        ElementId(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        ElementId(s)
    }
}

/// Hands out element ids that are never reused within one generator.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after an existing high-water mark, e.g. when resuming a session.
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn next_id(&mut self) -> ElementId {
        self.next += 1;
        ElementId(format!("el-{}", self.next))
    }
}

/// A width or height as stored by the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    /// Absolute size in logical pixels.
    Px(f64),
    /// Framework-relative size such as `"100%"` or `"auto"`.
    Relative(String),
}

impl Dimension {
    /// Size in whole pixels, if this dimension has one.
    ///
    /// Relative values count only when they are a plain number with an
    /// optional `px` suffix; percentages and keywords have no pixel size.
    pub fn to_px(&self) -> Option<i64> {
        match self {
            Dimension::Px(v) if v.is_finite() => Some(v.trunc() as i64),
            Dimension::Px(_) => None,
            Dimension::Relative(s) => {
                let s = s.trim();
                let number = s.strip_suffix("px").unwrap_or(s).trim();
                number
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| v.trunc() as i64)
            }
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Px(0.0)
    }
}

impl From<f64> for Dimension {
    fn from(v: f64) -> Self {
        Dimension::Px(v)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Px(v) => write!(f, "{}px", v),
            Dimension::Relative(s) => f.write_str(s),
        }
    }
}

/// Tri-state value of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

impl CheckState {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unchecked" => Some(Self::Unchecked),
            "checked" => Some(Self::Checked),
            "indeterminate" => Some(Self::Indeterminate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Checked => "checked",
            Self::Indeterminate => "indeterminate",
        }
    }
}
