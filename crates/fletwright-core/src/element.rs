//! The element model.
//!
//! An [`Element`] is one widget placed on the design canvas. Type-specific
//! data lives inside [`ElementKind`], so a checkbox always has a check state
//! and only containers have children.

use crate::errors::ModelError;
use crate::style::{StyleKey, StyleMap, StyleValue};
use crate::types::{CheckState, Dimension, ElementId};
use std::fmt;

/// The widget type tag of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Text,
    Button,
    Checkbox,
    Image,
    Input,
    Dropdown,
    Slider,
    ProgressBar,
    Divider,
    Container,
    FilePicker,
    /// A tag the designer does not know.
    Other,
}

impl ElementType {
    /// Every known type, in toolbar order.
    pub const KNOWN: [ElementType; 11] = [
        Self::Text,
        Self::Button,
        Self::Checkbox,
        Self::Image,
        Self::Input,
        Self::Dropdown,
        Self::Slider,
        Self::ProgressBar,
        Self::Divider,
        Self::Container,
        Self::FilePicker,
    ];

    /// Parse an editor type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "image" => Self::Image,
            "input" => Self::Input,
            "dropdown" => Self::Dropdown,
            "slider" => Self::Slider,
            "progressBar" => Self::ProgressBar,
            "divider" => Self::Divider,
            "container" => Self::Container,
            "filepicker" => Self::FilePicker,
            _ => Self::Other,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Button => "button",
            Self::Checkbox => "checkbox",
            Self::Image => "image",
            Self::Input => "input",
            Self::Dropdown => "dropdown",
            Self::Slider => "slider",
            Self::ProgressBar => "progressBar",
            Self::Divider => "divider",
            Self::Container => "container",
            Self::FilePicker => "filepicker",
            Self::Other => "other",
        }
    }

    /// Whether elements of this type accept the given style key.
    ///
    /// Colors, fonts and borders are common to all types. Custom keys are
    /// always accepted, as is anything on an unknown type.
    pub fn accepts_style(&self, key: &StyleKey) -> bool {
        use StyleKey::*;

        match key {
            Custom(_)
            | Color
            | BackgroundColor
            | FontSize
            | FontWeight
            | FontStyle
            | BorderColor
            | BorderWidth
            | BorderRadius => true,
            TextAlign => matches!(self, Self::Text | Self::Input | Self::Other),
            Variant => matches!(self, Self::Button | Self::FilePicker | Self::Other),
            Size => matches!(
                self,
                Self::Button | Self::Checkbox | Self::FilePicker | Self::Other
            ),
            LabelPosition | LabelColor => matches!(self, Self::Checkbox | Self::Other),
            ObjectFit => matches!(self, Self::Image | Self::Other),
            Min | Max | Step => matches!(self, Self::Slider | Self::Other),
            Orientation | Thickness => matches!(self, Self::Divider | Self::Other),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Type-specific data of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text,
    Button,
    Checkbox {
        checked: CheckState,
    },
    Image,
    Input {
        placeholder: Option<String>,
        label: Option<String>,
        password: bool,
    },
    Dropdown {
        placeholder: Option<String>,
        options: Vec<String>,
    },
    Slider {
        label: Option<String>,
        value: Option<f64>,
    },
    ProgressBar {
        /// Completion in `0.0..=1.0`.
        value: Option<f64>,
    },
    Divider,
    Container {
        children: Vec<Element>,
    },
    FilePicker {
        allow_multiple: bool,
        /// Comma-separated list, `*` for any file.
        allowed_extensions: String,
    },
    /// Unknown type; the original tag is kept for diagnostics.
    Other(String),
}

impl ElementKind {
    /// Empty type-specific data for a type.
    pub fn default_for(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Text => Self::Text,
            ElementType::Button => Self::Button,
            ElementType::Checkbox => Self::Checkbox {
                checked: CheckState::Unchecked,
            },
            ElementType::Image => Self::Image,
            ElementType::Input => Self::Input {
                placeholder: None,
                label: None,
                password: false,
            },
            ElementType::Dropdown => Self::Dropdown {
                placeholder: None,
                options: Vec::new(),
            },
            ElementType::Slider => Self::Slider {
                label: None,
                value: None,
            },
            ElementType::ProgressBar => Self::ProgressBar { value: None },
            ElementType::Divider => Self::Divider,
            ElementType::Container => Self::Container {
                children: Vec::new(),
            },
            ElementType::FilePicker => Self::FilePicker {
                allow_multiple: false,
                allowed_extensions: "*".to_string(),
            },
            ElementType::Other => Self::Other("other".to_string()),
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text => ElementType::Text,
            Self::Button => ElementType::Button,
            Self::Checkbox { .. } => ElementType::Checkbox,
            Self::Image => ElementType::Image,
            Self::Input { .. } => ElementType::Input,
            Self::Dropdown { .. } => ElementType::Dropdown,
            Self::Slider { .. } => ElementType::Slider,
            Self::ProgressBar { .. } => ElementType::ProgressBar,
            Self::Divider => ElementType::Divider,
            Self::Container { .. } => ElementType::Container,
            Self::FilePicker { .. } => ElementType::FilePicker,
            Self::Other(_) => ElementType::Other,
        }
    }

    /// Type tag as written by the editor; unknown types keep their own tag.
    pub fn tag(&self) -> &str {
        match self {
            Self::Other(tag) => tag,
            other => other.element_type().tag(),
        }
    }
}

/// One widget instance on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Position relative to the canvas, or to the parent container.
    pub x: f64,
    pub y: f64,
    pub width: Dimension,
    pub height: Dimension,
    /// Primary payload: label, URL or current value depending on type.
    pub content: String,
    pub styles: StyleMap,
}

impl Element {
    /// Create a bare element at the origin with no size, content or styles.
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            x: 0.0,
            y: 0.0,
            width: Dimension::default(),
            height: Dimension::default(),
            content: String::new(),
            styles: StyleMap::new(),
        }
    }

    /// Create an element the way the toolbar does: placed at (100, 100)
    /// with the type's default content and styles.
    pub fn with_defaults(id: impl Into<ElementId>, element_type: ElementType) -> Self {
        let mut element = Self::new(id, ElementKind::default_for(element_type))
            .with_position(100.0, 100.0)
            .with_size(200.0, 40.0);

        match element_type {
            ElementType::Text => {
                element.content = "Text".to_string();
                element.styles = StyleMap::new()
                    .with(StyleKey::FontSize, 14.0)
                    .with(StyleKey::Color, "#000000")
                    .with(StyleKey::FontWeight, "normal")
                    .with(StyleKey::FontStyle, "normal")
                    .with(StyleKey::TextAlign, "left");
            }
            ElementType::Button => {
                element.content = "Button".to_string();
                element.styles = StyleMap::new()
                    .with(StyleKey::BackgroundColor, "#3b82f6")
                    .with(StyleKey::Color, "#ffffff")
                    .with(StyleKey::Variant, "elevated")
                    .with(StyleKey::Size, "default");
            }
            ElementType::Checkbox => {
                element.content = "Checkbox".to_string();
                element.styles = StyleMap::new()
                    .with(StyleKey::Size, "default")
                    .with(StyleKey::Color, "primary")
                    .with(StyleKey::LabelPosition, "right")
                    .with(StyleKey::LabelColor, "black");
            }
            ElementType::Image => {
                element.width = Dimension::Px(200.0);
                element.height = Dimension::Px(200.0);
            }
            ElementType::FilePicker => {
                element.content = "Choose File".to_string();
                element.styles = StyleMap::new()
                    .with(StyleKey::Variant, "default")
                    .with(StyleKey::Size, "default");
            }
            _ => {}
        }

        element
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, width: impl Into<Dimension>, height: impl Into<Dimension>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set a style without checking it against the element type.
    /// [`Element::check_styles`] reports keys the type does not accept.
    pub fn with_style(mut self, key: impl Into<StyleKey>, value: impl Into<StyleValue>) -> Self {
        self.styles.set(key, value);
        self
    }

    /// Add a child; has no effect unless this element is a container.
    pub fn with_child(mut self, child: Element) -> Self {
        if let ElementKind::Container { children } = &mut self.kind {
            children.push(child);
        }
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ElementKind::Container { .. })
    }

    /// Child elements; empty for anything but a container.
    pub fn children(&self) -> &[Element] {
        match &self.kind {
            ElementKind::Container { children } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.kind {
            ElementKind::Container { children } => Some(children),
            _ => None,
        }
    }

    /// Verify every style key is accepted by this element's type.
    pub fn check_styles(&self) -> Result<(), ModelError> {
        check_style_keys(self.element_type(), &self.styles)
    }

    /// This element and all descendants, depth-first pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Find this element or a descendant by id.
    pub fn find(&self, id: &ElementId) -> Option<&Element> {
        self.walk().find(|e| &e.id == id)
    }

    /// Apply a partial update in place.
    ///
    /// Scalar fields are replaced, styles are shallow-merged and
    /// type-specific fields only apply to elements of the matching kind.
    pub fn apply(&mut self, patch: &ElementPatch) -> Result<(), ModelError> {
        if let Some(requested) = &patch.element_type {
            if requested != self.kind.tag() {
                return Err(ModelError::TypeChange {
                    id: self.id.clone(),
                    current: self.element_type(),
                    requested: requested.clone(),
                });
            }
        }
        if let Some(styles) = &patch.styles {
            check_style_keys(self.element_type(), styles)?;
        }

        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = &patch.width {
            self.width = width.clone();
        }
        if let Some(height) = &patch.height {
            self.height = height.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(styles) = &patch.styles {
            self.styles.merge(styles);
        }

        match &mut self.kind {
            ElementKind::Checkbox { checked } => {
                if let Some(state) = patch.checked {
                    *checked = state;
                }
            }
            ElementKind::FilePicker {
                allow_multiple,
                allowed_extensions,
            } => {
                if let Some(multiple) = patch.allow_multiple {
                    *allow_multiple = multiple;
                }
                if let Some(extensions) = &patch.allowed_extensions {
                    *allowed_extensions = extensions.clone();
                }
            }
            ElementKind::Input {
                placeholder,
                label,
                password,
            } => {
                if let Some(p) = &patch.placeholder {
                    *placeholder = Some(p.clone());
                }
                if let Some(l) = &patch.label {
                    *label = Some(l.clone());
                }
                if let Some(pw) = patch.password {
                    *password = pw;
                }
            }
            ElementKind::Dropdown {
                placeholder,
                options,
            } => {
                if let Some(p) = &patch.placeholder {
                    *placeholder = Some(p.clone());
                }
                if let Some(o) = &patch.options {
                    *options = o.clone();
                }
            }
            ElementKind::Slider { label, value } => {
                if let Some(l) = &patch.label {
                    *label = Some(l.clone());
                }
                if let Some(v) = patch.value {
                    *value = Some(v);
                }
            }
            ElementKind::ProgressBar { value } => {
                if let Some(v) = patch.value {
                    *value = Some(v);
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn check_style_keys(element_type: ElementType, styles: &StyleMap) -> Result<(), ModelError> {
    match styles.keys().find(|key| !element_type.accepts_style(key)) {
        Some(key) => Err(ModelError::UnsupportedStyle {
            key: key.name().to_string(),
            element_type,
        }),
        None => Ok(()),
    }
}

/// Depth-first pre-order iterator over an element tree.
pub struct Walk<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children().iter().rev());
        Some(element)
    }
}

/// Walk a whole collection in document order.
pub fn walk_all(elements: &[Element]) -> impl Iterator<Item = &Element> {
    elements.iter().flat_map(Element::walk)
}

/// A partial update to an element. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    /// Requested type tag. Only accepted when it equals the current one.
    pub element_type: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub content: Option<String>,
    pub styles: Option<StyleMap>,
    pub checked: Option<CheckState>,
    pub allow_multiple: Option<bool>,
    pub allowed_extensions: Option<String>,
    pub placeholder: Option<String>,
    pub label: Option<String>,
    pub password: Option<bool>,
    pub options: Option<Vec<String>>,
    pub value: Option<f64>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn style(mut self, key: impl Into<StyleKey>, value: impl Into<StyleValue>) -> Self {
        self.styles.get_or_insert_with(StyleMap::new).set(key, value);
        self
    }

    pub fn checked(mut self, state: CheckState) -> Self {
        self.checked = Some(state);
        self
    }
}
