//! Error types for the element model.

use crate::element::ElementType;
use crate::types::ElementId;
use thiserror::Error;

/// Errors raised by [`ElementStore`](crate::store::ElementStore) mutations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Element id '{0}' is already in use")]
    DuplicateId(ElementId),

    #[error("No element with id '{0}'")]
    NotFound(ElementId),

    #[error("Element '{0}' is not a container")]
    NotAContainer(ElementId),

    #[error("Moving '{child}' into '{container}' would make a container its own descendant")]
    CycleDetected {
        child: ElementId,
        container: ElementId,
    },

    #[error("Style '{key}' is not supported on {element_type} elements")]
    UnsupportedStyle {
        key: String,
        element_type: ElementType,
    },

    #[error("Element '{id}' is a {current}; its type cannot change to {requested}")]
    TypeChange {
        id: ElementId,
        current: ElementType,
        requested: String,
    },
}

/// A field value that was replaced by its default.
///
/// Neither the reader nor the generator fails on bad data; every
/// substitution is recorded as one of these instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Degradation {
    #[error("element '{element}': field '{field}' has malformed value {value}, using default")]
    MalformedField {
        element: ElementId,
        field: String,
        value: String,
    },

    #[error("element '{element}': '{value}' is not a known {field} option, using default")]
    UnknownOption {
        element: ElementId,
        field: String,
        value: String,
    },

    #[error("element '{element}': unknown element type '{type_name}', emitting a placeholder")]
    UnknownElementType {
        element: ElementId,
        type_name: String,
    },

    #[error("input is not an element list: {0}")]
    InvalidDocument(String),
}

impl Degradation {
    pub fn malformed(element: &ElementId, field: impl Into<String>, value: impl ToString) -> Self {
        Self::MalformedField {
            element: element.clone(),
            field: field.into(),
            value: value.to_string(),
        }
    }

    pub fn unknown_option(element: &ElementId, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownOption {
            element: element.clone(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Element the degradation belongs to, if any.
    pub fn element(&self) -> Option<&ElementId> {
        match self {
            Self::MalformedField { element, .. }
            | Self::UnknownOption { element, .. }
            | Self::UnknownElementType { element, .. } => Some(element),
            Self::InvalidDocument(_) => None,
        }
    }
}
