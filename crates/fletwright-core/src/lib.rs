//! Element model for the fletwright layout designer.
//!
//! This crate provides the types shared by the designer and the code
//! generator:
//! - [`Element`] and its type-specific [`ElementKind`]
//! - typed style maps ([`StyleMap`], [`StyleKey`], [`StyleValue`])
//! - lenient reading of editor JSON ([`parse`])
//! - the [`ElementStore`] state container that enforces id uniqueness,
//!   shallow style merges and acyclic container nesting

pub mod element;
pub mod errors;
pub mod parse;
pub mod store;
pub mod style;
pub mod types;

pub use element::{walk_all, Element, ElementKind, ElementPatch, ElementType, Walk};
pub use errors::{Degradation, ModelError};
pub use parse::{elements_from_str, elements_from_value, Parsed};
pub use store::{Canvas, ElementStore};
pub use style::{StyleKey, StyleMap, StyleValue};
pub use types::{CheckState, Dimension, ElementId, IdGenerator};
