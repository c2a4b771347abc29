//! Flet code generation for fletwright layouts.
//!
//! Turns an ordered element collection into a runnable Python program that
//! uses the Flet UI framework. Generation is total: malformed fields fall
//! back to defaults, and every fallback is reported as a
//! [`Degradation`] by [`FletGenerator::generate_with_report`].
//!
//! ```
//! use fletwright_codegen::generate;
//! use fletwright_core::{Element, ElementKind};
//!
//! let hello = Element::new("t1", ElementKind::Text).with_content("Hi");
//! let source = generate(&[hello]);
//! assert!(source.contains("ft.Text("));
//! ```

pub mod document;
mod emit;
pub mod names;
pub mod options;
pub mod python;

pub use document::MINIMAL_DOCUMENT;
pub use emit::{base64_payload, parse_extensions};
pub use names::{Names, PickerNames};
pub use options::GeneratorOptions;

use emit::Emitter;
use fletwright_core::{parse, Degradation, Element};
use serde_json::Value;

/// Generated source plus every substitution made while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub source: String,
    pub degradations: Vec<Degradation>,
}

/// Flet code generator.
///
/// Holds only options; each call allocates its own names, so one generator
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FletGenerator {
    options: GeneratorOptions,
}

impl FletGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn generate(&self, elements: &[Element]) -> String {
        self.generate_with_report(elements).source
    }

    pub fn generate_json(&self, value: &Value) -> String {
        self.generate_json_with_report(value).source
    }

    pub fn generate_with_report(&self, elements: &[Element]) -> Generated {
        if elements.is_empty() {
            return Generated {
                source: document::minimal_document(self.options.title.as_deref()),
                degradations: Vec::new(),
            };
        }

        let names = Names::allocate(elements, &self.options.handler_prefix);
        let mut emitter = Emitter::new(&names, &self.options);
        let controls = elements
            .iter()
            .map(|element| emitter.emit(element).into())
            .collect();
        let degradations = emitter.into_degradations();
        let source = document::compose(self.options.title.as_deref(), &names, controls);

        tracing::debug!(
            elements = elements.len(),
            handlers = names.handlers().count(),
            pickers = names.pickers().count(),
            degradations = degradations.len(),
            "generated flet document"
        );
        for degradation in &degradations {
            tracing::warn!("{}", degradation);
        }

        Generated {
            source,
            degradations,
        }
    }

    /// Generate from editor JSON: an element array, or an object with an
    /// `elements` array. Anything else yields the minimal document.
    pub fn generate_json_with_report(&self, value: &Value) -> Generated {
        let Some(parsed) = parse::elements_from_value(value) else {
            let mut degradations = Vec::new();
            if !value.is_null() {
                let found = json_kind(value);
                tracing::warn!(found, "input is not an element list, emitting minimal document");
                degradations.push(Degradation::InvalidDocument(format!(
                    "expected an array of elements, found {}",
                    found
                )));
            }
            return Generated {
                source: document::minimal_document(self.options.title.as_deref()),
                degradations,
            };
        };

        for degradation in &parsed.degradations {
            tracing::warn!("{}", degradation);
        }
        let mut generated = self.generate_with_report(&parsed.elements);
        let mut degradations = parsed.degradations;
        degradations.append(&mut generated.degradations);
        generated.degradations = degradations;
        generated
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

/// Generate with default options.
pub fn generate(elements: &[Element]) -> String {
    FletGenerator::default().generate(elements)
}

/// Generate from editor JSON with default options.
pub fn generate_from_json(value: &Value) -> String {
    FletGenerator::default().generate_json(value)
}
