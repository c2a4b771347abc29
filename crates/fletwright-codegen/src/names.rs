//! Identifier allocation for hoisted declarations.
//!
//! Buttons get a click handler and file pickers get a dialog, a result
//! callback and a status text, all declared at the top of `main` before the
//! control tree is added to the page.

use crate::options::DEFAULT_HANDLER_PREFIX;
use crate::python;
use convert_case::{Case, Casing};
use fletwright_core::{walk_all, Element, ElementId, ElementKind};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Identifiers declared for one file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerNames {
    /// The `ft.FilePicker` control.
    pub dialog: String,
    /// The `on_result` callback.
    pub result: String,
    /// The `ft.Text` showing the chosen file names.
    pub status: String,
}

/// All identifiers allocated for one document, in allocation order.
#[derive(Debug, Clone, Default)]
pub struct Names {
    handlers: IndexMap<ElementId, String>,
    pickers: IndexMap<ElementId, PickerNames>,
}

impl Names {
    /// Walk `elements` depth-first and allocate names for every button and
    /// file picker, container children included.
    pub fn allocate(elements: &[Element], handler_prefix: &str) -> Self {
        let mut allocator = NameAllocator::default();
        let handler_stem = handler_stem(handler_prefix);
        let mut names = Names::default();

        for element in walk_all(elements) {
            match element.kind {
                ElementKind::Button => {
                    if !names.handlers.contains_key(&element.id) {
                        let name = allocator.fresh(&handler_stem);
                        names.handlers.insert(element.id.clone(), name);
                    }
                }
                ElementKind::FilePicker { .. } => {
                    if !names.pickers.contains_key(&element.id) {
                        let picker = PickerNames {
                            dialog: allocator.fresh("pick_files_dialog"),
                            result: allocator.fresh("pick_files_result"),
                            status: allocator.fresh("selected_files"),
                        };
                        names.pickers.insert(element.id.clone(), picker);
                    }
                }
                _ => {}
            }
        }

        names
    }

    pub fn handler(&self, id: &ElementId) -> Option<&str> {
        self.handlers.get(id).map(String::as_str)
    }

    pub fn picker(&self, id: &ElementId) -> Option<&PickerNames> {
        self.pickers.get(id)
    }

    pub fn handlers(&self) -> impl Iterator<Item = &str> {
        self.handlers.values().map(String::as_str)
    }

    pub fn pickers(&self) -> impl Iterator<Item = &PickerNames> {
        self.pickers.values()
    }

    /// Every allocated identifier.
    pub fn all(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self.handlers().collect();
        for picker in self.pickers() {
            all.extend([
                picker.dialog.as_str(),
                picker.result.as_str(),
                picker.status.as_str(),
            ]);
        }
        all
    }
}

/// Normalize a configured handler prefix to a snake_case identifier.
pub fn handler_stem(prefix: &str) -> String {
    let stem = prefix.trim().to_case(Case::Snake);
    if python::is_identifier(&stem) {
        stem
    } else {
        tracing::warn!(prefix, "handler prefix is not a usable identifier, using default");
        DEFAULT_HANDLER_PREFIX.to_string()
    }
}

/// Per-stem counters plus the set of every name handed out.
#[derive(Debug, Default)]
struct NameAllocator {
    counters: HashMap<String, usize>,
    used: HashSet<String>,
}

impl NameAllocator {
    fn fresh(&mut self, stem: &str) -> String {
        let counter = self.counters.entry(stem.to_string()).or_insert(0);
        loop {
            let candidate = format!("{}_{}", stem, counter);
            *counter += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
