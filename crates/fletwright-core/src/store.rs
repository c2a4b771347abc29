//! In-memory designer state: the element tree, selection and canvas size.
//!
//! The store is the only place elements are mutated. It keeps ids unique
//! across the whole tree and keeps container nesting acyclic, so the code
//! generator can walk any snapshot top-down without guards.

use crate::element::{walk_all, Element, ElementPatch, ElementType};
use crate::errors::ModelError;
use crate::style::StyleMap;
use crate::types::{Dimension, ElementId, IdGenerator};
use std::collections::HashSet;

/// Size of the design canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub width: Dimension,
    pub height: Dimension,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: Dimension::Relative("100%".to_string()),
            height: Dimension::Relative("100%".to_string()),
        }
    }
}

/// Owner of the element collection.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
    selected: Option<ElementId>,
    canvas: Canvas,
    ids: IdGenerator,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an existing collection, e.g. one read from JSON.
    pub fn from_elements(elements: Vec<Element>) -> Result<Self, ModelError> {
        let mut store = Self::new();
        for element in elements {
            store.add_element(element)?;
        }
        store.selected = None;
        Ok(store)
    }

    /// Top-level elements in canvas order. This is the snapshot handed to
    /// the code generator.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn len(&self) -> usize {
        walk_all(&self.elements).count()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.find(id).is_some()
    }

    /// Find an element anywhere in the tree.
    pub fn find(&self, id: &ElementId) -> Option<&Element> {
        walk_all(&self.elements).find(|e| &e.id == id)
    }

    /// Create an element of the given type with toolbar defaults, append it
    /// and select it.
    pub fn create(&mut self, element_type: ElementType) -> ElementId {
        let mut id = self.ids.next_id();
        while self.contains(&id) {
            id = self.ids.next_id();
        }

        let element = Element::with_defaults(id.clone(), element_type);
        tracing::debug!(id = %id, element_type = %element_type, "element created");
        self.elements.push(element);
        self.selected = Some(id.clone());
        id
    }

    /// Append an element (and its subtree) at the top level and select it.
    pub fn add_element(&mut self, element: Element) -> Result<(), ModelError> {
        self.check_insertable(&element)?;
        self.selected = Some(element.id.clone());
        self.elements.push(element);
        Ok(())
    }

    /// Append an element to a container's children.
    pub fn add_child(&mut self, container: &ElementId, element: Element) -> Result<(), ModelError> {
        self.check_insertable(&element)?;
        let parent = find_mut(&mut self.elements, container)
            .ok_or_else(|| ModelError::NotFound(container.clone()))?;
        let children = parent
            .children_mut()
            .ok_or_else(|| ModelError::NotAContainer(container.clone()))?;
        children.push(element);
        Ok(())
    }

    /// Apply a partial update to the element with `id`.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> Result<(), ModelError> {
        let element =
            find_mut(&mut self.elements, id).ok_or_else(|| ModelError::NotFound(id.clone()))?;
        element.apply(patch)
    }

    /// Shallow-merge `styles` onto the element's style map.
    pub fn update_styles(&mut self, id: &ElementId, styles: StyleMap) -> Result<(), ModelError> {
        let patch = ElementPatch {
            styles: Some(styles),
            ..Default::default()
        };
        self.update_element(id, &patch)
    }

    /// Remove an element and its subtree. Clears the selection if it pointed
    /// into the removed subtree.
    pub fn remove_element(&mut self, id: &ElementId) -> Result<Element, ModelError> {
        let removed =
            remove_from(&mut self.elements, id).ok_or_else(|| ModelError::NotFound(id.clone()))?;
        if let Some(selected) = &self.selected {
            if removed.find(selected).is_some() {
                self.selected = None;
            }
        }
        tracing::debug!(id = %id, "element removed");
        Ok(removed)
    }

    pub fn select(&mut self, id: &ElementId) -> Result<(), ModelError> {
        if !self.contains(id) {
            return Err(ModelError::NotFound(id.clone()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.find(id))
    }

    /// Remove the selected element, if any.
    pub fn remove_selected(&mut self) -> Option<Element> {
        let id = self.selected.take()?;
        self.remove_element(&id).ok()
    }

    /// Merge new canvas dimensions; `None` keeps the current value.
    pub fn update_canvas(&mut self, width: Option<Dimension>, height: Option<Dimension>) {
        if let Some(width) = width {
            self.canvas.width = width;
        }
        if let Some(height) = height {
            self.canvas.height = height;
        }
    }

    /// Move an element into a container, or back to the top level when
    /// `container` is `None`. The element is appended after existing
    /// children.
    ///
    /// Rejects any move that would place a container inside itself or one
    /// of its own descendants.
    pub fn move_element(&mut self, id: &ElementId, container: Option<&ElementId>) -> Result<(), ModelError> {
        let moving = self.find(id).ok_or_else(|| ModelError::NotFound(id.clone()))?;

        if let Some(target) = container {
            if moving.find(target).is_some() {
                return Err(ModelError::CycleDetected {
                    child: id.clone(),
                    container: target.clone(),
                });
            }
            let parent = self
                .find(target)
                .ok_or_else(|| ModelError::NotFound(target.clone()))?;
            if !parent.is_container() {
                return Err(ModelError::NotAContainer(target.clone()));
            }
        }

        let element = remove_from(&mut self.elements, id).ok_or_else(|| ModelError::NotFound(id.clone()))?;
        match container {
            None => self.elements.push(element),
            Some(target) => {
                let children = find_mut(&mut self.elements, target)
                    .and_then(Element::children_mut)
                    .ok_or_else(|| ModelError::NotFound(target.clone()))?;
                children.push(element);
            }
        }
        Ok(())
    }

    fn check_insertable(&self, element: &Element) -> Result<(), ModelError> {
        let mut seen: HashSet<&ElementId> = walk_all(&self.elements).map(|e| &e.id).collect();
        for node in element.walk() {
            if !seen.insert(&node.id) {
                return Err(ModelError::DuplicateId(node.id.clone()));
            }
            node.check_styles()?;
        }
        Ok(())
    }
}

fn find_mut<'a>(elements: &'a mut [Element], id: &ElementId) -> Option<&'a mut Element> {
    for element in elements.iter_mut() {
        if &element.id == id {
            return Some(element);
        }
        if let Some(children) = element.children_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_from(elements: &mut Vec<Element>, id: &ElementId) -> Option<Element> {
    if let Some(pos) = elements.iter().position(|e| &e.id == id) {
        return Some(elements.remove(pos));
    }
    for element in elements.iter_mut() {
        if let Some(children) = element.children_mut() {
            if let Some(removed) = remove_from(children, id) {
                return Some(removed);
            }
        }
    }
    None
}
