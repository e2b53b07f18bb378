// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM-backed markup and geometry.
//!
//! [`DomPage`] hands out [`ElementId`]s for DOM elements as they are
//! discovered and answers the core's [`Markup`] and [`Geometry`] queries
//! against the live document.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use scroll_activation_core::backend::{Geometry, Markup};
use scroll_activation_core::element::ElementId;
use scroll_activation_core::options::ActivationOptions;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement, Node};

/// Interns DOM elements as [`ElementId`]s and reads markup and layout from
/// them.
///
/// Ids are slot indices into the page's element table, assigned in the order
/// elements are first seen: watched elements first (document order), then
/// whatever selector and group lookups surface.
pub struct DomPage {
    document: Document,
    elements: Vec<Element>,
    watch_class: &'static str,
}

impl core::fmt::Debug for DomPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPage")
            .field("document", &"Document")
            .field("elements_len", &self.elements.len())
            .field("watch_class", &self.watch_class)
            .finish()
    }
}

impl DomPage {
    /// Creates a page over `document` using the watch class from `options`.
    #[must_use]
    pub fn new(document: Document, options: &ActivationOptions) -> Self {
        Self {
            document,
            elements: Vec::new(),
            watch_class: options.watch_class,
        }
    }

    /// Returns the underlying document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the DOM element for the given id, if it was handed out by this
    /// page.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index() as usize)
    }

    /// Returns every interned element, indexed by id.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns the id for `element`, assigning the next one if it is new.
    ///
    /// Lookup is a linear `isSameNode` scan, since DOM elements have no
    /// hashable identity, so discovery is quadratic in the number of
    /// interned elements.
    pub fn intern(&mut self, element: Element) -> ElementId {
        let node: &Node = element.as_ref();
        let existing = self
            .elements
            .iter()
            .position(|known| known.is_same_node(Some(node)));
        let idx = existing.unwrap_or_else(|| {
            self.elements.push(element);
            self.elements.len() - 1
        });
        #[expect(
            clippy::cast_possible_truncation,
            reason = "element count of a page fits in u32"
        )]
        ElementId::new(idx as u32)
    }
}

impl Markup for DomPage {
    fn watched_elements(&mut self) -> Vec<ElementId> {
        let collection = self.document.get_elements_by_class_name(self.watch_class);
        // Snapshot first; the collection is live.
        let found: Vec<Element> = (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect();
        found.into_iter().map(|el| self.intern(el)).collect()
    }

    fn has_attribute(&self, element: ElementId, name: &str) -> bool {
        self.element(element)
            .is_some_and(|el| el.has_attribute(name))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn query_selector(&mut self, selector: &str) -> Option<ElementId> {
        // Invalid selectors throw; treat them as matching nothing.
        let found = self.document.query_selector(selector).ok().flatten()?;
        Some(self.intern(found))
    }

    fn elements_with_attribute(&mut self, name: &str, value: &str) -> Vec<ElementId> {
        // Compare values here rather than in the selector so group ids need no
        // CSS escaping.
        let Ok(list) = self.document.query_selector_all(&format!("[{name}]")) else {
            return Vec::new();
        };
        let found: Vec<Element> = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter(|el| el.get_attribute(name).as_deref() == Some(value))
            .collect();
        found.into_iter().map(|el| self.intern(el)).collect()
    }
}

impl Geometry for DomPage {
    fn client_rect(&self, element: ElementId) -> Rect {
        let Some(el) = self.element(element) else {
            return Rect::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        };
        let r = el.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn offset_height(&self, element: ElementId) -> f64 {
        let Some(el) = self.element(element) else {
            return f64::NAN;
        };
        match el.dyn_ref::<HtmlElement>() {
            Some(html) => f64::from(html.offset_height()),
            // SVG and other non-HTML elements have no offset box.
            None => el.get_bounding_client_rect().height(),
        }
    }
}
