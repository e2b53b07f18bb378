// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory page and presenter doubles shared by the unit tests.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;

use crate::backend::{Geometry, Markup, Presenter};
use crate::element::{ActivationChanges, ElementId, Registry};

/// A page element with attributes and a fixed layout box.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeElement {
    watched: bool,
    attrs: Vec<(String, String)>,
    top: f64,
    height: f64,
}

impl FakeElement {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// An element carrying the watch class.
    pub(crate) fn watched() -> Self {
        Self {
            watched: true,
            ..Self::default()
        }
    }

    pub(crate) fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub(crate) fn at(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A document whose ids are insertion indices.
///
/// Selectors support `#id` only; anything else matches nothing.
#[derive(Debug, Default)]
pub(crate) struct FakePage {
    elements: Vec<FakeElement>,
}

impl FakePage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, element: FakeElement) -> ElementId {
        let id = ElementId::new(u32::try_from(self.elements.len()).unwrap());
        self.elements.push(element);
        id
    }

    pub(crate) fn set_top(&mut self, element: ElementId, top: f64) {
        self.elements[element.index() as usize].top = top;
    }

    pub(crate) fn set_height(&mut self, element: ElementId, height: f64) {
        self.elements[element.index() as usize].height = height;
    }

    fn get(&self, element: ElementId) -> &FakeElement {
        &self.elements[element.index() as usize]
    }

    fn ids_where(&self, pred: impl Fn(&FakeElement) -> bool) -> Vec<ElementId> {
        (0..self.elements.len())
            .filter(|&i| pred(&self.elements[i]))
            .map(|i| ElementId::new(u32::try_from(i).unwrap()))
            .collect()
    }
}

impl Markup for FakePage {
    fn watched_elements(&mut self) -> Vec<ElementId> {
        self.ids_where(|el| el.watched)
    }

    fn has_attribute(&self, element: ElementId, name: &str) -> bool {
        self.get(element).attribute(name).is_some()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.get(element).attribute(name).map(ToString::to_string)
    }

    fn query_selector(&mut self, selector: &str) -> Option<ElementId> {
        let id = selector.strip_prefix('#')?;
        self.ids_where(|el| el.attribute("id") == Some(id))
            .first()
            .copied()
    }

    fn elements_with_attribute(&mut self, name: &str, value: &str) -> Vec<ElementId> {
        self.ids_where(|el| el.attribute(name) == Some(value))
    }
}

impl Geometry for FakePage {
    fn client_rect(&self, element: ElementId) -> Rect {
        let el = self.get(element);
        Rect::new(0.0, el.top, 320.0, el.top + el.height)
    }

    fn offset_height(&self, element: ElementId) -> f64 {
        self.get(element).height
    }
}

/// Mirrors the active class in memory and counts class mutations.
#[derive(Debug, Default)]
pub(crate) struct RecordingPresenter {
    marked: Vec<bool>,
    mutations: usize,
}

impl RecordingPresenter {
    pub(crate) fn is_marked(&self, element: ElementId) -> bool {
        self.marked
            .get(element.index() as usize)
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn mutations(&self) -> usize {
        self.mutations
    }

    fn set(&mut self, element: ElementId, on: bool) {
        let slot = element.index() as usize;
        if self.marked.len() <= slot {
            self.marked.resize(slot + 1, false);
        }
        if self.marked[slot] != on {
            self.marked[slot] = on;
            self.mutations += 1;
        }
    }
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, _registry: &Registry, changes: &ActivationChanges) {
        for &id in &changes.deactivated {
            self.set(id, false);
        }
        for &id in &changes.activated {
            self.set(id, true);
        }
    }
}
