// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM class management.
//!
//! Reflects [`Registry`] state onto the active class of live elements by
//! applying incremental updates from [`ActivationChanges`].
//!
//! [`Registry`]: scroll_activation_core::element::Registry
//! [`ActivationChanges`]: scroll_activation_core::element::ActivationChanges

use alloc::vec::Vec;

use scroll_activation_core::backend::Presenter;
use scroll_activation_core::element::{ActivationChanges, ElementId, Registry};
use web_sys::Element;

use crate::page::DomPage;

/// Record of which elements currently carry the active class, as far as this
/// presenter has set it.
///
/// [`plan`](Self::plan) turns a set of changes into the class edits still
/// needed, so repeated or net-zero changes never reach the DOM.
#[derive(Clone, Debug, Default)]
pub struct AppliedClasses {
    marked: Vec<bool>,
}

impl AppliedClasses {
    /// Returns whether `element` was last given the class.
    #[must_use]
    pub fn is_marked(&self, element: ElementId) -> bool {
        self.marked
            .get(element.index() as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Records `changes` and returns the `(element, add)` edits that differ
    /// from what was applied before, deactivations first.
    pub fn plan(&mut self, changes: &ActivationChanges) -> Vec<(ElementId, bool)> {
        let mut edits = Vec::new();
        let removals = changes.deactivated.iter().map(|&id| (id, false));
        let additions = changes.activated.iter().map(|&id| (id, true));
        for (id, on) in removals.chain(additions) {
            let slot = id.index() as usize;
            if self.marked.len() <= slot {
                self.marked.resize(slot + 1, false);
            }
            if self.marked[slot] != on {
                self.marked[slot] = on;
                edits.push((id, on));
            }
        }
        edits
    }
}

/// Adds and removes the active class on the elements of a [`DomPage`].
///
/// The presenter keeps its own handles to the page's elements, taken when it
/// is created. Create it after [`Registry::discover`] has interned every
/// watched element and target.
pub struct ClassPresenter {
    elements: Vec<Element>,
    active_class: &'static str,
    applied: AppliedClasses,
}

impl core::fmt::Debug for ClassPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClassPresenter")
            .field("elements_len", &self.elements.len())
            .field("active_class", &self.active_class)
            .field("applied", &self.applied)
            .finish()
    }
}

impl ClassPresenter {
    /// Creates a presenter for every element `page` has interned so far.
    #[must_use]
    pub fn new(page: &DomPage, active_class: &'static str) -> Self {
        Self {
            elements: page.elements().to_vec(),
            active_class,
            applied: AppliedClasses::default(),
        }
    }

    /// Returns the class this presenter toggles.
    #[must_use]
    pub fn active_class(&self) -> &'static str {
        self.active_class
    }

    /// Returns the presenter's record of applied classes.
    #[must_use]
    pub fn applied(&self) -> &AppliedClasses {
        &self.applied
    }
}

impl Presenter for ClassPresenter {
    fn apply(&mut self, _registry: &Registry, changes: &ActivationChanges) {
        for (id, on) in self.applied.plan(changes) {
            let Some(el) = self.elements.get(id.index() as usize) else {
                continue;
            };
            let classes = el.class_list();
            let _ = if on {
                classes.add_1(self.active_class)
            } else {
                classes.remove_1(self.active_class)
            };
        }
    }
}
