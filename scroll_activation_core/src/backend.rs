// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for page integrations.
//!
//! The core never touches a document directly. Each backend provides the
//! following pieces:
//!
//! - **Markup** — Implements [`Markup`] so the
//!   [resolver](crate::config::resolve) can read activation attributes, run
//!   selector lookups, and find group members. The markup side also interns
//!   element identity: every element it reports gets a stable [`ElementId`].
//!
//! - **Geometry** — Implements [`Geometry`] for live layout reads (client
//!   rectangle and offset height). The viewport height is passed to
//!   [`Registry::evaluate`] alongside it.
//!
//! - **Trigger source** — Calls [`Registry::evaluate`] once after the startup
//!   delay and once per scroll signal. This is backend-specific and not
//!   abstracted by a trait because event registration differs fundamentally
//!   across hosts.
//!
//! - **Presenter** — Implements the [`Presenter`] trait to reflect
//!   [`ActivationChanges`] as a class on the native elements.
//!
//! # Crate boundaries
//!
//! `scroll_activation_core` owns the data model, resolution, evaluation, and
//! this contract module. Backend crates depend on it and provide host glue.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::element::{ActivationChanges, ElementId, Registry};

/// Read access to element attributes and document queries.
///
/// Query methods take `&mut self` because resolving a selector may surface an
/// element the page has not handed out an id for yet.
pub trait Markup {
    /// Returns every element carrying the watch marker, in document order.
    fn watched_elements(&mut self) -> Vec<ElementId>;

    /// Returns whether `element` carries the attribute `name`.
    fn has_attribute(&self, element: ElementId, name: &str) -> bool;

    /// Returns the value of attribute `name` on `element`, if present.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Returns the first element matching `selector`.
    ///
    /// Invalid selectors match nothing.
    fn query_selector(&mut self, selector: &str) -> Option<ElementId>;

    /// Returns every element whose attribute `name` equals `value`, in
    /// document order.
    fn elements_with_attribute(&mut self, name: &str, value: &str) -> Vec<ElementId>;
}

/// Live layout reads.
///
/// Both methods are called on every evaluation, so implementations should not
/// cache across calls.
pub trait Geometry {
    /// Returns the element's bounding rectangle relative to the viewport.
    fn client_rect(&self, element: ElementId) -> Rect;

    /// Returns the element's rendered height, including borders and padding.
    fn offset_height(&self, element: ElementId) -> f64;
}

/// Applies activation changes to a native presentation tree.
///
/// Both DOM-based presenters and test doubles implement this trait.
///
/// # Trigger pseudocode
///
/// A typical scroll callback wires the pieces together like this:
///
/// ```rust,ignore
/// fn on_scroll() {
///     let changes = registry.evaluate(&page, viewport_height());
///     presenter.apply(&registry, &changes);
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`ActivationChanges`], reading current state from
    /// `registry` as needed.
    ///
    /// Implementations must not issue a mutation for an element whose
    /// presented state already matches.
    fn apply(&mut self, registry: &Registry, changes: &ActivationChanges);
}
