// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element activation configuration and its resolver.
//!
//! [`resolve`] reads the [`attr`] attributes of a watched element once, at
//! setup time, and produces an immutable [`Configuration`]. Resolution is
//! permissive: a selector that matches nothing degrades to a zero offset, and
//! an element without group members activates only itself.

use alloc::vec::Vec;

use crate::backend::Markup;
use crate::element::ElementId;

/// Markup attribute names read by [`resolve`].
pub mod attr {
    /// Group id. Elements sharing a value with a watched element mirror its
    /// state.
    pub const TARGET: &str = "data-target";
    /// Presence makes the element persistent.
    pub const KEEP_ACTIVE: &str = "data-keep-this-active";
    /// Presence measures against the top of the viewport.
    pub const VIEWPORT_AT_TOP: &str = "data-activate-viewport-at-top";
    /// Presence measures the bottom edge of the element.
    pub const THIS_AT_BOTTOM: &str = "data-activate-this-at-bottom";
    /// Pixel count or selector of an element whose height is the offset.
    pub const MANUAL_OFFSET: &str = "data-manual-offset";
}

/// Which viewport edge activation is measured against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewportEdge {
    /// Active once the measured edge reaches the top of the viewport.
    Top,
    /// Active once the measured edge enters from the bottom of the viewport.
    #[default]
    Bottom,
}

/// Which edge of the watched element is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementEdge {
    /// The element's top edge.
    #[default]
    Top,
    /// The element's bottom edge.
    Bottom,
}

/// Threshold adjustment applied before comparing against the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Offset {
    /// No adjustment.
    #[default]
    None,
    /// A fixed number of pixels.
    Fixed(f64),
    /// The live offset height of another element (e.g. a sticky header).
    ElementHeight(ElementId),
}

/// Resolved activation settings of a watched element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Configuration {
    /// Viewport edge the element is measured against.
    pub viewport_edge: ViewportEdge,
    /// Element edge that is measured.
    pub element_edge: ElementEdge,
    /// Threshold adjustment.
    pub offset: Offset,
    /// Once active, never deactivate.
    pub persistent: bool,
    /// Elements sharing this element's group id, excluding itself, in
    /// document order.
    pub linked_targets: Vec<ElementId>,
}

/// Reads the activation attributes of `element`.
///
/// Runs once per watched element. The only effect on `markup` is that
/// elements surfaced by selector and group lookups get ids.
pub fn resolve<M: Markup + ?Sized>(markup: &mut M, element: ElementId) -> Configuration {
    let offset = match markup.attribute(element, attr::MANUAL_OFFSET) {
        Some(value) => resolve_offset(markup, &value),
        None => Offset::None,
    };

    let linked_targets = match markup.attribute(element, attr::TARGET) {
        Some(group) => markup
            .elements_with_attribute(attr::TARGET, &group)
            .into_iter()
            .filter(|&target| target != element)
            .collect(),
        None => Vec::new(),
    };

    Configuration {
        viewport_edge: if markup.has_attribute(element, attr::VIEWPORT_AT_TOP) {
            ViewportEdge::Top
        } else {
            ViewportEdge::Bottom
        },
        element_edge: if markup.has_attribute(element, attr::THIS_AT_BOTTOM) {
            ElementEdge::Bottom
        } else {
            ElementEdge::Top
        },
        offset,
        persistent: markup.has_attribute(element, attr::KEEP_ACTIVE),
        linked_targets,
    }
}

fn resolve_offset<M: Markup + ?Sized>(markup: &mut M, value: &str) -> Offset {
    if let Some(px) = parse_pixels(value) {
        return Offset::Fixed(px);
    }
    markup
        .query_selector(value)
        .map_or(Offset::None, Offset::ElementHeight)
}

/// Parses an offset attribute as a pixel count.
///
/// Blank values count as zero. Only finite decimal numbers (optionally with
/// an exponent) are pixel counts; `inf`, `NaN`, hex like `0x10`, and unit
/// suffixes are not, and are treated as a selector by the caller.
#[must_use]
pub fn parse_pixels(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|px| px.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{FakeElement, FakePage};

    #[test]
    fn defaults_without_attributes() {
        let mut page = FakePage::new();
        let el = page.push(FakeElement::watched());

        let config = resolve(&mut page, el);
        assert_eq!(config, Configuration::default());
        assert_eq!(config.viewport_edge, ViewportEdge::Bottom);
        assert_eq!(config.element_edge, ElementEdge::Top);
    }

    #[test]
    fn flag_attributes_are_presence_only() {
        let mut page = FakePage::new();
        let el = page.push(
            FakeElement::watched()
                .attr(attr::KEEP_ACTIVE, "false")
                .attr(attr::VIEWPORT_AT_TOP, "")
                .attr(attr::THIS_AT_BOTTOM, ""),
        );

        let config = resolve(&mut page, el);
        assert!(config.persistent);
        assert_eq!(config.viewport_edge, ViewportEdge::Top);
        assert_eq!(config.element_edge, ElementEdge::Bottom);
    }

    #[test]
    fn numeric_offset_is_fixed_pixels() {
        let mut page = FakePage::new();
        let el = page.push(FakeElement::watched().attr(attr::MANUAL_OFFSET, " 120 "));

        assert_eq!(resolve(&mut page, el).offset, Offset::Fixed(120.0));
    }

    #[test]
    fn selector_offset_tracks_matched_element() {
        let mut page = FakePage::new();
        let header = page.push(FakeElement::new().attr("id", "header"));
        let el = page.push(FakeElement::watched().attr(attr::MANUAL_OFFSET, "#header"));

        assert_eq!(resolve(&mut page, el).offset, Offset::ElementHeight(header));
    }

    #[test]
    fn unmatched_selector_falls_back_to_zero() {
        let mut page = FakePage::new();
        let el = page.push(FakeElement::watched().attr(attr::MANUAL_OFFSET, "#missing"));

        assert_eq!(resolve(&mut page, el).offset, Offset::None);
    }

    #[test]
    fn linked_targets_share_group_and_exclude_self() {
        let mut page = FakePage::new();
        let nav = page.push(FakeElement::new().attr(attr::TARGET, "nav1"));
        let el = page.push(FakeElement::watched().attr(attr::TARGET, "nav1"));
        let _other = page.push(FakeElement::new().attr(attr::TARGET, "nav2"));
        let mirror = page.push(FakeElement::new().attr(attr::TARGET, "nav1"));

        let config = resolve(&mut page, el);
        assert_eq!(config.linked_targets, [nav, mirror]);
    }

    #[test]
    fn lone_group_member_has_no_targets() {
        let mut page = FakePage::new();
        let el = page.push(FakeElement::watched().attr(attr::TARGET, "solo"));

        assert!(resolve(&mut page, el).linked_targets.is_empty());
    }

    #[test]
    fn parse_pixels_accepts_numbers_only() {
        assert_eq!(parse_pixels(""), Some(0.0));
        assert_eq!(parse_pixels("-40.5"), Some(-40.5));
        assert_eq!(parse_pixels("1e2"), Some(100.0));
        assert_eq!(parse_pixels("NaN"), None);
        assert_eq!(parse_pixels("12px"), None);
        assert_eq!(parse_pixels(".site-header"), None);
    }

    #[test]
    fn parse_pixels_rejects_non_decimal_numbers() {
        assert_eq!(parse_pixels("inf"), None);
        assert_eq!(parse_pixels("-Infinity"), None);
        assert_eq!(parse_pixels("0x10"), None);
        assert_eq!(parse_pixels("1e400"), None);
    }
}
