// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Evaluation passes and change reporting.
//!
//! A pass walks the watched elements in discovery order. For each one:
//!
//! 1. **Persistent short-circuit** — a persistent element that is already
//!    active is skipped without any geometry read.
//! 2. **Measure** — read the element's client top, the offset element's live
//!    height if any, and (for bottom-edge elements) the element's own live
//!    height. See [`Decision::measure`].
//! 3. **Decide** — compare against the top or bottom viewport edge.
//! 4. **Transition** — [`set_state`](super::Registry::set_state) applies the
//!    outcome and propagates it before the next element is measured.
//!
//! Finally the [`ACTIVE`](crate::dirty::ACTIVE) channel is drained into
//! [`ActivationChanges`]. Only elements whose flag differs from the last
//! report are listed, so a target flipped on and back off within one pass
//! produces no change.

use alloc::vec::Vec;

use crate::backend::Geometry;
use crate::config::{Configuration, ElementEdge, Offset, ViewportEdge};
use crate::dirty;
#[cfg(feature = "trace-rich")]
use crate::trace::DecisionEvent;
use crate::trace::{PassBeginEvent, PassSummary, Tracer};

use super::id::ElementId;
use super::registry::Registry;

/// The set of changes produced by a single [`Registry::evaluate`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivationChanges {
    /// Elements that became active, in ascending id order.
    pub activated: Vec<ElementId>,
    /// Elements that became inactive, in ascending id order.
    pub deactivated: Vec<ElementId>,
    /// Persistent elements skipped because they were already active.
    pub skipped_persistent: u32,
    /// Flag flips during the pass, including ones later undone.
    pub transitions: u32,
}

impl ActivationChanges {
    /// Clears all change lists and counters.
    pub fn clear(&mut self) {
        self.activated.clear();
        self.deactivated.clear();
        self.skipped_persistent = 0;
        self.transitions = 0;
    }

    /// Returns `true` if no element changed state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }
}

/// The measurements behind one activation decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    /// Top of the element relative to the viewport.
    pub top: f64,
    /// Effective offset, already shifted for bottom-edge elements.
    pub offset: f64,
    /// Viewport height at the time of the decision.
    pub viewport_height: f64,
    /// Viewport edge the comparison uses.
    pub viewport_edge: ViewportEdge,
}

impl Decision {
    /// Takes live measurements for `element` under `config`.
    #[must_use]
    pub fn measure<G: Geometry + ?Sized>(
        config: &Configuration,
        element: ElementId,
        geometry: &G,
        viewport_height: f64,
    ) -> Self {
        let top = geometry.client_rect(element).y0;
        let base = match config.offset {
            Offset::None => 0.0,
            Offset::Fixed(px) => px,
            Offset::ElementHeight(reference) => geometry.offset_height(reference),
        };
        let offset = match config.element_edge {
            ElementEdge::Top => base,
            ElementEdge::Bottom => base - geometry.offset_height(element),
        };
        Self {
            top,
            offset,
            viewport_height,
            viewport_edge: config.viewport_edge,
        }
    }

    /// Returns whether the element should be active.
    ///
    /// A NaN anywhere in the measurements yields `false`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self.viewport_edge {
            ViewportEdge::Top => self.top <= self.offset,
            ViewportEdge::Bottom => self.top - self.offset < self.viewport_height,
        }
    }
}

impl Registry {
    /// Runs one evaluation pass and returns the resulting changes.
    ///
    /// Cost is linear in the number of watched elements and their targets;
    /// nothing accumulates across calls.
    pub fn evaluate<G: Geometry + ?Sized>(
        &mut self,
        geometry: &G,
        viewport_height: f64,
    ) -> ActivationChanges {
        let mut changes = ActivationChanges::default();
        self.evaluate_into(geometry, viewport_height, &mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into<G: Geometry + ?Sized>(
        &mut self,
        geometry: &G,
        viewport_height: f64,
        changes: &mut ActivationChanges,
    ) {
        self.evaluate_traced(geometry, viewport_height, changes, &mut Tracer::none());
    }

    /// Like [`evaluate_into`](Self::evaluate_into), reporting the pass to
    /// `tracer`.
    pub fn evaluate_traced<G: Geometry + ?Sized>(
        &mut self,
        geometry: &G,
        viewport_height: f64,
        changes: &mut ActivationChanges,
        tracer: &mut Tracer<'_>,
    ) {
        changes.clear();
        self.pass_index += 1;
        self.pass_transitions = 0;

        #[expect(
            clippy::cast_possible_truncation,
            reason = "watched element count of a page fits in u32"
        )]
        let watched = self.watched.len() as u32;
        tracer.pass_begin(&PassBeginEvent {
            pass_index: self.pass_index,
            watched,
            viewport_height,
        });

        let mut evaluated = 0;
        for i in 0..self.watched.len() {
            let element = self.watched[i];
            let idx = element.idx as usize;
            let Some(config) = &self.config[idx] else {
                continue;
            };

            if config.persistent && self.active[idx] {
                changes.skipped_persistent += 1;
                continue;
            }

            let decision = Decision::measure(config, element, geometry, viewport_height);
            let active = decision.is_active();
            evaluated += 1;

            #[cfg(feature = "trace-rich")]
            tracer.decision(&DecisionEvent {
                pass_index: self.pass_index,
                element,
                top: decision.top,
                offset: decision.offset,
                viewport_edge: decision.viewport_edge,
                active,
            });

            self.set_state_traced(element, active, None, tracer);
        }

        changes.transitions = self.pass_transitions;
        self.drain_changes(changes);

        #[expect(
            clippy::cast_possible_truncation,
            reason = "change counts are bounded by the slot count"
        )]
        tracer.pass_end(&PassSummary {
            pass_index: self.pass_index,
            evaluated,
            skipped_persistent: changes.skipped_persistent,
            transitions: changes.transitions,
            activated: changes.activated.len() as u32,
            deactivated: changes.deactivated.len() as u32,
        });
    }

    /// Drains the ACTIVE channel, appending every element whose flag differs
    /// from the last report.
    ///
    /// Flips made through [`set_state`](Self::set_state) outside a pass are
    /// picked up by the next call.
    pub fn drain_changes(&mut self, changes: &mut ActivationChanges) {
        let flipped: Vec<u32> = self
            .dirty
            .drain(dirty::ACTIVE)
            .deterministic()
            .run()
            .collect();
        for idx in flipped {
            let slot = idx as usize;
            let now = self.active[slot];
            if now == self.reported[slot] {
                continue;
            }
            self.reported[slot] = now;
            let id = ElementId::new(idx);
            if now {
                changes.activated.push(id);
            } else {
                changes.deactivated.push(id);
            }
        }
        changes.activated.sort_unstable();
        changes.deactivated.sort_unstable();
    }
}
