// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side-table storage for watched elements, linked targets, and propagation.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::backend::Markup;
use crate::config::{self, Configuration};
use crate::dirty;
use crate::trace::{TransitionEvent, Tracer};

use super::id::ElementId;

/// Side table mapping [`ElementId`] slots to configuration and active state.
///
/// Built once at initialization (usually with [`discover`](Self::discover))
/// and then passed explicitly to every [`evaluate`](Self::evaluate) call.
#[derive(Debug)]
pub struct Registry {
    // -- Per-slot state --
    pub(crate) config: Vec<Option<Configuration>>,
    pub(crate) active: Vec<bool>,
    /// Last state surfaced through `ActivationChanges`.
    pub(crate) reported: Vec<bool>,

    // -- Watch list, in discovery order --
    pub(crate) watched: Vec<ElementId>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Propagation scratch --
    /// Slot stamps: equal to `epoch` once visited by the current `set_state`.
    pub(crate) visited: Vec<u64>,
    pub(crate) epoch: u64,
    pub(crate) pending: Vec<(ElementId, Option<ElementId>)>,

    // -- Pass bookkeeping --
    pub(crate) pass_index: u64,
    pub(crate) pass_transitions: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Vec::new(),
            active: Vec::new(),
            reported: Vec::new(),
            watched: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            visited: Vec::new(),
            epoch: 0,
            pending: Vec::new(),
            pass_index: 0,
            pass_transitions: 0,
        }
    }

    /// Scans `markup` for watched elements and resolves each one's
    /// configuration, in document order.
    ///
    /// An empty result means there is nothing to drive; backends should not
    /// start listening in that case.
    pub fn discover<M: Markup + ?Sized>(markup: &mut M) -> Self {
        let mut registry = Self::new();
        for element in markup.watched_elements() {
            if registry.is_watched(element) {
                continue;
            }
            let config = config::resolve(markup, element);
            registry.watch(element, config);
        }
        registry
    }

    // -- Registration API --

    /// Registers `element` as watched with an already resolved configuration.
    ///
    /// Slots are created for the element and for each of its linked targets.
    ///
    /// # Panics
    ///
    /// Panics if `element` is already watched.
    pub fn watch(&mut self, element: ElementId, config: Configuration) {
        assert!(!self.is_watched(element), "element is already watched");
        self.ensure_slot(element);
        for &target in &config.linked_targets {
            self.ensure_slot(target);
        }
        self.config[element.idx as usize] = Some(config);
        self.watched.push(element);
    }

    /// Grows the per-slot arrays so that `element` has a slot.
    fn ensure_slot(&mut self, element: ElementId) {
        let len = element.idx as usize + 1;
        if self.active.len() < len {
            self.config.resize_with(len, || None);
            self.active.resize(len, false);
            self.reported.resize(len, false);
            self.visited.resize(len, 0);
        }
    }

    // -- Queries --

    /// Returns whether `element` has a slot in this registry.
    #[must_use]
    pub fn contains(&self, element: ElementId) -> bool {
        (element.idx as usize) < self.active.len()
    }

    /// Returns whether `element` is watched.
    #[must_use]
    pub fn is_watched(&self, element: ElementId) -> bool {
        self.config
            .get(element.idx as usize)
            .is_some_and(Option::is_some)
    }

    /// Returns the watched elements in discovery order.
    #[must_use]
    pub fn watched(&self) -> &[ElementId] {
        &self.watched
    }

    /// Returns the number of watched elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    /// Returns `true` if nothing is watched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Returns the configuration of a watched element.
    ///
    /// # Panics
    ///
    /// Panics if `element` has no slot.
    #[must_use]
    pub fn config(&self, element: ElementId) -> Option<&Configuration> {
        self.validate(element);
        self.config[element.idx as usize].as_ref()
    }

    /// Returns whether `element` is currently active.
    ///
    /// # Panics
    ///
    /// Panics if `element` has no slot.
    #[must_use]
    pub fn is_active(&self, element: ElementId) -> bool {
        self.validate(element);
        self.active[element.idx as usize]
    }

    /// Returns the number of evaluation passes run so far.
    #[must_use]
    pub fn pass_index(&self) -> u64 {
        self.pass_index
    }

    // -- State transitions --

    /// Sets the active state of `element` and propagates it to its linked
    /// targets.
    ///
    /// Requests matching the current flag do not mark anything, but still
    /// propagate so targets that drifted are brought back in line. The
    /// `originator` is never entered, and no element is processed twice in
    /// one call, so symmetric or cyclic target graphs terminate. Targets that
    /// are themselves watched pass the state on to their own targets.
    ///
    /// An active persistent element refuses deactivation, whether requested
    /// directly or through propagation, and does not pass it on.
    ///
    /// # Panics
    ///
    /// Panics if `element` has no slot.
    pub fn set_state(&mut self, element: ElementId, active: bool, originator: Option<ElementId>) {
        self.set_state_traced(element, active, originator, &mut Tracer::none());
    }

    /// Like [`set_state`](Self::set_state), emitting a
    /// [`TransitionEvent`] for every flipped flag.
    pub fn set_state_traced(
        &mut self,
        element: ElementId,
        active: bool,
        originator: Option<ElementId>,
        tracer: &mut Tracer<'_>,
    ) {
        self.validate(element);
        self.epoch += 1;
        let epoch = self.epoch;

        let mut pending = core::mem::take(&mut self.pending);
        pending.push((element, originator));
        while let Some((id, from)) = pending.pop() {
            let idx = id.idx as usize;
            if from == Some(id) || self.visited[idx] == epoch {
                continue;
            }
            self.visited[idx] = epoch;

            if !active && self.active[idx] && self.is_persistent_at(idx) {
                continue;
            }

            if self.active[idx] != active {
                self.active[idx] = active;
                self.dirty.mark(id.idx, dirty::ACTIVE);
                self.pass_transitions += 1;
                tracer.transition(&TransitionEvent {
                    pass_index: self.pass_index,
                    element: id,
                    active,
                    originator: from,
                });
            }

            // Reverse push keeps targets in document order.
            if let Some(config) = &self.config[idx] {
                for &target in config.linked_targets.iter().rev() {
                    pending.push((target, Some(id)));
                }
            }
        }
        self.pending = pending;
    }

    fn is_persistent_at(&self, idx: usize) -> bool {
        self.config[idx]
            .as_ref()
            .is_some_and(|config| config.persistent)
    }

    /// Panics if `element` has no slot.
    fn validate(&self, element: ElementId) {
        assert!(
            self.contains(element),
            "{element:?} is not registered (slot count {})",
            self.active.len()
        );
    }
}
