// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for evaluation passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Registry`](crate::element::Registry) calls while evaluating. All method
//! bodies default to no-ops, so implementing only the events you care about is
//! fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`DecisionEvent`], which carries
//!   the geometry behind every per-element decision.

use crate::element::ElementId;
#[cfg(feature = "trace-rich")]
use crate::config::ViewportEdge;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when an evaluation pass starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassBeginEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Number of watched elements in the registry.
    pub watched: u32,
    /// Viewport height the pass measures against.
    pub viewport_height: f64,
}

/// Emitted whenever an element's active flag flips.
///
/// Requests that leave the flag unchanged emit nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    /// Pass during which the flip happened.
    pub pass_index: u64,
    /// Element whose flag flipped.
    pub element: ElementId,
    /// New state.
    pub active: bool,
    /// Element that propagated the change, or `None` for the decided element.
    pub originator: Option<ElementId>,
}

/// Emitted for every watched element that was measured.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Measured element.
    pub element: ElementId,
    /// Top of the element relative to the viewport.
    pub top: f64,
    /// Effective offset after element-edge adjustment.
    pub offset: f64,
    /// Viewport edge used for the comparison.
    pub viewport_edge: ViewportEdge,
    /// Outcome of the comparison.
    pub active: bool,
}

/// Per-pass summary emitted when an evaluation pass ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Pass counter.
    pub pass_index: u64,
    /// Watched elements that were measured.
    pub evaluated: u32,
    /// Persistent elements skipped because they were already active.
    pub skipped_persistent: u32,
    /// Flag flips during the pass, including ones later undone.
    pub transitions: u32,
    /// Elements that ended the pass newly active.
    pub activated: u32,
    /// Elements that ended the pass newly inactive.
    pub deactivated: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from evaluation passes.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an evaluation pass starts.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called with each per-element decision (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_decision(&mut self, e: &DecisionEvent) {
        _ = e;
    }

    /// Called whenever an active flag flips.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called when an evaluation pass ends.
    fn on_pass_end(&mut self, s: &PassSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DecisionEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn decision(&mut self, e: &DecisionEvent) {
        if let Some(s) = &mut self.sink {
            s.on_decision(e);
        }
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassSummary`].
    #[inline]
    pub fn pass_end(&mut self, s: &PassSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_pass_end(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
