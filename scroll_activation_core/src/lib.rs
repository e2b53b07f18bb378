// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-position driven activation with linked-target propagation.
//!
//! `scroll_activation_core` decides, for every watched page element, whether
//! it is "active" given the current scroll geometry, and mirrors that binary
//! state onto linked target elements (a scroll-spy navigation highlight, for
//! instance). It is `no_std` compatible (with `alloc`) and knows nothing about
//! any particular document model: markup, geometry, and presentation are
//! supplied through the traits in [`backend`].
//!
//! # Architecture
//!
//! ```text
//!   Markup (attributes)
//!       │
//!       ▼
//!   Registry::discover() ──► config::resolve() per watched element
//!       │
//!       ▼
//!   scroll signal / startup timer
//!       │
//!       ▼
//!   Registry::evaluate(geometry, viewport_height) ──► ActivationChanges
//!                                                          │
//!                                                          ▼
//!                                                 Presenter::apply()
//! ```
//!
//! **[`config`]** — Per-element [`Configuration`](config::Configuration)
//! resolved once from markup attributes: viewport edge, element edge, offset,
//! persistence, and linked targets.
//!
//! **[`element`]** — The [`Registry`](element::Registry) side table keyed by
//! [`ElementId`](element::ElementId), the activation decision, and
//! propagation through linked targets.
//!
//! **[`dirty`]** — Dirty channel used to report only the elements whose
//! state actually flipped.
//!
//! **[`backend`]** — The [`Markup`](backend::Markup),
//! [`Geometry`](backend::Geometry), and [`Presenter`](backend::Presenter)
//! traits that host integrations implement.
//!
//! **[`options`]** — Page-wide marker classes and startup delay.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! pass instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-element
//!   decision events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod dirty;
pub mod element;
pub mod options;
pub mod trace;

#[cfg(test)]
mod fixture;
