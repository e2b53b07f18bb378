// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element registry and activation engine.
//!
//! Every element the engine knows about occupies a slot in the [`Registry`]
//! side table, addressed by its [`ElementId`]. A slot holds:
//!
//! - An optional [`Configuration`](crate::config::Configuration), present only
//!   for watched elements and never changed after [`Registry::watch`].
//! - The element's active flag, written only by
//!   [`set_state`](Registry::set_state) (directly or through
//!   [`evaluate`](Registry::evaluate)).
//!
//! Linked targets that are not themselves watched get a slot with no
//! configuration; they only ever change state through propagation.
//!
//! # Dirty tracking
//!
//! Flipping a flag marks the [`ACTIVE`](crate::dirty::ACTIVE) channel. The
//! next evaluation drains it into [`ActivationChanges`], reporting only the
//! elements whose flag differs from what was last reported.

mod evaluate;
mod id;
mod registry;

pub use evaluate::{ActivationChanges, Decision};
pub use id::ElementId;
pub use registry::Registry;
