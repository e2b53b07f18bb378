// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The [`Registry`](crate::element::Registry) records which elements had their
//! active flag flipped using [`understory_dirty`]. Activation state does not
//! inherit through any tree, so every channel here is local-only: only the
//! explicitly marked element appears in the drain output.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`Registry::evaluate`](crate::element::Registry::evaluate) call drains the
//! channel and surfaces the result as
//! [`ActivationChanges`](crate::element::ActivationChanges), which presenters
//! [consume](crate::backend::Presenter::apply) to add or remove the active
//! class.

use understory_dirty::Channel;

/// Active flag flipped — the element's visual marker may need updating.
pub const ACTIVE: Channel = Channel::new(0);
