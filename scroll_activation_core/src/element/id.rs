// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity.

use core::fmt;

/// A handle to a page element.
///
/// Pages hand out ids in discovery order, starting at zero, and never reuse
/// them during a page session. The id doubles as the slot index into the
/// [`Registry`](super::Registry) side table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId {
    pub(crate) idx: u32,
}

impl ElementId {
    /// Creates a handle for the given slot index.
    #[inline]
    #[must_use]
    pub const fn new(idx: u32) -> Self {
        Self { idx }
    }

    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.idx)
    }
}
