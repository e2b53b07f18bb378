// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-wide activation options.

/// Page-wide settings shared by the markup scan, the presenter, and the
/// trigger source.
///
/// Per-element behavior comes from markup attributes (see
/// [`config::attr`](crate::config::attr)); these options only name the
/// markers and the startup timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationOptions {
    /// Class marking an element as watched.
    pub watch_class: &'static str,
    /// Class added to active elements and their linked targets.
    pub active_class: &'static str,
    /// Delay before the first evaluation, letting layout settle.
    pub startup_delay_ms: u32,
}

impl ActivationOptions {
    /// The stock markers (`js-scroll-activation` / `is-active`) and a 500 ms
    /// startup delay.
    pub const DEFAULT: Self = Self {
        watch_class: "js-scroll-activation",
        active_class: "is-active",
        startup_delay_ms: 500,
    };

    /// Returns these options with a different startup delay.
    #[must_use]
    pub const fn with_startup_delay_ms(self, startup_delay_ms: u32) -> Self {
        Self {
            startup_delay_ms,
            ..self
        }
    }

    /// Returns these options with different marker classes.
    #[must_use]
    pub const fn with_classes(self, watch_class: &'static str, active_class: &'static str) -> Self {
        Self {
            watch_class,
            active_class,
            ..self
        }
    }
}

impl Default for ActivationOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_stock_markup() {
        let opts = ActivationOptions::default();
        assert_eq!(opts.watch_class, "js-scroll-activation");
        assert_eq!(opts.active_class, "is-active");
        assert_eq!(opts.startup_delay_ms, 500);
    }

    #[test]
    fn builders_keep_other_fields() {
        let opts = ActivationOptions::DEFAULT
            .with_startup_delay_ms(0)
            .with_classes("spy", "lit");
        assert_eq!(opts.startup_delay_ms, 0);
        assert_eq!(opts.watch_class, "spy");
        assert_eq!(opts.active_class, "lit");
    }
}
