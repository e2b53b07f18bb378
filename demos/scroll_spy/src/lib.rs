// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a scroll-spy table of contents driven by `scroll_activation_web`.
//!
//! `index.html` holds a long article whose sections carry the watch class.
//! Each section names its table-of-contents entry with `data-target`, so the
//! entry lights up while the section is in view. Transitions and pass
//! summaries are logged to the browser console.
//!
//! Build with: `wasm-pack build --target web demos/scroll_spy`
//!
//! Then serve `demos/scroll_spy/` and open `index.html` in a browser.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;

use wasm_bindgen::prelude::*;
use web_sys::console;

use scroll_activation_core::options::ActivationOptions;
use scroll_activation_core::trace::{PassSummary, TraceSink, TransitionEvent};
use scroll_activation_web::ScrollActivation;

/// Logs transitions and non-empty pass summaries to the browser console.
#[derive(Debug, Default)]
struct ConsoleSink;

impl TraceSink for ConsoleSink {
    fn on_transition(&mut self, e: &TransitionEvent) {
        let state = if e.active { "on" } else { "off" };
        let line = match e.originator {
            Some(from) => format!(
                "pass {}: #{} {state} via #{}",
                e.pass_index,
                e.element.index(),
                from.index()
            ),
            None => format!("pass {}: #{} {state}", e.pass_index, e.element.index()),
        };
        console::log_1(&JsValue::from_str(&line));
    }

    fn on_pass_end(&mut self, s: &PassSummary) {
        if s.activated == 0 && s.deactivated == 0 {
            return;
        }
        let line = format!(
            "pass {}: +{} -{} ({} evaluated, {} persistent)",
            s.pass_index, s.activated, s.deactivated, s.evaluated, s.skipped_persistent
        );
        console::log_1(&JsValue::from_str(&line));
    }
}

/// Entry point — called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let sink: Box<dyn TraceSink> = Box::new(ConsoleSink);
    let Some(activation) =
        ScrollActivation::install_with_sink(document, ActivationOptions::DEFAULT, Some(sink))?
    else {
        console::warn_1(&JsValue::from_str("no .js-scroll-activation elements"));
        return Ok(());
    };
    console::log_1(&JsValue::from_str(&format!(
        "watching {} sections",
        activation.watched_count()
    )));

    // The page lives as long as the module; keep listening.
    core::mem::forget(activation);

    Ok(())
}
