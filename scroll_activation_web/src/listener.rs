// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll listener and startup timer.
//!
//! [`ScrollTrigger`] calls back once after a startup delay (letting layout
//! settle) and once for every `scroll` event on its target after that.
//! Scroll events are not throttled; each one produces exactly one callback.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object to schedule the timer.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

const SCROLL: &str = "scroll";

/// A scroll listener plus one-shot startup timer.
///
/// Create with [`ScrollTrigger::new`], then call [`start`](Self::start) to
/// register both. Everything is unregistered by [`stop`](Self::stop) or when
/// the `ScrollTrigger` is dropped.
pub struct ScrollTrigger {
    inner: Rc<TriggerInner>,
}

type EventClosure = Closure<dyn FnMut()>;

struct TriggerInner {
    /// Where the scroll listener is registered (usually the document).
    target: EventTarget,

    /// The JS closure registered for `scroll` events.
    scroll_closure: RefCell<Option<EventClosure>>,

    /// The JS closure registered with `setTimeout`.
    timer_closure: RefCell<Option<EventClosure>>,

    /// The user-supplied callback.
    callback: RefCell<Box<dyn FnMut()>>,

    /// Delay before the startup callback.
    startup_delay_ms: u32,

    /// Whether the listener is currently registered.
    running: Cell<bool>,

    /// Pending startup timer, cleared once it fires.
    timer_id: Cell<Option<i32>>,
}

impl TriggerInner {
    fn fire(&self) {
        if !self.running.get() {
            return;
        }
        self.callback.borrow_mut()();
    }
}

impl ScrollTrigger {
    /// Creates a trigger that is **not yet running**.
    ///
    /// `callback` runs once `startup_delay_ms` after [`start`](Self::start)
    /// and then on every `scroll` event dispatched to `target`.
    pub fn new(
        target: EventTarget,
        startup_delay_ms: u32,
        callback: impl FnMut() + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(TriggerInner {
                target,
                scroll_closure: RefCell::new(None),
                timer_closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                startup_delay_ms,
                running: Cell::new(false),
                timer_id: Cell::new(None),
            }),
        }
    }

    /// Registers the scroll listener and schedules the startup callback.
    ///
    /// If already running, this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the exception thrown by `addEventListener`, if any. The trigger
    /// is left stopped in that case.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.inner.running.get() {
            return Ok(());
        }

        let inner = Rc::clone(&self.inner);
        let on_scroll = Closure::wrap(Box::new(move || {
            inner.fire();
        }) as Box<dyn FnMut()>);
        self.inner
            .target
            .add_event_listener_with_callback(SCROLL, on_scroll.as_ref().unchecked_ref())?;
        *self.inner.scroll_closure.borrow_mut() = Some(on_scroll);
        self.inner.running.set(true);

        let inner = Rc::clone(&self.inner);
        let on_timer = Closure::wrap(Box::new(move || {
            inner.timer_id.set(None);
            inner.fire();
        }) as Box<dyn FnMut()>);
        let delay = i32::try_from(self.inner.startup_delay_ms).unwrap_or(i32::MAX);
        let id = set_timeout(on_timer.as_ref().unchecked_ref(), delay);
        self.inner.timer_id.set(Some(id));
        *self.inner.timer_closure.borrow_mut() = Some(on_timer);
        Ok(())
    }

    /// Unregisters the scroll listener and cancels a pending startup timer.
    ///
    /// Can be restarted by calling [`start`](Self::start) again.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        if let Some(id) = self.inner.timer_id.take() {
            clear_timeout(id);
        }
        if let Some(ref closure) = *self.inner.scroll_closure.borrow() {
            let _ = self
                .inner
                .target
                .remove_event_listener_with_callback(SCROLL, closure.as_ref().unchecked_ref());
        }
    }

    /// Returns `true` if the listener is currently registered.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for ScrollTrigger {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closures so they don't leak (and break the Rc cycle
        // through the closures' captured `inner`).
        self.inner.scroll_closure.borrow_mut().take();
        self.inner.timer_closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for ScrollTrigger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollTrigger")
            .field("running", &self.inner.running.get())
            .field("startup_delay_ms", &self.inner.startup_delay_ms)
            .field("timer_pending", &self.inner.timer_id.get().is_some())
            .finish_non_exhaustive()
    }
}
