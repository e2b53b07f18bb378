// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for scroll activation.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomPage`]: element identity, attribute reads, and layout reads
//! - [`ClassPresenter`]: active-class toggling
//! - [`ScrollTrigger`]: `scroll` listener plus startup timer
//! - [`ScrollActivation`]: all of the above wired to a
//!   [`Registry`](scroll_activation_core::element::Registry)

#![no_std]

extern crate alloc;

mod listener;
mod page;
mod presenter;

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use scroll_activation_core::element::{ActivationChanges, ElementId, Registry};
use scroll_activation_core::options::ActivationOptions;
use scroll_activation_core::trace::{TraceSink, Tracer};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

pub use listener::ScrollTrigger;
pub use page::DomPage;
pub use presenter::{AppliedClasses, ClassPresenter};
pub use scroll_activation_core::backend::Presenter;

/// Returns the current viewport height (`window.innerHeight`).
///
/// Without a window the height is NaN, which leaves bottom-edge elements
/// inactive.
#[must_use]
pub fn viewport_height(window: Option<&Window>) -> f64 {
    window
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(f64::NAN)
}

/// Everything one evaluation touches, shared by the trigger callbacks.
struct Session {
    page: DomPage,
    registry: Registry,
    presenter: ClassPresenter,
    changes: ActivationChanges,
    window: Option<Window>,
    sink: Option<Box<dyn TraceSink>>,
}

impl Session {
    fn evaluate(&mut self) {
        let height = viewport_height(self.window.as_ref());
        let Self {
            page,
            registry,
            presenter,
            changes,
            sink,
            ..
        } = self;
        let mut tracer = match sink {
            Some(sink) => Tracer::new(sink.as_mut()),
            None => Tracer::none(),
        };
        registry.evaluate_traced(&*page, height, changes, &mut tracer);
        presenter.apply(registry, changes);
    }
}

/// Scroll activation running on a live document.
///
/// Dropping the handle unregisters the scroll listener and cancels the
/// startup timer; classes already applied are left in place.
pub struct ScrollActivation {
    session: Rc<RefCell<Session>>,
    trigger: ScrollTrigger,
}

impl core::fmt::Debug for ScrollActivation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollActivation")
            .field("watched", &self.session.borrow().registry.len())
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

impl ScrollActivation {
    /// Scans `document` for watched elements and starts driving them.
    ///
    /// Returns `Ok(None)` when nothing carries the watch class; no listener
    /// is attached and no timer is scheduled in that case.
    ///
    /// # Errors
    ///
    /// Returns the exception thrown while registering the scroll listener.
    pub fn install(document: Document, options: ActivationOptions) -> Result<Option<Self>, JsValue> {
        Self::install_with_sink(document, options, None)
    }

    /// Like [`install`](Self::install), reporting every evaluation pass to
    /// `sink`.
    ///
    /// Events only reach the sink when the `trace` feature is enabled.
    ///
    /// # Errors
    ///
    /// Returns the exception thrown while registering the scroll listener.
    pub fn install_with_sink(
        document: Document,
        options: ActivationOptions,
        sink: Option<Box<dyn TraceSink>>,
    ) -> Result<Option<Self>, JsValue> {
        let mut page = DomPage::new(document.clone(), &options);
        let registry = Registry::discover(&mut page);
        if registry.is_empty() {
            return Ok(None);
        }

        let presenter = ClassPresenter::new(&page, options.active_class);
        let session = Rc::new(RefCell::new(Session {
            page,
            registry,
            presenter,
            changes: ActivationChanges::default(),
            window: document.default_view(),
            sink,
        }));

        let shared = Rc::clone(&session);
        let trigger = ScrollTrigger::new(document.into(), options.startup_delay_ms, move || {
            shared.borrow_mut().evaluate();
        });
        trigger.start()?;

        Ok(Some(Self { session, trigger }))
    }

    /// Returns whether `element` is currently active.
    ///
    /// # Panics
    ///
    /// Panics if `element` was not handed out by this session's page.
    #[must_use]
    pub fn is_active(&self, element: ElementId) -> bool {
        self.session.borrow().registry.is_active(element)
    }

    /// Returns the number of watched elements.
    #[must_use]
    pub fn watched_count(&self) -> usize {
        self.session.borrow().registry.len()
    }

    /// Stops listening. Equivalent to dropping the handle, but keeps the
    /// session around for inspection.
    pub fn stop(&self) {
        self.trigger.stop();
    }
}
