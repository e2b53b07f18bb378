// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use scroll_activation_core::config::ViewportEdge;
use scroll_activation_core::element::ElementId;
use scroll_activation_core::trace::{
    DecisionEvent, PassBeginEvent, PassSummary, TraceSink, TransitionEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    decisions: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("decisions", &self.decisions)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            decisions: false,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            decisions: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            decisions: false,
        }
    }

    /// Also prints a line for every per-element decision.
    #[must_use]
    pub fn with_decisions(mut self, decisions: bool) -> Self {
        self.decisions = decisions;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn state_name(active: bool) -> &'static str {
    if active { "on" } else { "off" }
}

fn edge_name(edge: ViewportEdge) -> &'static str {
    match edge {
        ViewportEdge::Top => "top",
        ViewportEdge::Bottom => "bottom",
    }
}

fn element_label(id: ElementId) -> String {
    format!("#{}", id.index())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] pass={} watched={} viewport={:.1}px",
            e.pass_index, e.watched, e.viewport_height,
        );
    }

    fn on_decision(&mut self, e: &DecisionEvent) {
        if !self.decisions {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[decide] pass={} {} top={:.1}px offset={:.1}px edge={} -> {}",
            e.pass_index,
            element_label(e.element),
            e.top,
            e.offset,
            edge_name(e.viewport_edge),
            state_name(e.active),
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        let via = e
            .originator
            .map_or_else(String::new, |from| format!(" via {}", element_label(from)));
        let _ = writeln!(
            self.writer,
            "[transition] pass={} {} {}{}",
            e.pass_index,
            element_label(e.element),
            state_name(e.active),
            via,
        );
    }

    fn on_pass_end(&mut self, s: &PassSummary) {
        let _ = writeln!(
            self.writer,
            "[pass:end] pass={} evaluated={} skipped={} flips={} +{} -{}",
            s.pass_index,
            s.evaluated,
            s.skipped_persistent,
            s.transitions,
            s.activated,
            s.deactivated,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(sink: PrettyPrintSink<Vec<u8>>) -> Vec<String> {
        String::from_utf8(sink.into_inner())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn transition_lines_name_originator() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_transition(&TransitionEvent {
            pass_index: 2,
            element: ElementId::new(0),
            active: true,
            originator: None,
        });
        sink.on_transition(&TransitionEvent {
            pass_index: 2,
            element: ElementId::new(4),
            active: true,
            originator: Some(ElementId::new(0)),
        });

        assert_eq!(
            lines(sink),
            [
                "[transition] pass=2 #0 on",
                "[transition] pass=2 #4 on via #0",
            ]
        );
    }

    #[test]
    fn decisions_are_opt_in() {
        let decision = DecisionEvent {
            pass_index: 1,
            element: ElementId::new(3),
            top: 12.0,
            offset: -40.0,
            viewport_edge: ViewportEdge::Top,
            active: false,
        };

        let mut quiet = PrettyPrintSink::with_writer(Vec::new());
        quiet.on_decision(&decision);
        assert!(lines(quiet).is_empty());

        let mut verbose = PrettyPrintSink::with_writer(Vec::new()).with_decisions(true);
        verbose.on_decision(&decision);
        assert_eq!(
            lines(verbose),
            ["[decide] pass=1 #3 top=12.0px offset=-40.0px edge=top -> off"]
        );
    }

    #[test]
    fn pass_summary_line() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_pass_end(&PassSummary {
            pass_index: 9,
            evaluated: 3,
            skipped_persistent: 1,
            transitions: 4,
            activated: 2,
            deactivated: 0,
        });
        assert_eq!(
            lines(sink),
            ["[pass:end] pass=9 evaluated=3 skipped=1 flips=4 +2 -0"]
        );
    }
}
