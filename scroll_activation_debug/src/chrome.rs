// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Recordings carry no wall-clock time, so timestamps come from a logical
//! clock: each pass starts at `pass_index * PASS_SPAN_US` and every event in
//! it advances the clock by one microsecond. Pass spans live on thread 0;
//! each element's decisions and transitions get their own thread
//! (`element index + 1`), so a timeline shows one lane per element.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use scroll_activation_core::element::ElementId;

use crate::recorder::{RecordedEvent, decode};

/// Logical width of one pass on the exported timeline, in microseconds.
pub const PASS_SPAN_US: u64 = 1000;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut clock = LogicalClock::default();

    for recorded in decode(bytes) {
        let ts = clock.tick(recorded.pass_index());
        match recorded {
            RecordedEvent::PassBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Pass",
                    "cat": "Evaluate",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass_index": e.pass_index,
                        "watched": e.watched,
                        "viewport_height": e.viewport_height,
                    }
                }));
            }
            RecordedEvent::Decision(e) => {
                let name = if e.active { "Decide:on" } else { "Decide:off" };
                events.push(json!({
                    "ph": "i",
                    "name": name,
                    "cat": "Decision",
                    "ts": ts,
                    "pid": 0,
                    "tid": lane(e.element),
                    "s": "t",
                    "args": {
                        "pass_index": e.pass_index,
                        "top": e.top,
                        "offset": e.offset,
                        "viewport_edge": format!("{:?}", e.viewport_edge),
                    }
                }));
            }
            RecordedEvent::Transition(e) => {
                let name = if e.active { "Activate" } else { "Deactivate" };
                events.push(json!({
                    "ph": "i",
                    "name": name,
                    "cat": "Transition",
                    "ts": ts,
                    "pid": 0,
                    "tid": lane(e.element),
                    "s": "t",
                    "args": {
                        "pass_index": e.pass_index,
                        "originator": e.originator.map(ElementId::index),
                    }
                }));
            }
            RecordedEvent::PassEnd(s) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Pass",
                    "cat": "Evaluate",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "evaluated": s.evaluated,
                        "skipped_persistent": s.skipped_persistent,
                        "transitions": s.transitions,
                        "activated": s.activated,
                        "deactivated": s.deactivated,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn lane(element: ElementId) -> u64 {
    u64::from(element.index()) + 1
}

/// Assigns monotonic timestamps to events of successive passes.
#[derive(Debug, Default)]
struct LogicalClock {
    pass: Option<u64>,
    seq: u64,
}

impl LogicalClock {
    fn tick(&mut self, pass_index: u64) -> u64 {
        if self.pass != Some(pass_index) {
            self.pass = Some(pass_index);
            self.seq = 0;
        }
        let ts = pass_index
            .saturating_mul(PASS_SPAN_US)
            .saturating_add(self.seq.min(PASS_SPAN_US - 1));
        self.seq += 1;
        ts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use scroll_activation_core::trace::{PassBeginEvent, PassSummary, TraceSink, TransitionEvent};

    fn export_to_values(bytes: &[u8]) -> Vec<Value> {
        let mut out = Vec::new();
        export(bytes, &mut out).unwrap();
        serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap()
    }

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_pass_begin(&PassBeginEvent {
            pass_index: 2,
            watched: 1,
            viewport_height: 600.0,
        });
        rec.on_transition(&TransitionEvent {
            pass_index: 2,
            element: ElementId::new(0),
            active: true,
            originator: None,
        });
        rec.on_transition(&TransitionEvent {
            pass_index: 2,
            element: ElementId::new(5),
            active: true,
            originator: Some(ElementId::new(0)),
        });
        rec.on_pass_end(&PassSummary {
            pass_index: 2,
            evaluated: 1,
            transitions: 2,
            activated: 2,
            ..PassSummary::default()
        });

        let parsed = export_to_values(rec.as_bytes());
        assert_eq!(parsed.len(), 4);

        // Pass span brackets the transitions.
        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["ts"], 2000);
        assert_eq!(parsed[3]["ph"], "E");
        assert_eq!(parsed[3]["ts"], 2003);

        // Each element gets its own lane.
        assert_eq!(parsed[1]["name"], "Activate");
        assert_eq!(parsed[1]["tid"], 1);
        assert_eq!(parsed[1]["args"]["originator"], Value::Null);
        assert_eq!(parsed[2]["tid"], 6);
        assert_eq!(parsed[2]["args"]["originator"], 0);
    }

    #[test]
    fn clock_restarts_per_pass() {
        let mut clock = LogicalClock::default();
        assert_eq!(clock.tick(0), 0);
        assert_eq!(clock.tick(0), 1);
        assert_eq!(clock.tick(1), PASS_SPAN_US);
        assert_eq!(clock.tick(1), PASS_SPAN_US + 1);
    }

    #[test]
    fn export_empty_recording() {
        assert!(export_to_values(&[]).is_empty());
    }
}
