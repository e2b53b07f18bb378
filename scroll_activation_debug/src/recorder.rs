// Copyright 2026 the Scroll Activation Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use scroll_activation_core::config::ViewportEdge;
use scroll_activation_core::element::ElementId;
use scroll_activation_core::trace::{
    DecisionEvent, PassBeginEvent, PassSummary, TraceSink, TransitionEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PASS_BEGIN: u8 = 1;
const TAG_DECISION: u8 = 2;
const TAG_TRANSITION: u8 = 3;
const TAG_PASS_END: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_option_element(&mut self, v: Option<ElementId>) {
        match v {
            Some(id) => {
                self.write_u8(1);
                self.write_u32(id.index());
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
            }
        }
    }

    fn write_edge(&mut self, edge: ViewportEdge) {
        self.write_u8(match edge {
            ViewportEdge::Top => 0,
            ViewportEdge::Bottom => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.pass_index);
        self.write_u32(e.watched);
        self.write_f64(e.viewport_height);
    }

    fn on_decision(&mut self, e: &DecisionEvent) {
        self.write_u8(TAG_DECISION);
        self.write_u64(e.pass_index);
        self.write_u32(e.element.index());
        self.write_f64(e.top);
        self.write_f64(e.offset);
        self.write_edge(e.viewport_edge);
        self.write_bool(e.active);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.write_u8(TAG_TRANSITION);
        self.write_u64(e.pass_index);
        self.write_u32(e.element.index());
        self.write_bool(e.active);
        self.write_option_element(e.originator);
    }

    fn on_pass_end(&mut self, s: &PassSummary) {
        self.write_u8(TAG_PASS_END);
        self.write_u64(s.pass_index);
        self.write_u32(s.evaluated);
        self.write_u32(s.skipped_persistent);
        self.write_u32(s.transitions);
        self.write_u32(s.activated);
        self.write_u32(s.deactivated);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// See [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// See [`DecisionEvent`].
    Decision(DecisionEvent),
    /// See [`TransitionEvent`].
    Transition(TransitionEvent),
    /// See [`PassSummary`].
    PassEnd(PassSummary),
}

impl RecordedEvent {
    /// Returns the pass the event belongs to.
    #[must_use]
    pub fn pass_index(&self) -> u64 {
        match self {
            Self::PassBegin(e) => e.pass_index,
            Self::Decision(e) => e.pass_index,
            Self::Transition(e) => e.pass_index,
            Self::PassEnd(s) => s.pass_index,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// events.
///
/// Decoding stops at the first unknown tag or truncated record.
#[must_use]
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter { bytes, pos: 0 }
}

/// Iterator over decoded [`RecordedEvent`]s.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let chunk = self.bytes.get(self.pos..end)?;
        self.pos = end;
        chunk.try_into().ok()
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|b| b != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_element(&mut self) -> Option<ElementId> {
        self.read_u32().map(ElementId::new)
    }

    fn read_option_element(&mut self) -> Option<Option<ElementId>> {
        let present = self.read_u8()?;
        let id = self.read_element()?;
        Some((present != 0).then_some(id))
    }

    fn read_edge(&mut self) -> Option<ViewportEdge> {
        match self.read_u8()? {
            0 => Some(ViewportEdge::Top),
            1 => Some(ViewportEdge::Bottom),
            _ => None,
        }
    }

    fn read_event(&mut self) -> Option<RecordedEvent> {
        let tag = self.read_u8()?;
        let event = match tag {
            TAG_PASS_BEGIN => RecordedEvent::PassBegin(PassBeginEvent {
                pass_index: self.read_u64()?,
                watched: self.read_u32()?,
                viewport_height: self.read_f64()?,
            }),
            TAG_DECISION => RecordedEvent::Decision(DecisionEvent {
                pass_index: self.read_u64()?,
                element: self.read_element()?,
                top: self.read_f64()?,
                offset: self.read_f64()?,
                viewport_edge: self.read_edge()?,
                active: self.read_bool()?,
            }),
            TAG_TRANSITION => RecordedEvent::Transition(TransitionEvent {
                pass_index: self.read_u64()?,
                element: self.read_element()?,
                active: self.read_bool()?,
                originator: self.read_option_element()?,
            }),
            TAG_PASS_END => RecordedEvent::PassEnd(PassSummary {
                pass_index: self.read_u64()?,
                evaluated: self.read_u32()?,
                skipped_persistent: self.read_u32()?,
                transitions: self.read_u32()?,
                activated: self.read_u32()?,
                deactivated: self.read_u32()?,
            }),
            _ => return None,
        };
        Some(event)
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.read_event();
        if event.is_none() {
            // Stop for good on garbage.
            self.pos = self.bytes.len();
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_pass(sink: &mut RecorderSink) {
        sink.on_pass_begin(&PassBeginEvent {
            pass_index: 3,
            watched: 2,
            viewport_height: 720.0,
        });
        sink.on_decision(&DecisionEvent {
            pass_index: 3,
            element: ElementId::new(0),
            top: 500.0,
            offset: -25.5,
            viewport_edge: ViewportEdge::Bottom,
            active: true,
        });
        sink.on_transition(&TransitionEvent {
            pass_index: 3,
            element: ElementId::new(0),
            active: true,
            originator: None,
        });
        sink.on_transition(&TransitionEvent {
            pass_index: 3,
            element: ElementId::new(7),
            active: true,
            originator: Some(ElementId::new(0)),
        });
        sink.on_pass_end(&PassSummary {
            pass_index: 3,
            evaluated: 2,
            skipped_persistent: 0,
            transitions: 2,
            activated: 2,
            deactivated: 0,
        });
    }

    #[test]
    fn recorded_pass_decodes_in_order() {
        let mut sink = RecorderSink::new();
        record_pass(&mut sink);

        let events: Vec<_> = decode(sink.as_bytes()).collect();
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| e.pass_index() == 3));

        let RecordedEvent::Decision(d) = events[1] else {
            panic!("expected decision, got {:?}", events[1]);
        };
        assert_eq!(d.offset, -25.5);
        assert_eq!(d.viewport_edge, ViewportEdge::Bottom);

        let RecordedEvent::Transition(t) = events[3] else {
            panic!("expected transition, got {:?}", events[3]);
        };
        assert_eq!(t.element, ElementId::new(7));
        assert_eq!(t.originator, Some(ElementId::new(0)));
    }

    #[test]
    fn nan_viewport_survives_recording() {
        let mut sink = RecorderSink::new();
        sink.on_pass_begin(&PassBeginEvent {
            pass_index: 0,
            watched: 1,
            viewport_height: f64::NAN,
        });

        let Some(RecordedEvent::PassBegin(e)) = decode(sink.as_bytes()).next() else {
            panic!("expected pass begin");
        };
        assert!(e.viewport_height.is_nan());
    }

    #[test]
    fn truncated_tail_is_dropped() {
        let mut sink = RecorderSink::new();
        record_pass(&mut sink);
        let bytes = sink.into_bytes();

        let cut = &bytes[..bytes.len() - 3];
        let events: Vec<_> = decode(cut).collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[3], RecordedEvent::Transition(_)));
    }

    #[test]
    fn unknown_tag_stops_decoding() {
        let mut sink = RecorderSink::new();
        record_pass(&mut sink);
        let mut bytes = vec![0xff];
        bytes.extend_from_slice(sink.as_bytes());

        assert_eq!(decode(&bytes).count(), 0);
    }
}
