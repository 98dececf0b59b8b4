// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`ChromeTraceSink`] collects controller events in memory and writes them
//! as [Chrome Trace Event Format][format] JSON. Each card gets its own track:
//! tweens become begin/end spans on it, gestures and resolutions instant
//! events. Tick summaries become a counter of running tweens.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use swipestack_core::time::{HostTime, Timebase};
use swipestack_core::trace::{
    AnimationEvent, AnimationPhase, GestureEvent, ResolveEvent, SlotChange, SlotEvent,
    TickSummary, TraceSink, TransformRecord,
};

use crate::pretty::kind_name;

/// Collects trace events as Chrome Trace Event Format objects.
///
/// The output of [`write_to`](Self::write_to) is a complete JSON array,
/// suitable for loading into `chrome://tracing` or
/// [Perfetto](https://ui.perfetto.dev/).
#[derive(Debug)]
pub struct ChromeTraceSink {
    timebase: Timebase,
    events: Vec<Value>,
    /// Latest timestamp seen, for events that carry none.
    last_us: f64,
}

impl ChromeTraceSink {
    /// Creates an empty sink. Timestamps are converted to microseconds using
    /// `timebase`.
    #[must_use]
    pub fn new(timebase: Timebase) -> Self {
        Self {
            timebase,
            events: Vec::new(),
            last_us: 0.0,
        }
    }

    /// Collected events.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Writes the collected events as a JSON array.
    pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }

    fn us(&mut self, t: HostTime) -> f64 {
        let us = self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0;
        self.last_us = self.last_us.max(us);
        us
    }
}

impl TraceSink for ChromeTraceSink {
    fn on_gesture(&mut self, e: &GestureEvent) {
        let ts = self.us(e.time);
        self.events.push(json!({
            "ph": "i",
            "name": format!("{:?}", e.phase),
            "cat": "Gesture",
            "ts": ts,
            "pid": 0,
            "tid": e.card.0,
            "s": "t",
            "args": {
                "pointer": e.pointer.0,
                "x": e.position.x,
                "y": e.position.y,
                "progress": e.progress,
            }
        }));
    }

    fn on_resolve(&mut self, e: &ResolveEvent) {
        self.events.push(json!({
            "ph": "i",
            "name": "Resolve",
            "cat": "Gesture",
            "ts": self.last_us,
            "pid": 0,
            "tid": e.card.0,
            "s": "t",
            "args": {
                "center_x": e.center_x,
                "outcome": format!("{:?}", e.outcome),
                "programmatic": e.programmatic,
            }
        }));
    }

    fn on_animation(&mut self, e: &AnimationEvent) {
        let ts = self.us(e.time);
        let ph = match e.phase {
            AnimationPhase::Started => "B",
            AnimationPhase::Finished | AnimationPhase::Superseded => "E",
        };
        self.events.push(json!({
            "ph": ph,
            "name": kind_name(e.kind),
            "cat": "Animation",
            "ts": ts,
            "pid": 0,
            "tid": e.card.0,
            "args": {
                "token": e.token.0,
                "superseded": e.phase == AnimationPhase::Superseded,
            }
        }));
    }

    fn on_slot(&mut self, e: &SlotEvent) {
        let ts = self.us(e.time);
        let name = match e.change {
            SlotChange::Added => "SlotAdded",
            SlotChange::Removed => "SlotRemoved",
        };
        self.events.push(json!({
            "ph": "i",
            "name": name,
            "cat": "Stack",
            "ts": ts,
            "pid": 0,
            "tid": e.card.0,
            "s": "t",
            "args": {
                "data_index": e.data_index,
            }
        }));
    }

    fn on_tick(&mut self, s: &TickSummary) {
        let ts = self.us(s.now);
        self.events.push(json!({
            "ph": "C",
            "name": "Tweens",
            "cat": "Stack",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "args": {
                "active": s.active,
                "completed": s.completed,
            }
        }));
    }

    fn on_transform_changes(&mut self, now: HostTime, records: &[TransformRecord]) {
        let ts = self.us(now);
        self.events.push(json!({
            "ph": "i",
            "name": "TransformChanges",
            "cat": "Rich",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "s": "p",
            "args": {
                "count": records.len(),
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipestack_core::animate::{AnimationKind, AnimationToken};
    use swipestack_core::resolve::{SwipeDirection, SwipeOutcome};
    use swipestack_core::stack::CardId;

    fn animation(phase: AnimationPhase, t: u64) -> AnimationEvent {
        AnimationEvent {
            card: CardId(2),
            token: AnimationToken(0),
            kind: AnimationKind::Commit(SwipeDirection::Right),
            phase,
            time: HostTime(t),
        }
    }

    #[test]
    fn export_produces_valid_json() {
        let mut sink = ChromeTraceSink::new(Timebase::MILLIS);
        sink.on_animation(&animation(AnimationPhase::Started, 10));
        sink.on_resolve(&ResolveEvent {
            card: CardId(2),
            center_x: 1200.0,
            outcome: SwipeOutcome::Commit(SwipeDirection::Right),
            programmatic: true,
        });
        sink.on_animation(&animation(AnimationPhase::Finished, 410));

        let mut out = Vec::new();
        sink.write_to(&mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "commit-right");
        assert_eq!(parsed[0]["tid"], 2);
        assert_eq!(parsed[0]["ts"], 10_000.0);

        // Resolve carries no time of its own.
        assert_eq!(parsed[1]["ph"], "i");
        assert_eq!(parsed[1]["ts"], 10_000.0);
        assert_eq!(parsed[1]["args"]["programmatic"], true);

        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["ts"], 410_000.0);
    }

    #[test]
    fn superseded_tween_closes_its_span() {
        let mut sink = ChromeTraceSink::new(Timebase::NANOS);
        sink.on_animation(&animation(AnimationPhase::Started, 0));
        sink.on_animation(&animation(AnimationPhase::Superseded, 5));
        assert_eq!(sink.events()[1]["ph"], "E");
        assert_eq!(sink.events()[1]["args"]["superseded"], true);
    }

    #[test]
    fn export_empty_sink() {
        let mut out = Vec::new();
        ChromeTraceSink::new(Timebase::NANOS)
            .write_to(&mut out)
            .unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }
}
