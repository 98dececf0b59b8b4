// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use swipestack_core::animate::AnimationKind;
use swipestack_core::resolve::{SwipeDirection, SwipeOutcome};
use swipestack_core::time::{HostTime, Timebase};
use swipestack_core::trace::{
    AnimationEvent, AnimationPhase, GestureEvent, GesturePhase, ResolveEvent, SlotChange,
    SlotEvent, TickSummary, TraceSink, TransformRecord,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Returns the destination.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

fn gesture_name(phase: GesturePhase) -> &'static str {
    match phase {
        GesturePhase::DragStart => "start",
        GesturePhase::DragMove => "move",
        GesturePhase::Tap => "tap",
        GesturePhase::Release => "release",
        GesturePhase::Cancel => "cancel",
    }
}

fn outcome_name(outcome: SwipeOutcome) -> &'static str {
    match outcome {
        SwipeOutcome::Commit(SwipeDirection::Left) => "commit-left",
        SwipeOutcome::Commit(SwipeDirection::Right) => "commit-right",
        SwipeOutcome::Reset => "reset",
    }
}

pub(crate) fn kind_name(kind: AnimationKind) -> &'static str {
    match kind {
        AnimationKind::Commit(SwipeDirection::Left) => "commit-left",
        AnimationKind::Commit(SwipeDirection::Right) => "commit-right",
        AnimationKind::Reset => "reset",
        AnimationKind::Settle => "settle",
        AnimationKind::StackShift => "stack-shift",
        AnimationKind::FadeIn => "fade-in",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_gesture(&mut self, e: &GestureEvent) {
        let _ = writeln!(
            self.writer,
            "[gesture:{}] card={} pointer={} at=({:.1}, {:.1}) progress={:+.3} t={:.1}µs",
            gesture_name(e.phase),
            e.card.0,
            e.pointer.0,
            e.position.x,
            e.position.y,
            e.progress,
            self.host_us(e.time),
        );
    }

    fn on_resolve(&mut self, e: &ResolveEvent) {
        let source = if e.programmatic { "api" } else { "drag" };
        let _ = writeln!(
            self.writer,
            "[resolve] card={} center_x={:.1} outcome={} via={source}",
            e.card.0,
            e.center_x,
            outcome_name(e.outcome),
        );
    }

    fn on_animation(&mut self, e: &AnimationEvent) {
        let phase = match e.phase {
            AnimationPhase::Started => "start",
            AnimationPhase::Finished => "end",
            AnimationPhase::Superseded => "cancel",
        };
        let _ = writeln!(
            self.writer,
            "[anim:{phase}] card={} token={} {} t={:.1}µs",
            e.card.0,
            e.token.0,
            kind_name(e.kind),
            self.host_us(e.time),
        );
    }

    fn on_slot(&mut self, e: &SlotEvent) {
        let change = match e.change {
            SlotChange::Added => "add",
            SlotChange::Removed => "remove",
        };
        let _ = writeln!(
            self.writer,
            "[slot:{change}] card={} data_index={} t={:.1}µs",
            e.card.0,
            e.data_index,
            self.host_us(e.time),
        );
    }

    fn on_tick(&mut self, s: &TickSummary) {
        if s.active == 0 && s.completed == 0 {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[tick] t={:.1}µs active={} completed={}",
            self.host_us(s.now),
            s.active,
            s.completed,
        );
    }

    fn on_transform_changes(&mut self, now: HostTime, records: &[TransformRecord]) {
        let _ = writeln!(
            self.writer,
            "[transforms] t={:.1}µs cards={}",
            self.host_us(now),
            records.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipestack_core::animate::AnimationToken;
    use swipestack_core::gesture::PointerId;
    use swipestack_core::kurbo::Point;
    use swipestack_core::stack::CardId;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_gesture() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MILLIS);
        sink.on_gesture(&GestureEvent {
            card: CardId(3),
            phase: GesturePhase::DragMove,
            pointer: PointerId(0),
            position: Point::new(250.0, 40.0),
            time: HostTime(2),
            progress: -0.5,
        });
        let output = output(sink);
        assert!(output.contains("[gesture:move]"), "got: {output}");
        assert!(output.contains("card=3"), "got: {output}");
        assert!(output.contains("progress=-0.500"), "got: {output}");
        assert!(output.contains("t=2000.0µs"), "got: {output}");
    }

    #[test]
    fn pretty_print_animation_and_resolve() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_resolve(&ResolveEvent {
            card: CardId(1),
            center_x: -10.0,
            outcome: SwipeOutcome::Commit(SwipeDirection::Left),
            programmatic: false,
        });
        sink.on_animation(&AnimationEvent {
            card: CardId(1),
            token: AnimationToken(4),
            kind: AnimationKind::Commit(SwipeDirection::Left),
            phase: AnimationPhase::Started,
            time: HostTime(0),
        });
        let output = output(sink);
        assert!(output.contains("outcome=commit-left via=drag"), "got: {output}");
        assert!(output.contains("[anim:start] card=1 token=4 commit-left"), "got: {output}");
    }

    #[test]
    fn idle_ticks_are_skipped() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_tick(&TickSummary {
            now: HostTime(1),
            active: 0,
            completed: 0,
        });
        assert!(output(sink).is_empty());
    }
}
