//! # Gesture recognition
//!
//! [`GestureDispatcher`] turns raw pointer down/move/up events into
//! tap, double tap, long press, drag and fling gestures, delivered to the
//! widget that was under the pointer when it went down.
//!
//! One pointer is tracked at a time:
//!
//! ```text
//! Idle --down(hit)--> Tracking --move >= drag_start--> Dragging
//!   ^                    |                                |
//!   +-------- up --------+----------------- up -----------+
//! ```
//!
//! On release:
//!
//! - Dragging emits `DragEnd`, then `Fling` when the release speed reaches
//!   `fling_min_velocity`.
//! - A press held for `long_press_ms` without leaving the tap radius emits
//!   `LongPress`.
//! - A short press inside the tap radius emits `Tap`, or `DoubleTap` when it
//!   lands on the same widget as the previous tap within
//!   `double_tap_max_ms` and `double_tap_max_distance`.
//!
//! The previous-tap memory outlives the pointer: it is only cleared by a
//! double tap, a drag, a long press, [`GestureDispatcher::reset`] or a tap
//! timestamp that runs backwards.
//!
//! All distance thresholds are compared squared. Timestamps are caller
//! supplied and must not decrease within a sequence.

use std::rc::Rc;

use ripple_core::*;

use crate::events::Dispatch;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    pub tap_max_ms: u32,
    pub tap_max_distance: f32,
    pub double_tap_max_ms: u32,
    pub double_tap_max_distance: f32,
    pub long_press_ms: u32,
    pub drag_start_distance: f32,
    /// Pixels per second.
    pub fling_min_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_ms: 250,
            tap_max_distance: 8.0,
            double_tap_max_ms: 400,
            double_tap_max_distance: 16.0,
            long_press_ms: 500,
            drag_start_distance: 8.0,
            fling_min_velocity: 1000.0,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<()> {
        for v in [
            self.tap_max_distance,
            self.double_tap_max_distance,
            self.drag_start_distance,
            self.fling_min_velocity,
        ] {
            if !(v >= 0.0) {
                return Err(Error::Range);
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Tracking,
    Dragging,
}

#[derive(Clone)]
struct Tracker {
    widget: WeakWidget,
    pointer: PointerId,
    dragging: bool,
    down_time: u32,
    last_time: u32,
    down: Vec2,
    last: Vec2,
    velocity: Vec2,
}

struct LastTap {
    time_ms: u32,
    position: Vec2,
    widget: WeakWidget,
}

pub struct GestureDispatcher {
    initialized: bool,
    config: GestureConfig,
    tracker: Option<Tracker>,
    last_tap: Option<LastTap>,
}

impl Default for GestureDispatcher {
    fn default() -> Self {
        Self {
            initialized: true,
            config: GestureConfig::default(),
            tracker: None,
            last_tap: None,
        }
    }
}

fn time_delta(start: u32, end: u32) -> Result<u32> {
    end.checked_sub(start).ok_or(Error::Range)
}

/// Pixels per second between two samples `dt_ms` apart.
fn velocity(from: Vec2, to: Vec2, dt_ms: u32) -> Vec2 {
    if dt_ms == 0 {
        return Vec2::ZERO;
    }
    (to - from) * (1000.0 / dt_ms as f32)
}

fn emit(
    widget: &WidgetRef,
    source: &InputEvent,
    kind: GestureKind,
    gesture: GestureEvent,
) -> Result<bool> {
    log::trace!("gesture: {kind:?} at {:?}", gesture.position);
    deliver(widget, &InputEvent::gesture_from(source, kind, gesture))
}

impl GestureDispatcher {
    pub fn new(config: GestureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    /// Re-arms a dispatcher after [`shutdown`](Self::shutdown).
    pub fn init(&mut self, config: GestureConfig) -> Result<()> {
        if self.initialized {
            return Err(Error::State);
        }
        *self = Self::new(config)?;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.clear_state();
        self.initialized = false;
        Ok(())
    }

    /// Drops the tracked pointer and the previous-tap memory.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.clear_state();
        Ok(())
    }

    pub fn set_config(&mut self, config: GestureConfig) -> Result<()> {
        self.ensure_ready()?;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> Result<GestureConfig> {
        self.ensure_ready()?;
        Ok(self.config)
    }

    pub fn phase(&self) -> GesturePhase {
        match &self.tracker {
            None => GesturePhase::Idle,
            Some(t) if t.dragging => GesturePhase::Dragging,
            Some(_) => GesturePhase::Tracking,
        }
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::State)
        }
    }

    fn clear_state(&mut self) {
        self.tracker = None;
        self.last_tap = None;
    }

    /// Feeds one raw event through the recognizer.
    ///
    /// On error the dispatcher may be left mid-sequence; call
    /// [`reset`](Self::reset) to start over.
    pub fn dispatch(&mut self, root: &RenderNode, event: &InputEvent) -> Result<Dispatch> {
        self.ensure_ready()?;
        match &event.kind {
            InputKind::PointerDown(p) => self.pointer_down(root, p, event.time_ms),
            InputKind::PointerMove(p) => self.pointer_move(p, event),
            InputKind::PointerUp(p) => self.pointer_up(p, event),
            InputKind::PointerScroll(_) => Ok(Dispatch::default()),
            _ => Err(Error::InvalidArgument),
        }
    }

    fn pointer_down(&mut self, root: &RenderNode, p: &PointerData, time_ms: u32) -> Result<Dispatch> {
        if let Some(t) = &self.tracker {
            return Err(if t.pointer == p.id {
                Error::State
            } else {
                Error::Busy
            });
        }

        let Some(target) = hit_test(root, p.position)? else {
            return Ok(Dispatch::default());
        };

        self.tracker = Some(Tracker {
            widget: Rc::downgrade(&target),
            pointer: p.id,
            dragging: false,
            down_time: time_ms,
            last_time: time_ms,
            down: p.position,
            last: p.position,
            velocity: Vec2::ZERO,
        });
        log::debug!("gesture: tracking pointer {:?}", p.id);

        Ok(Dispatch {
            target: Some(target),
            handled: false,
        })
    }

    /// Resolves the active widget and checks the event belongs to it.
    fn active(&mut self, p: &PointerData) -> Result<Option<(&mut Tracker, WidgetRef)>> {
        let Some(t) = self.tracker.as_mut() else {
            return Ok(None);
        };
        let widget = t.widget.upgrade().ok_or(Error::State)?;
        if t.pointer != p.id {
            return Err(Error::InvalidArgument);
        }
        Ok(Some((t, widget)))
    }

    fn pointer_move(&mut self, p: &PointerData, event: &InputEvent) -> Result<Dispatch> {
        let drag_sq = self.config.drag_start_distance * self.config.drag_start_distance;
        let Some((t, widget)) = self.active(p)? else {
            return Ok(Dispatch::default());
        };

        let dt = time_delta(t.last_time, event.time_ms)?;
        let pos = p.position;
        t.velocity = velocity(t.last, pos, dt);

        let kind = if !t.dragging && t.down.distance_sq(pos) >= drag_sq {
            t.dragging = true;
            log::debug!("gesture: drag started on pointer {:?}", t.pointer);
            Some(GestureKind::DragStart)
        } else if t.dragging {
            Some(GestureKind::DragUpdate)
        } else {
            None
        };

        let gesture = GestureEvent {
            pointer: t.pointer,
            position: pos,
            start: t.down,
            delta: pos - t.last,
            total: pos - t.down,
            velocity: t.velocity,
            tap_count: 0,
        };
        t.last = pos;
        t.last_time = event.time_ms;

        let Some(kind) = kind else {
            return Ok(Dispatch::default());
        };
        let handled = emit(&widget, event, kind, gesture)?;
        Ok(Dispatch {
            target: Some(widget),
            handled,
        })
    }

    fn pointer_up(&mut self, p: &PointerData, event: &InputEvent) -> Result<Dispatch> {
        let cfg = self.config;
        let now = event.time_ms;

        let (widget, gesture, dragging, duration, dist_sq) = {
            let Some((t, widget)) = self.active(p)? else {
                return Ok(Dispatch::default());
            };

            let dt = time_delta(t.last_time, now)?;
            let duration = time_delta(t.down_time, now)?;
            let pos = p.position;
            t.velocity = velocity(t.last, pos, dt);

            let gesture = GestureEvent {
                pointer: t.pointer,
                position: pos,
                start: t.down,
                delta: pos - t.last,
                total: pos - t.down,
                velocity: t.velocity,
                tap_count: 0,
            };
            (widget, gesture, t.dragging, duration, t.down.distance_sq(pos))
        };

        let tap_sq = cfg.tap_max_distance * cfg.tap_max_distance;
        let mut handled = false;

        if dragging {
            handled |= emit(&widget, event, GestureKind::DragEnd, gesture)?;

            let fling_sq = cfg.fling_min_velocity * cfg.fling_min_velocity;
            if gesture.velocity.length_sq() >= fling_sq {
                let fling = GestureEvent {
                    delta: Vec2::ZERO,
                    ..gesture
                };
                handled |= emit(&widget, event, GestureKind::Fling, fling)?;
            }
            self.last_tap = None;
        } else if duration >= cfg.long_press_ms && dist_sq <= tap_sq {
            handled |= emit(&widget, event, GestureKind::LongPress, gesture)?;
            self.last_tap = None;
        } else if duration <= cfg.tap_max_ms && dist_sq <= tap_sq {
            if self.is_double_tap(&widget, now, gesture.position) {
                let double = GestureEvent {
                    tap_count: 2,
                    ..gesture
                };
                handled |= emit(&widget, event, GestureKind::DoubleTap, double)?;
                self.last_tap = None;
            } else {
                let tap = GestureEvent {
                    tap_count: 1,
                    ..gesture
                };
                handled |= emit(&widget, event, GestureKind::Tap, tap)?;
                self.last_tap = Some(LastTap {
                    time_ms: now,
                    position: gesture.position,
                    widget: Rc::downgrade(&widget),
                });
            }
        }

        self.tracker = None;
        log::debug!("gesture: pointer {:?} released", p.id);

        Ok(Dispatch {
            target: Some(widget),
            handled,
        })
    }

    fn is_double_tap(&mut self, widget: &WidgetRef, time_ms: u32, pos: Vec2) -> bool {
        let Some(last) = &self.last_tap else {
            return false;
        };
        let same = last
            .widget
            .upgrade()
            .is_some_and(|w| same_widget(&w, widget));
        if !same {
            return false;
        }

        let (last_time, last_pos) = (last.time_ms, last.position);
        if time_ms < last_time {
            self.last_tap = None;
            return false;
        }

        let max_sq = self.config.double_tap_max_distance * self.config.double_tap_max_distance;
        time_ms - last_time <= self.config.double_tap_max_ms && last_pos.distance_sq(pos) <= max_sq
    }
}
