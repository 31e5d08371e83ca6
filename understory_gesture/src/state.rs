// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture state machine.
//!
//! [`GestureState`] owns the absolute [`Transform`], the active pointers, and
//! the native gesture snapshot. Each input method updates that state and
//! returns the resulting [`TransformEvent`], or `None` when the input was
//! ignored (unknown pointer, filtered press) or produces no output by design
//! (press, gesture start/end).
//!
//! There is no explicit phase enum: the regime is decided per event by the
//! number of active pointers and the [`Capabilities`].
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::{Capabilities, GestureConfig, GestureState, PointerInput};
//!
//! let mut state = GestureState::new(Capabilities::MULTI_TOUCH, GestureConfig::default());
//!
//! // Two fingers down; the second one moves away from the first.
//! state.pointer_down(&PointerInput::new(1, Point::new(0.0, 0.0), 0.0));
//! state.pointer_down(&PointerInput::new(2, Point::new(10.0, 0.0), 0.0));
//! let ev = state
//!     .pointer_move(&PointerInput::new(2, Point::new(20.0, 0.0), 16.0))
//!     .unwrap();
//!
//! assert_eq!(ev.transform.scale, 2.0);
//! assert_eq!(ev.delta.scale, 1.0);
//! // Each finger contributes half of its displacement to the pan.
//! assert_eq!(ev.delta.translation, Vec2::new(5.0, 0.0));
//! ```

use kurbo::{Point, Vec2};

use crate::config::{Capabilities, GestureConfig};
use crate::geometry::{angle_delta, distance_factor, exp_factor};
use crate::input::{GestureInput, PointerId, PointerInput, WheelInput};
use crate::pointer::PointerSet;
use crate::transform::{PointerRelease, Transform, TransformDelta, TransformEvent};

/// Last values reported by the platform gesture API.
///
/// Platform gestures report absolutes per session; deltas are computed against
/// this snapshot, which is re-anchored at the start and end of every session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSnapshot {
    /// Last gesture position.
    pub position: Point,
    /// Last absolute gesture scale.
    pub scale: f64,
    /// Last absolute gesture rotation, in degrees.
    pub rotation: f64,
}

impl GestureSnapshot {
    /// Snapshot before any gesture has been observed.
    pub const INITIAL: Self = Self {
        position: Point::ORIGIN,
        scale: 1.0,
        rotation: 0.0,
    };

    fn anchor(&mut self, input: &GestureInput) {
        self.position = input.position;
        self.scale = input.scale;
        self.rotation = input.rotation;
    }
}

impl Default for GestureSnapshot {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Event-driven pan/zoom/rotate state for one attachment.
#[derive(Clone, Debug)]
pub struct GestureState {
    transform: Transform,
    pointers: PointerSet,
    snapshot: GestureSnapshot,
    capabilities: Capabilities,
    config: GestureConfig,
}

impl GestureState {
    /// Creates a state machine with the identity transform and no pointers.
    #[must_use]
    pub fn new(capabilities: Capabilities, config: GestureConfig) -> Self {
        Self {
            transform: Transform::IDENTITY,
            pointers: PointerSet::new(),
            snapshot: GestureSnapshot::INITIAL,
            capabilities,
            config,
        }
    }

    /// Current absolute transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Active pointers.
    #[must_use]
    pub fn pointers(&self) -> &PointerSet {
        &self.pointers
    }

    /// Primary pointer id.
    #[must_use]
    pub fn primary(&self) -> Option<PointerId> {
        self.pointers.primary()
    }

    /// Last native gesture snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GestureSnapshot {
        self.snapshot
    }

    /// Capabilities this state was created with.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Tuning constants.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Discards all pointers and gesture history and restores the identity
    /// transform.
    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
        self.pointers.clear();
        self.snapshot = GestureSnapshot::INITIAL;
    }

    /// Handles a pointer press.
    ///
    /// Presses with CTRL held or with a non-primary button are left to the
    /// host page and return `false`. Otherwise the pointer is tracked, becomes
    /// primary, and `true` is returned. A press never emits output.
    pub fn pointer_down(&mut self, input: &PointerInput) -> bool {
        if input.modifiers.ctrl() || input.button > 0 {
            log::trace!(
                "ignoring press of pointer {} (button {}, ctrl {})",
                input.id,
                input.button,
                input.modifiers.ctrl()
            );
            return false;
        }
        self.pointers
            .press(input.id, input.position, input.timestamp);
        true
    }

    /// Handles a pointer move.
    ///
    /// With one active pointer (or without [`Capabilities::MULTI_TOUCH`]) the
    /// movement pans 1:1. With two or more pointers and multi-touch enabled the
    /// movement is interpreted as a pinch against the other pointer.
    pub fn pointer_move(&mut self, input: &PointerInput) -> Option<TransformEvent> {
        if !self.pointers.contains(input.id) {
            log::trace!("ignoring move of unknown pointer {}", input.id);
            return None;
        }

        if !self.capabilities.multi_touch() || self.pointers.len() < 2 {
            let record = self.pointers.get_mut(input.id)?;
            let delta = record.update(input.position);
            return Some(self.emit(TransformDelta::pan(delta), None));
        }

        self.pinch(input)
    }

    fn pinch(&mut self, input: &PointerInput) -> Option<TransformEvent> {
        let primary = self.pointers.primary();
        let anchor = if primary == Some(input.id) {
            self.pointers.first_other(input.id)
        } else {
            primary.and_then(|id| self.pointers.get(id))
        }
        .map(|r| r.position);

        let record = self.pointers.get_mut(input.id)?;
        let previous = record.position;
        let moved = record.reposition(input.position);

        let Some(anchor) = anchor else {
            // No counterpart to pinch against; keep the position so the next
            // move does not jump.
            log::trace!("pinch of pointer {} has no anchor pointer", input.id);
            return None;
        };

        let factor = distance_factor(anchor, previous, input.position);
        let scale = self.transform.scale;
        let delta = TransformDelta {
            translation: moved * self.config.pinch_pan_factor,
            rotation: angle_delta(anchor, previous, input.position),
            scale: scale * factor - scale,
        };
        let event = self.emit(delta, None);
        self.pointers.set_primary(input.id);
        Some(event)
    }

    /// Handles a pointer release or leave.
    ///
    /// Releasing the last active pointer emits a zero-delta event carrying the
    /// pointer's total unsigned travel and press duration. Releasing any other
    /// pointer returns `None`, including when the primary role moves to a
    /// remaining pointer.
    pub fn pointer_up(&mut self, input: &PointerInput) -> Option<TransformEvent> {
        let was_last = self.pointers.len() == 1;
        let Some(record) = self.pointers.release(input.id) else {
            log::trace!("ignoring release of unknown pointer {}", input.id);
            return None;
        };
        if !was_last {
            return None;
        }
        let release = PointerRelease {
            travel: record.travel,
            duration: input.timestamp - record.pressed_at,
        };
        Some(self.emit(TransformDelta::ZERO, Some(release)))
    }

    /// Handles a pointer leaving the target. Same as [`Self::pointer_up`].
    pub fn pointer_leave(&mut self, input: &PointerInput) -> Option<TransformEvent> {
        self.pointer_up(input)
    }

    /// Handles a wheel event.
    ///
    /// Deltas are first normalized by [`DeltaMode`](crate::DeltaMode) and the
    /// sign convention, then dispatched:
    ///
    /// 1. a non-zero Z delta rotates, and X/Y are ignored;
    /// 2. CTRL uses the dominant X/Y delta on the exponential curve, as
    ///    rotation when SHIFT is also held and as zoom otherwise;
    /// 3. anything else pans.
    pub fn wheel(&mut self, input: &WheelInput) -> TransformEvent {
        let unit = self.config.wheel_sign * self.config.delta_multiplier(input.mode);
        let delta: Vec2 = input.delta * unit;
        let delta_z = input.delta_z * unit;

        if delta_z != 0.0 {
            let rotation = self.config.wheel_rotation * delta_z;
            return self.emit(TransformDelta::rotate(rotation), None);
        }

        if input.modifiers.ctrl() {
            let dominant = if delta.x.abs() > delta.y.abs() {
                delta.x
            } else {
                delta.y
            };
            let factor = exp_factor(dominant, self.config.zoom_rate);

            if input.modifiers.shift() {
                let rotation = if self.config.zoom_rate == 0.0 {
                    self.config.wheel_rotation * dominant
                } else {
                    self.config.wheel_rotation * factor / self.config.zoom_rate
                };
                return self.emit(TransformDelta::rotate(rotation), None);
            }

            let scale = self.transform.scale;
            let next = (scale + factor).max(0.0);
            return self.emit(TransformDelta::scale(next - scale), None);
        }

        self.emit(TransformDelta::pan(delta), None)
    }

    /// Handles `gesturestart`: re-anchors the snapshot, no output.
    pub fn gesture_start(&mut self, input: &GestureInput) {
        self.snapshot.anchor(input);
    }

    /// Handles `gestureend`: re-anchors the snapshot, no output.
    pub fn gesture_end(&mut self, input: &GestureInput) {
        self.snapshot.anchor(input);
    }

    /// Handles `gesturechange`: applies the difference from the snapshot.
    pub fn gesture_change(&mut self, input: &GestureInput) -> TransformEvent {
        let scale = self.transform.scale;
        let next = (scale + (input.scale - self.snapshot.scale)).max(0.0);
        let delta = TransformDelta {
            translation: input.position - self.snapshot.position,
            rotation: input.rotation - self.snapshot.rotation,
            scale: next - scale,
        };
        self.snapshot.anchor(input);
        self.emit(delta, None)
    }

    fn emit(&mut self, delta: TransformDelta, release: Option<PointerRelease>) -> TransformEvent {
        let mut next = self.transform;
        next.apply(delta);
        let delta = if delta.is_finite() && next.is_finite() {
            self.transform = next;
            delta
        } else {
            log::warn!("dropping non-finite transform delta {delta:?}");
            TransformDelta::ZERO
        };
        TransformEvent {
            transform: self.transform,
            delta,
            release,
        }
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new(Capabilities::default(), GestureConfig::default())
    }
}
