// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input shapes consumed by [`GestureState`](crate::GestureState).
//!
//! Each struct carries only the fields the state machine reads. Hosts fill them
//! from whatever event source they have: DOM events in
//! `understory_gesture_web`, a native windowing loop, or a recorded trace.
//! Positions are raw screen coordinates; no coordinate-space conversion is
//! applied anywhere in this crate.

use kurbo::{Point, Vec2};
use ui_events::keyboard::Modifiers;

/// Device-assigned pointer identifier.
///
/// Unique among the pointers that are currently down.
pub type PointerId = i64;

/// A pointer down, move, up, or leave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer identifier.
    pub id: PointerId,
    /// Screen position of the pointer.
    pub position: Point,
    /// Host timestamp in milliseconds.
    pub timestamp: f64,
    /// Modifier keys held when the event fired.
    pub modifiers: Modifiers,
    /// Button index in DOM numbering: `0` is the primary button, anything
    /// greater is secondary/auxiliary, `-1` means no button changed.
    pub button: i16,
}

impl PointerInput {
    /// Creates a primary-button input with no modifiers.
    #[must_use]
    pub fn new(id: PointerId, position: Point, timestamp: f64) -> Self {
        Self {
            id,
            position,
            timestamp,
            modifiers: Modifiers::empty(),
            button: 0,
        }
    }

    /// Returns a copy with the given modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns a copy with the given DOM button index.
    #[must_use]
    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }
}

/// Unit of a wheel delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeltaMode {
    /// Deltas are in pixels.
    #[default]
    Pixel,
    /// Deltas are in lines.
    Line,
    /// Deltas are in pages.
    Page,
}

impl DeltaMode {
    /// Maps a DOM `WheelEvent.deltaMode` code.
    ///
    /// Unknown codes are treated as pixels.
    #[must_use]
    pub fn from_dom(code: u32) -> Self {
        match code {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// A wheel or trackpad scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Horizontal and vertical deltas, in units of [`WheelInput::mode`].
    pub delta: Vec2,
    /// Z-axis delta, reported by devices that expose rotation on the wheel.
    pub delta_z: f64,
    /// Unit of the deltas.
    pub mode: DeltaMode,
    /// Modifier keys held when the event fired.
    pub modifiers: Modifiers,
}

impl WheelInput {
    /// Creates a pixel-mode wheel input with no Z delta and no modifiers.
    #[must_use]
    pub fn new(delta: Vec2) -> Self {
        Self {
            delta,
            delta_z: 0.0,
            mode: DeltaMode::Pixel,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns a copy with the given Z delta.
    #[must_use]
    pub fn with_delta_z(mut self, delta_z: f64) -> Self {
        self.delta_z = delta_z;
        self
    }

    /// Returns a copy with the given delta mode.
    #[must_use]
    pub fn with_mode(mut self, mode: DeltaMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns a copy with the given modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A platform gesture callback (`gesturestart`, `gesturechange`, `gestureend`).
///
/// Platforms report these values as absolutes for the current gesture session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureInput {
    /// Screen position of the gesture.
    pub position: Point,
    /// Absolute scale of the gesture session (starts at `1.0`).
    pub scale: f64,
    /// Absolute rotation of the gesture session, in degrees.
    pub rotation: f64,
}

impl GestureInput {
    /// Creates a gesture input.
    #[must_use]
    pub const fn new(position: Point, scale: f64, rotation: f64) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }
}

/// Which pointer event a pointer listener is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// `pointerdown`
    Down,
    /// `pointermove`
    Move,
    /// `pointerup`
    Up,
    /// `pointerleave`
    Leave,
}

impl PointerPhase {
    /// DOM event name for this phase.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Down => "pointerdown",
            Self::Move => "pointermove",
            Self::Up => "pointerup",
            Self::Leave => "pointerleave",
        }
    }
}

/// Which native gesture event a gesture listener is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// `gesturestart`
    Start,
    /// `gesturechange`
    Change,
    /// `gestureend`
    End,
}

impl GesturePhase {
    /// DOM event name for this phase.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Start => "gesturestart",
            Self::Change => "gesturechange",
            Self::End => "gestureend",
        }
    }
}

/// DOM event name for wheel listeners.
pub const WHEEL_EVENT_NAME: &str = "wheel";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_mode_from_dom_codes() {
        assert_eq!(DeltaMode::from_dom(0), DeltaMode::Pixel);
        assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
        assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);
        assert_eq!(DeltaMode::from_dom(7), DeltaMode::Pixel);
    }

    #[test]
    fn event_names_match_dom() {
        assert_eq!(PointerPhase::Leave.event_name(), "pointerleave");
        assert_eq!(GesturePhase::Change.event_name(), "gesturechange");
    }

    #[test]
    fn builders_override_defaults() {
        let p = PointerInput::new(3, Point::new(1.0, 2.0), 5.0)
            .with_button(2)
            .with_modifiers(Modifiers::CONTROL);
        assert_eq!(p.button, 2);
        assert!(p.modifiers.ctrl());

        let w = WheelInput::new(Vec2::new(1.0, 0.0))
            .with_delta_z(4.0)
            .with_mode(DeltaMode::Line);
        assert_eq!(w.delta_z, 4.0);
        assert_eq!(w.mode, DeltaMode::Line);
        assert!(w.modifiers.is_empty());
    }
}
