// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field-level conversions from DOM event values.
//!
//! Kept free of `web_sys` types so they build and test on every target.

use kurbo::Point;
use understory_gesture::{GestureInput, Modifiers, PointerId};

/// Modifier set from the DOM `ctrlKey`/`shiftKey`/`altKey`/`metaKey` flags.
#[must_use]
pub fn modifiers(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::CONTROL, ctrl);
    modifiers.set(Modifiers::SHIFT, shift);
    modifiers.set(Modifiers::ALT, alt);
    modifiers.set(Modifiers::META, meta);
    modifiers
}

/// Screen position from DOM `screenX`/`screenY`.
#[must_use]
pub fn screen_point(x: i32, y: i32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

/// Pointer id from DOM `pointerId`.
#[must_use]
pub fn pointer_id(id: i32) -> PointerId {
    PointerId::from(id)
}

/// Gesture input from the untyped `scale`/`rotation` properties of a `WebKit`
/// gesture event.
///
/// Missing or non-finite values fall back to the session baseline (scale 1,
/// rotation 0).
#[must_use]
pub fn gesture_input(position: Point, scale: Option<f64>, rotation: Option<f64>) -> GestureInput {
    let scale = scale.filter(|s| s.is_finite()).unwrap_or(1.0);
    let rotation = rotation.filter(|r| r.is_finite()).unwrap_or(0.0);
    GestureInput::new(position, scale, rotation)
}
