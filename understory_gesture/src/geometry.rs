// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure numeric helpers for pinch geometry and wheel zoom curves.
//!
//! All angles are in degrees. The three-point helpers take a shared vertex `a`
//! and compare the vector `a → b` (the previous state) with `a → c` (the new
//! state), which is exactly what a two-finger pinch needs when one finger is
//! held still and the other moves.
//!
//! Every function returns a finite value for finite inputs: zero-length
//! vectors are treated as "no change" instead of producing `NaN`.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::geometry::{angle_delta, distance_factor};
//!
//! let anchor = Point::new(0.0, 0.0);
//! let before = Point::new(10.0, 0.0);
//! let after = Point::new(0.0, 20.0);
//!
//! assert_eq!(distance_factor(anchor, before, after), 2.0);
//! assert!((angle_delta(anchor, before, after) - 90.0).abs() < 1e-9);
//! ```

use kurbo::Point;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Euclidean distance between two points.
#[must_use]
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Direction of the vector `a → b`, in degrees.
///
/// Returns `0.0` when `a == b`.
#[must_use]
#[inline]
pub fn angle(a: Point, b: Point) -> f64 {
    (b - a).atan2().to_degrees()
}

/// Signed angle in degrees from vector `a → b` to vector `a → c`.
///
/// Computed as `atan2(cross, dot)` of the two vectors, so the result is always
/// in `(-180, 180]` and does not wrap the way a difference of two absolute
/// directions can. Returns `0.0` when either vector has zero length.
#[must_use]
pub fn angle_delta(a: Point, b: Point, c: Point) -> f64 {
    let from = b - a;
    let to = c - a;
    let cross = from.cross(to);
    let dot = from.dot(to);
    if cross == 0.0 && dot == 0.0 {
        return 0.0;
    }
    cross.atan2(dot).to_degrees()
}

/// Ratio `|a → c| / |a → b|`.
///
/// Returns `1.0` (no scale change) when `|a → b|` is zero.
#[must_use]
pub fn distance_factor(a: Point, b: Point, c: Point) -> f64 {
    let reference = distance(a, b);
    if reference == 0.0 || !reference.is_finite() {
        return 1.0;
    }
    distance(a, c) / reference
}

/// Largest exponent [`exp_factor`] evaluates; larger arguments saturate.
pub const MAX_EXP_ARGUMENT: f64 = 64.0;

/// Signed exponential response curve for wheel zoom and rotation.
///
/// `signum(delta) * (exp(rate * |delta|) - 1)`: zero at zero, sign preserved,
/// close to `rate * delta` for small deltas and growing exponentially for large
/// ones, so fine trackpad deltas and coarse wheel notches both feel consistent.
///
/// The exponent is capped at [`MAX_EXP_ARGUMENT`], so the result stays finite
/// for any finite `delta` and `rate`.
#[must_use]
pub fn exp_factor(delta: f64, rate: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let argument = (rate * delta.abs()).min(MAX_EXP_ARGUMENT);
    let magnitude = exp(argument) - 1.0;
    magnitude.copysign(delta)
}

#[cfg(feature = "std")]
#[inline]
fn exp(x: f64) -> f64 {
    x.exp()
}

// `FloatFuncs` has no `exp`.
#[cfg(not(feature = "std"))]
#[inline]
fn exp(x: f64) -> f64 {
    libm::exp(x)
}
