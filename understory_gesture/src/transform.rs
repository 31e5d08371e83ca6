// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The absolute transform and the per-input output event.

use kurbo::{Affine, Vec2};

/// Running absolute pan/rotate/scale accumulated from every handled input.
///
/// Rotation is in degrees. `scale` never goes below zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// Cumulative translation in screen units.
    pub translation: Vec2,
    /// Cumulative rotation in degrees.
    pub rotation: f64,
    /// Cumulative scale factor.
    pub scale: f64,
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
    };

    /// Returns the affine `translate * rotate * scale`.
    ///
    /// This is the composition a renderer applies to the manipulated object:
    /// scale and rotate about the object's origin, then translate.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale(self.scale)
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }

    /// Adds `delta` to this transform, clamping the scale at zero.
    pub(crate) fn apply(&mut self, delta: TransformDelta) {
        self.translation += delta.translation;
        self.rotation += delta.rotation;
        self.scale = (self.scale + delta.scale).max(0.0);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Change applied by a single input.
///
/// `scale` is additive: the new absolute scale is `old + delta.scale`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformDelta {
    /// Translation change.
    pub translation: Vec2,
    /// Rotation change in degrees.
    pub rotation: f64,
    /// Additive scale change.
    pub scale: f64,
}

impl TransformDelta {
    /// No change.
    pub const ZERO: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: 0.0,
    };

    /// A pure translation.
    #[must_use]
    pub const fn pan(translation: Vec2) -> Self {
        Self {
            translation,
            rotation: 0.0,
            scale: 0.0,
        }
    }

    /// A pure rotation, in degrees.
    #[must_use]
    pub const fn rotate(rotation: f64) -> Self {
        Self {
            translation: Vec2::ZERO,
            rotation,
            scale: 0.0,
        }
    }

    /// A pure additive scale change.
    #[must_use]
    pub const fn scale(scale: f64) -> Self {
        Self {
            translation: Vec2::ZERO,
            rotation: 0.0,
            scale,
        }
    }

    /// Returns `true` if every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// Totals reported when the last active pointer is released.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerRelease {
    /// Unsigned path length travelled along each axis since the press.
    pub travel: Vec2,
    /// Milliseconds between the press and the release.
    pub duration: f64,
}

/// Normalized output, emitted once per handled input.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformEvent {
    /// Absolute transform after this input was applied.
    pub transform: Transform,
    /// Change caused by this input.
    pub delta: TransformDelta,
    /// Present only on the release of the last active pointer.
    pub release: Option<PointerRelease>,
}

impl TransformEvent {
    /// Unsigned travel of a released pointer, or zero.
    #[must_use]
    pub fn travel(&self) -> Vec2 {
        self.release.map_or(Vec2::ZERO, |r| r.travel)
    }

    /// Press duration of a released pointer, or zero.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.release.map_or(0.0, |r| r.duration)
    }
}
