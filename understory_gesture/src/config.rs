// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability flags and tuning constants.
//!
//! None of the constants in [`GestureConfig`] are physical laws; they were
//! tuned by feel and are exposed so hosts can adjust them. The defaults keep
//! one invariant: a line is 20 pixels and a page is 20 lines, so the same
//! physical scroll produces similar motion regardless of the reported
//! [`DeltaMode`].

use crate::input::DeltaMode;

bitflags::bitflags! {
    /// Which event families and algorithms a gesture session uses.
    ///
    /// Computed once by the host and treated as immutable for the lifetime of
    /// an attachment.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        /// Bind the platform's native `gesture*` events for pinch/rotate.
        const NATIVE_GESTURE = 0b0000_0001;
        /// Derive pinch/rotate from two simultaneous pointers.
        const MULTI_TOUCH    = 0b0000_0010;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::empty()
    }
}

impl Capabilities {
    /// Derives capabilities from platform signals.
    ///
    /// - `platform`: the reported platform string (for example
    ///   `navigator.userAgentData.platform` or `navigator.platform`).
    /// - `has_webkit`: whether a `WebKit`-specific global is present.
    /// - `max_touch_points`: simultaneous touch points the device reports.
    ///
    /// Native gestures are used on macOS `WebKit` hosts, the only ones that
    /// deliver them. Multi-touch pinch math is used only when native gestures
    /// are unavailable and the device reports more than one touch point.
    #[must_use]
    pub fn detect(platform: &str, has_webkit: bool, max_touch_points: u32) -> Self {
        let is_mac = platform
            .as_bytes()
            .windows(3)
            .any(|w| w.eq_ignore_ascii_case(b"mac"));

        let mut caps = Self::empty();
        if is_mac && has_webkit {
            caps |= Self::NATIVE_GESTURE;
        } else if max_touch_points > 1 {
            caps |= Self::MULTI_TOUCH;
        }
        caps
    }

    /// Whether native gesture events are bound.
    #[must_use]
    pub const fn native_gesture(self) -> bool {
        self.contains(Self::NATIVE_GESTURE)
    }

    /// Whether two-pointer pinch math is used.
    #[must_use]
    pub const fn multi_touch(self) -> bool {
        self.contains(Self::MULTI_TOUCH)
    }
}

/// Tuning constants for wheel and pinch interpretation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Screen units per pixel-mode delta step. Default `1`.
    pub pixel_multiplier: f64,
    /// Screen units per line-mode delta step. Default `20`.
    pub line_multiplier: f64,
    /// Screen units per page-mode delta step. Default `400`.
    pub page_multiplier: f64,
    /// Applied to every wheel delta after unit normalization. Default `-1`:
    /// scrolling down moves the content up and zooms out.
    pub wheel_sign: f64,
    /// Degrees of rotation per normalized wheel unit. Default `0.15`.
    ///
    /// Used directly for Z-axis deltas and as the small-delta slope of
    /// CTRL+SHIFT wheel rotation.
    pub wheel_rotation: f64,
    /// Rate of the exponential wheel curve, see
    /// [`exp_factor`](crate::geometry::exp_factor). Default `0.005`.
    pub zoom_rate: f64,
    /// Share of a moving finger's displacement applied as pan during a
    /// two-pointer pinch. Default `0.5`: each finger contributes half.
    pub pinch_pan_factor: f64,
}

impl GestureConfig {
    /// The default tuning.
    pub const DEFAULT: Self = Self {
        pixel_multiplier: 1.0,
        line_multiplier: 20.0,
        page_multiplier: 400.0,
        wheel_sign: -1.0,
        wheel_rotation: 0.15,
        zoom_rate: 0.005,
        pinch_pan_factor: 0.5,
    };

    /// Screen units per delta step for `mode`.
    #[must_use]
    pub const fn delta_multiplier(&self, mode: DeltaMode) -> f64 {
        match mode {
            DeltaMode::Pixel => self.pixel_multiplier,
            DeltaMode::Line => self.line_multiplier,
            DeltaMode::Page => self.page_multiplier,
        }
    }

    /// Sets the per-mode delta multipliers.
    #[must_use]
    pub const fn with_delta_multipliers(mut self, pixel: f64, line: f64, page: f64) -> Self {
        self.pixel_multiplier = pixel;
        self.line_multiplier = line;
        self.page_multiplier = page;
        self
    }

    /// Sets the wheel sign convention.
    #[must_use]
    pub const fn with_wheel_sign(mut self, sign: f64) -> Self {
        self.wheel_sign = sign;
        self
    }

    /// Sets degrees of rotation per normalized wheel unit.
    #[must_use]
    pub const fn with_wheel_rotation(mut self, degrees: f64) -> Self {
        self.wheel_rotation = degrees;
        self
    }

    /// Sets the exponential wheel curve rate.
    #[must_use]
    pub const fn with_zoom_rate(mut self, rate: f64) -> Self {
        self.zoom_rate = rate;
        self
    }

    /// Sets the pinch pan share.
    #[must_use]
    pub const fn with_pinch_pan_factor(mut self, factor: f64) -> Self {
        self.pinch_pan_factor = factor;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_native_gesture_on_mac_webkit() {
        let caps = Capabilities::detect("MacIntel", true, 0);
        assert_eq!(caps, Capabilities::NATIVE_GESTURE);
        assert!(caps.native_gesture());
        assert!(!caps.multi_touch());

        // Lowercase userAgentData platform string.
        assert!(Capabilities::detect("macOS", true, 5).native_gesture());
    }

    #[test]
    fn detect_native_gesture_disables_multi_touch() {
        let caps = Capabilities::detect("MacIntel", true, 5);
        assert!(!caps.multi_touch());
    }

    #[test]
    fn detect_requires_webkit_for_native_gesture() {
        let caps = Capabilities::detect("MacIntel", false, 0);
        assert!(caps.is_empty());
    }

    #[test]
    fn detect_multi_touch_from_touch_points() {
        assert_eq!(
            Capabilities::detect("Win32", false, 10),
            Capabilities::MULTI_TOUCH
        );
        assert_eq!(
            Capabilities::detect("Linux armv8l", true, 5),
            Capabilities::MULTI_TOUCH
        );
        assert!(Capabilities::detect("Win32", false, 1).is_empty());
        assert!(Capabilities::detect("", false, 0).is_empty());
    }

    #[test]
    fn multipliers_are_self_consistent() {
        let config = GestureConfig::default();
        assert_eq!(config.delta_multiplier(DeltaMode::Pixel), 1.0);
        assert_eq!(
            config.delta_multiplier(DeltaMode::Page),
            20.0 * config.delta_multiplier(DeltaMode::Line)
        );
    }

    #[test]
    fn builders_override_fields() {
        let config = GestureConfig::DEFAULT
            .with_delta_multipliers(1.0, 100.0, 100.0)
            .with_wheel_sign(1.0)
            .with_wheel_rotation(0.3)
            .with_zoom_rate(0.01)
            .with_pinch_pan_factor(1.0);
        assert_eq!(config.delta_multiplier(DeltaMode::Line), 100.0);
        assert_eq!(config.wheel_sign, 1.0);
        assert_eq!(config.wheel_rotation, 0.3);
        assert_eq!(config.zoom_rate, 0.01);
        assert_eq!(config.pinch_pan_factor, 1.0);
    }
}
