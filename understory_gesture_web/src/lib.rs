// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture_web --heading-base-level=0

//! DOM binding for `understory_gesture`.
//!
//! This crate provides a [`Listen`](understory_gesture::Listen) implementation
//! backed by `web_sys::EventTarget` when targeting `wasm32`, plus browser
//! capability detection.
//!
//! # Usage
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn bind(
//!     element: web_sys::EventTarget,
//! ) -> Result<understory_gesture::Attachment, understory_gesture_web::ListenError> {
//!     understory_gesture_web::attach(&element, |ev| {
//!         let _affine = ev.transform.to_affine();
//!     })
//! }
//! ```
//!
//! Notes:
//! - Listeners are registered with `passive: false` and call
//!   `preventDefault()` before the event is converted, so the page does not
//!   scroll or zoom underneath the gesture.
//! - Positions come from `screenX`/`screenY`; no coordinate-space conversion
//!   is applied.
//! - Native `gesture*` events are only delivered by `WebKit` on macOS. Their
//!   `scale` and `rotation` are read as untyped properties.
//! - On other targets this crate only exposes the field conversions in
//!   [`convert`].

#![no_std]

extern crate alloc;

pub mod convert;

#[cfg(target_arch = "wasm32")]
mod detect;
#[cfg(target_arch = "wasm32")]
mod target;

#[cfg(target_arch = "wasm32")]
pub use detect::detect_capabilities;
#[cfg(target_arch = "wasm32")]
pub use target::{ListenError, WebTarget};

/// Starts a gesture session on a DOM element with detected capabilities and
/// the default tuning.
///
/// # Errors
///
/// Returns the first registration refused by the DOM; listeners bound before
/// it are released.
#[cfg(target_arch = "wasm32")]
pub fn attach<F>(
    target: &web_sys::EventTarget,
    handler: F,
) -> Result<understory_gesture::Attachment, ListenError>
where
    F: FnMut(understory_gesture::TransformEvent) + 'static,
{
    understory_gesture::attach(
        &WebTarget::new(target.clone()),
        detect_capabilities(),
        understory_gesture::GestureConfig::default(),
        handler,
    )
}
