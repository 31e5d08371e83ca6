// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: normalize wheel, pointer, and native gesture input into
//! pan/zoom/rotate transforms.
//!
//! Input devices disagree about almost everything: a mouse wheel reports
//! pixel, line, or page deltas; a touch screen reports individual fingers; a
//! macOS trackpad reports its own pinch and rotate gestures. This crate folds
//! all of them into one stream of [`TransformEvent`]s, each carrying the change
//! caused by one input and the running absolute [`Transform`].
//!
//! ## Building blocks
//!
//! - [`GestureState`]: the state machine. Feed it raw inputs, get events back.
//! - [`attach`]: binds a [`GestureState`] to any [`Listen`] target and calls a
//!   handler for every event, until the returned [`Attachment`] is detached.
//! - [`LocalTarget`]: an in-process [`Listen`] target for hosts that own their
//!   event loop. `understory_gesture_web` provides the DOM target.
//! - [`Capabilities`] and [`GestureConfig`]: which event families to use and
//!   the tuning constants for wheel and pinch interpretation.
//! - [`geometry`]: the pinch and wheel math, usable on its own.
//!
//! ## Input semantics
//!
//! | Input | Effect |
//! |-------|--------|
//! | One pointer dragging | Pan 1:1 |
//! | Two pointers (with [`Capabilities::MULTI_TOUCH`]) | Pinch: scale by the distance ratio, rotate by the angle change, pan by half the movement |
//! | Wheel | Pan, with the sign inverted so content follows the fingers |
//! | Wheel + CTRL | Zoom along an exponential curve |
//! | Wheel + CTRL + SHIFT | Rotate along the same curve |
//! | Wheel Z axis | Rotate |
//! | Native gesture (with [`Capabilities::NATIVE_GESTURE`]) | Pan, zoom and rotate by the change since the last gesture event |
//!
//! Releasing the last pointer emits one more event with zero deltas that
//! reports the pointer's total travel and how long it was down.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_gesture::{
//!     Capabilities, GestureConfig, LocalTarget, PointerInput, PointerPhase, attach,
//! };
//!
//! let target = LocalTarget::new();
//! let mut attachment = attach(
//!     &target,
//!     Capabilities::empty(),
//!     GestureConfig::default(),
//!     |ev| {
//!         // Apply `ev.transform.to_affine()` to the manipulated object here.
//!         let _ = ev;
//!     },
//! )
//! .unwrap();
//!
//! target.dispatch_pointer(PointerPhase::Down, PointerInput::new(1, Point::new(10.0, 10.0), 0.0));
//! target.dispatch_pointer(PointerPhase::Move, PointerInput::new(1, Point::new(30.0, 15.0), 16.0));
//! assert_eq!(attachment.transform().translation, Vec2::new(20.0, 5.0));
//!
//! attachment.detach();
//! assert_eq!(target.listener_count(), 0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): build against the standard library.
//! - `libm`: use `libm` for float math in `no_std` builds.
//! - `serde`: derive `Serialize`/`Deserialize` for transforms, events, and
//!   configuration.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod attach;
mod config;
pub mod geometry;
mod input;
mod listen;
mod local;
pub mod pointer;
mod state;
mod transform;

pub use attach::{Attachment, attach};
pub use config::{Capabilities, GestureConfig};
pub use input::{
    DeltaMode, GestureInput, GesturePhase, PointerId, PointerInput, PointerPhase,
    WHEEL_EVENT_NAME, WheelInput,
};
pub use listen::{DefaultAction, GestureHandler, Listen, Listener, PointerHandler, WheelHandler};
pub use local::LocalTarget;
pub use pointer::{PointerRecord, PointerSet};
pub use state::{GestureSnapshot, GestureState};
pub use transform::{PointerRelease, Transform, TransformDelta, TransformEvent};

pub use ui_events::keyboard::Modifiers;
