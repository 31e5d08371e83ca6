// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener contract between the gesture session and an event source.
//!
//! A [`Listen`] target delivers raw input for one event family at a time and
//! hands back a [`Listener`] guard. The session never talks to a windowing
//! system directly; see [`LocalTarget`](crate::LocalTarget) for an in-process
//! target and `understory_gesture_web` for the DOM one.

use alloc::boxed::Box;
use core::fmt;

use crate::input::{GestureInput, GesturePhase, PointerInput, PointerPhase, WheelInput};

/// Callback for wheel input.
pub type WheelHandler = Box<dyn FnMut(WheelInput)>;
/// Callback for pointer input.
pub type PointerHandler = Box<dyn FnMut(PointerInput)>;
/// Callback for native gesture input.
pub type GestureHandler = Box<dyn FnMut(GestureInput)>;

/// What a target does with the host's default action for a delivered event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DefaultAction {
    /// Cancel the default action (scroll, zoom, navigation) before the
    /// handler runs.
    #[default]
    Suppress,
}

impl DefaultAction {
    /// Returns `true` if the default action must be cancelled.
    #[must_use]
    pub const fn suppresses(self) -> bool {
        match self {
            Self::Suppress => true,
        }
    }
}

/// A source of raw input events.
pub trait Listen {
    /// Error returned when a listener cannot be registered.
    type Error;

    /// Registers `handler` for wheel events.
    fn listen_wheel(
        &self,
        action: DefaultAction,
        handler: WheelHandler,
    ) -> Result<Listener, Self::Error>;

    /// Registers `handler` for pointer events of `phase`.
    fn listen_pointer(
        &self,
        phase: PointerPhase,
        action: DefaultAction,
        handler: PointerHandler,
    ) -> Result<Listener, Self::Error>;

    /// Registers `handler` for native gesture events of `phase`.
    fn listen_gesture(
        &self,
        phase: GesturePhase,
        action: DefaultAction,
        handler: GestureHandler,
    ) -> Result<Listener, Self::Error>;
}

/// Registration guard returned by [`Listen`].
///
/// The registration is removed by [`Listener::unlisten`] or when the guard is
/// dropped, whichever comes first. Removal runs at most once.
pub struct Listener {
    unlisten: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    /// Creates a guard that runs `unlisten` to remove the registration.
    pub fn new(unlisten: impl FnOnce() + 'static) -> Self {
        Self {
            unlisten: Some(Box::new(unlisten)),
        }
    }

    /// Removes the registration. Later calls do nothing.
    pub fn unlisten(&mut self) {
        if let Some(unlisten) = self.unlisten.take() {
            unlisten();
        }
    }

    /// Returns `true` until the registration has been removed.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.unlisten.is_some()
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("listening", &self.is_listening())
            .finish_non_exhaustive()
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.unlisten();
    }
}
