// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding a [`GestureState`] to a [`Listen`] target.
//!
//! [`attach`] registers every listener a session needs and returns an
//! [`Attachment`] that owns them. The session state is shared between the
//! listeners through `Rc<RefCell<..>>`, so an attachment is `!Send` and lives
//! on the thread that delivers its events.
//!
//! ## Lifecycle
//!
//! - Native gesture listeners are bound first, and only when
//!   [`Capabilities::NATIVE_GESTURE`] is set. Wheel and pointer
//!   down/up/leave/move listeners follow.
//! - If any registration fails, every listener bound so far is released and
//!   the target's error is returned.
//! - [`Attachment::detach`] (or dropping the attachment) releases all
//!   listeners and discards the session state. After that the handler is
//!   never called again, even if the target keeps delivering events.
//!
//! An event delivered while the handler is still running for a previous event
//! on the same attachment is dropped with a warning.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::config::{Capabilities, GestureConfig};
use crate::input::{GestureInput, GesturePhase, PointerInput, PointerPhase, WheelInput};
use crate::listen::{DefaultAction, Listen, Listener};
use crate::state::GestureState;
use crate::transform::{Transform, TransformEvent};

const POINTER_PHASES: [PointerPhase; 4] = [
    PointerPhase::Down,
    PointerPhase::Up,
    PointerPhase::Leave,
    PointerPhase::Move,
];

const GESTURE_PHASES: [GesturePhase; 3] = [
    GesturePhase::Start,
    GesturePhase::Change,
    GesturePhase::End,
];

struct Session {
    state: RefCell<GestureState>,
    handler: RefCell<Box<dyn FnMut(TransformEvent)>>,
    detached: Cell<bool>,
}

impl Session {
    fn handle(&self, step: impl FnOnce(&mut GestureState) -> Option<TransformEvent>) {
        if self.detached.get() {
            return;
        }
        let Ok(mut handler) = self.handler.try_borrow_mut() else {
            log::warn!("dropping re-entrant gesture input");
            return;
        };
        let event = match self.state.try_borrow_mut() {
            Ok(mut state) => step(&mut state),
            Err(_) => {
                log::warn!("dropping gesture input: state is busy");
                return;
            }
        };
        if let Some(event) = event {
            handler(event);
        }
    }

    fn pointer(&self, phase: PointerPhase, input: &PointerInput) {
        self.handle(|state| match phase {
            PointerPhase::Down => {
                state.pointer_down(input);
                None
            }
            PointerPhase::Move => state.pointer_move(input),
            PointerPhase::Up => state.pointer_up(input),
            PointerPhase::Leave => state.pointer_leave(input),
        });
    }

    fn gesture(&self, phase: GesturePhase, input: &GestureInput) {
        self.handle(|state| match phase {
            GesturePhase::Start => {
                state.gesture_start(input);
                None
            }
            GesturePhase::Change => Some(state.gesture_change(input)),
            GesturePhase::End => {
                state.gesture_end(input);
                None
            }
        });
    }

    fn wheel(&self, input: &WheelInput) {
        self.handle(|state| Some(state.wheel(input)));
    }
}

/// Live binding between a target and a gesture session.
///
/// Dropping the attachment detaches it.
pub struct Attachment {
    session: Rc<Session>,
    listeners: Vec<Listener>,
}

impl Attachment {
    /// Releases every listener and discards the session state.
    ///
    /// Calling this more than once is a no-op.
    pub fn detach(&mut self) {
        if self.session.detached.replace(true) {
            return;
        }
        let count = self.listeners.len();
        for mut listener in self.listeners.drain(..) {
            listener.unlisten();
        }
        if let Ok(mut state) = self.session.state.try_borrow_mut() {
            state.reset();
        }
        log::debug!("gesture session detached, released {count} listeners");
    }

    /// Returns `true` until [`Attachment::detach`] has run.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.session.detached.get()
    }

    /// Current absolute transform of the session.
    ///
    /// Returns the identity once detached.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.session
            .state
            .try_borrow()
            .map_or(Transform::IDENTITY, |state| state.transform())
    }

    /// Capabilities the session was attached with.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.session
            .state
            .try_borrow()
            .map_or(Capabilities::empty(), |state| state.capabilities())
    }

    /// Number of listeners currently held.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn bind<E>(&mut self, event: &str, listener: Result<Listener, E>) -> Result<(), E> {
        match listener {
            Ok(listener) => {
                self.listeners.push(listener);
                Ok(())
            }
            Err(err) => {
                log::warn!(
                    "failed to listen for `{event}`, releasing {} listeners",
                    self.listeners.len()
                );
                // `self` is dropped by the caller's `?`, which detaches.
                Err(err)
            }
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("attached", &self.is_attached())
            .field("listeners", &self.listeners.len())
            .field("transform", &self.transform())
            .finish_non_exhaustive()
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Starts a gesture session on `target`.
///
/// `handler` receives every [`TransformEvent`] the session produces, in input
/// order. On a registration failure all listeners bound so far are released
/// and the target's error is returned.
///
/// # Errors
///
/// Returns the first error reported by [`Listen`].
pub fn attach<T, F>(
    target: &T,
    capabilities: Capabilities,
    config: GestureConfig,
    handler: F,
) -> Result<Attachment, T::Error>
where
    T: Listen + ?Sized,
    F: FnMut(TransformEvent) + 'static,
{
    let session = Rc::new(Session {
        state: RefCell::new(GestureState::new(capabilities, config)),
        handler: RefCell::new(Box::new(handler)),
        detached: Cell::new(false),
    });
    let mut attachment = Attachment {
        session,
        listeners: Vec::with_capacity(GESTURE_PHASES.len() + POINTER_PHASES.len() + 1),
    };
    let action = DefaultAction::Suppress;

    if capabilities.native_gesture() {
        for phase in GESTURE_PHASES {
            let session = Rc::clone(&attachment.session);
            let listener = target.listen_gesture(
                phase,
                action,
                Box::new(move |input: GestureInput| session.gesture(phase, &input)),
            );
            attachment.bind(phase.event_name(), listener)?;
        }
    }

    let session = Rc::clone(&attachment.session);
    let listener = target.listen_wheel(action, Box::new(move |input: WheelInput| session.wheel(&input)));
    attachment.bind(crate::input::WHEEL_EVENT_NAME, listener)?;

    for phase in POINTER_PHASES {
        let session = Rc::clone(&attachment.session);
        let listener = target.listen_pointer(
            phase,
            action,
            Box::new(move |input: PointerInput| session.pointer(phase, &input)),
        );
        attachment.bind(phase.event_name(), listener)?;
    }

    log::debug!(
        "gesture session attached with {} listeners ({:?})",
        attachment.listeners.len(),
        capabilities
    );
    Ok(attachment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalTarget;
    use kurbo::{Point, Vec2};

    fn collect(target: &LocalTarget, caps: Capabilities) -> (Attachment, Rc<RefCell<Vec<TransformEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let attachment = attach(target, caps, GestureConfig::default(), move |ev| {
            sink.borrow_mut().push(ev);
        })
        .unwrap();
        (attachment, events)
    }

    #[test]
    fn binds_five_listeners_without_native_gestures() {
        let target = LocalTarget::new();
        let (attachment, _) = collect(&target, Capabilities::MULTI_TOUCH);
        assert_eq!(attachment.listener_count(), 5);
        assert_eq!(target.listener_count(), 5);
        assert!(!target.dispatch_gesture(
            GesturePhase::Change,
            GestureInput::new(Point::ORIGIN, 2.0, 0.0)
        ));
    }

    #[test]
    fn binds_gesture_listeners_with_native_gestures() {
        let target = LocalTarget::new();
        let (attachment, events) = collect(&target, Capabilities::NATIVE_GESTURE);
        assert_eq!(attachment.listener_count(), 8);

        target.dispatch_gesture(GesturePhase::Start, GestureInput::new(Point::ORIGIN, 1.0, 0.0));
        target.dispatch_gesture(GesturePhase::Change, GestureInput::new(Point::ORIGIN, 1.5, 0.0));
        target.dispatch_gesture(GesturePhase::End, GestureInput::new(Point::ORIGIN, 1.5, 0.0));

        assert_eq!(events.borrow().len(), 1);
        assert_eq!(attachment.transform().scale, 1.5);
    }

    #[test]
    fn pointer_down_is_silent_and_drag_emits() {
        let target = LocalTarget::new();
        let (attachment, events) = collect(&target, Capabilities::empty());

        target.dispatch_pointer(PointerPhase::Down, PointerInput::new(1, Point::ORIGIN, 0.0));
        assert!(events.borrow().is_empty());
        target.dispatch_pointer(
            PointerPhase::Move,
            PointerInput::new(1, Point::new(2.0, 3.0), 5.0),
        );
        target.dispatch_pointer(
            PointerPhase::Leave,
            PointerInput::new(1, Point::new(2.0, 3.0), 9.0),
        );

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].delta.translation, Vec2::new(2.0, 3.0));
        assert_eq!(events[1].duration(), 9.0);
        assert_eq!(attachment.transform().translation, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn detach_is_idempotent_and_silences_the_handler() {
        let target = LocalTarget::new();
        let (mut attachment, events) = collect(&target, Capabilities::NATIVE_GESTURE);
        target.dispatch_wheel(WheelInput::new(Vec2::new(0.0, 4.0)));

        attachment.detach();
        attachment.detach();

        assert!(!attachment.is_attached());
        assert_eq!(attachment.listener_count(), 0);
        assert_eq!(target.listener_count(), 0);
        assert_eq!(attachment.transform(), Transform::IDENTITY);
        assert!(!target.dispatch_wheel(WheelInput::new(Vec2::new(0.0, 4.0))));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn drop_detaches() {
        let target = LocalTarget::new();
        let (attachment, _) = collect(&target, Capabilities::empty());
        assert_eq!(target.listener_count(), 5);
        drop(attachment);
        assert_eq!(target.listener_count(), 0);
    }
}
