// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-process [`Listen`] target.
//!
//! [`LocalTarget`] is for hosts that already own an event loop: a native
//! windowing backend, a replayed input trace, or a test. The host converts its
//! own events into [`PointerInput`], [`WheelInput`] and [`GestureInput`] and
//! calls the matching `dispatch_*` method.
//!
//! ```
//! use kurbo::Vec2;
//! use understory_gesture::{
//!     Capabilities, GestureConfig, LocalTarget, WheelInput, attach,
//! };
//!
//! let target = LocalTarget::new();
//! let attachment = attach(&target, Capabilities::empty(), GestureConfig::default(), |ev| {
//!     assert_eq!(ev.delta.translation, Vec2::new(0.0, -10.0));
//! })
//! .unwrap();
//!
//! assert!(target.dispatch_wheel(WheelInput::new(Vec2::new(0.0, 10.0))));
//! assert_eq!(attachment.transform().translation, Vec2::new(0.0, -10.0));
//! ```

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;
use core::fmt;

use smallvec::SmallVec;

use crate::input::{GestureInput, GesturePhase, PointerInput, PointerPhase, WheelInput};
use crate::listen::{
    DefaultAction, GestureHandler, Listen, Listener, PointerHandler, WheelHandler,
};

type Shared<H> = Rc<RefCell<H>>;

struct Entry<K, H> {
    id: u64,
    key: K,
    action: DefaultAction,
    handler: Shared<H>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    wheel: Vec<Entry<(), WheelHandler>>,
    pointer: Vec<Entry<PointerPhase, PointerHandler>>,
    gesture: Vec<Entry<GesturePhase, GestureHandler>>,
}

impl Registry {
    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn remove(&mut self, id: u64) {
        self.wheel.retain(|e| e.id != id);
        self.pointer.retain(|e| e.id != id);
        self.gesture.retain(|e| e.id != id);
    }

    fn len(&self) -> usize {
        self.wheel.len() + self.pointer.len() + self.gesture.len()
    }
}

/// Matching handlers, cloned out so no registry borrow is held while they run.
fn matching<K: PartialEq, H>(
    entries: &[Entry<K, H>],
    key: &K,
) -> SmallVec<[(DefaultAction, Shared<H>); 4]> {
    entries
        .iter()
        .filter(|e| e.key == *key)
        .map(|e| (e.action, Rc::clone(&e.handler)))
        .collect()
}

fn run<H: ?Sized>(
    handlers: SmallVec<[(DefaultAction, Shared<Box<H>>); 4]>,
    mut call: impl FnMut(&mut H),
) -> bool {
    let mut suppressed = false;
    for (action, handler) in handlers {
        suppressed |= action.suppresses();
        match handler.try_borrow_mut() {
            Ok(mut handler) => call(&mut **handler),
            Err(_) => log::trace!("skipping listener that is already running"),
        }
    }
    suppressed
}

/// In-process event target.
///
/// Cloning yields another handle to the same listener registry.
#[derive(Clone, Default)]
pub struct LocalTarget {
    registry: Rc<RefCell<Registry>>,
}

impl LocalTarget {
    /// Creates a target with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Delivers a wheel event to every wheel listener in registration order.
    ///
    /// Returns `true` if a listener asked for the default action to be
    /// suppressed.
    pub fn dispatch_wheel(&self, input: WheelInput) -> bool {
        let handlers = matching(&self.registry.borrow().wheel, &());
        run(handlers, |h| h(input))
    }

    /// Delivers a pointer event to every listener for `phase`.
    ///
    /// Returns `true` if a listener asked for the default action to be
    /// suppressed.
    pub fn dispatch_pointer(&self, phase: PointerPhase, input: PointerInput) -> bool {
        let handlers = matching(&self.registry.borrow().pointer, &phase);
        run(handlers, |h| h(input))
    }

    /// Delivers a native gesture event to every listener for `phase`.
    ///
    /// Returns `true` if a listener asked for the default action to be
    /// suppressed.
    pub fn dispatch_gesture(&self, phase: GesturePhase, input: GestureInput) -> bool {
        let handlers = matching(&self.registry.borrow().gesture, &phase);
        run(handlers, |h| h(input))
    }

    fn register(&self, insert: impl FnOnce(&mut Registry, u64)) -> Listener {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.allocate();
            insert(&mut registry, id);
            id
        };
        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        Listener::new(move || {
            let Some(registry) = registry.upgrade() else {
                return;
            };
            match registry.try_borrow_mut() {
                Ok(mut registry) => registry.remove(id),
                Err(_) => log::warn!("listener {id} could not be removed: registry is busy"),
            }
        })
    }
}

impl fmt::Debug for LocalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTarget")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Listen for LocalTarget {
    type Error = Infallible;

    fn listen_wheel(
        &self,
        action: DefaultAction,
        handler: WheelHandler,
    ) -> Result<Listener, Self::Error> {
        Ok(self.register(|registry, id| {
            registry.wheel.push(Entry {
                id,
                key: (),
                action,
                handler: Rc::new(RefCell::new(handler)),
            });
        }))
    }

    fn listen_pointer(
        &self,
        phase: PointerPhase,
        action: DefaultAction,
        handler: PointerHandler,
    ) -> Result<Listener, Self::Error> {
        Ok(self.register(|registry, id| {
            registry.pointer.push(Entry {
                id,
                key: phase,
                action,
                handler: Rc::new(RefCell::new(handler)),
            });
        }))
    }

    fn listen_gesture(
        &self,
        phase: GesturePhase,
        action: DefaultAction,
        handler: GestureHandler,
    ) -> Result<Listener, Self::Error> {
        Ok(self.register(|registry, id| {
            registry.gesture.push(Entry {
                id,
                key: phase,
                action,
                handler: Rc::new(RefCell::new(handler)),
            });
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use kurbo::{Point, Vec2};

    fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let c = Rc::new(Cell::new(0));
        (Rc::clone(&c), c)
    }

    #[test]
    fn dispatch_reaches_matching_phase_only() {
        let target = LocalTarget::new();
        let (down, down_seen) = counter();
        let (up, up_seen) = counter();
        let _a = target
            .listen_pointer(
                PointerPhase::Down,
                DefaultAction::Suppress,
                Box::new(move |_: PointerInput| down.set(down.get() + 1)),
            )
            .unwrap();
        let _b = target
            .listen_pointer(
                PointerPhase::Up,
                DefaultAction::Suppress,
                Box::new(move |_: PointerInput| up.set(up.get() + 1)),
            )
            .unwrap();

        let input = PointerInput::new(1, Point::ORIGIN, 0.0);
        assert!(target.dispatch_pointer(PointerPhase::Down, input));
        assert!(!target.dispatch_pointer(PointerPhase::Move, input));
        assert_eq!(down_seen.get(), 1);
        assert_eq!(up_seen.get(), 0);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let target = LocalTarget::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut guards = Vec::new();
        for tag in 0..3 {
            let order = Rc::clone(&order);
            guards.push(
                target
                    .listen_wheel(
                        DefaultAction::Suppress,
                        Box::new(move |_: WheelInput| order.borrow_mut().push(tag)),
                    )
                    .unwrap(),
            );
        }
        target.dispatch_wheel(WheelInput::new(Vec2::new(1.0, 0.0)));
        assert_eq!(*order.borrow(), [0, 1, 2]);
    }

    #[test]
    fn unlisten_and_drop_remove_registrations() {
        let target = LocalTarget::new();
        let (seen, seen_out) = counter();
        let mut listener = target
            .listen_gesture(
                GesturePhase::Change,
                DefaultAction::Suppress,
                Box::new(move |_: GestureInput| seen.set(seen.get() + 1)),
            )
            .unwrap();
        let other = target
            .listen_wheel(DefaultAction::Suppress, Box::new(|_: WheelInput| {}))
            .unwrap();
        assert_eq!(target.listener_count(), 2);

        listener.unlisten();
        listener.unlisten();
        assert_eq!(target.listener_count(), 1);
        let gesture = GestureInput::new(Point::ORIGIN, 1.0, 0.0);
        assert!(!target.dispatch_gesture(GesturePhase::Change, gesture));
        assert_eq!(seen_out.get(), 0);

        drop(other);
        assert_eq!(target.listener_count(), 0);
    }

    #[test]
    fn listener_outliving_target_is_harmless() {
        let target = LocalTarget::new();
        let mut listener = target
            .listen_wheel(DefaultAction::Suppress, Box::new(|_: WheelInput| {}))
            .unwrap();
        drop(target);
        listener.unlisten();
        assert!(!listener.is_listening());
    }

    #[test]
    fn handler_may_unlisten_during_dispatch() {
        let target = LocalTarget::new();
        let slot: Rc<RefCell<Option<Listener>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&slot);
        let listener = target
            .listen_wheel(
                DefaultAction::Suppress,
                Box::new(move |_: WheelInput| {
                    if let Some(mut l) = inner.borrow_mut().take() {
                        l.unlisten();
                    }
                }),
            )
            .unwrap();
        *slot.borrow_mut() = Some(listener);

        assert!(target.dispatch_wheel(WheelInput::new(Vec2::ZERO)));
        assert_eq!(target.listener_count(), 0);
    }
}
