// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use understory_gesture::{
    DefaultAction, DeltaMode, GestureHandler, GestureInput, GesturePhase, Listen, Listener,
    PointerHandler, PointerInput, PointerPhase, WHEEL_EVENT_NAME, WheelHandler, WheelInput,
};

use js_sys::Reflect;
use kurbo::{Point, Vec2};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget, PointerEvent, WheelEvent};

use crate::convert;

/// Error returned when the DOM refuses a listener registration.
#[derive(Clone)]
pub struct ListenError {
    /// DOM event name the registration was for.
    pub event: &'static str,
    /// Exception raised by `addEventListener`.
    pub source: JsValue,
}

impl fmt::Debug for ListenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ListenError {{ event: {:?}, source: {:?} }}",
            self.event, self.source
        )
    }
}

impl fmt::Display for ListenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to listen for `{}`: {:?}",
            self.event, self.source
        )
    }
}

impl core::error::Error for ListenError {}

/// A DOM [`EventTarget`] as a gesture input source.
///
/// Every listener is registered with `passive: false` so the default action
/// can be cancelled, and cancels it before converting the event.
#[derive(Clone, Debug)]
pub struct WebTarget {
    target: EventTarget,
}

impl WebTarget {
    /// Wraps `target`.
    #[must_use]
    pub fn new(target: EventTarget) -> Self {
        Self { target }
    }

    /// The wrapped target.
    #[must_use]
    pub fn event_target(&self) -> &EventTarget {
        &self.target
    }

    fn listen(
        &self,
        event: &'static str,
        action: DefaultAction,
        mut forward: impl FnMut(&Event) + 'static,
    ) -> Result<Listener, ListenError> {
        let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
            if action.suppresses() {
                ev.prevent_default();
            }
            forward(&ev);
        });

        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        self.target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|source| {
                log::warn!("addEventListener(`{event}`) failed: {source:?}");
                ListenError { event, source }
            })?;

        let target = self.target.clone();
        Ok(Listener::new(move || {
            if let Err(err) =
                target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                log::warn!("removeEventListener(`{event}`) failed: {err:?}");
            }
            drop(closure);
        }))
    }
}

impl From<EventTarget> for WebTarget {
    fn from(target: EventTarget) -> Self {
        Self::new(target)
    }
}

fn pointer_input(ev: &Event) -> Option<PointerInput> {
    let ev = ev.dyn_ref::<PointerEvent>()?;
    Some(PointerInput {
        id: convert::pointer_id(ev.pointer_id()),
        position: convert::screen_point(ev.screen_x(), ev.screen_y()),
        timestamp: ev.time_stamp(),
        modifiers: convert::modifiers(ev.ctrl_key(), ev.shift_key(), ev.alt_key(), ev.meta_key()),
        button: ev.button(),
    })
}

fn wheel_input(ev: &Event) -> Option<WheelInput> {
    let ev = ev.dyn_ref::<WheelEvent>()?;
    Some(WheelInput {
        delta: Vec2::new(ev.delta_x(), ev.delta_y()),
        delta_z: ev.delta_z(),
        mode: DeltaMode::from_dom(ev.delta_mode()),
        modifiers: convert::modifiers(ev.ctrl_key(), ev.shift_key(), ev.alt_key(), ev.meta_key()),
    })
}

fn number(ev: &Event, key: &str) -> Option<f64> {
    Reflect::get(ev, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

fn gesture_input(ev: &Event) -> GestureInput {
    let x = number(ev, "screenX").unwrap_or(0.0);
    let y = number(ev, "screenY").unwrap_or(0.0);
    convert::gesture_input(Point::new(x, y), number(ev, "scale"), number(ev, "rotation"))
}

impl Listen for WebTarget {
    type Error = ListenError;

    fn listen_wheel(
        &self,
        action: DefaultAction,
        mut handler: WheelHandler,
    ) -> Result<Listener, Self::Error> {
        self.listen(WHEEL_EVENT_NAME, action, move |ev| match wheel_input(ev) {
            Some(input) => handler(input),
            None => log::trace!("ignoring `wheel` that is not a WheelEvent"),
        })
    }

    fn listen_pointer(
        &self,
        phase: PointerPhase,
        action: DefaultAction,
        mut handler: PointerHandler,
    ) -> Result<Listener, Self::Error> {
        let name = phase.event_name();
        self.listen(name, action, move |ev| match pointer_input(ev) {
            Some(input) => handler(input),
            None => log::trace!("ignoring `{name}` that is not a PointerEvent"),
        })
    }

    fn listen_gesture(
        &self,
        phase: GesturePhase,
        action: DefaultAction,
        mut handler: GestureHandler,
    ) -> Result<Listener, Self::Error> {
        self.listen(phase.event_name(), action, move |ev| handler(gesture_input(ev)))
    }
}
