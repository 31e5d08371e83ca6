// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use js_sys::Reflect;
use understory_gesture::Capabilities;
use wasm_bindgen::JsValue;
use web_sys::Navigator;

/// Globals whose presence marks a `WebKit` engine.
const WEBKIT_GLOBALS: [&str; 2] = ["safari", "webkit"];

/// Probes the browser for gesture [`Capabilities`].
///
/// Reads `navigator.userAgentData.platform` (falling back to
/// `navigator.platform`), the `WebKit` globals, and `navigator.maxTouchPoints`,
/// then applies [`Capabilities::detect`]. Outside a window context (for
/// example in a worker) no capabilities are reported.
#[must_use]
pub fn detect_capabilities() -> Capabilities {
    let Some(window) = web_sys::window() else {
        log::debug!("no window, gesture capabilities disabled");
        return Capabilities::empty();
    };
    let navigator = window.navigator();
    let platform = user_agent_platform(&navigator)
        .or_else(|| navigator.platform().ok())
        .unwrap_or_default();

    let global = js_sys::global();
    let has_webkit = WEBKIT_GLOBALS
        .iter()
        .any(|name| Reflect::has(&global, &JsValue::from_str(name)).unwrap_or(false));
    let max_touch_points = u32::try_from(navigator.max_touch_points()).unwrap_or(0);

    let capabilities = Capabilities::detect(&platform, has_webkit, max_touch_points);
    log::debug!(
        "platform {platform:?}, webkit {has_webkit}, touch points {max_touch_points}: {capabilities:?}"
    );
    capabilities
}

fn user_agent_platform(navigator: &Navigator) -> Option<String> {
    let data = Reflect::get(navigator, &JsValue::from_str("userAgentData")).ok()?;
    if data.is_undefined() || data.is_null() {
        return None;
    }
    Reflect::get(&data, &JsValue::from_str("platform"))
        .ok()?
        .as_string()
        .filter(|platform| !platform.is_empty())
}
