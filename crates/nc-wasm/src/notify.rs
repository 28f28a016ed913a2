//! Deferred `onUpdate` delivery.
//!
//! wasm-bindgen holds `&mut NodeCanvas` for the whole exported call, so a JS
//! callback that reads the canvas (`get_selected_node()` from a side panel)
//! would hit a recursive borrow if it ran inline. Deliveries go through the
//! microtask queue instead and run right after the exported call returns.
//! Notifications raised before a delivery runs share it.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Set while a delivery is queued and has not run yet.
#[derive(Debug, Clone, Default)]
struct Pending(Rc<Cell<bool>>);

impl Pending {
    /// Mark a delivery as queued. `false` if one already was.
    fn arm(&self) -> bool {
        !self.0.replace(true)
    }

    fn disarm(&self) {
        self.0.set(false);
    }
}

/// Run `schedule` for the first notification only, until `pending` is
/// disarmed by the delivery.
fn coalesced(pending: Pending, mut schedule: impl FnMut()) -> impl FnMut() {
    move || {
        if pending.arm() {
            schedule();
        }
    }
}

/// `on_update` hook that calls `callback` on the microtask queue.
///
/// The delivery closure lives as long as the hook; replacing the hook while
/// a delivery is queued drops that delivery.
pub(crate) fn deferred(callback: js_sys::Function) -> impl FnMut() + 'static {
    let pending = Pending::default();
    let flag = pending.clone();
    let deliver = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
        flag.disarm();
        if let Err(err) = callback.call0(&JsValue::NULL) {
            web_sys::console::warn_2(&"onUpdate callback threw:".into(), &err);
        }
    });
    coalesced(pending, move || {
        let _ = js_sys::Promise::resolve(&JsValue::NULL).then(&deliver);
    })
}
