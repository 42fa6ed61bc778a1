//! Browser wiring for the portal core: each slot container gets an
//! `IntersectionObserver`, a shared interval drives `step`, and matured
//! checks are answered with the container's `offsetWidth` sampled at that
//! moment. Observers and closures live in thread-local registries so they
//! survive as long as their subscriptions do.

use std::cell::RefCell;
use std::collections::HashMap;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::step_api::{attach_slot, on_intersection, provide_width, step, StepResult};

/// At least this share of the container must be visible to count as
/// intersecting.
const VISIBILITY_THRESHOLD: f64 = 0.1;

struct SlotObservation {
    observer: IntersectionObserver,
    element: HtmlElement,
    _callback: Closure<dyn FnMut(Array)>,
}

thread_local! {
    static OBSERVATIONS: RefCell<HashMap<(u32, String), SlotObservation>> =
        RefCell::new(HashMap::new());
    static TICKERS: RefCell<HashMap<i32, Closure<dyn FnMut()>>> = RefCell::new(HashMap::new());
}

fn measured_width(handle: u32, slot_id: &str) -> Option<f32> {
    OBSERVATIONS.with(|observations| {
        observations
            .borrow()
            .get(&(handle, slot_id.to_string()))
            .map(|obs| obs.element.offset_width() as f32)
    })
}

/// Answers measurement requests and releases finished subscriptions. The
/// follow-up from `provide_width` can only carry releases, so this bottoms
/// out after one round.
fn process_result(handle: u32, result: &StepResult) {
    for slot_id in &result.need_measure {
        if let Some(width) = measured_width(handle, slot_id) {
            let follow_up = provide_width(handle, slot_id, width);
            process_result(handle, &follow_up);
        }
    }
    for slot_id in &result.release {
        release_slot(handle, slot_id);
    }
}

/// Attaches `element` as the container for `slot_id` and begins observing
/// viewport intersection. Returns false when the slot is unknown on the
/// current page or the observer cannot be constructed.
#[wasm_bindgen]
pub fn observe_slot(handle: u32, slot_id: &str, element: HtmlElement) -> bool {
    if !attach_slot(handle, slot_id) {
        return false;
    }

    let observed_handle = handle;
    let observed_slot = slot_id.to_string();
    let callback = Closure::wrap(Box::new(move |entries: Array| {
        let visible = entries
            .get(0)
            .dyn_into::<IntersectionObserverEntry>()
            .map(|entry| entry.is_intersecting())
            .unwrap_or(false);
        let result = on_intersection(observed_handle, &observed_slot, visible);
        process_result(observed_handle, &result);
    }) as Box<dyn FnMut(Array)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(_) => return false,
        };
    observer.observe(&element);

    OBSERVATIONS.with(|observations| {
        observations.borrow_mut().insert(
            (handle, slot_id.to_string()),
            SlotObservation {
                observer,
                element,
                _callback: callback,
            },
        );
    });
    true
}

/// Disconnects one slot's observer. Idempotent.
#[wasm_bindgen]
pub fn release_slot(handle: u32, slot_id: &str) {
    OBSERVATIONS.with(|observations| {
        if let Some(obs) = observations
            .borrow_mut()
            .remove(&(handle, slot_id.to_string()))
        {
            obs.observer.disconnect();
        }
    });
}

/// Disconnects every observer belonging to a portal. Call on navigation
/// teardown and before `destroy_portal`.
#[wasm_bindgen]
pub fn release_portal(handle: u32) {
    OBSERVATIONS.with(|observations| {
        let mut observations = observations.borrow_mut();
        observations.retain(|(owner, _), obs| {
            if *owner == handle {
                obs.observer.disconnect();
                false
            } else {
                true
            }
        });
    });
}

/// Starts the interval that advances portal time. Returns the interval id,
/// or -1 when no window is available.
#[wasm_bindgen]
pub fn start_ticker(handle: u32, interval_ms: u32) -> i32 {
    let Some(window) = web_sys::window() else {
        return -1;
    };

    let dt = interval_ms as f32 / 1000.0;
    let tick = Closure::wrap(Box::new(move || {
        let result = step(handle, dt);
        process_result(handle, &result);
    }) as Box<dyn FnMut()>);

    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        interval_ms as i32,
    ) {
        Ok(id) => {
            TICKERS.with(|tickers| {
                tickers.borrow_mut().insert(id, tick);
            });
            id
        }
        Err(_) => -1,
    }
}

#[wasm_bindgen]
pub fn stop_ticker(interval_id: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_interval_with_handle(interval_id);
    }
    TICKERS.with(|tickers| {
        tickers.borrow_mut().remove(&interval_id);
    });
}
