use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::slot::{ActivationSink, SinkError};

/// One pending render request. The external script matches requests to slot
/// containers itself, so the request carries no payload.
pub struct ActivationRequest;

/// Process-wide stand-in for the externally-owned ad library handle: an
/// append-only queue plus the "script has loaded" flag the host flips.
#[derive(Default)]
struct AdLibrary {
    ready: bool,
    pending: Vec<ActivationRequest>,
}

thread_local! {
    static AD_LIBRARY: RefCell<Option<AdLibrary>> = RefCell::new(None);
}

fn with_library<T>(f: impl FnOnce(&mut AdLibrary) -> T) -> T {
    AD_LIBRARY.with(|cell| {
        let mut slot = cell.borrow_mut();
        // Created on first use, like the or-assigned global it models.
        let library = slot.get_or_insert_with(AdLibrary::default);
        f(library)
    })
}

/// Sink wired into portals by default. Appends fail until the host announces
/// the external script, which the caller treats as a deferred activation.
pub struct GlobalAdSink;

impl ActivationSink for GlobalAdSink {
    fn enqueue_activation_request(&mut self) -> Result<(), SinkError> {
        with_library(|library| {
            if !library.ready {
                return Err(SinkError::NotLoaded);
            }
            library.pending.push(ActivationRequest);
            Ok(())
        })
    }
}

/// Host signal that the separately-loaded ad script is (or is no longer)
/// available to drain the queue.
#[wasm_bindgen]
pub fn set_ad_library_ready(ready: bool) {
    with_library(|library| library.ready = ready);
}

#[wasm_bindgen]
pub fn activation_queue_len() -> u32 {
    with_library(|library| library.pending.len() as u32)
}

/// Consumes every pending request, returning how many the external script
/// should now render.
#[wasm_bindgen]
pub fn drain_activation_requests() -> u32 {
    with_library(|library| {
        let drained = library.pending.len() as u32;
        library.pending.clear();
        drained
    })
}
