//! Durable client-side flag storage. The portal persists exactly one value:
//! whether the visitor accepted the cookie banner. Read once at portal
//! creation, written once on acceptance.

const CONSENT_KEY: &str = "cookies-accepted";

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::CONSENT_KEY;

    pub fn load_consent() -> bool {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(v)) = store.get_item(CONSENT_KEY) {
                    return v == "true" || v == "1";
                }
            }
        }
        false
    }

    pub fn store_consent_accepted() {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                let _ = store.set_item(CONSENT_KEY, "true");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::CONSENT_KEY;

    thread_local! {
        static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn load_consent() -> bool {
        STORE.with(|store| {
            store
                .borrow()
                .get(CONSENT_KEY)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
        })
    }

    pub fn store_consent_accepted() {
        STORE.with(|store| {
            store
                .borrow_mut()
                .insert(CONSENT_KEY.to_string(), "true".to_string());
        });
    }
}

pub use backend::{load_consent, store_consent_accepted};
