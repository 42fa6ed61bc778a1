use crate::event::Event;

#[cfg(target_arch = "wasm32")]
mod wasm_log {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = console)]
        fn log(message: &str);

        #[wasm_bindgen(js_namespace = console)]
        fn warn(message: &str);
    }

    pub fn log_line(message: &str) {
        log(message);
    }

    pub fn warn_line(message: &str) {
        warn(message);
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_log::{log_line, warn_line};

#[cfg(not(target_arch = "wasm32"))]
pub fn log_line(message: &str) {
    println!("{message}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn_line(message: &str) {
    eprintln!("{message}");
}

/// Writes an event as a JSON line and mirrors it to console.
/// Non-fatal degradations go to the warning channel so the host can filter them.
pub fn push_event(logs: &mut Vec<String>, event: Event) {
    let line = event.to_json_line();
    if event.is_warning() {
        warn_line(&line);
    } else {
        log_line(&line);
    }
    logs.push(line);
}
