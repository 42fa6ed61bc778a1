mod catalog;
#[cfg(target_arch = "wasm32")]
mod dom;
mod engine;
mod event;
mod log;
mod model;
mod queue;
mod slot;
mod step_api;
mod storage;

use wasm_bindgen::prelude::*;

use crate::catalog::GAME_IDS;
use crate::model::Route;

/// Normalizes a location path to the stable route identity that placements
/// are keyed on. Empty when the path names a game the catalog does not carry.
#[wasm_bindgen]
pub fn route_key_for(path: &str) -> String {
    Route::parse(path)
        .map(|route| route.route_key())
        .unwrap_or_default()
}

/// Number of games in the built-in catalog.
#[wasm_bindgen]
pub fn catalog_size() -> u32 {
    GAME_IDS.len() as u32
}
