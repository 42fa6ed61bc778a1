use wasm_bindgen::prelude::*;

use crate::catalog::{game_by_id, related_game_ids, search_game_ids, GAME_IDS};
use crate::model::Route;
use crate::queue::{activation_queue_len, GlobalAdSink};
use crate::slot::{ActivationSink, SlotController};

mod manager;

/// One live ad placement: a slot position on the current page plus its
/// single-shot activation controller.
pub(crate) struct Placement {
    pub(crate) slot_id: &'static str,
    pub(crate) controller: SlotController,
}

/// One portal session. Owns the current route, the consent flag loaded at
/// startup, accumulated host time, and the placements of the current page.
/// Placements never survive a route change.
pub(crate) struct ActivePortal {
    pub(crate) route: Route,
    pub(crate) consent_accepted: bool,
    pub(crate) consent_written: bool,
    pub(crate) elapsed_time: f32,
    pub(crate) placements: Vec<Placement>,
    pub(crate) pending_events: Vec<String>,
    pub(crate) sink: Box<dyn ActivationSink>,
}

impl ActivePortal {
    pub(crate) fn new(route: Route) -> Self {
        Self::with_sink(route, Box::new(GlobalAdSink))
    }

    pub(crate) fn placement_mut(&mut self, slot_id: &str) -> Option<&mut Placement> {
        self.placements.iter_mut().find(|p| p.slot_id == slot_id)
    }
}

/// Result of one host-driven transition. `need_measure` lists slots whose
/// delayed check matured and now need an offsetWidth sample; `release` lists
/// slots whose visibility subscription should be disconnected.
#[wasm_bindgen(getter_with_clone)]
pub struct StepResult {
    pub events: Vec<String>,
    pub need_measure: Vec<String>,
    pub release: Vec<String>,
    pub error: String,
}

impl StepResult {
    pub(crate) fn empty() -> Self {
        Self {
            events: Vec::new(),
            need_measure: Vec::new(),
            release: Vec::new(),
            error: String::new(),
        }
    }

    pub(crate) fn failed(error: String) -> Self {
        Self {
            events: Vec::new(),
            need_measure: Vec::new(),
            release: Vec::new(),
            error,
        }
    }
}

#[wasm_bindgen(getter_with_clone)]
#[derive(Clone)]
pub struct PlacementSnapshot {
    pub slot_id: String,
    pub state: String,
    pub attached: bool,
    pub check_pending: bool,
}

#[wasm_bindgen(getter_with_clone)]
pub struct PortalSnapshot {
    pub route_key: String,
    pub consent_accepted: bool,
    pub elapsed_time: f32,
    pub queue_len: u32,
    pub placements: Vec<PlacementSnapshot>,
}

/// Full catalog record for one game, flattened for the host UI.
/// `found` is false when the id is unknown and every other field is empty.
#[wasm_bindgen(getter_with_clone)]
pub struct GameView {
    pub found: bool,
    pub id: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub url: String,
    pub description: String,
    pub gameplay: String,
    pub strategies: String,
    pub why_popular: String,
    pub rating: f32,
    pub plays: String,
}

impl GameView {
    fn missing() -> Self {
        Self {
            found: false,
            id: String::new(),
            title: String::new(),
            category: String::new(),
            image: String::new(),
            url: String::new(),
            description: String::new(),
            gameplay: String::new(),
            strategies: String::new(),
            why_popular: String::new(),
            rating: 0.0,
            plays: String::new(),
        }
    }
}

/// Creates a portal session at `path`. Returns 0 when the path names a game
/// the catalog does not carry.
#[wasm_bindgen]
pub fn create_portal(path: &str) -> u32 {
    match Route::parse(path) {
        Some(route) => manager::create_portal(route),
        None => 0,
    }
}

#[wasm_bindgen]
pub fn destroy_portal(handle: u32) {
    manager::destroy_portal(handle);
}

/// Rebuilds the session in place: fresh placements, zeroed clock, consent
/// re-read from storage.
#[wasm_bindgen]
pub fn reset_portal(handle: u32) -> bool {
    manager::with_portal_mut(handle, |portal| portal.reset()).is_some()
}

#[wasm_bindgen]
pub fn navigate(handle: u32, path: &str) -> StepResult {
    manager::with_portal_mut(handle, |portal| portal.navigate_to_path(path))
        .unwrap_or_else(|| StepResult::failed(format!("invalid_handle:{handle}")))
}

/// Marks a slot as backed by a measurable container. A slot that is never
/// attached stays permanently idle, which is the valid state for
/// conditionally-rendered placements.
#[wasm_bindgen]
pub fn attach_slot(handle: u32, slot_id: &str) -> bool {
    manager::with_portal_mut(handle, |portal| portal.attach_slot_internal(slot_id))
        .unwrap_or(false)
}

#[wasm_bindgen]
pub fn on_intersection(handle: u32, slot_id: &str, visible: bool) -> StepResult {
    manager::with_portal_mut(handle, |portal| portal.intersection_internal(slot_id, visible))
        .unwrap_or_else(|| StepResult::failed(format!("invalid_handle:{handle}")))
}

/// Advances host time by `dt` seconds and matures any armed checks.
#[wasm_bindgen]
pub fn step(handle: u32, dt: f32) -> StepResult {
    manager::with_portal_mut(handle, |portal| portal.step_once(dt))
        .unwrap_or_else(|| StepResult::failed(format!("invalid_handle:{handle}")))
}

/// Answers a `need_measure` request with the container width sampled now.
#[wasm_bindgen]
pub fn provide_width(handle: u32, slot_id: &str, width: f32) -> StepResult {
    manager::with_portal_mut(handle, |portal| portal.provide_width_internal(slot_id, width))
        .unwrap_or_else(|| StepResult::failed(format!("invalid_handle:{handle}")))
}

#[wasm_bindgen]
pub fn detach_slot(handle: u32, slot_id: &str) -> StepResult {
    manager::with_portal_mut(handle, |portal| portal.detach_slot_internal(slot_id))
        .unwrap_or_else(|| StepResult::failed(format!("invalid_handle:{handle}")))
}

#[wasm_bindgen]
pub fn accept_consent(handle: u32) -> bool {
    manager::with_portal_mut(handle, |portal| portal.accept_consent_internal())
        .unwrap_or(false)
}

#[wasm_bindgen]
pub fn consent_accepted(handle: u32) -> bool {
    manager::with_portal(handle, |portal| portal.consent_accepted).unwrap_or(false)
}

#[wasm_bindgen]
pub fn current_route_key(handle: u32) -> String {
    manager::with_portal(handle, |portal| portal.route.route_key()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_snapshot(handle: u32) -> PortalSnapshot {
    manager::with_portal(handle, |portal| portal.snapshot()).unwrap_or_else(|| PortalSnapshot {
        route_key: String::new(),
        consent_accepted: false,
        elapsed_time: 0.0,
        queue_len: activation_queue_len(),
        placements: Vec::new(),
    })
}

#[wasm_bindgen]
pub fn get_game_ids() -> Vec<String> {
    GAME_IDS.iter().map(|id| (*id).to_string()).collect()
}

#[wasm_bindgen]
pub fn search_games(term: &str) -> Vec<String> {
    search_game_ids(term)
}

#[wasm_bindgen]
pub fn related_games(id: &str) -> Vec<String> {
    related_game_ids(id)
}

#[wasm_bindgen]
pub fn get_game_view(id: &str) -> GameView {
    match game_by_id(id) {
        Some(spec) => GameView {
            found: true,
            id: spec.id.to_string(),
            title: spec.title.to_string(),
            category: spec.category.as_str().to_string(),
            image: spec.image.to_string(),
            url: spec.url.to_string(),
            description: spec.description.to_string(),
            gameplay: spec.rich.gameplay.to_string(),
            strategies: spec.rich.strategies.to_string(),
            why_popular: spec.rich.why_popular.to_string(),
            rating: spec.rating,
            plays: spec.plays.to_string(),
        },
        None => GameView::missing(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivePortal, StepResult};
    use crate::model::{ActivationState, Route};
    use crate::queue::{activation_queue_len, drain_activation_requests, set_ad_library_ready};

    fn contains_kind(result: &StepResult, kind: &str) -> bool {
        let needle = format!("\"kind\":\"{kind}\"");
        result.events.iter().any(|line| line.contains(&needle))
    }

    fn portal_at(path: &str) -> ActivePortal {
        ActivePortal::new(Route::parse(path).expect("test path must parse"))
    }

    #[test]
    fn home_slot_fires_once_through_the_measure_round_trip() {
        set_ad_library_ready(true);
        drain_activation_requests();
        let mut portal = portal_at("/");

        assert!(portal.attach_slot_internal("home-top-display"));
        let armed = portal.intersection_internal("home-top-display", true);
        assert!(contains_kind(&armed, "SlotArmed"));

        let early = portal.step_once(0.3);
        assert!(early.need_measure.is_empty());

        let due = portal.step_once(0.3);
        assert_eq!(due.need_measure, vec!["home-top-display".to_string()]);

        let fired = portal.provide_width_internal("home-top-display", 300.0);
        assert!(contains_kind(&fired, "SlotFired"));
        assert_eq!(fired.release, vec!["home-top-display".to_string()]);
        assert_eq!(activation_queue_len(), 1);

        // Terminal per instance: later visibility and time change nothing.
        let again = portal.intersection_internal("home-top-display", true);
        assert!(!contains_kind(&again, "SlotArmed"));
        let later = portal.step_once(5.0);
        assert!(later.need_measure.is_empty());
        assert_eq!(activation_queue_len(), 1);
    }

    #[test]
    fn double_visibility_before_the_deadline_still_fires_once() {
        set_ad_library_ready(true);
        drain_activation_requests();
        let mut portal = portal_at("/");

        portal.attach_slot_internal("home-top-display");
        portal.intersection_internal("home-top-display", true);
        portal.step_once(0.05);
        portal.intersection_internal("home-top-display", true);

        let due = portal.step_once(0.55);
        assert_eq!(due.need_measure.len(), 1);
        portal.provide_width_internal("home-top-display", 300.0);
        assert_eq!(activation_queue_len(), 1);
    }

    #[test]
    fn detach_before_the_deadline_cancels_the_check() {
        set_ad_library_ready(true);
        drain_activation_requests();
        let mut portal = portal_at("/");

        portal.attach_slot_internal("home-top-display");
        portal.intersection_internal("home-top-display", true);
        portal.step_once(0.3);

        let detached = portal.detach_slot_internal("home-top-display");
        assert!(contains_kind(&detached, "SlotDetached"));
        assert_eq!(detached.release, vec!["home-top-display".to_string()]);

        let later = portal.step_once(1.0);
        assert!(later.need_measure.is_empty());
        assert_eq!(activation_queue_len(), 0);

        // A matured deadline must never act on a torn-down placement.
        let stale = portal.provide_width_internal("home-top-display", 300.0);
        assert!(stale.error.starts_with("unknown_slot:"));
        assert_eq!(activation_queue_len(), 0);
    }

    #[test]
    fn zero_width_measurement_drops_without_retry() {
        set_ad_library_ready(true);
        drain_activation_requests();
        let mut portal = portal_at("/");

        portal.attach_slot_internal("home-bottom-node");
        portal.intersection_internal("home-bottom-node", true);
        let due = portal.step_once(0.6);
        assert_eq!(due.need_measure.len(), 1);

        let dropped = portal.provide_width_internal("home-bottom-node", 0.0);
        assert!(contains_kind(&dropped, "SlotDropped"));
        assert!(dropped.release.is_empty());
        assert_eq!(activation_queue_len(), 0);

        for _ in 0..20 {
            assert!(portal.step_once(0.5).need_measure.is_empty());
        }
    }

    #[test]
    fn sink_not_ready_defers_and_never_fires() {
        set_ad_library_ready(false);
        drain_activation_requests();
        let mut portal = portal_at("/");

        portal.attach_slot_internal("home-top-display");
        portal.intersection_internal("home-top-display", true);
        portal.step_once(0.6);

        let deferred = portal.provide_width_internal("home-top-display", 300.0);
        assert!(contains_kind(&deferred, "ActivationDeferred"));
        assert!(!contains_kind(&deferred, "SlotFired"));
        assert_eq!(activation_queue_len(), 0);
        assert!(portal.step_once(5.0).need_measure.is_empty());
    }

    #[test]
    fn navigation_tears_down_and_recreates_placements() {
        set_ad_library_ready(true);
        drain_activation_requests();
        let mut portal = portal_at("/");

        portal.attach_slot_internal("home-top-display");
        portal.intersection_internal("home-top-display", true);
        portal.step_once(0.6);
        portal.provide_width_internal("home-top-display", 300.0);
        assert_eq!(activation_queue_len(), 1);

        let moved = portal.navigate_to_path("/game/slope");
        assert!(contains_kind(&moved, "RouteChanged"));
        assert!(contains_kind(&moved, "GameOpened"));
        assert!(moved
            .release
            .contains(&"home-top-display".to_string()));
        assert_eq!(portal.route.route_key(), "/game/slope");

        // Fresh instances start Idle regardless of the prior page's state.
        let snap = portal.snapshot();
        assert_eq!(snap.placements.len(), 4);
        assert!(snap.placements.iter().all(|p| p.state == "Idle"));

        portal.attach_slot_internal("game-player-top");
        portal.intersection_internal("game-player-top", true);
        portal.step_once(0.6);
        portal.provide_width_internal("game-player-top", 728.0);
        assert_eq!(activation_queue_len(), 2);
    }

    #[test]
    fn returning_to_the_same_path_still_resets_the_guard() {
        set_ad_library_ready(true);
        drain_activation_requests();
        let mut portal = portal_at("/");

        portal.attach_slot_internal("home-top-display");
        portal.intersection_internal("home-top-display", true);
        portal.step_once(0.6);
        portal.provide_width_internal("home-top-display", 300.0);

        portal.navigate_to_path("/");
        assert_eq!(
            portal
                .placement_mut("home-top-display")
                .map(|p| p.controller.state()),
            Some(ActivationState::Idle)
        );
    }

    #[test]
    fn unknown_game_navigation_is_rejected_in_place() {
        let mut portal = portal_at("/");
        let result = portal.navigate_to_path("/game/retro-bowl");
        assert!(result.error.starts_with("unknown_route:"));
        assert_eq!(portal.route.route_key(), "/");
        assert!(!portal.placements.is_empty());
    }

    #[test]
    fn text_pages_carry_no_placements() {
        let mut portal = portal_at("/");
        let moved = portal.navigate_to_path("/about");
        assert!(contains_kind(&moved, "RouteChanged"));
        assert!(portal.placements.is_empty());

        let result = portal.intersection_internal("home-top-display", true);
        assert!(result.error.starts_with("unknown_slot:"));
    }

    #[test]
    fn consent_is_loaded_once_and_written_through_once() {
        let mut portal = portal_at("/");
        assert!(!portal.consent_accepted);

        assert!(portal.accept_consent_internal());
        assert!(portal.consent_accepted);
        // Second acceptance is a no-op at the storage layer.
        assert!(!portal.accept_consent_internal());

        let fresh = portal_at("/contact");
        assert!(fresh.consent_accepted);
    }

    #[test]
    fn exported_handle_surface_round_trips() {
        let handle = super::create_portal("/game/moto-x3m");
        assert_ne!(handle, 0);
        assert_eq!(super::current_route_key(handle), "/game/moto-x3m");
        assert!(super::attach_slot(handle, "sidebar-ad-node"));

        let snap = super::get_snapshot(handle);
        assert_eq!(snap.route_key, "/game/moto-x3m");
        assert_eq!(snap.placements.len(), 4);

        super::destroy_portal(handle);
        let gone = super::step(handle, 0.1);
        assert_eq!(gone.error, format!("invalid_handle:{handle}"));

        assert_eq!(super::create_portal("/game/retro-bowl"), 0);
    }

    #[test]
    fn game_view_flattens_the_catalog_record() {
        let view = super::get_game_view("basket-random");
        assert!(view.found);
        assert_eq!(view.category, "Sports");
        assert!(view.url.contains("/embed/"));

        let missing = super::get_game_view("retro-bowl");
        assert!(!missing.found);
        assert!(missing.url.is_empty());
    }
}
