use crate::catalog::{game_by_id, GameId};

/// Ad slots rendered on the catalog landing page.
pub const HOME_SLOTS: [&str; 2] = ["home-top-display", "home-bottom-node"];

/// Ad slots rendered around the player frame on a game page.
pub const GAME_SLOTS: [&str; 4] = [
    "game-player-top",
    "game-player-middle",
    "game-player-bottom",
    "sidebar-ad-node",
];

const NO_SLOTS: [&str; 0] = [];

/// Logical pages of the portal. Placement identity is `(route_key, slot_id)`,
/// so every navigation produces fresh placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Game(GameId),
    About,
    Privacy,
    Contact,
}

impl Route {
    /// Parses a location path. Unknown paths land on the catalog; a game path
    /// with an id the catalog does not carry is rejected.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/" => Some(Route::Home),
            "/about" => Some(Route::About),
            "/privacy" => Some(Route::Privacy),
            "/contact" => Some(Route::Contact),
            other => {
                if let Some(id) = other.strip_prefix("/game/") {
                    game_by_id(id).map(|spec| Route::Game(spec.id))
                } else {
                    Some(Route::Home)
                }
            }
        }
    }

    pub fn route_key(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Game(id) => format!("/game/{id}"),
            Route::About => "/about".to_string(),
            Route::Privacy => "/privacy".to_string(),
            Route::Contact => "/contact".to_string(),
        }
    }

    /// Slot ids this page renders, in layout order.
    pub fn slot_ids(&self) -> &'static [&'static str] {
        match self {
            Route::Home => &HOME_SLOTS,
            Route::Game(_) => &GAME_SLOTS,
            Route::About | Route::Privacy | Route::Contact => &NO_SLOTS,
        }
    }
}

/// Lifecycle of one ad placement. `Fired` is terminal; detachment removes the
/// instance entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationState {
    Idle,
    Armed,
    Fired,
}

impl ActivationState {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivationState::Idle => "Idle",
            ActivationState::Armed => "Armed",
            ActivationState::Fired => "Fired",
        }
    }
}
