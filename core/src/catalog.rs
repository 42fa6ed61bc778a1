pub type GameId = &'static str;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Category {
    Action,
    Racing,
    Puzzle,
    Sports,
    Simulation,
    Adventure,
    Arcade,
    Rhythm,
    Platformer,
    Classic,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Action => "Action",
            Category::Racing => "Racing",
            Category::Puzzle => "Puzzle",
            Category::Sports => "Sports",
            Category::Simulation => "Simulation",
            Category::Adventure => "Adventure",
            Category::Arcade => "Arcade",
            Category::Rhythm => "Rhythm",
            Category::Platformer => "Platformer",
            Category::Classic => "Classic",
        }
    }
}

/// Long-form guide copy shown under the player frame.
#[derive(Clone, Copy, Debug)]
pub struct RichContent {
    pub gameplay: &'static str,
    pub strategies: &'static str,
    pub why_popular: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct GameSpec {
    pub id: GameId,
    pub title: &'static str,
    pub category: Category,
    pub image: &'static str,
    pub url: &'static str,
    pub description: &'static str,
    pub rich: RichContent,
    pub rating: f32,
    pub plays: &'static str,
}

pub const SUBWAY_SURFERS: GameSpec = GameSpec {
    id: "subway-surfers",
    title: "Subway Surfers",
    category: Category::Action,
    image: "https://images.crazygames.com/games/subway-surfers-new-york/cover-16x9.png?auto=format,compress&q=75&cs=strip",
    url: "https://www.crazygames.com/embed/subway-surfers-new-york",
    description: "Dash as fast as you can through the subway and dodge the oncoming trains.",
    rich: RichContent {
        gameplay: "Subway Surfers remains the definitive endless runner experience. You control a graffiti artist running along railway tracks while dodging trains, barriers, and a grumpy inspector. The smooth frame rate on Chromebooks makes it a top choice for school breaks.",
        strategies: "Always aim for the high ground. Staying on top of trains gives you a clearer view of upcoming obstacles. Use hoverboards to save yourself during tight corners.",
        why_popular: "It requires zero downloads and features high-quality assets that render instantly in any modern browser.",
    },
    rating: 4.9,
    plays: "52.1M",
};

pub const GEOMETRY_DASH: GameSpec = GameSpec {
    id: "geometry-dash",
    title: "Geometry Dash",
    category: Category::Rhythm,
    image: "https://images.crazygames.com/games/geometry-dash/cover-16x9.png?auto=format,compress&q=75&cs=strip",
    url: "https://www.crazygames.com/embed/geometry-dash",
    description: "Jump and fly your way through danger in this rhythm-based action platformer.",
    rich: RichContent {
        gameplay: "A rhythm-based platformer that is as challenging as it is addictive. Your character moves automatically; your only job is to jump or fly at the perfect millisecond to match the beat.",
        strategies: "Practice mode is your best friend. Map out the level's rhythm before trying a full run. The music isn't just background noise, it's your guide.",
        why_popular: "The instant-restart mechanic is perfect for short gaming sessions on a Chromebook during school hours.",
    },
    rating: 4.8,
    plays: "12.5M",
};

pub const MOTO_X3M: GameSpec = GameSpec {
    id: "moto-x3m",
    title: "Moto X3M",
    category: Category::Racing,
    image: "https://images.crazygames.com/games/moto-x3m/cover-16x9.png?auto=format,compress&q=75&cs=strip",
    url: "https://www.crazygames.com/embed/moto-x3m",
    description: "A time-trial bike racing game with challenging obstacles and stunts.",
    rich: RichContent {
        gameplay: "Moto X3M brings physics-based motocross to your browser. Navigate through 22 levels of giant saw blades, falling rocks, and explosive TNT traps.",
        strategies: "Don't just go fast; go smart. Perform front and backflips to reduce your time, but make sure you land on two wheels to maintain speed.",
        why_popular: "Optimized for no-download environments, it runs flawlessly even on hardware with limited resources.",
    },
    rating: 4.7,
    plays: "85.4M",
};

pub const SLOPE: GameSpec = GameSpec {
    id: "slope",
    title: "Slope",
    category: Category::Action,
    image: "https://images.crazygames.com/games/slope/cover-16x9.png?auto=format,compress&q=75&cs=strip",
    url: "https://www.crazygames.com/embed/slope",
    description: "Drive a ball in the 3D running game in slope city. Easy to start, hard to master.",
    rich: RichContent {
        gameplay: "Control a neon ball in a high-speed descent through a 3D city. The speed increases constantly, and the track is filled with red obstacles that require precise movements.",
        strategies: "Keep your movements subtle. Over-correcting is the number one cause of falling off the track. Focus on the horizon to anticipate turns.",
        why_popular: "One of the most requested unblocked games for 2026 due to its hypnotic visuals and competitive leaderboards.",
    },
    rating: 4.4,
    plays: "105M",
};

pub const BASKET_RANDOM: GameSpec = GameSpec {
    id: "basket-random",
    title: "Basket Random",
    category: Category::Sports,
    image: "https://images.crazygames.com/games/basket-random/cover-16x9.png?auto=format,compress&q=75&cs=strip",
    url: "https://www.crazygames.com/embed/basket-random",
    description: "Score baskets with ragdoll players whose court changes every round.",
    rich: RichContent {
        gameplay: "Two-button basketball with ragdoll physics. Every point resets the court with new players, new gravity, and a new way to embarrass yourself in front of the hoop.",
        strategies: "Time your jump as the ball crosses mid-court. Holding the key too long sails the shot over the backboard; tapping late gifts the rebound to the other side.",
        why_popular: "Rounds last seconds, so it fits between classes, and the shared-keyboard two-player mode makes it a Chromebook favorite.",
    },
    rating: 4.6,
    plays: "31.2M",
};

pub const GAME_IDS: [GameId; 5] = [
    SUBWAY_SURFERS.id,
    GEOMETRY_DASH.id,
    MOTO_X3M.id,
    SLOPE.id,
    BASKET_RANDOM.id,
];

pub fn game_by_id(id: &str) -> Option<&'static GameSpec> {
    match id {
        "subway-surfers" => Some(&SUBWAY_SURFERS),
        "geometry-dash" => Some(&GEOMETRY_DASH),
        "moto-x3m" => Some(&MOTO_X3M),
        "slope" => Some(&SLOPE),
        "basket-random" => Some(&BASKET_RANDOM),
        _ => None,
    }
}

/// Sidebar list: every catalog entry except the one being played, in
/// catalog order.
pub fn related_game_ids(current: &str) -> Vec<String> {
    GAME_IDS
        .iter()
        .filter(|id| **id != current)
        .map(|id| (*id).to_string())
        .collect()
}

/// Case-insensitive title search. An empty term returns the full catalog.
pub fn search_game_ids(term: &str) -> Vec<String> {
    let needle = term.to_lowercase();
    GAME_IDS
        .iter()
        .filter_map(|id| game_by_id(id))
        .filter(|spec| spec.title.to_lowercase().contains(&needle))
        .map(|spec| spec.id.to_string())
        .collect()
}
