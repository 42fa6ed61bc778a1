/// Structured portal event emitted from Rust and consumed by JS UI.
pub enum Event {
    PortalStart {
        path: String,
    },
    RouteChanged {
        route_key: String,
        slot_count: u32,
    },
    GameOpened {
        id: &'static str,
        title: &'static str,
        url: &'static str,
    },
    PlacementCreated {
        slot_id: &'static str,
    },
    SlotAttached {
        slot_id: &'static str,
    },
    SlotArmed {
        slot_id: &'static str,
        check_at: f32,
    },
    SlotCheckDue {
        slot_id: &'static str,
    },
    SlotFired {
        slot_id: &'static str,
    },
    SlotDropped {
        slot_id: &'static str,
        reason: &'static str,
    },
    ActivationDeferred {
        slot_id: &'static str,
        reason: &'static str,
    },
    SlotDetached {
        slot_id: &'static str,
        prior_state: &'static str,
    },
    ConsentLoaded {
        accepted: bool,
    },
    ConsentAccepted,
}

impl Event {
    /// Events describing a degraded-but-acceptable outcome go to console.warn.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::SlotDropped { .. } | Event::ActivationDeferred { .. }
        )
    }

    pub fn to_json_line(&self) -> String {
        match self {
            Event::PortalStart { path } => {
                format!(r#"{{"kind":"PortalStart","path":"{}"}}"#, escape_json(path))
            }
            Event::RouteChanged {
                route_key,
                slot_count,
            } => {
                format!(
                    r#"{{"kind":"RouteChanged","route_key":"{}","slot_count":{}}}"#,
                    escape_json(route_key),
                    slot_count
                )
            }
            Event::GameOpened { id, title, url } => {
                format!(
                    r#"{{"kind":"GameOpened","id":"{}","title":"{}","url":"{}"}}"#,
                    escape_json(id),
                    escape_json(title),
                    escape_json(url)
                )
            }
            Event::PlacementCreated { slot_id } => {
                format!(
                    r#"{{"kind":"PlacementCreated","slot_id":"{}"}}"#,
                    escape_json(slot_id)
                )
            }
            Event::SlotAttached { slot_id } => {
                format!(
                    r#"{{"kind":"SlotAttached","slot_id":"{}"}}"#,
                    escape_json(slot_id)
                )
            }
            Event::SlotArmed { slot_id, check_at } => {
                format!(
                    r#"{{"kind":"SlotArmed","slot_id":"{}","check_at":{}}}"#,
                    escape_json(slot_id),
                    json_f32(*check_at)
                )
            }
            Event::SlotCheckDue { slot_id } => {
                format!(
                    r#"{{"kind":"SlotCheckDue","slot_id":"{}"}}"#,
                    escape_json(slot_id)
                )
            }
            Event::SlotFired { slot_id } => {
                format!(
                    r#"{{"kind":"SlotFired","slot_id":"{}"}}"#,
                    escape_json(slot_id)
                )
            }
            Event::SlotDropped { slot_id, reason } => {
                format!(
                    r#"{{"kind":"SlotDropped","slot_id":"{}","reason":"{}"}}"#,
                    escape_json(slot_id),
                    escape_json(reason)
                )
            }
            Event::ActivationDeferred { slot_id, reason } => {
                format!(
                    r#"{{"kind":"ActivationDeferred","slot_id":"{}","reason":"{}"}}"#,
                    escape_json(slot_id),
                    escape_json(reason)
                )
            }
            Event::SlotDetached {
                slot_id,
                prior_state,
            } => {
                format!(
                    r#"{{"kind":"SlotDetached","slot_id":"{}","prior_state":"{}"}}"#,
                    escape_json(slot_id),
                    escape_json(prior_state)
                )
            }
            Event::ConsentLoaded { accepted } => {
                format!(r#"{{"kind":"ConsentLoaded","accepted":{accepted}}}"#)
            }
            Event::ConsentAccepted => r#"{"kind":"ConsentAccepted"}"#.to_string(),
        }
    }
}

fn escape_json(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn json_f32(v: f32) -> String {
    format!("{:.2}", v)
}
