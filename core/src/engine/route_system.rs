use crate::catalog::game_by_id;
use crate::event::Event;
use crate::log::push_event;
use crate::model::Route;
use crate::slot::{ActivationSink, SlotController};
use crate::step_api::{ActivePortal, Placement, StepResult};
use crate::storage::{load_consent, store_consent_accepted};

impl ActivePortal {
    pub(crate) fn with_sink(route: Route, sink: Box<dyn ActivationSink>) -> Self {
        let mut portal = Self {
            route,
            consent_accepted: load_consent(),
            consent_written: false,
            elapsed_time: 0.0,
            placements: Vec::new(),
            pending_events: Vec::new(),
            sink,
        };

        let mut events = Vec::new();
        push_event(
            &mut events,
            Event::PortalStart {
                path: portal.route.route_key(),
            },
        );
        push_event(
            &mut events,
            Event::ConsentLoaded {
                accepted: portal.consent_accepted,
            },
        );
        portal.pending_events = events;
        portal.build_placements_for_route();
        portal
    }

    /// Creates a fresh placement (state `Idle`) for every slot the current
    /// page renders, and announces the page itself.
    fn build_placements_for_route(&mut self) {
        let mut events = std::mem::take(&mut self.pending_events);
        let slot_ids = self.route.slot_ids();

        push_event(
            &mut events,
            Event::RouteChanged {
                route_key: self.route.route_key(),
                slot_count: slot_ids.len() as u32,
            },
        );

        if let Route::Game(id) = self.route {
            if let Some(spec) = game_by_id(id) {
                push_event(
                    &mut events,
                    Event::GameOpened {
                        id: spec.id,
                        title: spec.title,
                        url: spec.url,
                    },
                );
            }
        }

        for &slot_id in slot_ids {
            push_event(&mut events, Event::PlacementCreated { slot_id });
            self.placements.push(Placement {
                slot_id,
                controller: SlotController::new(),
            });
        }

        self.pending_events = events;
    }

    /// Tears down every live placement, canceling pending checks with them,
    /// and reports the subscriptions the host must release.
    fn teardown_placements(&mut self, events: &mut Vec<String>, release: &mut Vec<String>) {
        for placement in self.placements.drain(..) {
            push_event(
                events,
                Event::SlotDetached {
                    slot_id: placement.slot_id,
                    prior_state: placement.controller.state().as_str(),
                },
            );
            release.push(placement.slot_id.to_string());
        }
    }

    pub(crate) fn navigate_to_path(&mut self, path: &str) -> StepResult {
        let Some(route) = Route::parse(path) else {
            return StepResult::failed(format!("unknown_route:{path}"));
        };

        let mut result = StepResult::empty();
        result.events = std::mem::take(&mut self.pending_events);
        self.teardown_placements(&mut result.events, &mut result.release);

        self.route = route;
        self.build_placements_for_route();
        result.events.append(&mut self.pending_events);
        result
    }

    /// Fresh session at the current route: new placements, zeroed clock,
    /// consent re-read from storage.
    pub(crate) fn reset(&mut self) {
        let mut events = std::mem::take(&mut self.pending_events);
        let mut release = Vec::new();
        self.teardown_placements(&mut events, &mut release);

        self.elapsed_time = 0.0;
        self.consent_accepted = load_consent();
        self.consent_written = false;
        push_event(
            &mut events,
            Event::ConsentLoaded {
                accepted: self.consent_accepted,
            },
        );
        self.pending_events = events;
        self.build_placements_for_route();
    }

    /// Write-once acceptance. Returns true only on the call that actually
    /// persisted the flag.
    pub(crate) fn accept_consent_internal(&mut self) -> bool {
        if self.consent_accepted || self.consent_written {
            return false;
        }
        store_consent_accepted();
        self.consent_accepted = true;
        self.consent_written = true;
        let mut events = std::mem::take(&mut self.pending_events);
        push_event(&mut events, Event::ConsentAccepted);
        self.pending_events = events;
        true
    }
}
