use crate::event::Event;
use crate::log::push_event;
use crate::slot::CheckOutcome;
use crate::step_api::{ActivePortal, StepResult};

impl ActivePortal {
    pub(crate) fn attach_slot_internal(&mut self, slot_id: &str) -> bool {
        let Some(placement) = self.placement_mut(slot_id) else {
            return false;
        };
        let slot_id = placement.slot_id;
        if !placement.controller.attach() {
            return false;
        }
        let mut events = std::mem::take(&mut self.pending_events);
        push_event(&mut events, Event::SlotAttached { slot_id });
        self.pending_events = events;
        true
    }

    pub(crate) fn intersection_internal(&mut self, slot_id: &str, visible: bool) -> StepResult {
        let now = self.elapsed_time;
        let Some(placement) = self.placement_mut(slot_id) else {
            return StepResult::failed(format!("unknown_slot:{slot_id}"));
        };

        let mut result = StepResult::empty();
        if let Some(check_at) = placement.controller.on_intersection(visible, now) {
            let slot_id = placement.slot_id;
            push_event(
                &mut result.events,
                Event::SlotArmed { slot_id, check_at },
            );
        }
        result
    }

    /// Advances host time and matures armed deadlines. Each matured check
    /// surfaces exactly once in `need_measure`; the host answers with
    /// `provide_width`.
    pub(crate) fn step_once(&mut self, dt: f32) -> StepResult {
        let mut result = StepResult::empty();
        result.events = std::mem::take(&mut self.pending_events);

        self.elapsed_time += dt.max(0.0);
        let now = self.elapsed_time;

        for placement in &mut self.placements {
            if placement.controller.tick(now) {
                push_event(
                    &mut result.events,
                    Event::SlotCheckDue {
                        slot_id: placement.slot_id,
                    },
                );
                result.need_measure.push(placement.slot_id.to_string());
            }
        }
        result
    }

    pub(crate) fn provide_width_internal(&mut self, slot_id: &str, width: f32) -> StepResult {
        let Some(placement) = self.placements.iter_mut().find(|p| p.slot_id == slot_id) else {
            return StepResult::failed(format!("unknown_slot:{slot_id}"));
        };

        let mut result = StepResult::empty();
        let slot_id = placement.slot_id;
        match placement.controller.provide_width(width, self.sink.as_mut()) {
            CheckOutcome::Fired => {
                push_event(&mut result.events, Event::SlotFired { slot_id });
                result.release.push(slot_id.to_string());
            }
            CheckOutcome::DroppedZeroWidth => {
                push_event(
                    &mut result.events,
                    Event::SlotDropped {
                        slot_id,
                        reason: "zero_width",
                    },
                );
            }
            CheckOutcome::Deferred(err) => {
                push_event(
                    &mut result.events,
                    Event::ActivationDeferred {
                        slot_id,
                        reason: err.as_str(),
                    },
                );
            }
            CheckOutcome::Ignored => {}
        }
        result
    }

    pub(crate) fn detach_slot_internal(&mut self, slot_id: &str) -> StepResult {
        let Some(index) = self.placements.iter().position(|p| p.slot_id == slot_id) else {
            return StepResult::failed(format!("unknown_slot:{slot_id}"));
        };

        let placement = self.placements.remove(index);
        let mut result = StepResult::empty();
        push_event(
            &mut result.events,
            Event::SlotDetached {
                slot_id: placement.slot_id,
                prior_state: placement.controller.state().as_str(),
            },
        );
        result.release.push(placement.slot_id.to_string());
        result
    }
}
