use crate::queue::activation_queue_len;
use crate::step_api::{ActivePortal, PlacementSnapshot, PortalSnapshot};

impl ActivePortal {
    pub(crate) fn snapshot(&self) -> PortalSnapshot {
        let placements = self
            .placements
            .iter()
            .map(|placement| PlacementSnapshot {
                slot_id: placement.slot_id.to_string(),
                state: placement.controller.state().as_str().to_string(),
                attached: placement.controller.is_attached(),
                check_pending: placement.controller.check_pending(),
            })
            .collect();

        PortalSnapshot {
            route_key: self.route.route_key(),
            consent_accepted: self.consent_accepted,
            elapsed_time: self.elapsed_time,
            queue_len: activation_queue_len(),
            placements,
        }
    }
}
