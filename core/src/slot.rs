use crate::model::ActivationState;

/// Delay between arming and the layout re-check, in seconds of host time.
pub const ARM_DELAY_SECS: f32 = 0.6;

#[allow(dead_code)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkError {
    NotLoaded,
    PushFailed,
}

impl SinkError {
    pub fn as_str(self) -> &'static str {
        match self {
            SinkError::NotLoaded => "not_loaded",
            SinkError::PushFailed => "push_failed",
        }
    }
}

/// Narrow seam to the process-wide ad-library queue. One successful call
/// appends exactly one empty request object.
pub trait ActivationSink {
    fn enqueue_activation_request(&mut self) -> Result<(), SinkError>;
}

/// Outcome of a width measurement answered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Fired,
    DroppedZeroWidth,
    Deferred(SinkError),
    Ignored,
}

/// Single-shot activation machine for one ad placement.
///
/// A fresh controller is created per `(route_key, slot_id)` pair; dropping it
/// cancels any pending check. Until `attach` is called the controller stays
/// `Idle` and ignores visibility, which is the valid steady state for slots
/// the page chose not to render.
pub struct SlotController {
    attached: bool,
    state: ActivationState,
    check_deadline: Option<f32>,
    measure_requested: bool,
}

impl SlotController {
    pub fn new() -> Self {
        Self {
            attached: false,
            state: ActivationState::Idle,
            check_deadline: None,
            measure_requested: false,
        }
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn check_pending(&self) -> bool {
        self.check_deadline.is_some()
    }

    /// Marks the placement as backed by a measurable container. Returns false
    /// when it already was.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            return false;
        }
        self.attached = true;
        true
    }

    /// Visibility transition from the host observer. Arms the controller on
    /// the first visible signal while `Idle`; everything else is a no-op.
    /// Returns the check deadline when this call armed.
    pub fn on_intersection(&mut self, visible: bool, now: f32) -> Option<f32> {
        if !self.attached || !visible || self.state != ActivationState::Idle {
            return None;
        }
        let deadline = now + ARM_DELAY_SECS;
        self.state = ActivationState::Armed;
        self.check_deadline = Some(deadline);
        self.measure_requested = false;
        Some(deadline)
    }

    /// Advances host time. Returns true exactly once per arming, when the
    /// delayed check matures and a width measurement is needed.
    pub fn tick(&mut self, now: f32) -> bool {
        if self.state != ActivationState::Armed || self.measure_requested {
            return false;
        }
        match self.check_deadline {
            Some(deadline) if now >= deadline => {
                self.measure_requested = true;
                true
            }
            _ => false,
        }
    }

    /// Host answer to a matured check, with the container width sampled at
    /// this moment. Zero width drops the arming silently; nothing is
    /// rescheduled. A sink failure is deferred the same way. Measurements
    /// arriving for a controller that never asked are ignored.
    pub fn provide_width(&mut self, width: f32, sink: &mut dyn ActivationSink) -> CheckOutcome {
        if !self.measure_requested {
            return CheckOutcome::Ignored;
        }
        self.measure_requested = false;
        self.check_deadline = None;

        if width <= 0.0 {
            self.state = ActivationState::Idle;
            return CheckOutcome::DroppedZeroWidth;
        }

        // Guard re-read immediately before the side effect, not only at arm
        // time: an interleaved signal must never produce a second append.
        if self.state != ActivationState::Armed {
            return CheckOutcome::Ignored;
        }

        match sink.enqueue_activation_request() {
            Ok(()) => {
                self.state = ActivationState::Fired;
                CheckOutcome::Fired
            }
            Err(err) => {
                self.state = ActivationState::Idle;
                CheckOutcome::Deferred(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivationSink, CheckOutcome, SinkError, SlotController, ARM_DELAY_SECS};
    use crate::model::ActivationState;

    struct RecordingSink {
        ready: bool,
        pushes: u32,
    }

    impl RecordingSink {
        fn ready() -> Self {
            Self {
                ready: true,
                pushes: 0,
            }
        }

        fn offline() -> Self {
            Self {
                ready: false,
                pushes: 0,
            }
        }
    }

    impl ActivationSink for RecordingSink {
        fn enqueue_activation_request(&mut self) -> Result<(), SinkError> {
            if !self.ready {
                return Err(SinkError::NotLoaded);
            }
            self.pushes += 1;
            Ok(())
        }
    }

    fn armed_controller(now: f32) -> SlotController {
        let mut slot = SlotController::new();
        slot.attach();
        assert!(slot.on_intersection(true, now).is_some());
        slot
    }

    #[test]
    fn fires_exactly_once_at_deadline_with_nonzero_width() {
        let mut slot = armed_controller(0.0);
        let mut sink = RecordingSink::ready();

        assert!(!slot.tick(0.55));
        assert!(slot.tick(ARM_DELAY_SECS));
        assert_eq!(
            slot.provide_width(300.0, &mut sink),
            CheckOutcome::Fired
        );
        assert_eq!(slot.state(), ActivationState::Fired);
        assert_eq!(sink.pushes, 1);

        // Terminal: no further checks, no further appends.
        assert!(!slot.tick(10.0));
        assert!(slot.on_intersection(true, 10.0).is_none());
        assert_eq!(sink.pushes, 1);
    }

    #[test]
    fn rapid_repeated_visibility_arms_once() {
        let mut slot = armed_controller(0.0);
        let mut sink = RecordingSink::ready();

        // Second visible signal at t=0.05 before the first check matures.
        assert!(slot.on_intersection(true, 0.05).is_none());

        assert!(slot.tick(0.6));
        assert!(!slot.tick(0.6));
        assert_eq!(slot.provide_width(300.0, &mut sink), CheckOutcome::Fired);
        assert_eq!(sink.pushes, 1);
    }

    #[test]
    fn zero_width_at_check_drops_without_rescheduling() {
        let mut slot = armed_controller(0.0);
        let mut sink = RecordingSink::ready();

        assert!(slot.tick(0.6));
        assert_eq!(
            slot.provide_width(0.0, &mut sink),
            CheckOutcome::DroppedZeroWidth
        );
        assert_eq!(slot.state(), ActivationState::Idle);
        assert!(!slot.check_pending());
        assert_eq!(sink.pushes, 0);

        // No retry loop: time passing alone never schedules another check.
        for step in 1..100 {
            assert!(!slot.tick(0.6 + step as f32 * 0.1));
        }
        assert_eq!(sink.pushes, 0);
    }

    #[test]
    fn fresh_visibility_transition_can_rearm_after_drop() {
        let mut slot = armed_controller(0.0);
        let mut sink = RecordingSink::ready();

        assert!(slot.tick(0.6));
        assert_eq!(
            slot.provide_width(0.0, &mut sink),
            CheckOutcome::DroppedZeroWidth
        );

        // Late layout: the container scrolls back in once it has width.
        assert!(slot.on_intersection(true, 2.0).is_some());
        assert!(slot.tick(2.6));
        assert_eq!(slot.provide_width(320.0, &mut sink), CheckOutcome::Fired);
        assert_eq!(sink.pushes, 1);
    }

    #[test]
    fn sink_failure_defers_without_firing() {
        let mut slot = armed_controller(0.0);
        let mut sink = RecordingSink::offline();

        assert!(slot.tick(0.6));
        assert_eq!(
            slot.provide_width(300.0, &mut sink),
            CheckOutcome::Deferred(SinkError::NotLoaded)
        );
        assert_eq!(slot.state(), ActivationState::Idle);
        assert_eq!(sink.pushes, 0);
        assert!(!slot.tick(5.0));
    }

    #[test]
    fn unattached_controller_never_arms() {
        let mut slot = SlotController::new();
        let mut sink = RecordingSink::ready();

        assert!(slot.on_intersection(true, 0.0).is_none());
        assert!(!slot.tick(100.0));
        assert_eq!(
            slot.provide_width(300.0, &mut sink),
            CheckOutcome::Ignored
        );
        assert_eq!(slot.state(), ActivationState::Idle);
        assert_eq!(sink.pushes, 0);
    }

    #[test]
    fn invisible_signal_is_a_no_op() {
        let mut slot = SlotController::new();
        slot.attach();
        assert!(slot.on_intersection(false, 0.0).is_none());
        assert_eq!(slot.state(), ActivationState::Idle);
    }

    #[test]
    fn unsolicited_measurement_is_ignored() {
        let mut slot = armed_controller(0.0);
        let mut sink = RecordingSink::ready();

        // Deadline has not matured, so no measurement was requested.
        assert_eq!(
            slot.provide_width(300.0, &mut sink),
            CheckOutcome::Ignored
        );
        assert_eq!(slot.state(), ActivationState::Armed);
        assert_eq!(sink.pushes, 0);
    }
}
