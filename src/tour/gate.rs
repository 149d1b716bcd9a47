use tracing::debug;

use crate::input::UiEvent;

use super::step::AdvanceRequirement;

/// An armed advance requirement.
///
/// Arming happens exactly once per qualifying step activation; release is
/// scoped to the owner dropping the gate, so every exit path (manual
/// advance, skip, page change, sequencer teardown) disarms it without a
/// matching call site.
#[derive(Debug)]
pub(crate) struct AdvanceGate {
    requirement: AdvanceRequirement,
}

impl AdvanceGate {
    pub(crate) fn arm(requirement: AdvanceRequirement) -> Self {
        debug!(
            event = requirement.event.id(),
            anchor = %requirement.anchor,
            "advance gate armed"
        );
        Self { requirement }
    }

    pub(crate) fn matches(&self, event: &UiEvent) -> bool {
        self.requirement.event == event.kind && self.requirement.anchor == event.anchor.as_str()
    }
}

impl Drop for AdvanceGate {
    fn drop(&mut self) {
        debug!(
            event = self.requirement.event.id(),
            anchor = %self.requirement.anchor,
            "advance gate disarmed"
        );
    }
}
