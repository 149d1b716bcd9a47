use std::collections::BTreeMap;

use crate::input::UiEventKind;
use crate::page::PageId;
use crate::page::screens::{AVATAR, CHART, INTAKE};

use super::step::{Placement, Step};

/// Static mapping from page identity to its ordered step list.
///
/// The registry is plain data supplied by the integrator; the sequencer
/// never mutates it and unknown pages simply resolve to no steps.
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    pages: BTreeMap<PageId, Vec<Step>>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageId, steps: Vec<Step>) -> Self {
        self.pages.insert(page, steps);
        self
    }

    pub fn steps_for_page(&self, page: PageId) -> &[Step] {
        self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// The walkthrough shipped with the demo app: avatar selection, intake
/// form, then the visit chart, chained with route hops.
pub fn demo_registry() -> StepRegistry {
    StepRegistry::new()
        .with_page(
            AVATAR,
            vec![
                Step::anchor("avatar-male", "Pick a starting avatar.").placed(Placement::Bottom),
                Step::anchor("avatar-female", "Or choose this one.").placed(Placement::Bottom),
                Step::anchor("continue-to-intake", "Continue to intake.").placed(Placement::Top),
                Step::route_hop(INTAKE, "Heading to intake..."),
            ],
        )
        .with_page(
            INTAKE,
            vec![
                Step::anchor("intake-section1", "Basic info.").placed(Placement::Bottom),
                Step::anchor("intake-section2", "One more field.").placed(Placement::Bottom),
                Step::anchor("submit-intake", "Submit to start the visit.")
                    .placed(Placement::Top)
                    .advance_on(UiEventKind::Activate, "submit-intake"),
                Step::route_hop(CHART, "Jumping into the visit..."),
            ],
        )
        .with_page(
            CHART,
            vec![
                Step::anchor("physician-join", "The physician joins here.")
                    .placed(Placement::Right),
                Step::anchor("soap-notes", "Chart SOAP notes here.").placed(Placement::Bottom),
                Step::anchor("order-herbs", "Order herbs here.").placed(Placement::Left),
            ],
        )
}
