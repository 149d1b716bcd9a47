mod gate;
mod progress;
mod registry;
mod sequencer;
mod step;

pub use progress::{PersistencePolicy, Progress};
pub use registry::{StepRegistry, demo_registry};
pub use sequencer::{
    AdvanceDirection, OverlaySignal, ReadinessProbe, Sequencer, TourEffect,
};
pub use step::{AdvanceRequirement, Placement, Step, StepTarget};
