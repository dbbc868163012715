pub mod geometry;
pub mod outcome;
pub mod saccade;

pub use geometry::{ang_deg, ang_diff, log10};
pub use outcome::{Score, TargetId, TrialOutcome};
pub use saccade::Saccade;
