pub mod enhancer;
pub mod synth;

pub use enhancer::{EnhanceError, SessionConfig, SessionEnhancer};
pub use synth::{PlannedResponse, PlannedTrial, SyntheticSession};
