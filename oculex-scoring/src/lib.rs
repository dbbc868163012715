pub mod evidence;
pub mod scorer;
pub mod state;

pub use evidence::{Evidence, TaskKind};
pub use scorer::{OnlineMarkers, TrialContext, TrialScorer};
pub use state::ScorerState;
