use oculex_core::TargetId;
use serde::{Deserialize, Serialize};

/// Cross-trial scoring state, threaded explicitly through successive
/// scoring calls in trial order. Initialize fresh at the start of a session;
/// never share one across sessions or subjects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerState {
    /// Trials since the correct target last changed.
    pub trials_after_change_point: u64,
    /// Correct target of the most recent two-alternative trial.
    pub previous_correct_target: Option<TargetId>,
}

impl ScorerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State after a trial whose correct target is `correct`: the counter
    /// resets to 0 exactly when the target changed, else increments by 1.
    pub(crate) fn advanced(self, correct: TargetId) -> Self {
        let trials_after_change_point = if self.previous_correct_target != Some(correct) {
            0
        } else {
            self.trials_after_change_point + 1
        };
        Self {
            trials_after_change_point,
            previous_correct_target: Some(correct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_resets_on_change_and_increments_otherwise() {
        let s0 = ScorerState::new();
        let s1 = s0.advanced(TargetId::T1);
        assert_eq!(s1.trials_after_change_point, 0);
        let s2 = s1.advanced(TargetId::T1);
        assert_eq!(s2.trials_after_change_point, 1);
        let s3 = s2.advanced(TargetId::T1);
        assert_eq!(s3.trials_after_change_point, 2);
        let s4 = s3.advanced(TargetId::T2);
        assert_eq!(s4.trials_after_change_point, 0);
        assert_eq!(s4.previous_correct_target, Some(TargetId::T2));
    }
}
