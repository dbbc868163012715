use serde::{Deserialize, Serialize};

/// Trial outcome code, with the rig's numeric convention:
/// 1 = correct, 0 = error, -1 = no choice, -2 = broken fixation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Score {
    Correct,
    Error,
    NoChoice,
    BrokenFixation,
}

impl Score {
    pub fn code(self) -> i64 {
        match self {
            Score::Correct => 1,
            Score::Error => 0,
            Score::NoChoice => -1,
            Score::BrokenFixation => -2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Score::Correct),
            0 => Some(Score::Error),
            -1 => Some(Score::NoChoice),
            -2 => Some(Score::BrokenFixation),
            _ => None,
        }
    }
}

/// One of the two choice targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetId {
    T1,
    T2,
}

impl TargetId {
    pub fn code(self) -> i64 {
        match self {
            TargetId::T1 => 1,
            TargetId::T2 => 2,
        }
    }

    pub fn other(self) -> Self {
        match self {
            TargetId::T1 => TargetId::T2,
            TargetId::T2 => TargetId::T1,
        }
    }
}

/// Enriched per-trial record produced by the scorer. Fields that depend on
/// the task variant or on a detected choice stay `None` when they could not
/// be computed; downstream consumers must tolerate partially populated
/// outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub score: Score,
    pub correct_target: Option<TargetId>,
    pub chosen_target: Option<TargetId>,
    /// Chosen saccade onset relative to fixation-off (ms).
    pub reaction_time_ms: Option<f64>,
    pub t1_angle: f64,
    pub t2_angle: f64,
    pub sample_angle: Option<f64>,
    /// Signed cue-identity bucket, -4..=4; negative toward T1.
    pub sample_id: Option<i64>,
    /// Evidence for T1 (-) vs T2 (+).
    pub llr: Option<f64>,
    /// LLR reoriented to favor-switching sign.
    pub llr_for_switch: Option<f64>,
    /// Trials after the last change point.
    pub tacp: Option<u64>,
    pub scored_saccade_index: Option<usize>,
    /// Chosen saccade onset in absolute session time (ms).
    pub saccade_onset_time: Option<f64>,
    /// Score assigned online by the rig, when its marker was present.
    pub online_score: Option<Score>,
    pub score_match: Option<bool>,
}

impl TrialOutcome {
    /// Neutral outcome carrying only the target angles; the scorer fills in
    /// the rest state by state.
    pub fn new(score: Score, t1_angle: f64, t2_angle: f64) -> Self {
        Self {
            score,
            correct_target: None,
            chosen_target: None,
            reaction_time_ms: None,
            t1_angle,
            t2_angle,
            sample_angle: None,
            sample_id: None,
            llr: None,
            llr_for_switch: None,
            tacp: None,
            scored_saccade_index: None,
            saccade_onset_time: None,
            online_score: None,
            score_match: None,
        }
    }
}
