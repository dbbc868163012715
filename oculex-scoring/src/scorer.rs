use oculex_core::{ang_deg, ang_diff, Saccade, Score, TargetId, TrialOutcome};
use tracing::warn;

use crate::evidence::{self, TaskKind};
use crate::state::ScorerState;

/// Timestamps left by the rig's online scorer; at most one is present per
/// trial.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OnlineMarkers {
    pub broken_fixation: Option<f64>,
    pub no_choice: Option<f64>,
    pub error: Option<f64>,
    pub correct: Option<f64>,
}

impl OnlineMarkers {
    /// Score implied by the first marker present, in the rig's order.
    pub fn score(&self) -> Option<Score> {
        if self.broken_fixation.is_some() {
            Some(Score::BrokenFixation)
        } else if self.no_choice.is_some() {
            Some(Score::NoChoice)
        } else if self.error.is_some() {
            Some(Score::Error)
        } else if self.correct.is_some() {
            Some(Score::Correct)
        } else {
            None
        }
    }
}

/// Everything the scorer consumes about one trial.
#[derive(Debug, Clone)]
pub struct TrialContext<'a> {
    pub task_id: i64,
    pub trial_id: i64,
    pub subject_id: &'a str,
    pub t1: (f64, f64),
    pub t2: Option<(f64, f64)>,
    pub sample: Option<(f64, f64)>,
    /// Fixation-off timestamp in absolute session time (ms); None means the
    /// subject broke fixation before release.
    pub fp_off: Option<f64>,
    /// Saccades detected over the window starting at fixation-off.
    pub saccades: &'a [Saccade],
    pub online: OnlineMarkers,
}

/// Choice phase for one trial. Terminal within the trial; cross-trial state
/// is only the two fields of `ScorerState`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ChoicePhase {
    BrokenFixation,
    NoSaccade,
    Evaluating,
}

/// Scores trials from detected saccades and task metadata.
#[derive(Debug, Clone)]
pub struct TrialScorer {
    /// Ceiling on the saccade-to-target angular distance for a saccade to
    /// count as a choice (deg).
    pub min_angular_distance_to_target_deg: f64,
}

impl Default for TrialScorer {
    fn default() -> Self {
        Self {
            min_angular_distance_to_target_deg: 25.0,
        }
    }
}

impl TrialScorer {
    pub fn new(min_angular_distance_to_target_deg: f64) -> Self {
        Self {
            min_angular_distance_to_target_deg,
        }
    }

    /// Score one trial against the session state. Returns the outcome and
    /// the state to carry into the next trial; the caller must feed trials
    /// in session order.
    pub fn score(
        &self,
        trial: &TrialContext<'_>,
        state: &ScorerState,
    ) -> (TrialOutcome, ScorerState) {
        let t1_angle = ang_deg(trial.t1.0, trial.t1.1);
        let (t2_x, t2_y) = trial.t2.unwrap_or((0.0, 0.0));
        let t2_angle = ang_deg(t2_x, t2_y);

        let mut outcome = TrialOutcome::new(Score::NoChoice, t1_angle, t2_angle);
        let mut next_state = *state;
        // correct target first, so slot 0 names the correct choice
        let mut target_angles: Vec<(TargetId, f64)> = Vec::new();

        match TaskKind::from_id(trial.task_id) {
            TaskKind::MemorySaccade => {
                outcome.correct_target = Some(TargetId::T1);
                target_angles.push((TargetId::T1, t1_angle));
            }
            TaskKind::AdaptiveOdr => {
                if let Some((sx, sy)) = trial.sample {
                    outcome.sample_angle = Some(ang_deg(sx, sy));
                }
                let ev = evidence::compute(trial.trial_id, trial.task_id, trial.subject_id);
                next_state = state.advanced(ev.correct_target);
                let tacp = next_state.trials_after_change_point;

                // reorient the LLR to favoring the current target, then flip
                // the sign on every trial that is not a change point
                let mut llr_for_switch = ev.llr;
                if ev.correct_target == TargetId::T1 {
                    llr_for_switch = -llr_for_switch;
                }
                if tacp != 0 {
                    llr_for_switch = -llr_for_switch;
                }

                outcome.correct_target = Some(ev.correct_target);
                outcome.sample_id = Some(ev.sample_id);
                outcome.llr = Some(ev.llr);
                outcome.llr_for_switch = Some(llr_for_switch);
                outcome.tacp = Some(tacp);

                match ev.correct_target {
                    TargetId::T1 => {
                        target_angles.push((TargetId::T1, t1_angle));
                        target_angles.push((TargetId::T2, t2_angle));
                    }
                    TargetId::T2 => {
                        target_angles.push((TargetId::T2, t2_angle));
                        target_angles.push((TargetId::T1, t1_angle));
                    }
                }
            }
            TaskKind::Unknown => {
                warn!(
                    task_id = trial.task_id,
                    "unrecognized task id, task-specific fields left unset"
                );
            }
        }

        let phase = if trial.fp_off.is_none() {
            ChoicePhase::BrokenFixation
        } else if trial
            .saccades
            .first()
            .map_or(true, |s| !s.t_start.is_finite())
        {
            ChoicePhase::NoSaccade
        } else {
            ChoicePhase::Evaluating
        };

        match phase {
            ChoicePhase::BrokenFixation => outcome.score = Score::BrokenFixation,
            ChoicePhase::NoSaccade => outcome.score = Score::NoChoice,
            ChoicePhase::Evaluating => {
                // nearest qualifying (saccade, target) pair; first hit wins
                // ties by the strict improvement requirement
                let mut best: Option<(usize, usize, f64)> = None;
                for (i, saccade) in trial.saccades.iter().enumerate() {
                    if saccade.is_sentinel() {
                        continue;
                    }
                    let sac_angle = ang_deg(saccade.x_end, saccade.y_end);
                    for (j, &(_, angle)) in target_angles.iter().enumerate() {
                        let distance = ang_diff(angle, sac_angle);
                        if distance <= self.min_angular_distance_to_target_deg
                            && best.map_or(true, |(_, _, b)| distance < b)
                        {
                            best = Some((i, j, distance));
                        }
                    }
                }
                match best {
                    None => outcome.score = Score::NoChoice,
                    Some((saccade_index, slot, _)) => {
                        let (target, _) = target_angles[slot];
                        outcome.score = if slot == 0 { Score::Correct } else { Score::Error };
                        outcome.chosen_target = Some(target);
                        outcome.scored_saccade_index = Some(saccade_index);

                        let rt = trial.saccades[saccade_index].t_start;
                        if rt < 0.0 {
                            warn!(
                                reaction_time_ms = rt,
                                "negative reaction time, upstream timing inconsistency"
                            );
                        }
                        outcome.reaction_time_ms = Some(rt);
                        outcome.saccade_onset_time = trial.fp_off.map(|fp| fp + rt);
                    }
                }
            }
        }

        outcome.online_score = trial.online.score();
        outcome.score_match = outcome.online_score.map(|online| online == outcome.score);

        (outcome, next_state)
    }
}
