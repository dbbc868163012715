use oculex_core::{Saccade, TrialOutcome};
use oculex_saccade::{detect, DetectorConfig};
use oculex_scoring::{OnlineMarkers, ScorerState, TaskKind, TrialContext, TrialScorer};
use oculex_signal::{AttrValue, Category, GazeSource, TrialAttributes};
use thiserror::Error;
use tracing::warn;

// Attribute keys shared with the upstream event-file conversion.
const FP_OFF: &str = "fp_off";
const ALL_OFF: &str = "all_off";
const TASK_ID: &str = "task_id";
const TRIAL_ID: &str = "trial_id";
const T1_X: &str = "t1_x";
const T1_Y: &str = "t1_y";
const T2_X: &str = "t2_x";
const T2_Y: &str = "t2_y";
const SAMPLE_X: &str = "sample_x";
const SAMPLE_Y: &str = "sample_y";
const ONLINE_BRFIX: &str = "online_brfix";
const ONLINE_NCERR: &str = "online_ncerr";
const ONLINE_ERROR: &str = "online_error";
const ONLINE_CORRECT: &str = "online_correct";

// Keys written back by the enrichment pass.
const SACCADES: &str = "saccades";
const T1_ANGLE: &str = "t1_angle";
const T2_ANGLE: &str = "t2_angle";
const SAMPLE_ANGLE: &str = "sample_angle";
const SAMPLE_ID: &str = "sample_id";
const CORRECT_TARGET: &str = "correct_target";
const LLR: &str = "llr";
const TACP: &str = "tacp";
const LLR_FOR_SWITCH: &str = "llr_for_switch";
const SCORE: &str = "score";
const CHOICE: &str = "choice";
const RT: &str = "RT";
const SCORED_SACCADE_INDEX: &str = "scored_saccade_index";
const SAC_ON: &str = "sac_on";
const ONLINE_SCORE: &str = "online_score";
const SCORE_MATCH: &str = "score_match";

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("missing required attribute `{0}`")]
    MissingAttribute(&'static str),
}

/// Session-level enrichment configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub subject_id: String,
    pub x_channel: usize,
    pub y_channel: usize,
    /// Subtract the gaze position sampled at fixation-off before detection.
    pub center_at_fixation: bool,
    pub detector: DetectorConfig,
    pub scorer: TrialScorer,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            subject_id: "MrM".to_string(),
            x_channel: 0,
            y_channel: 1,
            center_at_fixation: true,
            detector: DetectorConfig::default(),
            scorer: TrialScorer::default(),
        }
    }
}

/// Runs detection and scoring over successive trials of one session,
/// carrying the scorer state between them. Trials must be fed in session
/// order; use one enhancer per session.
pub struct SessionEnhancer<G: GazeSource> {
    pub config: SessionConfig,
    gaze: G,
    state: ScorerState,
}

impl<G: GazeSource> SessionEnhancer<G> {
    pub fn new(config: SessionConfig, gaze: G) -> Self {
        Self {
            config,
            gaze,
            state: ScorerState::new(),
        }
    }

    pub fn state(&self) -> &ScorerState {
        &self.state
    }

    /// Enrich one trial in place: detect saccades over the choice window,
    /// score the trial, and write the derived keys back into the store.
    ///
    /// A missing fixation-off timestamp is not an error (the trial scores
    /// as broken fixation); missing task geometry is, and the caller should
    /// log it and move on to the next trial.
    pub fn enhance(&mut self, trial: &mut TrialAttributes) -> Result<TrialOutcome, EnhanceError> {
        let fp_off = trial.time(FP_OFF);
        let saccades = match (fp_off, trial.time(ALL_OFF)) {
            (Some(start), Some(end)) => self.detect_saccades(start, end),
            _ => {
                if fp_off.is_some() {
                    warn!("trial has no end-of-window timestamp, skipping saccade detection");
                }
                // standalone scoring: reuse saccades already in the store
                trial
                    .saccades(SACCADES)
                    .map(<[Saccade]>::to_vec)
                    .unwrap_or_default()
            }
        };
        trial.add_saccades(SACCADES, saccades.clone());

        let t1 = (required(trial, T1_X)?, required(trial, T1_Y)?);
        let t2 = optional_pair(trial, T2_X, T2_Y);
        let sample = optional_pair(trial, SAMPLE_X, SAMPLE_Y);
        // a missing task id falls through as unrecognized, it never aborts
        let task_id = trial.id(TASK_ID).unwrap_or(-1);
        let trial_id = match TaskKind::from_id(task_id) {
            TaskKind::AdaptiveOdr => required_id(trial, TRIAL_ID)?,
            _ => trial.id(TRIAL_ID).unwrap_or(0),
        };
        let online = OnlineMarkers {
            broken_fixation: trial.time(ONLINE_BRFIX),
            no_choice: trial.time(ONLINE_NCERR),
            error: trial.time(ONLINE_ERROR),
            correct: trial.time(ONLINE_CORRECT),
        };

        let context = TrialContext {
            task_id,
            trial_id,
            subject_id: &self.config.subject_id,
            t1,
            t2,
            sample,
            fp_off,
            saccades: &saccades,
            online,
        };
        let (outcome, next_state) = self.config.scorer.score(&context, &self.state);
        self.state = next_state;

        write_back(trial, &outcome);
        Ok(outcome)
    }

    /// Pull the choice window [fp_off, all_off] from the gaze source and
    /// run the detector over it.
    fn detect_saccades(&self, start: f64, end: f64) -> Vec<Saccade> {
        let mut xs = self.gaze.range(self.config.x_channel, start, end);
        let mut ys = self.gaze.range(self.config.y_channel, start, end);
        if self.config.center_at_fixation {
            let cx = self.gaze.value_at(self.config.x_channel, start).unwrap_or(0.0);
            let cy = self.gaze.value_at(self.config.y_channel, start).unwrap_or(0.0);
            for x in &mut xs {
                *x -= cx;
            }
            for y in &mut ys {
                *y -= cy;
            }
        }
        detect(&xs, &ys, self.gaze.sample_interval_ms(), &self.config.detector)
    }
}

fn required(trial: &TrialAttributes, key: &'static str) -> Result<f64, EnhanceError> {
    trial.number(key).ok_or(EnhanceError::MissingAttribute(key))
}

fn required_id(trial: &TrialAttributes, key: &'static str) -> Result<i64, EnhanceError> {
    trial.id(key).ok_or(EnhanceError::MissingAttribute(key))
}

fn optional_pair(trial: &TrialAttributes, kx: &str, ky: &str) -> Option<(f64, f64)> {
    match (trial.number(kx), trial.number(ky)) {
        (Some(x), Some(y)) => Some((x, y)),
        _ => None,
    }
}

fn write_back(trial: &mut TrialAttributes, outcome: &TrialOutcome) {
    trial.add(T1_ANGLE, AttrValue::Number(outcome.t1_angle), Category::Id);
    trial.add(T2_ANGLE, AttrValue::Number(outcome.t2_angle), Category::Id);
    if let Some(angle) = outcome.sample_angle {
        trial.add_value(SAMPLE_ANGLE, angle);
    }
    if let Some(target) = outcome.correct_target {
        trial.add_id(CORRECT_TARGET, target.code());
    }
    if let Some(id) = outcome.sample_id {
        trial.add_id(SAMPLE_ID, id);
    }
    if let Some(llr) = outcome.llr {
        trial.add_value(LLR, llr);
    }
    if let Some(tacp) = outcome.tacp {
        trial.add_id(TACP, tacp as i64);
    }
    if let Some(llr) = outcome.llr_for_switch {
        trial.add_value(LLR_FOR_SWITCH, llr);
    }
    trial.add_id(SCORE, outcome.score.code());
    if let Some(choice) = outcome.chosen_target {
        trial.add_id(CHOICE, choice.code());
    }
    if let Some(rt) = outcome.reaction_time_ms {
        trial.add_value(RT, rt);
    }
    if let Some(index) = outcome.scored_saccade_index {
        trial.add_id(SCORED_SACCADE_INDEX, index as i64);
    }
    if let Some(t) = outcome.saccade_onset_time {
        trial.add_time(SAC_ON, t);
    }
    if let Some(online) = outcome.online_score {
        trial.add_value(ONLINE_SCORE, online.code() as f64);
    }
    if let Some(matched) = outcome.score_match {
        trial.add_flag(SCORE_MATCH, matched);
    }
}
