//! Synthetic sessions for the demo binary and end-to-end tests: adaptive-ODR
//! trials with a hazard-driven change point and step-like gaze traces.

use oculex_signal::{DenseGazeBuffer, TrialAttributes};
use rand::Rng;

const SAMPLE_RATE_HZ: f64 = 1000.0;
const SAMPLES_PER_TRIAL: usize = 1000;
const FP_OFF_MS: usize = 300;
const ALL_OFF_MS: usize = 900;
const MOVE_AT_MS: usize = 450;
const RAMP_MS: usize = 20;
const TASK_ID: i64 = 2;
const CHANGE_HAZARD: f64 = 0.15;

/// What the simulated subject does on a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedResponse {
    Correct,
    Error,
    NoResponse,
}

/// Ground truth kept alongside each synthesized trial.
#[derive(Debug, Clone, Copy)]
pub struct PlannedTrial {
    /// Correct target code for the trial, 1 or 2.
    pub correct_target: i64,
    pub response: PlannedResponse,
}

pub struct SyntheticSession {
    pub gaze: DenseGazeBuffer,
    pub trials: Vec<TrialAttributes>,
    pub planned: Vec<PlannedTrial>,
    pub subject_id: String,
}

/// Build an `n_trials`-long session. Target 1 sits at (10, 0) and target 2
/// at (-10, 0); the correct target switches with a fixed hazard rate, and
/// the subject answers correctly most of the time.
pub fn synthesize(n_trials: usize, rng: &mut impl Rng) -> SyntheticSession {
    let mut xs = Vec::with_capacity(n_trials * SAMPLES_PER_TRIAL);
    let mut ys = Vec::with_capacity(n_trials * SAMPLES_PER_TRIAL);
    let mut trials = Vec::with_capacity(n_trials);
    let mut planned = Vec::with_capacity(n_trials);
    let mut correct_target = 1i64;

    for t in 0..n_trials {
        if t > 0 && rng.random_bool(CHANGE_HAZARD) {
            correct_target = 3 - correct_target;
        }
        let response = match rng.random_range(0..10) {
            0 => PlannedResponse::NoResponse,
            1..=2 => PlannedResponse::Error,
            _ => PlannedResponse::Correct,
        };
        // skip the zero-probability bucket so the LLR stays finite
        let llr_id = rng.random_range(1..9);
        let local = if correct_target == 1 { llr_id } else { 9 + llr_id };
        let trial_id = 100 * TASK_ID + local;

        let landing_x = match response {
            PlannedResponse::Correct => {
                if correct_target == 1 {
                    10.0
                } else {
                    -10.0
                }
            }
            PlannedResponse::Error => {
                if correct_target == 1 {
                    -10.0
                } else {
                    10.0
                }
            }
            PlannedResponse::NoResponse => 0.0,
        };
        for i in 0..SAMPLES_PER_TRIAL {
            let frac = if i < MOVE_AT_MS {
                0.0
            } else if i >= MOVE_AT_MS + RAMP_MS {
                1.0
            } else {
                let phase = (i - MOVE_AT_MS) as f64 / RAMP_MS as f64;
                0.5 * (1.0 - (std::f64::consts::PI * phase).cos())
            };
            xs.push(landing_x * frac);
            ys.push(0.0);
        }

        let base_ms = (t * SAMPLES_PER_TRIAL) as f64;
        let mut attrs = TrialAttributes::new();
        attrs.add_id("task_id", TASK_ID);
        attrs.add_id("trial_id", trial_id);
        attrs.add_value("t1_x", 10.0);
        attrs.add_value("t1_y", 0.0);
        attrs.add_value("t2_x", -10.0);
        attrs.add_value("t2_y", 0.0);
        attrs.add_value("sample_x", if correct_target == 1 { 8.0 } else { -8.0 });
        attrs.add_value("sample_y", 2.0);
        attrs.add_time("fp_off", base_ms + FP_OFF_MS as f64);
        attrs.add_time("all_off", base_ms + ALL_OFF_MS as f64);
        trials.push(attrs);
        planned.push(PlannedTrial {
            correct_target,
            response,
        });
    }

    SyntheticSession {
        gaze: DenseGazeBuffer::new(SAMPLE_RATE_HZ, vec![xs, ys]),
        trials,
        planned,
        subject_id: "Cicero".to_string(),
    }
}
