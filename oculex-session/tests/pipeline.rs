//! End-to-end run over a synthesized session: detection, scoring, state
//! threading, and store write-backs all at once.

use oculex_core::Score;
use oculex_session::{synth, PlannedResponse, SessionConfig, SessionEnhancer};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn synthetic_session_scores_match_the_plan() {
    let mut rng = StdRng::seed_from_u64(7);
    let session = synth::synthesize(60, &mut rng);
    let config = SessionConfig {
        subject_id: session.subject_id.clone(),
        ..SessionConfig::default()
    };
    let mut enhancer = SessionEnhancer::new(config, session.gaze);

    let mut previous_correct = None;
    let mut expected_tacp: u64 = 0;
    for (trial_attrs, plan) in session.trials.into_iter().zip(&session.planned) {
        let mut trial = trial_attrs;
        let outcome = enhancer.enhance(&mut trial).expect("scorable trial");

        let expected_score = match plan.response {
            PlannedResponse::Correct => Score::Correct,
            PlannedResponse::Error => Score::Error,
            PlannedResponse::NoResponse => Score::NoChoice,
        };
        assert_eq!(outcome.score, expected_score);
        assert_eq!(
            outcome.correct_target.map(|t| t.code()),
            Some(plan.correct_target)
        );

        // change-point bookkeeping follows the planned target sequence
        expected_tacp = if previous_correct != Some(plan.correct_target) {
            0
        } else {
            expected_tacp + 1
        };
        previous_correct = Some(plan.correct_target);
        assert_eq!(outcome.tacp, Some(expected_tacp));

        match plan.response {
            PlannedResponse::NoResponse => {
                assert_eq!(outcome.reaction_time_ms, None);
                assert_eq!(outcome.chosen_target, None);
            }
            _ => {
                // the movement starts 150 ms after fixation-off
                let rt = outcome.reaction_time_ms.expect("reaction time");
                assert!((100.0..250.0).contains(&rt), "rt = {rt}");
                let fp_off = trial.time("fp_off").expect("fp_off");
                assert_eq!(outcome.saccade_onset_time, Some(fp_off + rt));
            }
        }

        // enrichment keys land back in the store
        assert_eq!(trial.id("score"), Some(outcome.score.code()));
        assert!(trial.saccades("saccades").is_some());
        assert!(trial.number("llr").is_some());
    }
}
