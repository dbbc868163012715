use anyhow::Result;
use oculex_core::Score;
use oculex_session::{synth, SessionConfig, SessionEnhancer};
use tracing::warn;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let n_trials: usize = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(40);

    let mut rng = rand::rng();
    let session = synth::synthesize(n_trials, &mut rng);
    let config = SessionConfig {
        subject_id: session.subject_id.clone(),
        ..SessionConfig::default()
    };
    let mut enhancer = SessionEnhancer::new(config, session.gaze);

    let mut tallies = [0usize; 4];
    let mut reaction_times = Vec::new();
    for (index, mut trial) in session.trials.into_iter().enumerate() {
        match enhancer.enhance(&mut trial) {
            Ok(outcome) => {
                let slot = match outcome.score {
                    Score::Correct => 0,
                    Score::Error => 1,
                    Score::NoChoice => 2,
                    Score::BrokenFixation => 3,
                };
                tallies[slot] += 1;
                if let Some(rt) = outcome.reaction_time_ms {
                    reaction_times.push(rt);
                }
                println!("{}", serde_json::to_string(&outcome)?);
            }
            Err(err) => warn!(trial = index, %err, "trial skipped"),
        }
    }

    let mean_rt = if reaction_times.is_empty() {
        f64::NAN
    } else {
        reaction_times.iter().sum::<f64>() / reaction_times.len() as f64
    };
    println!(
        "{n_trials} trials: {} correct, {} error, {} no-choice, {} broken fixation, mean RT {:.1} ms",
        tallies[0], tallies[1], tallies[2], tallies[3], mean_rt
    );

    Ok(())
}
