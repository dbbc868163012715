use oculex_core::Saccade;
use tracing::debug;

use crate::config::DetectorConfig;
use crate::filter::{convolve_same, convolve_valid, median, ACCEL_KERNEL, POSITION_KERNEL};

/// Number of back-to-back peak-velocity samples required to treat a
/// candidate region as a real movement rather than a noise spike.
const RUN_LEN: usize = 5;

/// Progress of the candidate scan across the trial window.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanState {
    /// Looking for the next run of contiguous peak-velocity candidates.
    Searching,
    /// A run was found; try to bracket it with onset and offset samples.
    CandidateFound { run_start: usize, run_end: usize },
    /// A saccade ending at `offset` was accepted; resume past it.
    SaccadeAccepted { offset: usize },
}

/// Onset/offset sample indices bracketing one candidate movement.
struct Bracket {
    onset: usize,
    offset: usize,
}

/// Extract saccades from one trial window of gaze positions.
///
/// `x_position` and `y_position` cover the window from fixation-off to trial
/// end, in degrees (fixation-centered when the caller re-centered them).
/// Returned times are ms relative to the window start. Malformed input
/// (mismatched lengths, or shorter than the smoothing kernel) yields an
/// empty list; a searched-out window ends with the terminal sentinel.
pub fn detect(
    x_position: &[f64],
    y_position: &[f64],
    sample_interval_ms: f64,
    config: &DetectorConfig,
) -> Vec<Saccade> {
    if x_position.len() != y_position.len() || x_position.len() < POSITION_KERNEL.len() {
        return Vec::new();
    }

    let xs = convolve_same(x_position, &POSITION_KERNEL);
    let ys = convolve_same(y_position, &POSITION_KERNEL);
    let vels = debiased_velocity(&xs, &ys, sample_interval_ms);
    let accel = smoothed_acceleration(&vels);

    let candidates: Vec<usize> = (0..vels.len())
        .filter(|&i| vels[i] >= config.velocity_peak_threshold)
        .collect();

    let mut saccades: Vec<Saccade> = Vec::new();
    // cursor walks the candidate list, floor is the first unsearched sample
    let mut cursor = 0usize;
    let mut floor = 0usize;
    let mut state = ScanState::Searching;

    while saccades.len() < config.max_saccades {
        state = match state {
            ScanState::Searching => match next_run(&candidates, cursor) {
                Some(at) => {
                    cursor = at;
                    ScanState::CandidateFound {
                        run_start: candidates[at],
                        run_end: candidates[at + RUN_LEN - 1],
                    }
                }
                None => break,
            },
            ScanState::CandidateFound { run_start, run_end } => {
                match bracket(&vels, &accel, floor, run_start, run_end, config) {
                    Some(b) => match build_saccade(&xs, &ys, &vels, &b, sample_interval_ms, config)
                    {
                        Some(saccade) => {
                            debug!(
                                t_start = saccade.t_start,
                                t_end = saccade.t_end,
                                vector_distance = saccade.vector_distance,
                                "saccade accepted"
                            );
                            saccades.push(saccade);
                            ScanState::SaccadeAccepted { offset: b.offset }
                        }
                        None => {
                            // rejected on length or eccentricity: no retry at
                            // this position, advance past the whole region
                            floor = (b.offset + 1).max(run_end + 1);
                            cursor = skip_candidates(&candidates, cursor, floor);
                            ScanState::Searching
                        }
                    },
                    None => {
                        // onset or offset undefined: discard this run
                        floor = run_end + 1;
                        cursor = skip_candidates(&candidates, cursor, floor);
                        ScanState::Searching
                    }
                }
            }
            ScanState::SaccadeAccepted { offset } => {
                floor = offset + 1;
                cursor = skip_candidates(&candidates, cursor, floor);
                ScanState::Searching
            }
        };
    }

    let window_exhausted = match saccades.last() {
        None => true,
        Some(last) => last.t_start + last.t_end < config.sentinel_cutoff_ms,
    };
    if saccades.len() < config.max_saccades && window_exhausted {
        saccades.push(Saccade::sentinel());
    }
    saccades
}

/// Instantaneous speed between consecutive smoothed samples, zero prepended,
/// with the series median subtracted to suppress baseline drift.
fn debiased_velocity(xs: &[f64], ys: &[f64], sample_interval_ms: f64) -> Vec<f64> {
    let mut speed = vec![0.0; xs.len()];
    for i in 1..xs.len() {
        let dx = xs[i] - xs[i - 1];
        let dy = ys[i] - ys[i - 1];
        speed[i] = (dx * dx + dy * dy).sqrt() / sample_interval_ms;
    }
    let bias = median(&speed);
    for v in &mut speed {
        *v -= bias;
    }
    speed
}

/// Velocity differences smoothed by the 5-tap average, "valid" mode: the
/// result is 5 shorter than the velocity series and leads it accordingly.
fn smoothed_acceleration(vels: &[f64]) -> Vec<f64> {
    let diffs: Vec<f64> = vels.windows(2).map(|w| w[1] - w[0]).collect();
    convolve_valid(&diffs, &ACCEL_KERNEL)
}

/// First position in `candidates` at or after `from` that starts RUN_LEN
/// contiguous sample indices.
fn next_run(candidates: &[usize], from: usize) -> Option<usize> {
    let mut k = from;
    while k + RUN_LEN <= candidates.len() {
        let base = candidates[k];
        if (1..RUN_LEN).all(|j| candidates[k + j] == base + j) {
            return Some(k);
        }
        k += 1;
    }
    None
}

/// Advance a candidate-list position past every sample index below `floor`.
fn skip_candidates(candidates: &[usize], mut k: usize, floor: usize) -> usize {
    while k < candidates.len() && candidates[k] < floor {
        k += 1;
    }
    k
}

fn bracket(
    vels: &[f64],
    accel: &[f64],
    floor: usize,
    run_start: usize,
    run_end: usize,
    config: &DetectorConfig,
) -> Option<Bracket> {
    let onset = find_onset(vels, accel, floor, run_start, config)?;
    let deceleration = find_deceleration(accel, run_end, config)?;
    let offset = find_offset(vels, accel, deceleration, config)?;
    if offset <= run_end || offset >= vels.len() {
        return None;
    }
    Some(Bracket { onset, offset })
}

/// Latest still sample before the run, per criterion; the onset is the
/// earliest crossing among whichever criteria fired. The search is
/// restricted to the unsearched region since the last saccade.
fn find_onset(
    vels: &[f64],
    accel: &[f64],
    floor: usize,
    run_start: usize,
    config: &DetectorConfig,
) -> Option<usize> {
    let mut still_accel = None;
    let mut still_vel = None;
    let mut decel_tail = None;
    for i in floor..run_start.min(vels.len()) {
        if let Some(&a) = accel.get(i) {
            if a < config.acceleration_threshold {
                still_accel = Some(i);
            }
            // the settling tail of a previous movement also counts as still
            if a < -config.acceleration_threshold && vels[i] < config.velocity_peak_threshold {
                decel_tail = Some(i);
            }
        }
        if vels[i] <= config.velocity_threshold {
            still_vel = Some(i);
        }
    }
    [still_accel, still_vel, decel_tail]
        .into_iter()
        .flatten()
        .min()
}

/// First sample after the run end where the deceleration magnitude has
/// climbed back above the acceleration threshold.
fn find_deceleration(accel: &[f64], run_end: usize, config: &DetectorConfig) -> Option<usize> {
    (run_end + 1..accel.len()).find(|&i| accel[i] < -config.acceleration_threshold)
}

/// First post-deceleration sample where the movement has landed: the
/// acceleration back above -threshold, or the velocity at the floor —
/// the later of the two when both exist — corrected for the acceleration
/// smoothing lag.
fn find_offset(
    vels: &[f64],
    accel: &[f64],
    deceleration: usize,
    config: &DetectorConfig,
) -> Option<usize> {
    let accel_settled =
        (deceleration + 1..accel.len()).find(|&i| accel[i] > -config.acceleration_threshold);
    let vel_settled =
        (deceleration + 1..vels.len()).find(|&i| vels[i] <= config.offset_velocity_floor);
    let raw = match (accel_settled, vel_settled) {
        (Some(a), Some(v)) => a.max(v),
        (Some(a), None) => a,
        (None, Some(v)) => v,
        (None, None) => return None,
    };
    raw.checked_sub(config.smoothing_lag_samples)
}

/// Validate the bracketed movement and assemble the record; None when it is
/// too short or lands outside the accepted eccentricity annulus.
fn build_saccade(
    xs: &[f64],
    ys: &[f64],
    vels: &[f64],
    b: &Bracket,
    sample_interval_ms: f64,
    config: &DetectorConfig,
) -> Option<Saccade> {
    let dx = xs[b.offset] - xs[b.onset];
    let dy = ys[b.offset] - ys[b.onset];
    let vector_distance = (dx * dx + dy * dy).sqrt();
    let eccentricity = (xs[b.offset].powi(2) + ys[b.offset].powi(2)).sqrt();
    let (ecc_min, ecc_max) = config.annulus_deg;
    if vector_distance < config.min_length_deg
        || eccentricity <= ecc_min
        || eccentricity >= ecc_max
    {
        debug!(vector_distance, eccentricity, "candidate rejected");
        return None;
    }

    let raw_distance: f64 = (b.onset + 1..=b.offset)
        .map(|i| {
            let sx = xs[i] - xs[i - 1];
            let sy = ys[i] - ys[i - 1];
            (sx * sx + sy * sy).sqrt()
        })
        .sum();
    let v_max = vels[b.onset..=b.offset]
        .iter()
        .fold(f64::NEG_INFINITY, |m, &v| m.max(v));
    let duration_ms = (b.offset - b.onset) as f64 * sample_interval_ms;

    Some(Saccade {
        t_start: b.onset as f64 * sample_interval_ms,
        t_end: b.offset as f64 * sample_interval_ms,
        v_max,
        v_avg: vector_distance / duration_ms,
        x_start: xs[b.onset],
        y_start: ys[b.onset],
        x_end: xs[b.offset],
        y_end: ys[b.offset],
        raw_distance,
        vector_distance,
    })
}
