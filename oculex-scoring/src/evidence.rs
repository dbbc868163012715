use oculex_core::{log10, TargetId};

/// Task variant by numeric id from the rig's event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Memory-guided saccade to a single target.
    MemorySaccade,
    /// Adaptive oculomotor decision: two targets, cue-driven evidence.
    AdaptiveOdr,
    Unknown,
}

impl TaskKind {
    pub fn from_id(task_id: i64) -> Self {
        match task_id {
            1 => TaskKind::MemorySaccade,
            2..=5 => TaskKind::AdaptiveOdr,
            _ => TaskKind::Unknown,
        }
    }
}

/// Cue placement probability by distance bucket, P1 (farthest from the
/// correct target) through P9 (closest), from the rig's task-info menu.
const CICERO_PS: [f64; 9] = [0.0, 0.05, 0.10, 0.10, 0.15, 0.15, 0.20, 0.15, 0.10];
const MRM_PS: [f64; 9] = [0.0, 0.0, 0.0, 0.10, 0.15, 0.30, 0.15, 0.15, 0.15];

fn probability_table(subject_id: &str) -> &'static [f64; 9] {
    if subject_id == "Cicero" {
        &CICERO_PS
    } else {
        // "MrM"
        &MRM_PS
    }
}

/// Cue-derived evidence for one two-alternative trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evidence {
    pub correct_target: TargetId,
    /// Signed identity bucket, -4..=4; negative close to T1, positive
    /// close to T2.
    pub sample_id: i64,
    /// log10 likelihood ratio; - favors T1, + favors T2. Zero-probability
    /// buckets yield an infinite value of the correct sign.
    pub llr: f64,
}

/// Decode the trial's numeric identifier into correct target, identity
/// bucket, and LLR. Identifiers carry the task id times 100; the local
/// remainder indexes 0..=8 for T1-correct trials and 9..=17 for T2.
pub fn compute(trial_id: i64, task_id: i64, subject_id: &str) -> Evidence {
    let ps = probability_table(subject_id);
    let local = trial_id - 100 * task_id;
    let llr_id = local.rem_euclid(9) as usize;
    if local < 9 {
        Evidence {
            correct_target: TargetId::T1,
            sample_id: llr_id as i64 - 4,
            llr: log10(ps[llr_id]) - log10(ps[8 - llr_id]),
        }
    } else {
        Evidence {
            correct_target: TargetId::T2,
            sample_id: -(llr_id as i64 - 4),
            llr: log10(ps[8 - llr_id]) - log10(ps[llr_id]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_ids_map_to_variants() {
        assert_eq!(TaskKind::from_id(1), TaskKind::MemorySaccade);
        for id in 2..=5 {
            assert_eq!(TaskKind::from_id(id), TaskKind::AdaptiveOdr);
        }
        assert_eq!(TaskKind::from_id(0), TaskKind::Unknown);
        assert_eq!(TaskKind::from_id(6), TaskKind::Unknown);
    }

    #[test]
    fn low_local_ids_favor_t1_high_favor_t2() {
        let low = compute(204, 2, "Cicero");
        assert_eq!(low.correct_target, TargetId::T1);
        assert_eq!(low.sample_id, 0);
        let high = compute(213, 2, "Cicero");
        assert_eq!(high.correct_target, TargetId::T2);
        assert_eq!(high.sample_id, 0);
    }

    #[test]
    fn mirror_buckets_give_opposite_llr() {
        let a = compute(202, 2, "Cicero"); // llr_id 2
        let b = compute(206, 2, "Cicero"); // llr_id 6, the mirror
        assert!((a.llr + b.llr).abs() < 1e-12);
    }

    #[test]
    fn zero_probability_bucket_gives_infinite_llr_with_sign() {
        let e = compute(200, 2, "Cicero"); // llr_id 0, ps[0] == 0.0
        assert_eq!(e.llr, f64::NEG_INFINITY);
        let e = compute(208, 2, "Cicero"); // llr_id 8, mirror bucket is 0.0
        assert_eq!(e.llr, f64::INFINITY);
    }

    #[test]
    fn unknown_subject_falls_back_to_the_mrm_table() {
        // ps[2] == 0.0 only in the MrM table
        let e = compute(202, 2, "somebody-else");
        assert_eq!(e.llr, f64::NEG_INFINITY);
        let e = compute(202, 2, "Cicero");
        assert!(e.llr.is_finite());
    }

    #[test]
    fn sample_ids_span_the_signed_bucket_range() {
        assert_eq!(compute(200, 2, "Cicero").sample_id, -4);
        assert_eq!(compute(208, 2, "Cicero").sample_id, 4);
        assert_eq!(compute(209, 2, "Cicero").sample_id, 4);
        assert_eq!(compute(217, 2, "Cicero").sample_id, -4);
    }
}
