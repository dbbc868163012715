use serde::{Deserialize, Serialize};

/// Tunables for the saccade detector.
///
/// Velocities are deg/ms and accelerations deg/ms^2, matching a gaze signal
/// calibrated in degrees and sampled on a millisecond clock. The annulus and
/// cutoff defaults encode the rig geometry they were tuned on; override them
/// rather than editing the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// De-biased velocity at or above which a sample is a peak candidate.
    pub velocity_peak_threshold: f64,
    /// Velocity at or below which the eye counts as still.
    pub velocity_threshold: f64,
    /// Acceleration magnitude separating drift from ballistic motion.
    pub acceleration_threshold: f64,
    /// De-biased velocity at or below which a movement has landed.
    pub offset_velocity_floor: f64,
    /// Shortest accepted movement (deg).
    pub min_length_deg: f64,
    /// Upper bound on saccades extracted per window.
    pub max_saccades: usize,
    /// Accepted end-point eccentricity range, exclusive bounds (deg).
    pub annulus_deg: (f64, f64),
    /// Window-exhausted cutoff for appending the terminal marker (ms).
    pub sentinel_cutoff_ms: f64,
    /// Offset correction for the acceleration smoothing lag (samples).
    pub smoothing_lag_samples: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            velocity_peak_threshold: 0.08, // 80 deg/s
            velocity_threshold: 0.01,
            acceleration_threshold: 0.01,
            offset_velocity_floor: 0.005,
            min_length_deg: 3.0,
            max_saccades: 6,
            annulus_deg: (5.0, 18.0),
            sentinel_cutoff_ms: 500.0,
            smoothing_lag_samples: 5,
        }
    }
}
