use serde::{Deserialize, Serialize};

/// One detected rapid eye movement within a trial window.
///
/// Times are in milliseconds relative to the start of the analyzed window
/// (normally fixation-off). Positions are in degrees, centered at the
/// fixation point when the caller requested re-centering. Immutable once
/// produced by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saccade {
    pub t_start: f64,
    pub t_end: f64,
    /// Peak de-biased velocity over the movement (deg/ms).
    pub v_max: f64,
    /// Vector distance over duration (deg/ms).
    pub v_avg: f64,
    pub x_start: f64,
    pub y_start: f64,
    pub x_end: f64,
    pub y_end: f64,
    /// Path length along the trace (deg).
    pub raw_distance: f64,
    /// Straight-line start-to-end distance (deg).
    pub vector_distance: f64,
}

impl Saccade {
    /// Terminal marker: the window was searched to its end and holds no
    /// further movement. Distinguishable from a real saccade by its
    /// non-finite `t_start`.
    pub fn sentinel() -> Self {
        Self {
            t_start: f64::NAN,
            t_end: f64::INFINITY,
            v_max: f64::NAN,
            v_avg: f64::NAN,
            x_start: f64::NAN,
            y_start: f64::NAN,
            x_end: f64::NAN,
            y_end: f64::NAN,
            raw_distance: f64::NAN,
            vector_distance: f64::NAN,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        !self.t_start.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_recognizable() {
        let s = Saccade::sentinel();
        assert!(s.is_sentinel());
        assert_eq!(s.t_end, f64::INFINITY);
    }
}
