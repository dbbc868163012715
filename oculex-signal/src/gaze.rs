/// Read-only access to a uniformly sampled, channel-addressed gaze signal.
///
/// The provider owns the samples for the trial's lifetime; detection only
/// reads. Implementations must not be mutated concurrently with a range
/// query for the same trial.
pub trait GazeSource {
    /// Samples per second, fixed for the session.
    fn sample_rate(&self) -> f64;

    /// Sample interval in milliseconds.
    fn sample_interval_ms(&self) -> f64 {
        1000.0 / self.sample_rate()
    }

    /// Value of `channel` at the sample nearest `t_ms`, or None when the
    /// timestamp falls outside the recorded session.
    fn value_at(&self, channel: usize, t_ms: f64) -> Option<f64>;

    /// Dense values of `channel` over the closed range [t0_ms, t1_ms].
    /// Empty when the range is inverted or entirely outside the session.
    fn range(&self, channel: usize, t0_ms: f64, t1_ms: f64) -> Vec<f64>;
}

/// In-memory gaze buffer: per-channel sample vectors starting at t = 0 ms.
#[derive(Debug, Clone)]
pub struct DenseGazeBuffer {
    sample_rate: f64,
    channels: Vec<Vec<f64>>,
}

impl DenseGazeBuffer {
    pub fn new(sample_rate: f64, channels: Vec<Vec<f64>>) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    pub fn channel_len(&self, channel: usize) -> usize {
        self.channels.get(channel).map_or(0, Vec::len)
    }

    fn index_of(&self, t_ms: f64) -> Option<usize> {
        if !t_ms.is_finite() || t_ms < 0.0 {
            return None;
        }
        Some((t_ms * self.sample_rate / 1000.0).round() as usize)
    }
}

impl GazeSource for DenseGazeBuffer {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn value_at(&self, channel: usize, t_ms: f64) -> Option<f64> {
        let samples = self.channels.get(channel)?;
        samples.get(self.index_of(t_ms)?).copied()
    }

    fn range(&self, channel: usize, t0_ms: f64, t1_ms: f64) -> Vec<f64> {
        let Some(samples) = self.channels.get(channel) else {
            return Vec::new();
        };
        let (Some(first), Some(last)) = (self.index_of(t0_ms), self.index_of(t1_ms)) else {
            return Vec::new();
        };
        if first > last || first >= samples.len() {
            return Vec::new();
        }
        let last = last.min(samples.len() - 1);
        samples[first..=last].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> DenseGazeBuffer {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys = vec![0.5; 10];
        DenseGazeBuffer::new(1000.0, vec![xs, ys])
    }

    #[test]
    fn point_lookup_maps_time_to_sample() {
        let b = buffer();
        assert_eq!(b.value_at(0, 0.0), Some(0.0));
        assert_eq!(b.value_at(0, 3.0), Some(3.0));
        assert_eq!(b.value_at(1, 3.0), Some(0.5));
        assert_eq!(b.value_at(0, 99.0), None);
        assert_eq!(b.value_at(2, 0.0), None);
    }

    #[test]
    fn range_is_closed_and_clamped() {
        let b = buffer();
        assert_eq!(b.range(0, 2.0, 5.0), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(b.range(0, 8.0, 20.0), vec![8.0, 9.0]);
        assert!(b.range(0, 5.0, 2.0).is_empty());
        assert!(b.range(0, -5.0, 2.0).is_empty());
    }
}
