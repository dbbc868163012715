/// 9-tap symmetric low-pass kernel applied to each position channel.
/// Weights sum to 1.0, so flat segments pass through unchanged.
pub(crate) const POSITION_KERNEL: [f64; 9] = [
    0.0033, 0.0238, 0.0971, 0.2259, 0.2998, 0.2259, 0.0971, 0.0238, 0.0033,
];

/// 5-tap uniform moving average applied to the velocity differences.
pub(crate) const ACCEL_KERNEL: [f64; 5] = [0.2; 5];

/// "Same"-mode convolution: output length equals the signal length, edge
/// samples use whatever part of the kernel overlaps the signal.
pub(crate) fn convolve_same(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let half = kernel.len() / 2;
    (0..signal.len())
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .filter_map(|(j, &k)| {
                    let idx = (i + half).checked_sub(j)?;
                    signal.get(idx).map(|&s| s * k)
                })
                .sum()
        })
        .collect()
}

/// "Valid"-mode convolution: output only where the kernel fully overlaps,
/// length = signal - kernel + 1.
pub(crate) fn convolve_valid(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let k = kernel.len();
    if signal.len() < k {
        return Vec::new();
    }
    (0..=signal.len() - k)
        .map(|i| (0..k).map(|j| signal[i + j] * kernel[k - 1 - j]).sum())
        .collect()
}

pub(crate) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_kernel_has_unit_gain() {
        let sum: f64 = POSITION_KERNEL.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn same_convolution_preserves_length_and_flat_interior() {
        let signal = vec![2.0; 32];
        let out = convolve_same(&signal, &POSITION_KERNEL);
        assert_eq!(out.len(), signal.len());
        // interior samples see the full kernel
        for &v in &out[4..28] {
            assert!((v - 2.0).abs() < 1e-9);
        }
        // edges only see a partial kernel
        assert!(out[0] < 2.0);
    }

    #[test]
    fn valid_convolution_shortens_by_kernel_minus_one() {
        let signal: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let out = convolve_valid(&signal, &ACCEL_KERNEL);
        assert_eq!(out.len(), signal.len() - ACCEL_KERNEL.len() + 1);
        // moving average of a linear ramp is the window center
        assert!((out[0] - 2.0).abs() < 1e-9);
        assert!((out[5] - 7.0).abs() < 1e-9);
    }

    #[test]
    fn median_of_odd_even_and_empty() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }
}
