//! Windowed kernel convolution with edge-replication padding.

/// Extends `signal` by `half` copies of its first and last values.
///
/// Windowed filters read from the padded array so that every output index
/// sees a full window, and windows near the boundary lean toward the
/// boundary value instead of toward zero.
pub fn edge_pad(signal: &[f64], half: usize) -> Vec<f64> {
    let (Some(&first), Some(&last)) = (signal.first(), signal.last()) else {
        return Vec::new();
    };
    let mut padded = Vec::with_capacity(signal.len() + 2 * half);
    padded.extend(std::iter::repeat_n(first, half));
    padded.extend_from_slice(signal);
    padded.extend(std::iter::repeat_n(last, half));
    padded
}

/// Uniform kernel of `window` taps, each `1 / window`.
pub fn moving_average_kernel(window: usize) -> Vec<f64> {
    vec![1.0 / window as f64; window]
}

/// Gaussian density sampled at `window` evenly spaced points over
/// `[-3σ, 3σ]`, normalized to sum to 1.
pub fn gaussian_kernel(window: usize, sigma: f64) -> Vec<f64> {
    let span = 6.0 * sigma;
    let step = span / (window.saturating_sub(1)).max(1) as f64;
    let mut kernel: Vec<f64> = (0..window)
        .map(|i| {
            let x = -3.0 * sigma + i as f64 * step;
            (-0.5 * (x / sigma).powi(2)).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for tap in kernel.iter_mut() {
        *tap /= sum;
    }
    kernel
}

/// Convolves `signal` with an odd-length, symmetric `kernel` over an
/// edge-padded copy, returning an array of the same length as `signal`.
pub fn convolve_edge(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let padded = edge_pad(signal, kernel.len() / 2);
    padded
        .windows(kernel.len())
        .take(signal.len())
        .map(|window| window.iter().zip(kernel).map(|(x, k)| x * k).sum())
        .collect()
}
