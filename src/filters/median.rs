//! Order-statistic (median) filtering.

use super::kernel::edge_pad;

/// Replaces each sample with the median of the edge-replicated window of
/// `window` samples centered on it.
///
/// `window` is expected to be odd, so the median is always an actual
/// sample value. Spikes narrower than half the window are removed while
/// step edges are kept sharp.
pub fn median_filter(signal: &[f64], window: usize) -> Vec<f64> {
    let padded = edge_pad(signal, window / 2);
    let mid = window / 2;
    let mut scratch = vec![0.0; window];

    padded
        .windows(window)
        .take(signal.len())
        .map(|w| {
            scratch.copy_from_slice(w);
            let (_, median, _) = scratch.select_nth_unstable_by(mid, f64::total_cmp);
            *median
        })
        .collect()
}
