//! Fixed-window signal helpers used by the detectors.
//!
//! All of these are single-pass or small-bounded-window computations over a
//! lap's few hundred to few thousand samples; no statistics crate is needed.

use std::collections::BTreeMap;
use std::ops::Range;

/// Trailing-window sample standard deviation.
///
/// At index `i` the window covers the up-to-`window` samples ending at `i`.
/// Positions where the window holds fewer than 2 samples yield 0.0.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        if slice.len() < 2 {
            out.push(0.0);
            continue;
        }
        let n = slice.len() as f64;
        let mean = slice.iter().sum::<f64>() / n;
        let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        out.push(variance.sqrt());
    }
    out
}

/// Per-sample backward difference: `v[i] - v[i-1]`, with 0.0 at index 0.
pub fn backward_diff(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i == 0 {
            out.push(0.0);
        } else {
            out.push(values[i] - values[i - 1]);
        }
    }
    out
}

/// Maximal contiguous runs where *mask* is true.
///
/// Single linear scan: a run opens on a false→true transition and is
/// emitted on the next true→false transition or at sequence end.
pub fn contiguous_true_runs(mask: &[bool]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, &flag) in mask.iter().enumerate() {
        match (flag, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                runs.push(start..i);
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        runs.push(start..mask.len());
    }
    runs
}

/// Most frequent value; ties resolve to the smallest value.
pub fn mode(values: &[i32]) -> Option<i32> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut best: Option<(i32, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

/// Round *value* to *decimals* decimal places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
