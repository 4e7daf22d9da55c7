//! Small numeric helpers behind the charts: Pearson correlation ranking,
//! quartiles, least-squares fits and histogram binning.

use serde::Serialize;
use thiserror::Error;

use super::model::EmployeeTable;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    /// The column is absent from the table or holds non-numeric values.
    #[error("missing column: '{0}' is absent or not numeric")]
    MissingColumn(String),
}

/// Pearson correlation coefficient of paired observations.
///
/// `None` when there are fewer than two pairs, either side has zero
/// variance, or a non-finite observation leaves the coefficient undefined.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
// Correlation ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationEntry {
    pub column: String,
    pub correlation: f64,
}

/// Rank every numeric column (other than `target`) by the absolute value of
/// its Pearson correlation with `target`, strongest first, and keep the top
/// `n`.
///
/// Correlations use pairwise-complete rows. Columns whose correlation is
/// undefined (constant or fewer than two shared rows) are not candidates.
/// Ties keep the column order of the source file.
pub fn rank_correlations(
    table: &EmployeeTable,
    target: &str,
    n: usize,
) -> Result<Vec<CorrelationEntry>, StatsError> {
    if !table.is_numeric_column(target) {
        return Err(StatsError::MissingColumn(target.to_string()));
    }

    let mut ranked: Vec<CorrelationEntry> = table
        .numeric_column_names()
        .into_iter()
        .filter(|col| *col != target)
        .filter_map(|col| {
            let pairs = table.numeric_pairs(col, target)?;
            let r = pearson(&pairs)?;
            Some(CorrelationEntry {
                column: col.to_string(),
                correlation: r,
            })
        })
        .collect();

    // Stable sort keeps source order among equal magnitudes.
    ranked.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    ranked.truncate(n);
    Ok(ranked)
}

// ---------------------------------------------------------------------------
// Quartiles
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey whiskers, as drawn by a box plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest observation within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
}

/// Quantile of sorted data with linear interpolation between closest ranks.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile_sorted(&sorted, 0.25);
    let median = quantile_sorted(&sorted, 0.5);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;

    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|v| *v >= lo_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= hi_fence)
        .unwrap_or(q3);

    Some(BoxSummary {
        q1,
        median,
        q3,
        lower_whisker,
        upper_whisker,
    })
}

/// Group `(key, value)` pairs by key, keys ascending.
pub fn group_by_key(pairs: &[(f64, f64)]) -> Vec<(f64, Vec<f64>)> {
    let mut sorted = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups: Vec<(f64, Vec<f64>)> = Vec::new();
    for (key, value) in sorted {
        match groups.last_mut() {
            Some((k, vals)) if *k == key => vals.push(value),
            _ => groups.push((key, vec![value])),
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// Least squares
// ---------------------------------------------------------------------------

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares fit of y on x. `None` with fewer than two points or
/// when every x is identical.
pub fn linear_fit(pairs: &[(f64, f64)]) -> Option<LinearFit> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = pairs.iter().map(|p| (p.0 - mx).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = pairs.iter().map(|p| (p.0 - mx) * (p.1 - my)).sum();
    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: my - slope * mx,
    })
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram over `[min, max]`; the last bin is closed on the
/// right so the maximum is counted. A constant sample yields one unit-wide
/// bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (min, max) = min_max(&finite);
    if min == max {
        return vec![Bin {
            start: min - 0.5,
            end: max + 0.5,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Minimum and maximum of a non-empty slice.
pub fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Axis range covering `values` with a 5% margin; `0..1` when empty.
pub fn padded_range(values: &[f64]) -> std::ops::Range<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return 0.0..1.0;
    }
    let (lo, hi) = min_max(&finite);
    let span = hi - lo;
    let pad = if span == 0.0 { 0.5_f64.max(lo.abs() * 0.05) } else { span * 0.05 };
    (lo - pad)..(hi + pad)
}
