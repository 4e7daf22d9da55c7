//! Simulated series for the predictor page.
//!
//! Nothing here reflects an employee's real history: the monthly trend and the
//! before/after-leave variants are random draws made for display only. The
//! generator is any [`rand::Rng`], so a seeded [`StdRng`] gives reproducible
//! pages.

use std::ops::RangeInclusive;

use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Number of simulated monthly points.
pub const TREND_MONTHS: u32 = 12;

/// Range of performance scores, shared by simulated draws and clamping.
pub const SCORE_RANGE: RangeInclusive<f64> = 1.0..=5.0;

/// Largest relative change applied to the predicted score when simulating
/// the before/after-leave variants.
pub const LEAVE_EFFECT: f64 = 0.10;

/// Random source for one request: seeded when a seed is configured,
/// otherwise drawn from OS entropy.
pub fn request_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ---------------------------------------------------------------------------
// Monthly trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: NaiveDate,
    pub score: f64,
}

/// Twelve monthly timestamps from the first day of `start`'s month, each
/// with an independent uniform score in [`SCORE_RANGE`]. Simulated.
pub fn simulate_trend<R: Rng + ?Sized>(start: NaiveDate, rng: &mut R) -> Vec<TrendPoint> {
    let first = NaiveDate::from_ymd_opt(start.year(), start.month(), 1).unwrap_or(start);
    (0..TREND_MONTHS)
        .filter_map(|i| first.checked_add_months(Months::new(i)))
        .map(|month| TrendPoint {
            month,
            score: rng.gen_range(SCORE_RANGE),
        })
        .collect()
}

/// Start of the twelve-month window ending with the month of `as_of`.
pub fn trend_start(as_of: NaiveDate) -> NaiveDate {
    as_of
        .checked_sub_months(Months::new(TREND_MONTHS - 1))
        .unwrap_or(as_of)
}

// ---------------------------------------------------------------------------
// Before / after leave
// ---------------------------------------------------------------------------

/// The model's score plus two simulated variants for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub score: f64,
    /// Up to [`LEAVE_EFFECT`] below the score.
    pub before_leave: f64,
    /// Up to [`LEAVE_EFFECT`] above the score.
    pub after_leave: f64,
}

/// Derive the simulated before/after-leave scores around `score`, both
/// clamped to [`SCORE_RANGE`].
pub fn simulate_leave_variants<R: Rng + ?Sized>(score: f64, rng: &mut R) -> PredictionResult {
    let dip = rng.gen_range(0.0..=LEAVE_EFFECT);
    let lift = rng.gen_range(0.0..=LEAVE_EFFECT);
    PredictionResult {
        score,
        before_leave: clamp_score(score * (1.0 - dip)),
        after_leave: clamp_score(score * (1.0 + lift)),
    }
}

pub fn clamp_score(v: f64) -> f64 {
    v.clamp(*SCORE_RANGE.start(), *SCORE_RANGE.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn trend_has_twelve_consecutive_months_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = simulate_trend(date(2023, 11, 17), &mut rng);

        assert_eq!(points.len(), 12);
        assert_eq!(points[0].month, date(2023, 11, 1));
        assert_eq!(points[1].month, date(2023, 12, 1));
        assert_eq!(points[2].month, date(2024, 1, 1));
        assert_eq!(points[11].month, date(2024, 10, 1));
        assert!(points.iter().all(|p| SCORE_RANGE.contains(&p.score)));
    }

    #[test]
    fn same_seed_same_trend() {
        let start = date(2024, 3, 1);
        let a = simulate_trend(start, &mut request_rng(Some(42)));
        let b = simulate_trend(start, &mut request_rng(Some(42)));
        let c = simulate_trend(start, &mut request_rng(Some(43)));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn window_ends_with_as_of_month() {
        assert_eq!(trend_start(date(2024, 10, 17)), date(2023, 11, 17));
        let points = simulate_trend(trend_start(date(2024, 10, 17)), &mut request_rng(Some(1)));
        assert_eq!(points.last().map(|p| p.month), Some(date(2024, 10, 1)));
    }

    #[test]
    fn leave_variants_bracket_the_score() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let r = simulate_leave_variants(3.0, &mut rng);
            assert_eq!(r.score, 3.0);
            assert!(r.before_leave <= 3.0 && r.before_leave >= 2.7 - 1e-12);
            assert!(r.after_leave >= 3.0 && r.after_leave <= 3.3 + 1e-12);
        }
        let top = simulate_leave_variants(5.0, &mut rng);
        assert_eq!(top.after_leave, 5.0);
    }
}
