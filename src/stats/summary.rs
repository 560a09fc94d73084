//! Descriptive statistics for one cohort.

use super::percentiles::percentile_of_sorted;

/// Per-cohort summary: the table printed in the report plus the five
/// numbers the box plot needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 divisor), `NaN` when `count < 2`.
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summarise a sample; all statistics are `NaN` for an empty slice.
pub fn compute_summary(samples: &[f64]) -> CohortSummary {
    let count = samples.len();
    if count == 0 {
        return CohortSummary {
            count,
            mean: f64::NAN,
            median: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            q1: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mean = mean(samples);
    let std_dev = sample_variance(samples, mean).sqrt();

    CohortSummary {
        count,
        mean,
        median: percentile_of_sorted(&sorted, 50.0),
        std_dev,
        min: sorted[0],
        q1: percentile_of_sorted(&sorted, 25.0),
        q3: percentile_of_sorted(&sorted, 75.0),
        max: sorted[count - 1],
    }
}

/// Box plot whiskers at the most extreme observations within 1.5 × IQR of
/// the quartiles. Observations past them are outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct Whiskers {
    pub low: f64,
    pub high: f64,
    /// Observations outside `[low, high]`, in input order.
    pub outliers: Vec<f64>,
}

pub fn box_whiskers(samples: &[f64], q1: f64, q3: f64) -> Whiskers {
    let iqr = q3 - q1;
    let (fence_low, fence_high) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside = || samples.iter().copied().filter(|v| (fence_low..=fence_high).contains(v));
    let low = inside().fold(f64::INFINITY, f64::min);
    let high = inside().fold(f64::NEG_INFINITY, f64::max);
    if low > high {
        return Whiskers {
            low: f64::NAN,
            high: f64::NAN,
            outliers: samples.to_vec(),
        };
    }

    Whiskers {
        low,
        high,
        outliers: samples
            .iter()
            .copied()
            .filter(|v| *v < low || *v > high)
            .collect(),
    }
}

/// Arithmetic mean, `NaN` for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Unbiased variance around a precomputed `mean`, `NaN` below two samples.
pub fn sample_variance(samples: &[f64], mean: f64) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }
    samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_junior_example() {
        let junior = vec![100.0, 120.0, 90.0, 95.0, 99.0];
        let s = compute_summary(&junior);

        assert_eq!(s.count, 5);
        assert!((s.mean - 100.8).abs() < 1e-9);
        assert!((s.median - 99.0).abs() < 1e-9);
        assert!((s.std_dev - 130.7_f64.sqrt()).abs() < 1e-9);
        assert_eq!(s.min, 90.0);
        assert_eq!(s.q1, 95.0);
        assert_eq!(s.q3, 100.0);
        assert_eq!(s.max, 120.0);
    }

    #[test]
    fn test_single_sample_has_undefined_std() {
        let s = compute_summary(&[7.0]);
        assert_eq!(s.mean, 7.0);
        assert_eq!(s.median, 7.0);
        assert!(s.std_dev.is_nan());
    }

    #[test]
    fn test_whiskers_stop_at_fences() {
        let junior = [100.0, 120.0, 90.0, 95.0, 99.0];
        let s = compute_summary(&junior);
        let w = box_whiskers(&junior, s.q1, s.q3);

        // IQR = 5, fences at 87.5 and 107.5.
        assert_eq!(w.low, 90.0);
        assert_eq!(w.high, 100.0);
        assert_eq!(w.outliers, vec![120.0]);
    }

    #[test]
    fn test_whiskers_without_outliers_reach_extremes() {
        let senior = [200.0, 210.0, 205.0, 215.0, 205.0];
        let s = compute_summary(&senior);
        let w = box_whiskers(&senior, s.q1, s.q3);

        assert_eq!(w.low, s.min);
        assert_eq!(w.high, s.max);
        assert!(w.outliers.is_empty());
    }

    #[test]
    fn test_empty_summary() {
        let s = compute_summary(&[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
    }
}
