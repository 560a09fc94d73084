/// One equal-width histogram bin covering `[start, end)`; the last bin also
/// includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Bin `values` into `bins` equal-width bins spanning their range.
///
/// Non-finite values are skipped. All-equal input gives a single unit-width
/// bin centred on the value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    match finite_range(values) {
        Some((min, max)) => histogram_in_range(values, bins, min, max),
        None => Vec::new(),
    }
}

/// Bin `values` into `bins` equal-width bins spanning `[min, max]`, so that
/// several series can share bin edges. Values outside the range are skipped.
pub fn histogram_in_range(values: &[f64], bins: usize, min: f64, max: f64) -> Vec<HistogramBin> {
    let inside = |v: f64| v.is_finite() && v >= min && v <= max;
    if bins == 0 || min.is_nan() || max.is_nan() || min > max {
        return Vec::new();
    }

    let range = max - min;
    if range.abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: values.iter().filter(|v| inside(**v)).count(),
        }];
    }

    let width = range / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values.iter().filter(|v| inside(**v)) {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

/// `(min, max)` over the finite values, None if there are none.
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_cover_all_values() {
        let values: Vec<f64> = (0..100).map(|x| x as f64).collect();
        let bins = histogram(&values, 10);

        assert_eq!(bins.len(), 10);
        assert!(bins.iter().all(|b| b.count == 10));
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[9].end, 99.0);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let bins = histogram(&[0.0, 1.0, 2.0, 4.0], 2);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[1].count, 2);
        assert!((bins[1].center() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_values() {
        let bins = histogram(&[3.0, 3.0, 3.0], 50);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[0].width(), 1.0);
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert!(histogram(&[], 5).is_empty());
        assert!(histogram(&[f64::NAN], 5).is_empty());
        assert_eq!(histogram(&[1.0, f64::NAN, 2.0], 1)[0].count, 2);
    }

    #[test]
    fn test_shared_range_skips_outside_values() {
        let bins = histogram_in_range(&[-1.0, 0.0, 5.0, 10.0, 11.0], 2, 0.0, 10.0);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(finite_range(&[3.0, f64::NAN, -2.0]), Some((-2.0, 3.0)));
        assert_eq!(finite_range(&[]), None);
    }
}
