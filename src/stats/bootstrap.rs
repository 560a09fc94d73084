//! Percentile bootstrap for a difference of means.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::AnalysisError;
use super::percentiles::percentile_of_sorted;
use super::summary::mean;
use super::{DEFAULT_BOOTSTRAP_ITERATIONS, DEFAULT_BOOTSTRAP_SEED, DEFAULT_CONFIDENCE_LEVEL};

/// Bootstrap configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    /// Number of resampling iterations (default: 10,000)
    pub iterations: usize,
    /// Confidence level (default: 0.95 for a 95% CI)
    pub confidence_level: f64,
    /// Seed of the resampling RNG
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_BOOTSTRAP_ITERATIONS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: DEFAULT_BOOTSTRAP_SEED,
        }
    }
}

/// Result of bootstrapping `mean(treatment) - mean(baseline)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// One resampled difference per iteration, in generation order.
    pub differences: Vec<f64>,
    pub ci_low: f64,
    pub ci_high: f64,
    /// Fraction of resampled differences `<= 0`.
    pub p_value: f64,
    /// Difference of the observed sample means.
    pub observed_difference: f64,
    /// Standard deviation of `differences`.
    pub standard_error: f64,
    pub confidence_level: f64,
    pub seed: u64,
}

/// Bootstrap the difference of means between `treatment` and `baseline`.
///
/// Every iteration resamples `baseline` and then `treatment` with replacement,
/// each to its own size, from a single RNG seeded with `config.seed`; the same
/// inputs and seed always give the same differences.
pub fn bootstrap_mean_difference(
    baseline: &[f64],
    treatment: &[f64],
    config: &BootstrapConfig,
) -> Result<BootstrapResult, AnalysisError> {
    if baseline.is_empty() {
        return Err(AnalysisError::TooFewObservations {
            group: "baseline",
            got: 0,
        });
    }
    if treatment.is_empty() {
        return Err(AnalysisError::TooFewObservations {
            group: "treatment",
            got: 0,
        });
    }
    if config.iterations == 0 {
        return Err(AnalysisError::NoIterations);
    }
    if !(config.confidence_level > 0.0 && config.confidence_level < 1.0) {
        return Err(AnalysisError::InvalidConfidence(config.confidence_level));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let differences: Vec<f64> = (0..config.iterations)
        .map(|_| {
            let baseline_mean = resampled_mean(baseline, &mut rng);
            let treatment_mean = resampled_mean(treatment, &mut rng);
            treatment_mean - baseline_mean
        })
        .collect();

    let mut sorted = differences.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let tail = (1.0 - config.confidence_level) / 2.0 * 100.0;
    let ci_low = percentile_of_sorted(&sorted, tail);
    let ci_high = percentile_of_sorted(&sorted, 100.0 - tail);

    let at_or_below_zero = differences.iter().filter(|&&d| d <= 0.0).count();
    let p_value = at_or_below_zero as f64 / differences.len() as f64;

    let center = mean(&differences);
    let standard_error = (differences
        .iter()
        .map(|d| (d - center).powi(2))
        .sum::<f64>()
        / differences.len() as f64)
        .sqrt();

    log::debug!(
        "bootstrap: {} iterations, seed {}, CI [{ci_low:.3}, {ci_high:.3}]",
        config.iterations,
        config.seed
    );

    Ok(BootstrapResult {
        differences,
        ci_low,
        ci_high,
        p_value,
        observed_difference: mean(treatment) - mean(baseline),
        standard_error,
        confidence_level: config.confidence_level,
        seed: config.seed,
    })
}

fn resampled_mean(samples: &[f64], rng: &mut StdRng) -> f64 {
    let n = samples.len();
    let sum: f64 = (0..n).map(|_| samples[rng.gen_range(0..n)]).sum();
    sum / n as f64
}
