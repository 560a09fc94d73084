/// Statistical core: descriptive statistics, Welch t-test, bootstrap.
///
/// ```text
///   Cohorts (junior, senior salaries)
///        │
///        ├──► summary     n / mean / median / std / quartiles
///        ├──► welch       one-sided t-test, senior > junior
///        └──► bootstrap   seeded resampling → CI, p-value
///                │
///                ▼
///           analysis::GapAnalysis
/// ```

pub mod analysis;
pub mod bootstrap;
pub mod error;
pub mod histogram;
pub mod percentiles;
pub mod summary;
pub mod welch;

/// Default number of bootstrap iterations
pub const DEFAULT_BOOTSTRAP_ITERATIONS: usize = 10_000;

/// Default confidence level (95%)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default seed of the bootstrap RNG
pub const DEFAULT_BOOTSTRAP_SEED: u64 = 123;
