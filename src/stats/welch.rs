//! Welch's unequal-variance two-sample t-test.

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::error::AnalysisError;
use super::summary::{mean, sample_variance};

/// Alternative hypothesis about `mean(a) - mean(b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alternative {
    /// `mean(a) > mean(b)`
    #[default]
    Greater,
    /// `mean(a) < mean(b)`
    Less,
    TwoSided,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WelchTest {
    pub t_statistic: f64,
    /// Welch–Satterthwaite degrees of freedom.
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    /// `mean(a) - mean(b)`
    pub mean_difference: f64,
    pub alternative: Alternative,
}

/// Test whether `a` and `b` have different means without assuming equal
/// variances. Each sample needs at least two observations.
pub fn welch_t_test(
    a: &[f64],
    b: &[f64],
    alternative: Alternative,
) -> Result<WelchTest, AnalysisError> {
    if a.len() < 2 {
        return Err(AnalysisError::TooFewObservations {
            group: "first",
            got: a.len(),
        });
    }
    if b.len() < 2 {
        return Err(AnalysisError::TooFewObservations {
            group: "second",
            got: b.len(),
        });
    }

    let (mean_a, mean_b) = (mean(a), mean(b));
    let se_a = sample_variance(a, mean_a) / a.len() as f64;
    let se_b = sample_variance(b, mean_b) / b.len() as f64;
    let se_sum = se_a + se_b;
    if se_sum <= 0.0 {
        return Err(AnalysisError::ZeroVariance);
    }

    let mean_difference = mean_a - mean_b;
    let t_statistic = mean_difference / se_sum.sqrt();
    let denominator = se_a.powi(2) / (a.len() - 1) as f64 + se_b.powi(2) / (b.len() - 1) as f64;
    let degrees_of_freedom = se_sum.powi(2) / denominator;

    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|_| AnalysisError::ZeroVariance)?;
    let p_value = match alternative {
        Alternative::Greater => dist.sf(t_statistic),
        Alternative::Less => dist.cdf(t_statistic),
        Alternative::TwoSided => 2.0 * dist.sf(t_statistic.abs()),
    }
    .clamp(0.0, 1.0);

    Ok(WelchTest {
        t_statistic,
        degrees_of_freedom,
        p_value,
        mean_difference,
        alternative,
    })
}
