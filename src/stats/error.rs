use thiserror::Error;

/// Errors that stop the analysis of a currency.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error(
        "Not enough data for {currency}: junior cohort has {junior}, senior cohort has {senior}, need at least {min} each"
    )]
    InsufficientSample {
        currency: String,
        junior: usize,
        senior: usize,
        min: usize,
    },

    #[error("The {group} sample has {got} observations, need at least 2")]
    TooFewObservations { group: &'static str, got: usize },

    #[error("Both samples have zero variance; the t statistic is undefined")]
    ZeroVariance,

    #[error("Invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidence(f64),

    #[error("Bootstrap needs at least one iteration")]
    NoIterations,
}
