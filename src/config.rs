use std::path::PathBuf;

use clap::Parser;

use crate::stats::bootstrap::BootstrapConfig;
use crate::stats::{DEFAULT_BOOTSTRAP_ITERATIONS, DEFAULT_BOOTSTRAP_SEED, DEFAULT_CONFIDENCE_LEVEL};

/// Default currency analysed when none is requested.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Cohort split: experience at or below this many years is "junior".
pub const DEFAULT_EXPERIENCE_THRESHOLD: f64 = 5.0;

/// Minimum observations per cohort before any test is run.
pub const DEFAULT_MIN_COHORT_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Analysis parameters
// ---------------------------------------------------------------------------

/// Parameters of one salary-gap analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub currency: String,
    pub experience_threshold: f64,
    pub min_cohort_size: usize,
    pub bootstrap: BootstrapConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            experience_threshold: DEFAULT_EXPERIENCE_THRESHOLD,
            min_cohort_size: DEFAULT_MIN_COHORT_SIZE,
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Same parameters, different currency.
    pub fn for_currency(&self, currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "salary-gap")]
#[command(about = "Compare salaries of junior and senior survey respondents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Survey file (.csv, .json, .parquet)
    #[arg(default_value = "DATA.csv")]
    pub input: PathBuf,

    /// Currencies to analyze
    #[arg(short, long = "currency", default_value = DEFAULT_CURRENCY)]
    pub currencies: Vec<String>,

    /// Years of experience separating the cohorts (inclusive on the junior side)
    #[arg(long, default_value_t = DEFAULT_EXPERIENCE_THRESHOLD)]
    pub threshold: f64,

    /// Minimum observations per cohort
    #[arg(long, default_value_t = DEFAULT_MIN_COHORT_SIZE)]
    pub min_cohort: usize,

    /// Bootstrap iterations
    #[arg(short = 'n', long, default_value_t = DEFAULT_BOOTSTRAP_ITERATIONS)]
    pub iterations: usize,

    /// Bootstrap RNG seed
    #[arg(long, default_value_t = DEFAULT_BOOTSTRAP_SEED)]
    pub seed: u64,

    /// Confidence level of the bootstrap interval
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE_LEVEL, value_parser = parse_confidence)]
    pub confidence: f64,

    /// Print the report without opening the plot window
    #[arg(long)]
    pub no_gui: bool,
}

impl Cli {
    /// One analysis config per requested currency, duplicates removed.
    pub fn analysis_configs(&self) -> Vec<AnalysisConfig> {
        let base = AnalysisConfig {
            currency: String::new(),
            experience_threshold: self.threshold,
            min_cohort_size: self.min_cohort,
            bootstrap: BootstrapConfig {
                iterations: self.iterations,
                confidence_level: self.confidence,
                seed: self.seed,
            },
        };

        let mut seen: Vec<&str> = Vec::new();
        self.currencies
            .iter()
            .filter(|c| {
                if seen.contains(&c.as_str()) {
                    false
                } else {
                    seen.push(c.as_str());
                    true
                }
            })
            .map(|c| base.for_currency(c))
            .collect()
    }
}

fn parse_confidence(s: &str) -> Result<f64, String> {
    let level: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if level > 0.0 && level < 1.0 {
        Ok(level)
    } else {
        Err(format!("{level} is not between 0 and 1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_analysis_defaults() {
        let cli = Cli::parse_from(["salary-gap"]);
        assert_eq!(cli.input, PathBuf::from("DATA.csv"));
        assert!(!cli.no_gui);
        assert_eq!(cli.analysis_configs(), vec![AnalysisConfig::default()]);
    }

    #[test]
    fn test_multiple_currencies() {
        let cli = Cli::parse_from([
            "salary-gap",
            "survey.parquet",
            "-c",
            "USD",
            "--currency",
            "GBP",
            "-c",
            "USD",
            "--seed",
            "9",
            "-n",
            "500",
            "--no-gui",
        ]);

        let configs = cli.analysis_configs();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].currency, "USD");
        assert_eq!(configs[1].currency, "GBP");
        assert_eq!(configs[1].bootstrap.seed, 9);
        assert_eq!(configs[1].bootstrap.iterations, 500);
        assert!(cli.no_gui);
    }

    #[test]
    fn test_confidence_must_be_a_probability() {
        assert!(Cli::try_parse_from(["salary-gap", "--confidence", "1.2"]).is_err());
        assert!(Cli::try_parse_from(["salary-gap", "--confidence", "0.9"]).is_ok());
    }
}
