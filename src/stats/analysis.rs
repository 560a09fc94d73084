use crate::config::AnalysisConfig;
use crate::data::filter::{CleaningStats, Cohorts, clean_for_currency, split_cohorts};
use crate::data::model::{Cohort, SurveyRecord};

use super::bootstrap::{BootstrapResult, bootstrap_mean_difference};
use super::error::AnalysisError;
use super::summary::{CohortSummary, compute_summary};
use super::welch::{Alternative, WelchTest, welch_t_test};

/// Everything computed for one currency.
#[derive(Debug, Clone, PartialEq)]
pub struct GapAnalysis {
    pub currency: String,
    pub experience_threshold: f64,
    pub cleaning: CleaningStats,
    pub cohorts: Cohorts,
    pub junior: CohortSummary,
    pub senior: CohortSummary,
    /// Senior vs junior, alternative: senior mean is greater.
    pub welch: WelchTest,
    pub bootstrap: BootstrapResult,
}

impl GapAnalysis {
    pub fn summary(&self, cohort: Cohort) -> &CohortSummary {
        match cohort {
            Cohort::Junior => &self.junior,
            Cohort::Senior => &self.senior,
        }
    }
}

/// Filter → group → test → bootstrap for `config.currency`.
///
/// Fails with [`AnalysisError::InsufficientSample`] before any statistic is
/// computed when either cohort is smaller than `config.min_cohort_size`.
pub fn analyze_salary_gap(
    records: &[SurveyRecord],
    config: &AnalysisConfig,
) -> Result<GapAnalysis, AnalysisError> {
    let (clean, cleaning) = clean_for_currency(records, &config.currency);
    log::debug!(
        "{}: {} rows in currency, {} complete, {} valid",
        config.currency,
        cleaning.in_currency,
        cleaning.complete,
        cleaning.valid
    );

    let cohorts = split_cohorts(&clean, config.experience_threshold);
    if cohorts.junior.len() < config.min_cohort_size
        || cohorts.senior.len() < config.min_cohort_size
    {
        log::warn!(
            "{}: insufficient cohorts ({} junior, {} senior)",
            config.currency,
            cohorts.junior.len(),
            cohorts.senior.len()
        );
        return Err(AnalysisError::InsufficientSample {
            currency: config.currency.clone(),
            junior: cohorts.junior.len(),
            senior: cohorts.senior.len(),
            min: config.min_cohort_size,
        });
    }

    let junior = compute_summary(&cohorts.junior);
    let senior = compute_summary(&cohorts.senior);
    let welch = welch_t_test(&cohorts.senior, &cohorts.junior, Alternative::Greater)?;
    let bootstrap = bootstrap_mean_difference(&cohorts.junior, &cohorts.senior, &config.bootstrap)?;

    log::info!(
        "{}: mean diff {:.2}, Welch p = {:.3e}, bootstrap p = {:.4}",
        config.currency,
        welch.mean_difference,
        welch.p_value,
        bootstrap.p_value
    );

    Ok(GapAnalysis {
        currency: config.currency.clone(),
        experience_threshold: config.experience_threshold,
        cleaning,
        cohorts,
        junior,
        senior,
        welch,
        bootstrap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_records() -> Vec<SurveyRecord> {
        [
            (100.0, 3.0),
            (120.0, 4.0),
            (200.0, 8.0),
            (210.0, 9.0),
            (90.0, 1.0),
            (95.0, 2.0),
            (205.0, 10.0),
            (215.0, 11.0),
            (205.0, 12.0),
            (99.0, 1.0),
        ]
        .into_iter()
        .map(|(salary, years)| SurveyRecord::new(salary, years, "EUR"))
        .collect()
    }

    #[test]
    fn test_example_survey() {
        let analysis = analyze_salary_gap(&example_records(), &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.junior.count, 5);
        assert_eq!(analysis.senior.count, 5);
        assert!((analysis.junior.mean - 101.0).abs() < 0.5);
        assert!((analysis.senior.mean - 207.0).abs() < 1e-9);
        assert!(analysis.welch.t_statistic > 0.0);
        assert!(analysis.welch.p_value < 1e-4);
        assert!(analysis.bootstrap.ci_low > 0.0);
        assert_eq!(analysis.bootstrap.differences.len(), 10_000);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let records = example_records();
        let config = AnalysisConfig::default();
        let first = analyze_salary_gap(&records, &config).unwrap();
        let second = analyze_salary_gap(&records, &config).unwrap();
        assert_eq!(first.bootstrap, second.bootstrap);
    }

    #[test]
    fn test_cohorts_partition_cleaned_records() {
        let mut records = example_records();
        records.push(SurveyRecord::new(300.0, 20.0, "USD"));
        records.push(SurveyRecord {
            salary: None,
            ..SurveyRecord::new(0.0, 2.0, "EUR")
        });
        records.push(SurveyRecord::new(-1.0, 2.0, "EUR"));

        let analysis = analyze_salary_gap(&records, &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.cleaning.in_currency, 12);
        assert_eq!(analysis.cleaning.valid, 10);
        assert_eq!(analysis.cohorts.len(), analysis.cleaning.valid);
    }

    #[test]
    fn test_small_cohort_is_reported() {
        // Drop two junior respondents: 3 junior vs 5 senior.
        let records: Vec<SurveyRecord> = example_records()
            .into_iter()
            .filter(|r| r.salary != Some(90.0) && r.salary != Some(95.0))
            .collect();

        let err = analyze_salary_gap(&records, &AnalysisConfig::default()).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientSample {
                currency: "EUR".to_string(),
                junior: 3,
                senior: 5,
                min: 5,
            }
        );
    }

    #[test]
    fn test_unknown_currency_is_insufficient() {
        let config = AnalysisConfig {
            currency: "JPY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            analyze_salary_gap(&example_records(), &config),
            Err(AnalysisError::InsufficientSample {
                junior: 0,
                senior: 0,
                ..
            })
        ));
    }
}
