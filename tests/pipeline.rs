//! End-to-end: survey file → analysis → report.

use std::io::Write;

use salary_gap::config::AnalysisConfig;
use salary_gap::data::loader::load_file;
use salary_gap::report::{format_analysis, format_failure};
use salary_gap::stats::analysis::analyze_salary_gap;
use salary_gap::stats::error::AnalysisError;

const SURVEY: &str = "salary,years_experience,currency,country
100,3,EUR,DE
120,4,EUR,FR
200,8,EUR,DE
210,9,EUR,ES
90,1,EUR,IT
95,2,EUR,DE
205,10,EUR,NL
215,11,EUR,DE
205,12,EUR,AT
99,1,EUR,DE
,6,EUR,DE
130,,EUR,DE
-10,2,EUR,DE
500,20,USD,US
510,1,USD,US
";

fn survey_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(SURVEY.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_csv_survey_end_to_end() {
    let file = survey_file();
    let dataset = load_file(file.path()).unwrap();
    assert_eq!(dataset.shape(), (15, 4));
    assert_eq!(dataset.currency_counts()[0], ("EUR".to_string(), 13));

    let analysis = analyze_salary_gap(&dataset.records, &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.cleaning.in_currency, 13);
    assert_eq!(analysis.cleaning.complete, 11);
    assert_eq!(analysis.cleaning.valid, 10);
    assert!((analysis.junior.mean - 100.8).abs() < 1e-9);
    assert!((analysis.senior.mean - 207.0).abs() < 1e-9);
    assert!(analysis.welch.p_value < 1e-4);
    assert!(analysis.bootstrap.ci_low > 0.0);
    assert!(analysis.bootstrap.ci_low <= analysis.bootstrap.ci_high);

    let text = format_analysis(&analysis);
    assert!(text.contains("Currency: EUR"));
    assert!(text.contains("bootstrap p-value = 0.0000"));
}

#[test]
fn test_same_file_same_result() {
    let file = survey_file();
    let dataset = load_file(file.path()).unwrap();
    let config = AnalysisConfig::default();

    let a = analyze_salary_gap(&dataset.records, &config).unwrap();
    let b = analyze_salary_gap(&load_file(file.path()).unwrap().records, &config).unwrap();

    assert_eq!(a.bootstrap.differences, b.bootstrap.differences);
    assert_eq!(a.bootstrap.ci_low, b.bootstrap.ci_low);
    assert_eq!(a.bootstrap.ci_high, b.bootstrap.ci_high);
    assert_eq!(a.bootstrap.p_value, b.bootstrap.p_value);
}

#[test]
fn test_small_currency_is_skipped() {
    let file = survey_file();
    let dataset = load_file(file.path()).unwrap();
    let config = AnalysisConfig::default().for_currency("USD");

    let err = analyze_salary_gap(&dataset.records, &config).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientSample {
            junior: 1,
            senior: 1,
            min: 5,
            ..
        }
    ));
    assert!(format_failure("USD", &err).contains("USD"));
}
