//! Console report
//!
//! Plain-text rendering of the dataset overview and of each currency's
//! analysis, printed to stdout before the plot window opens.

use crate::data::model::{Cohort, SurveyDataset};
use crate::stats::analysis::GapAnalysis;
use crate::stats::error::AnalysisError;

/// Number of currencies listed in the overview.
pub const TOP_CURRENCIES: usize = 10;

/// Shape, columns and the most frequent currencies of the loaded survey.
pub fn format_overview(dataset: &SurveyDataset) -> String {
    let mut output = String::new();
    let (rows, cols) = dataset.shape();

    output.push_str(&format!("Survey: {rows} rows x {cols} columns\n"));
    output.push_str(&format!("Columns: {}\n", dataset.column_names.join(", ")));
    output.push_str("Top currencies:\n");
    for (code, count) in dataset.currency_counts().into_iter().take(TOP_CURRENCIES) {
        output.push_str(&format!("  {code:<8}{count:>8}\n"));
    }
    output
}

/// Full report for one analysed currency.
pub fn format_analysis(analysis: &GapAnalysis) -> String {
    let mut output = String::new();
    let threshold = analysis.experience_threshold;

    output.push('\n');
    output.push_str(&format!("Currency: {}\n", analysis.currency));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "rows: {}  complete: {}  valid: {}\n\n",
        analysis.cleaning.in_currency, analysis.cleaning.complete, analysis.cleaning.valid
    ));

    output.push_str(&format!(
        "{:<10}{:>8}{:>14}{:>14}{:>14}\n",
        "exp_group", "n", "mean", "median", "std"
    ));
    for cohort in Cohort::ALL {
        let s = analysis.summary(cohort);
        output.push_str(&format!(
            "{:<10}{:>8}{:>14.2}{:>14.2}{:>14.2}\n",
            cohort.label(threshold),
            s.count,
            s.mean,
            s.median,
            s.std_dev
        ));
    }

    let welch = &analysis.welch;
    output.push_str("\nWelch t-test (senior > junior):\n");
    output.push_str(&format!(
        "  t = {:.4}  df = {:.2}  p = {:.4e}\n",
        welch.t_statistic, welch.degrees_of_freedom, welch.p_value
    ));
    output.push_str(&format!(
        "  mean diff ({} - {}) = {:.2}\n",
        Cohort::Senior.label(threshold),
        Cohort::Junior.label(threshold),
        welch.mean_difference
    ));

    let boot = &analysis.bootstrap;
    output.push_str(&format!(
        "\nBootstrap ({} iterations, seed {}):\n",
        boot.differences.len(),
        boot.seed
    ));
    output.push_str(&format!(
        "  {:.0}% CI = [{:.2}, {:.2}]\n",
        boot.confidence_level * 100.0,
        boot.ci_low,
        boot.ci_high
    ));
    output.push_str(&format!("  standard error = {:.2}\n", boot.standard_error));
    output.push_str(&format!("  bootstrap p-value = {:.4}\n", boot.p_value));
    output
}

/// One-line notice for a currency that could not be analysed.
pub fn format_failure(currency: &str, err: &AnalysisError) -> String {
    format!("\nCurrency: {currency}\n  skipped: {err}\n")
}
