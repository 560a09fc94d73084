use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SurveyRecord – one row of the survey table
// ---------------------------------------------------------------------------

/// A single survey response as read from the input file.
///
/// Every field is optional: missing cells are kept as `None` so that the
/// cleaning step can drop them instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub salary: Option<f64>,
    pub years_experience: Option<f64>,
    pub currency: Option<String>,
}

impl SurveyRecord {
    pub fn new(salary: f64, years_experience: f64, currency: &str) -> Self {
        Self {
            salary: Some(salary),
            years_experience: Some(years_experience),
            currency: Some(currency.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// CleanRecord – a record that survived cleaning
// ---------------------------------------------------------------------------

/// Salary and experience of a record that passed cleaning:
/// both finite, `salary > 0` and `years_experience >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanRecord {
    pub salary: f64,
    pub years_experience: f64,
}

// ---------------------------------------------------------------------------
// Cohort – experience bucket
// ---------------------------------------------------------------------------

/// Experience cohort a respondent belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cohort {
    /// Experience at or below the threshold.
    Junior,
    /// Experience strictly above the threshold.
    Senior,
}

impl Cohort {
    pub const ALL: [Cohort; 2] = [Cohort::Junior, Cohort::Senior];

    /// Bucket a years-of-experience value against `threshold`.
    pub fn classify(years_experience: f64, threshold: f64) -> Self {
        if years_experience <= threshold {
            Cohort::Junior
        } else {
            Cohort::Senior
        }
    }

    /// Axis label for a given threshold, e.g. `0-5` and `>5`.
    pub fn label(self, threshold: f64) -> String {
        match self {
            Cohort::Junior => format!("0-{threshold}"),
            Cohort::Senior => format!(">{threshold}"),
        }
    }

    /// Position on the categorical axis of the plots.
    pub fn index(self) -> usize {
        match self {
            Cohort::Junior => 0,
            Cohort::Senior => 1,
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cohort::Junior => write!(f, "junior"),
            Cohort::Senior => write!(f, "senior"),
        }
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed survey with the column names of the source file.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    pub records: Vec<SurveyRecord>,
    /// Column names in file order, including the ones that are ignored.
    pub column_names: Vec<String>,
}

impl SurveyDataset {
    pub fn new(records: Vec<SurveyRecord>, column_names: Vec<String>) -> Self {
        SurveyDataset {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (rows, columns) of the source table.
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.column_names.len())
    }

    /// Row count per currency, most frequent first, ties by code.
    /// Records without a currency are not counted.
    pub fn currency_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for rec in &self.records {
            if let Some(code) = rec.currency.as_deref() {
                *counts.entry(code).or_default() += 1;
            }
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(code, n)| (code.to_string(), n))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}
