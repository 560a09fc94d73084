use super::model::{CleanRecord, Cohort, SurveyRecord};

// ---------------------------------------------------------------------------
// Cleaning: currency filter + validity predicates
// ---------------------------------------------------------------------------

/// Counts reported alongside the cleaned records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleaningStats {
    /// Records whose currency matches the target.
    pub in_currency: usize,
    /// Of those, records with both salary and experience present.
    pub complete: usize,
    /// Of those, records with `salary > 0` and `years_experience >= 0`.
    pub valid: usize,
}

/// Keep records of `currency` with usable salary and experience.
///
/// A record passes when:
/// * its currency equals `currency` exactly
/// * salary and experience are present and finite (`NaN` counts as missing)
/// * `salary > 0` and `years_experience >= 0`
pub fn clean_for_currency(
    records: &[SurveyRecord],
    currency: &str,
) -> (Vec<CleanRecord>, CleaningStats) {
    let mut stats = CleaningStats::default();
    let mut clean = Vec::new();

    for rec in records {
        if rec.currency.as_deref() != Some(currency) {
            continue;
        }
        stats.in_currency += 1;

        let (Some(salary), Some(years)) = (finite(rec.salary), finite(rec.years_experience))
        else {
            continue;
        };
        stats.complete += 1;

        if salary > 0.0 && years >= 0.0 {
            stats.valid += 1;
            clean.push(CleanRecord {
                salary,
                years_experience: years,
            });
        }
    }

    (clean, stats)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Cohort split
// ---------------------------------------------------------------------------

/// Salaries of the two experience cohorts, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cohorts {
    pub junior: Vec<f64>,
    pub senior: Vec<f64>,
}

impl Cohorts {
    pub fn salaries(&self, cohort: Cohort) -> &[f64] {
        match cohort {
            Cohort::Junior => &self.junior,
            Cohort::Senior => &self.senior,
        }
    }

    pub fn len(&self) -> usize {
        self.junior.len() + self.senior.len()
    }

    pub fn is_empty(&self) -> bool {
        self.junior.is_empty() && self.senior.is_empty()
    }
}

/// Partition cleaned records at `threshold` years (inclusive on the junior side).
pub fn split_cohorts(records: &[CleanRecord], threshold: f64) -> Cohorts {
    let mut cohorts = Cohorts::default();
    for rec in records {
        match Cohort::classify(rec.years_experience, threshold) {
            Cohort::Junior => cohorts.junior.push(rec.salary),
            Cohort::Senior => cohorts.senior.push(rec.salary),
        }
    }
    cohorts
}
