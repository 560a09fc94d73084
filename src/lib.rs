//! Salary gap between experience cohorts of a salary survey.
//!
//! Loads a survey, keeps one currency, splits respondents at a years-of-
//! experience threshold and compares the cohorts' mean salaries with a
//! one-sided Welch t-test and a seeded percentile bootstrap. The `ui`,
//! `app` and `state` modules render the results in an egui window.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod report;
pub mod state;
pub mod stats;
pub mod ui;
