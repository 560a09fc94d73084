/// Data layer: survey types, loading, and cleaning.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SurveyDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SurveyDataset  │  Vec<SurveyRecord>, column names
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  currency + validity → CleanRecord → Cohorts
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
