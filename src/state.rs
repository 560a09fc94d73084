use std::path::{Path, PathBuf};

use crate::color::PlotColors;
use crate::config::AnalysisConfig;
use crate::data::model::SurveyDataset;
use crate::stats::analysis::{GapAnalysis, analyze_salary_gap};
use crate::stats::error::AnalysisError;
use crate::ui::plot::PlotData;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which plot the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotView {
    #[default]
    BoxPlot,
    Histogram,
    Strip,
    Bootstrap,
}

impl PlotView {
    pub const ALL: [PlotView; 4] = [
        PlotView::BoxPlot,
        PlotView::Histogram,
        PlotView::Strip,
        PlotView::Bootstrap,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PlotView::BoxPlot => "Box plot",
            PlotView::Histogram => "Histograms",
            PlotView::Strip => "Strip plot",
            PlotView::Bootstrap => "Bootstrap",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded survey (None until a file is loaded).
    pub dataset: Option<SurveyDataset>,

    /// File the survey came from.
    pub source: Option<PathBuf>,

    /// Currencies present in the survey, most frequent first.
    pub currencies: Vec<(String, usize)>,

    /// Parameters of the current analysis, including the selected currency.
    pub config: AnalysisConfig,

    /// Outcome for the selected currency (None until something is loaded).
    pub analysis: Option<Result<GapAnalysis, AnalysisError>>,

    /// Series derived from a successful analysis (cached).
    pub plot_data: Option<PlotData>,

    pub view: PlotView,

    pub colors: PlotColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            dataset: None,
            source: None,
            currencies: Vec::new(),
            config,
            analysis: None,
            plot_data: None,
            view: PlotView::default(),
            colors: PlotColors::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded survey and analyse the configured currency.
    pub fn set_dataset(&mut self, dataset: SurveyDataset, source: &Path) {
        self.currencies = dataset.currency_counts();
        self.dataset = Some(dataset);
        self.source = Some(source.to_path_buf());
        self.status_message = None;
        self.reanalyze();
    }

    /// Switch to another currency and rerun the analysis.
    pub fn select_currency(&mut self, currency: &str) {
        if self.config.currency == currency {
            return;
        }
        self.config = self.config.for_currency(currency);
        self.reanalyze();
    }

    /// Recompute the analysis and plot series for the current config.
    pub fn reanalyze(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let result = analyze_salary_gap(&ds.records, &self.config);
        self.plot_data = result
            .as_ref()
            .ok()
            .map(|analysis| PlotData::build(analysis, self.config.bootstrap.seed));
        self.analysis = Some(result);
    }

    /// The successful analysis, if any.
    pub fn current_analysis(&self) -> Option<&GapAnalysis> {
        self.analysis.as_ref().and_then(|r| r.as_ref().ok())
    }
}
