use std::ops::RangeInclusive;

use eframe::egui::{self, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, LineStyle, MarkerShape, Plot,
    Points, VLine,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::PlotColors;
use crate::data::model::Cohort;
use crate::state::{AppState, PlotView};
use crate::stats::analysis::GapAnalysis;
use crate::stats::histogram::{HistogramBin, finite_range, histogram, histogram_in_range};
use crate::stats::summary::{Whiskers, box_whiskers};

/// Bins of the per-cohort salary histograms.
pub const SALARY_BINS: usize = 20;

/// Bins of the bootstrap distribution histogram.
pub const BOOTSTRAP_BINS: usize = 50;

/// Half-width of the horizontal jitter in the strip plot.
pub const STRIP_JITTER: f64 = 0.2;

// ---------------------------------------------------------------------------
// Plot series, computed once per analysis
// ---------------------------------------------------------------------------

/// Everything the plots draw, derived from a [`GapAnalysis`] so that the
/// per-frame rendering does no binning or random draws.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    /// Cohort axis labels, indexed by [`Cohort::index`].
    pub labels: [String; 2],
    /// Tukey whiskers and outliers of each cohort's box.
    pub whiskers: Vec<(Cohort, Whiskers)>,
    /// Salary histograms sharing bin edges, one per cohort.
    pub salary_histograms: Vec<(Cohort, Vec<HistogramBin>)>,
    /// `[x, salary]` points, x = cohort index + jitter.
    pub strip_points: Vec<(Cohort, Vec<[f64; 2]>)>,
    pub bootstrap_histogram: Vec<HistogramBin>,
}

impl PlotData {
    pub fn build(analysis: &GapAnalysis, seed: u64) -> Self {
        let threshold = analysis.experience_threshold;
        let cohorts = &analysis.cohorts;

        let all_salaries: Vec<f64> = cohorts
            .junior
            .iter()
            .chain(cohorts.senior.iter())
            .copied()
            .collect();
        let salary_histograms = match finite_range(&all_salaries) {
            Some((min, max)) => Cohort::ALL
                .iter()
                .map(|&c| {
                    (
                        c,
                        histogram_in_range(cohorts.salaries(c), SALARY_BINS, min, max),
                    )
                })
                .collect(),
            None => Vec::new(),
        };

        let whiskers = Cohort::ALL
            .iter()
            .map(|&c| {
                let s = analysis.summary(c);
                (c, box_whiskers(cohorts.salaries(c), s.q1, s.q3))
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let strip_points = Cohort::ALL
            .iter()
            .map(|&c| {
                let x = c.index() as f64;
                let points = cohorts
                    .salaries(c)
                    .iter()
                    .map(|&salary| [x + rng.gen_range(-STRIP_JITTER..=STRIP_JITTER), salary])
                    .collect();
                (c, points)
            })
            .collect();

        PlotData {
            labels: [
                Cohort::Junior.label(threshold),
                Cohort::Senior.label(threshold),
            ],
            whiskers,
            salary_histograms,
            strip_points,
            bootstrap_histogram: histogram(&analysis.bootstrap.differences, BOOTSTRAP_BINS),
        }
    }

    pub fn label(&self, cohort: Cohort) -> &str {
        &self.labels[cohort.index()]
    }
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the view selector and the selected plot in the central panel.
pub fn analysis_plot(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a survey file to analyse  (File → Open…)");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        for view in PlotView::ALL {
            ui.selectable_value(&mut state.view, view, view.title());
        }
    });
    ui.separator();

    let (Some(analysis), Some(data)) = (state.current_analysis(), state.plot_data.as_ref()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!("No analysis for {}", state.config.currency));
        });
        return;
    };

    let colors = state.colors;
    match state.view {
        PlotView::BoxPlot => box_plot(ui, analysis, data, &colors),
        PlotView::Histogram => salary_histograms(ui, analysis, data, &colors),
        PlotView::Strip => strip_plot(ui, analysis, data, &colors),
        PlotView::Bootstrap => bootstrap_plot(ui, analysis, data, &colors),
    }
}

/// X axis formatter printing cohort labels at 0 and 1.
fn cohort_axis(
    labels: [String; 2],
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() < 1e-6 && (0.0..=1.0).contains(&idx) {
            labels[idx as usize].clone()
        } else {
            String::new()
        }
    }
}

fn box_plot(ui: &mut Ui, analysis: &GapAnalysis, data: &PlotData, colors: &PlotColors) {
    Plot::new("box_plot")
        .legend(Legend::default())
        .x_axis_label("Experience group")
        .y_axis_label(format!("Salary ({})", analysis.currency))
        .x_axis_formatter(cohort_axis(data.labels.clone()))
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (cohort, whiskers) in &data.whiskers {
                let cohort = *cohort;
                let s = analysis.summary(cohort);
                let x = cohort.index() as f64;
                let elem = BoxElem::new(
                    x,
                    BoxSpread::new(whiskers.low, s.q1, s.median, s.q3, whiskers.high),
                )
                .name(data.label(cohort))
                .box_width(0.5)
                .fill(colors.cohort_fill(cohort))
                .stroke(Stroke::new(1.5, colors.cohort(cohort)));

                plot_ui.box_plot(
                    BoxPlot::new(vec![elem])
                        .name(data.label(cohort))
                        .color(colors.cohort(cohort)),
                );

                if !whiskers.outliers.is_empty() {
                    let fliers: Vec<[f64; 2]> =
                        whiskers.outliers.iter().map(|&y| [x, y]).collect();
                    plot_ui.points(
                        Points::new(fliers)
                            .name(data.label(cohort))
                            .color(colors.cohort(cohort))
                            .shape(MarkerShape::Diamond)
                            .radius(3.0),
                    );
                }
            }
        });
}

fn salary_histograms(ui: &mut Ui, analysis: &GapAnalysis, data: &PlotData, colors: &PlotColors) {
    Plot::new("salary_histograms")
        .legend(Legend::default())
        .x_axis_label(format!("Salary ({})", analysis.currency))
        .y_axis_label("Count")
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (cohort, bins) in &data.salary_histograms {
                plot_ui.bar_chart(
                    BarChart::new(histogram_bars(bins))
                        .name(data.label(*cohort))
                        .color(colors.cohort_fill(*cohort)),
                );
            }
        });
}

fn strip_plot(ui: &mut Ui, analysis: &GapAnalysis, data: &PlotData, colors: &PlotColors) {
    Plot::new("strip_plot")
        .legend(Legend::default())
        .x_axis_label("Experience group")
        .y_axis_label(format!("Salary ({})", analysis.currency))
        .x_axis_formatter(cohort_axis(data.labels.clone()))
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (cohort, points) in &data.strip_points {
                plot_ui.points(
                    Points::new(points.clone())
                        .name(data.label(*cohort))
                        .color(colors.cohort(*cohort))
                        .radius(2.5),
                );
            }
        });
}

fn bootstrap_plot(ui: &mut Ui, analysis: &GapAnalysis, data: &PlotData, colors: &PlotColors) {
    let boot = &analysis.bootstrap;
    let title = format!(
        "Bootstrap distribution: mean salary difference ({} - {})",
        data.label(Cohort::Senior),
        data.label(Cohort::Junior)
    );
    ui.label(egui::RichText::new(title).strong());

    Plot::new("bootstrap_plot")
        .legend(Legend::default())
        .x_axis_label("Difference")
        .y_axis_label("Frequency")
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(histogram_bars(&data.bootstrap_histogram))
                    .name("bootstrap differences")
                    .color(colors.bootstrap),
            );
            plot_ui.vline(
                VLine::new(0.0)
                    .name("zero")
                    .style(LineStyle::dashed_loose())
                    .color(egui::Color32::GRAY),
            );
            let ci_name = format!("{:.0}% CI", boot.confidence_level * 100.0);
            for bound in [boot.ci_low, boot.ci_high] {
                plot_ui.vline(
                    VLine::new(bound)
                        .name(&ci_name)
                        .style(LineStyle::dotted_dense())
                        .color(colors.cohort(Cohort::Senior)),
                );
            }
        });
}

fn histogram_bars(bins: &[HistogramBin]) -> Vec<Bar> {
    bins.iter()
        .map(|b| Bar::new(b.center(), b.count as f64).width(b.width()))
        .collect()
}
