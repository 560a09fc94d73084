use anyhow::Result;
use clap::Parser;
use eframe::egui;

use salary_gap::app::SalaryGapApp;
use salary_gap::config::{AnalysisConfig, Cli};
use salary_gap::data::loader::load_file;
use salary_gap::data::model::SurveyDataset;
use salary_gap::report;
use salary_gap::state::AppState;
use salary_gap::stats::analysis::analyze_salary_gap;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let configs = cli.analysis_configs();

    let dataset = load_file(&cli.input)?;
    log::info!("Loaded {} responses from {}", dataset.len(), cli.input.display());

    print!("{}", report::format_overview(&dataset));
    for config in &configs {
        match analyze_salary_gap(&dataset.records, config) {
            Ok(analysis) => print!("{}", report::format_analysis(&analysis)),
            Err(err) => print!("{}", report::format_failure(&config.currency, &err)),
        }
    }

    if cli.no_gui {
        return Ok(());
    }

    // The viewer starts on the first requested currency.
    let first = configs.into_iter().next().unwrap_or_default();
    run_viewer(dataset, &cli, first)
}

fn run_viewer(dataset: SurveyDataset, cli: &Cli, config: AnalysisConfig) -> Result<()> {
    let mut state = AppState::new(config);
    state.set_dataset(dataset, &cli.input);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Gap – Experience Cohorts",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryGapApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
}
