use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Cohort;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – currency selector and results
// ---------------------------------------------------------------------------

/// Render the left panel: currency choice, cohort table and test results.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Salary gap");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No survey loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let currencies = state.currencies.clone();
    let current = state.config.currency.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Currency");
            egui::ComboBox::from_id_salt("currency")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for (code, count) in &currencies {
                        if ui
                            .selectable_label(current == *code, format!("{code}  ({count})"))
                            .clicked()
                        {
                            state.select_currency(code);
                        }
                    }
                });
            ui.separator();

            results(ui, state);
        });
}

fn results(ui: &mut Ui, state: &AppState) {
    let analysis = match &state.analysis {
        Some(Ok(analysis)) => analysis,
        Some(Err(err)) => {
            ui.label(RichText::new(err.to_string()).color(Color32::YELLOW));
            return;
        }
        None => return,
    };

    let cleaning = &analysis.cleaning;
    ui.label(format!(
        "{} rows, {} complete, {} valid",
        cleaning.in_currency, cleaning.complete, cleaning.valid
    ));
    ui.add_space(4.0);

    egui::Grid::new("cohort_summary")
        .striped(true)
        .num_columns(5)
        .show(ui, |ui: &mut Ui| {
            for header in ["group", "n", "mean", "median", "std"] {
                ui.strong(header);
            }
            ui.end_row();

            for cohort in Cohort::ALL {
                let s = analysis.summary(cohort);
                ui.label(
                    RichText::new(cohort.label(analysis.experience_threshold))
                        .color(state.colors.cohort(cohort)),
                );
                ui.label(s.count.to_string());
                ui.label(format!("{:.1}", s.mean));
                ui.label(format!("{:.1}", s.median));
                ui.label(format!("{:.1}", s.std_dev));
                ui.end_row();
            }
        });
    ui.separator();

    let welch = &analysis.welch;
    ui.strong("Welch t-test");
    ui.label(format!(
        "t = {:.3}   df = {:.1}",
        welch.t_statistic, welch.degrees_of_freedom
    ));
    ui.label(format!("p = {:.3e}", welch.p_value));
    ui.label(format!("mean diff = {:.2}", welch.mean_difference));
    ui.separator();

    let boot = &analysis.bootstrap;
    ui.strong(format!(
        "Bootstrap ({} iterations, seed {})",
        boot.differences.len(),
        boot.seed
    ));
    ui.label(format!(
        "{:.0}% CI = [{:.2}, {:.2}]",
        boot.confidence_level * 100.0,
        boot.ci_low,
        boot.ci_high
    ));
    ui.label(format!("p = {:.4}", boot.p_value));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state
                .source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            ui.label(format!("{source}: {} responses", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary survey")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load a survey into the viewer, reporting failures in the status bar.
pub fn load_into(state: &mut AppState, path: &std::path::Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} responses with columns {:?}",
                dataset.len(),
                dataset.column_names
            );
            state.set_dataset(dataset, path);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
