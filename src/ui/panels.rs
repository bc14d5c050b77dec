use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::SalaryDataset;
use crate::format::{format_currency, format_currency_opt, format_percent};
use crate::resources::Resources;
use crate::state::{AppState, OverviewTab};
use crate::ui::plot;
use crate::viewmodel::{self, EmployeeInput, MetricsView, OverviewView, PredictionView};

// Series colors of the two charts.
const EXPERIENCE_SERIES: Color32 = Color32::from_rgb(31, 119, 180);
const AGE_SERIES: Color32 = Color32::from_rgb(255, 127, 14);

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, dataset: Option<&SalaryDataset>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.heading("HR Salary Prediction Dashboard");
        ui.separator();
        ui.label("Predict employee salaries from age and years of experience");

        if let Some(ds) = dataset {
            ui.separator();
            ui.label(format!("{} records loaded", ds.len()));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – employee inputs
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState, dataset_len: Option<usize>) {
    ui.heading("Employee Details");
    ui.separator();

    ui.add(
        egui::Slider::new(&mut state.input.age, EmployeeInput::AGE_RANGE)
            .text("Age")
            .integer(),
    );
    ui.add(
        egui::Slider::new(&mut state.input.experience, EmployeeInput::EXPERIENCE_RANGE)
            .text("Years of Experience")
            .integer(),
    );

    ui.separator();
    ui.strong("Model Information");
    if let Some(n) = dataset_len {
        ui.label(format!("Training samples: {n}"));
    }
    ui.label("Features: 2 (Age, Experience)");

    ui.separator();
    if ui.button("Predict Salary").clicked() {
        state.triggered = true;
    }
}

// ---------------------------------------------------------------------------
// Central panel – prediction, charts, metrics, dataset overview
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState, resources: &Resources) {
    // Full recomputation every frame; derived values are never cached.
    let view = viewmodel::build(
        &resources.model,
        &resources.dataset,
        state.input,
        state.triggered,
    );

    let view = match view {
        Ok(view) => view,
        Err(e) => {
            log::error!("prediction failed: {e}");
            ui.colored_label(Color32::RED, format!("Prediction failed: {e}"));
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(pred) = &view.prediction {
                prediction_card(ui, pred);
                ui.add_space(8.0);

                ui.columns(2, |cols| {
                    plot::scatter_chart(&mut cols[0], &pred.experience_chart, EXPERIENCE_SERIES);
                    plot::scatter_chart(&mut cols[1], &pred.age_chart, AGE_SERIES);
                });

                ui.add_space(8.0);
                metrics_row(ui, &pred.metrics);
                ui.separator();
            }

            overview_panel(ui, state, &view.overview);
        });
}

fn prediction_card(ui: &mut Ui, pred: &PredictionView) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.group(|ui: &mut Ui| {
            ui.heading("Predicted Salary");
            ui.label(
                RichText::new(format_currency(pred.salary))
                    .size(36.0)
                    .color(Color32::from_rgb(46, 204, 113))
                    .strong(),
            );
            ui.label(format!(
                "Based on Age: {} | Experience: {} years",
                pred.input.age, pred.input.experience
            ));
        });
    });
}

fn metrics_row(ui: &mut Ui, metrics: &MetricsView) {
    ui.strong("Quick Statistics");
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Dataset Mean Salary", &format_currency_opt(metrics.mean_salary));
        metric(&mut cols[1], "Dataset Max Salary", &format_currency_opt(metrics.max_salary));
        metric(&mut cols[2], "Predicted Salary", &format_currency(metrics.predicted));
        metric(&mut cols[3], "Vs Mean", &format_percent(metrics.vs_mean_pct));
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.label(label);
        ui.strong(value);
    });
}

// ---------------------------------------------------------------------------
// Dataset overview expander
// ---------------------------------------------------------------------------

fn overview_panel(ui: &mut Ui, state: &mut AppState, overview: &OverviewView) {
    egui::CollapsingHeader::new(RichText::new("Dataset Overview").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.selectable_value(&mut state.overview_tab, OverviewTab::Preview, "Preview");
                ui.selectable_value(
                    &mut state.overview_tab,
                    OverviewTab::Statistics,
                    "Statistics",
                );
                ui.selectable_value(&mut state.overview_tab, OverviewTab::Info, "Data Info");
            });
            ui.separator();

            match state.overview_tab {
                OverviewTab::Preview => preview_table(ui, overview),
                OverviewTab::Statistics => statistics_table(ui, overview),
                OverviewTab::Info => info_panel(ui, overview),
            }
        });
}

/// First 10 records of the dataset.
fn preview_table(ui: &mut Ui, overview: &OverviewView) {
    ui.label(format!("First {} records", overview.head.len()));
    ui.push_id("preview_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), overview.column_names.len())
            .header(20.0, |mut header| {
                for name in &overview.column_names {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for row in &overview.head {
                    body.row(18.0, |mut table_row| {
                        for cell in row {
                            table_row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}

/// Per-numeric-column describe() statistics, one row per statistic.
fn statistics_table(ui: &mut Ui, overview: &OverviewView) {
    let stat = |v: Option<f64>| v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "n/a".into());

    let rows: Vec<(&str, Vec<String>)> = vec![
        (
            "count",
            overview.summaries.iter().map(|s| s.count.to_string()).collect(),
        ),
        ("mean", overview.summaries.iter().map(|s| stat(s.mean)).collect()),
        ("std", overview.summaries.iter().map(|s| stat(s.std)).collect()),
        ("min", overview.summaries.iter().map(|s| stat(s.min)).collect()),
        ("25%", overview.summaries.iter().map(|s| stat(s.q25)).collect()),
        ("50%", overview.summaries.iter().map(|s| stat(s.median)).collect()),
        ("75%", overview.summaries.iter().map(|s| stat(s.q75)).collect()),
        ("max", overview.summaries.iter().map(|s| stat(s.max)).collect()),
    ];

    ui.push_id("statistics_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(
                Column::auto().resizable(true),
                overview.summaries.len() + 1,
            )
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("statistic");
                });
                for summary in &overview.summaries {
                    header.col(|ui| {
                        ui.strong(&summary.name);
                    });
                }
            })
            .body(|mut body| {
                for (name, values) in &rows {
                    body.row(18.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(*name);
                        });
                        for value in values {
                            table_row.col(|ui| {
                                ui.label(value);
                            });
                        }
                    });
                }
            });
    });
}

/// Shape, dtypes and missing-value counts.
fn info_panel(ui: &mut Ui, overview: &OverviewView) {
    ui.label(format!("Total records: {}", overview.row_count));
    ui.label(format!("Columns: {}", overview.column_count));
    ui.label(format!("Missing values: {}", overview.missing_values));
    ui.add_space(4.0);

    ui.strong("Column dtypes");
    for (name, dtype) in &overview.dtypes {
        ui.label(format!("{name}: {dtype}"));
    }
}
