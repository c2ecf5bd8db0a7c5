use crate::explorer::logic::classify::ColumnTypes;
use crate::explorer::logic::dataset::{MAX_SAMPLES, MIN_SAMPLES, SAMPLE_STEP, SYNTHETIC_COLUMNS};
use crate::explorer::logic::pipeline::{MAX_ROW_CAP, MIN_ROW_CAP, ROW_CAP_STEP};
use crate::explorer::logic::{ChartKind, ChartSelection, ColumnKind};
use crate::explorer::model::DashboardModel;
use eframe::egui;
use rfd::FileDialog;

const NO_COLUMN: &str = "None";

pub fn render_synthetic_sidebar(model: &mut DashboardModel, ui: &mut egui::Ui) {
    let max_selected = model.settings.max_selected_columns;
    let inputs = &mut model.synthetic.inputs;
    let types = ColumnTypes::synthetic();

    ui.heading("Configure your dataset");
    ui.add_space(crate::theme::SPACING_SMALL);

    ui.add(
        egui::Slider::new(&mut inputs.sample_count, MIN_SAMPLES..=MAX_SAMPLES)
            .step_by(SAMPLE_STEP as f64)
            .text("Samples"),
    );

    ui.add_space(crate::theme::SPACING_MEDIUM);
    ui.label(format!("Select up to {max_selected} columns"));
    let options: Vec<String> = SYNTHETIC_COLUMNS.iter().map(|s| (*s).to_owned()).collect();
    column_multiselect(ui, &options, &mut inputs.selected, max_selected, |name| {
        types.explicit(name)
    });
}

pub fn render_upload_sidebar(model: &mut DashboardModel, ui: &mut egui::Ui) {
    let settings = model.settings.clone();
    let session = &mut model.upload;

    ui.heading("Load your CSV file");
    ui.add_space(crate::theme::SPACING_SMALL);

    if ui.button("Open CSV…").clicked()
        && let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file()
        && let Err(e) = session.load_path(&path, &settings)
    {
        tracing::error!("Failed to open {}: {e}", path.display());
    }
    ui.label(egui::RichText::new("…or drop a file onto the window").small().weak());

    if let Some(name) = &session.file_name {
        ui.label(format!("File: {name}"));
    }
    if let Some(err) = &session.read_error {
        ui.colored_label(crate::theme::ERROR_COLOR, err);
    }

    let (columns, row_count) = match &session.view {
        Some(Ok(view)) => (view.columns.clone(), view.row_count),
        _ => return,
    };

    ui.add_space(crate::theme::SPACING_MEDIUM);
    ui.label(format!(
        "Select up to {} columns",
        settings.max_selected_columns
    ));
    let inputs = &mut session.inputs;
    let mut selected = inputs.selected().to_vec();
    let declared = inputs.types.clone();
    if column_multiselect(
        ui,
        &columns,
        &mut selected,
        settings.max_selected_columns,
        |name| declared.explicit(name),
    ) {
        inputs.selected = Some(selected);
    }

    ui.add_space(crate::theme::SPACING_MEDIUM);
    let max_cap = MAX_ROW_CAP.min(row_count).max(MIN_ROW_CAP);
    ui.add(
        egui::Slider::new(&mut inputs.row_cap, MIN_ROW_CAP..=max_cap)
            .step_by(ROW_CAP_STEP as f64)
            .text("Max rows"),
    );

    ui.add_space(crate::theme::SPACING_MEDIUM);
    ui.label(egui::RichText::new("Define variable types").strong());
    for name in inputs.selected().to_vec() {
        let current = inputs.types.classify(&name).unwrap_or_default();
        let mut kind = current;
        ui.label(egui::RichText::new(format!("Type of '{name}'")).small());
        egui::ComboBox::from_id_salt(("column_kind", name.as_str()))
            .selected_text(kind.label())
            .show_ui(ui, |ui| {
                for option in ColumnKind::ALL {
                    ui.selectable_value(&mut kind, option, option.label());
                }
            });
        if kind != current {
            inputs.types.declare(name, kind);
        }
    }
}

/// Checkbox list standing in for a multi-select. Keeps the order in which
/// columns were picked. Returns true when the selection changed.
fn column_multiselect(
    ui: &mut egui::Ui,
    options: &[String],
    selected: &mut Vec<String>,
    max_selected: usize,
    kind_of: impl Fn(&str) -> Option<ColumnKind>,
) -> bool {
    let mut changed = false;
    for name in options {
        let mut checked = selected.contains(name);
        let can_add = checked || selected.len() < max_selected;
        ui.horizontal(|ui| {
            let response = ui.add_enabled(can_add, egui::Checkbox::new(&mut checked, name.as_str()));
            if let Some(kind) = kind_of(name) {
                ui.label(egui::RichText::new(kind.label()).small().weak());
            }
            if response.changed() {
                if checked {
                    selected.push(name.clone());
                } else {
                    selected.retain(|s| s != name);
                }
                changed = true;
            }
        });
    }
    changed
}

/// Chart type plus the two column pickers. Returns true when anything changed.
pub fn render_chart_controls(
    ui: &mut egui::Ui,
    chart: &mut ChartSelection,
    selected: &[String],
) -> bool {
    let before = chart.clone();

    egui::Grid::new("chart_controls")
        .num_columns(2)
        .spacing([crate::theme::SPACING_MEDIUM, crate::theme::SPACING_SMALL])
        .show(ui, |ui| {
            ui.label("Chart type");
            egui::ComboBox::from_id_salt("chart_kind")
                .selected_text(chart.kind.label())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut chart.kind, kind, kind.label());
                    }
                });
            ui.end_row();

            ui.label("Column 1");
            ui.add_enabled_ui(!selected.is_empty(), |ui| {
                egui::ComboBox::from_id_salt("chart_primary")
                    .selected_text(chart.primary.as_deref().unwrap_or(NO_COLUMN))
                    .show_ui(ui, |ui| {
                        for name in selected {
                            ui.selectable_value(&mut chart.primary, Some(name.clone()), name);
                        }
                    });
            });
            ui.end_row();

            ui.label("Column 2 (optional)");
            ui.add_enabled_ui(!selected.is_empty(), |ui| {
                egui::ComboBox::from_id_salt("chart_secondary")
                    .selected_text(chart.secondary.as_deref().unwrap_or(NO_COLUMN))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut chart.secondary, None, NO_COLUMN);
                        for name in selected {
                            ui.selectable_value(&mut chart.secondary, Some(name.clone()), name);
                        }
                    });
            });
            ui.end_row();
        });

    *chart != before
}
