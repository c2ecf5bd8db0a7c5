//! Graphical shell of the dashboard.
//!
//! Built with `egui`. Each frame the widgets edit the session inputs in
//! [`DashboardModel`]; the model re-runs its pipeline whenever those inputs
//! changed, and the resulting view is drawn below.

use super::logic::{ChartPanel, UploadView};
use super::model::DashboardModel;
use crate::config::{DashboardSettings, DataSource};
use eframe::egui;

mod controls;
mod plots;
mod preview_table;

use controls::{render_chart_controls, render_synthetic_sidebar, render_upload_sidebar};
use plots::render_figure;
use preview_table::render_preview_table;

pub const APP_TITLE: &str = "Interactive EDA Dashboard";

pub struct DashboardApp {
    pub model: DashboardModel,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: DashboardSettings) -> Self {
        crate::theme::apply_dashboard_theme(&cc.egui_ctx);
        Self {
            model: DashboardModel::new(settings),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        let name = file
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.name.clone());

        let bytes = match (&file.bytes, &file.path) {
            (Some(bytes), _) => Ok(bytes.to_vec()),
            (None, Some(path)) => std::fs::read(path),
            (None, None) => return,
        };

        match bytes {
            Ok(bytes) => {
                self.model
                    .upload
                    .load_file(name, bytes, &self.model.settings);
                self.model.source = DataSource::Upload;
            }
            Err(e) => tracing::error!("Failed to read dropped file {name}: {e}"),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("dashboard_top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(APP_TITLE);
                ui.separator();
                ui.selectable_value(
                    &mut self.model.source,
                    DataSource::Synthetic,
                    "Synthetic sports data",
                );
                ui.selectable_value(&mut self.model.source, DataSource::Upload, "Your CSV");
            });
        });

        egui::TopBottomPanel::bottom("dashboard_footer").show(ctx, |ui| {
            ui.label(
                egui::RichText::new("Interactive analysis app built with egui | Synthetic sports data or your own CSV")
                    .small()
                    .weak(),
            );
        });

        // Widgets below edit inputs; the pipeline re-runs once per change.
        let source = self.model.source;
        egui::SidePanel::left("dashboard_controls")
            .frame(crate::theme::sidebar_frame())
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| match source {
                    DataSource::Synthetic => render_synthetic_sidebar(&mut self.model, ui),
                    DataSource::Upload => render_upload_sidebar(&mut self.model, ui),
                });
            });

        self.model.refresh();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match source {
                DataSource::Synthetic => render_synthetic_main(&mut self.model, ui),
                DataSource::Upload => render_upload_main(&mut self.model, ui),
            });
        });
    }
}

fn render_synthetic_main(model: &mut DashboardModel, ui: &mut egui::Ui) {
    let session = &mut model.synthetic;
    let view = match &session.view {
        Some(Ok(view)) => view,
        Some(Err(e)) => {
            render_error(ui, &e.to_string());
            return;
        }
        None => {
            ui.spinner();
            return;
        }
    };

    ui.heading("Data preview");
    render_preview_table(ui, "synthetic_preview", &view.preview, None);
    render_timing(ui, session.last_duration);

    ui.add_space(crate::theme::SPACING_MEDIUM);
    ui.heading("Data visualization");
    let selected = view.inputs.selected.clone();
    let chart = view.chart.clone();
    if render_chart_controls(ui, &mut session.inputs.chart, &selected) {
        ui.ctx().request_repaint();
    }
    render_chart_panel(ui, &chart);
}

fn render_upload_main(model: &mut DashboardModel, ui: &mut egui::Ui) {
    let session = &mut model.upload;
    if !session.has_file() {
        render_info(ui, "Upload a CSV file to start the analysis.");
        return;
    }

    let view: &UploadView = match &session.view {
        Some(Ok(view)) => view,
        Some(Err(e)) => {
            render_error(ui, &e.to_string());
            return;
        }
        None => {
            ui.spinner();
            return;
        }
    };

    ui.heading("Loaded data (preview)");
    render_preview_table(ui, "upload_head", &view.head, None);

    ui.add_space(crate::theme::SPACING_MEDIUM);
    ui.heading("Selected data");
    render_preview_table(ui, "upload_selection", &view.preview, Some(view.row_count));
    render_timing(ui, session.last_duration);

    ui.add_space(crate::theme::SPACING_MEDIUM);
    ui.heading("Data visualization");
    let selected = view.inputs.selected().to_vec();
    let chart = view.chart.clone();
    if render_chart_controls(ui, &mut session.inputs.chart, &selected) {
        ui.ctx().request_repaint();
    }
    render_chart_panel(ui, &chart);
}

fn render_chart_panel(ui: &mut egui::Ui, panel: &ChartPanel) {
    ui.add_space(crate::theme::SPACING_SMALL);
    match panel {
        ChartPanel::NoColumn => render_info(ui, "Select at least one column to draw a chart."),
        ChartPanel::Result(result) => match result.figure() {
            Some(figure) => {
                crate::theme::card_frame(ui).show(ui, |ui| render_figure(ui, figure));
            }
            None => {
                if let Some(warning) = result.warning() {
                    render_warning(ui, warning.message());
                }
            }
        },
        ChartPanel::Error(message) => render_error(ui, message),
    }
}

fn render_timing(ui: &mut egui::Ui, duration: Option<std::time::Duration>) {
    if let Some(d) = duration {
        ui.label(
            egui::RichText::new(format!("Pipeline ran in {}", crate::utils::fmt_duration(d)))
                .small()
                .weak(),
        );
    }
}

fn render_info(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).italics());
}

fn render_warning(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(format!("⚠ {text}")).color(crate::theme::WARNING_COLOR));
}

fn render_error(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).color(crate::theme::ERROR_COLOR).strong());
}
