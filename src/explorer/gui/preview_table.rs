use crate::utils::fmt_cell;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use polars::prelude::DataFrame;

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 260.0;

/// Draws `table` as a striped grid. `total_rows` adds a "Showing X of Y"
/// caption when the table is a capped view of a larger file.
pub fn render_preview_table(
    ui: &mut egui::Ui,
    id: &str,
    table: &DataFrame,
    total_rows: Option<usize>,
) {
    if table.width() == 0 {
        ui.label(egui::RichText::new("No columns selected.").italics());
        return;
    }

    let columns = table.get_columns();
    ui.push_id(id, |ui| {
        egui::ScrollArea::horizontal().show(ui, |ui| {
            let mut builder = TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .max_scroll_height(MAX_TABLE_HEIGHT)
                .min_scrolled_height(0.0)
                .column(Column::auto().at_least(40.0)); // Row index
            for _ in columns {
                builder = builder.column(Column::initial(100.0).at_least(60.0));
            }

            builder
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    for col in columns {
                        header.col(|ui| {
                            ui.strong(col.name().as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.height(), |mut row| {
                        let idx = row.index();
                        row.col(|ui| {
                            ui.label(egui::RichText::new(idx.to_string()).weak());
                        });
                        for col in columns {
                            row.col(|ui| {
                                let text = col.get(idx).map(|v| fmt_cell(&v)).unwrap_or_default();
                                ui.label(text);
                            });
                        }
                    });
                });
        });
    });

    if let Some(total) = total_rows {
        ui.label(
            egui::RichText::new(format!("Showing {} of {total} rows", table.height()))
                .small()
                .weak(),
        );
    }
}
