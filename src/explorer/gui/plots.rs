use crate::explorer::logic::{Figure, FrequencyBars, Histogram, LineSeries, PieChart, Scatter};
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points};

const PLOT_HEIGHT: f32 = 320.0;
const PIE_RADIUS: f32 = 140.0;

pub fn render_figure(ui: &mut egui::Ui, figure: &Figure) {
    ui.label(egui::RichText::new(figure.title()).strong());
    ui.add_space(crate::theme::SPACING_SMALL);

    match figure {
        Figure::Histogram(h) => render_histogram(ui, h),
        Figure::Bar(b) => render_bar_chart(ui, b),
        Figure::Scatter(s) => render_scatter(ui, s),
        Figure::Line(l) => render_line(ui, l),
        Figure::Pie(p) => render_pie_chart(ui, p),
    }
}

fn render_histogram(ui: &mut egui::Ui, h: &Histogram) {
    if h.bins.is_empty() {
        ui.label("—");
        return;
    }

    let bars: Vec<Bar> = h
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.density)
                .width(bin.width())
                .stroke(egui::Stroke::new(0.5, crate::theme::ACCENT_COLOR))
        })
        .collect();
    let chart = BarChart::new("Histogram", bars)
        .color(crate::theme::ACCENT_COLOR.linear_multiply(0.5))
        .element_formatter(Box::new(|bar, _| {
            format!("Bin centre: {:.4}\nDensity: {:.4}", bar.argument, bar.value)
        }));

    let has_curve = !h.density_curve.is_empty();
    let curve = Line::new("KDE", h.density_curve.clone())
        .color(crate::theme::CURVE_COLOR)
        .width(2.0);

    Plot::new(format!("histogram_{}", h.column))
        .height(PLOT_HEIGHT)
        .x_axis_label(h.column.clone())
        .y_axis_label("Density")
        .allow_scroll(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            if has_curve {
                plot_ui.line(curve);
            }
        });
}

fn render_bar_chart(ui: &mut egui::Ui, b: &FrequencyBars) {
    if b.counts.is_empty() {
        ui.label("—");
        return;
    }

    let bars: Vec<Bar> = b
        .counts
        .iter()
        .enumerate()
        .map(|(i, f)| {
            Bar::new(i as f64, f.count as f64)
                .width(0.8)
                .name(&f.label)
        })
        .collect();
    let chart = BarChart::new("Frequency", bars)
        .color(crate::theme::ACCENT_COLOR)
        .element_formatter(Box::new(|bar, _| format!("{}\nCount: {}", bar.name, bar.value)));

    let labels: Vec<String> = b.counts.iter().map(|f| f.label.clone()).collect();
    Plot::new(format!("bar_{}", b.column))
        .height(PLOT_HEIGHT)
        .x_axis_label(b.column.clone())
        .y_axis_label(b.y_label.clone())
        .allow_scroll(false)
        .include_y(0.0)
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > f64::EPSILON || pos < 0.0 {
                return String::new();
            }
            labels.get(pos as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

fn render_scatter(ui: &mut egui::Ui, s: &Scatter) {
    if s.point_count() == 0 {
        ui.label("—");
        return;
    }

    let grouped = s.groups.iter().any(|g| g.label.is_some());
    let mut plot = Plot::new(format!("scatter_{}_{}", s.x_label, s.y_label))
        .height(PLOT_HEIGHT)
        .x_axis_label(s.x_label.clone())
        .y_axis_label(s.y_label.clone())
        .allow_scroll(false);
    if grouped {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for (i, group) in s.groups.iter().enumerate() {
            let name = group.label.clone().unwrap_or_else(|| s.title.clone());
            let color = if grouped {
                crate::theme::palette_color(i)
            } else {
                crate::theme::ACCENT_COLOR
            };
            plot_ui.points(
                Points::new(name, group.points.clone())
                    .color(color)
                    .radius(3.0),
            );
        }
    });
}

fn render_line(ui: &mut egui::Ui, l: &LineSeries) {
    if l.points.is_empty() {
        ui.label("—");
        return;
    }

    Plot::new(format!("line_{}", l.column))
        .height(PLOT_HEIGHT)
        .x_axis_label("Index")
        .y_axis_label(l.column.clone())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(l.column.clone(), l.points.clone())
                    .color(crate::theme::ACCENT_COLOR)
                    .width(1.5),
            );
        });
}

fn render_pie_chart(ui: &mut egui::Ui, p: &PieChart) {
    if p.slices.is_empty() {
        ui.label("—");
        return;
    }

    ui.horizontal(|ui| {
        let (rect, _response) = ui.allocate_exact_size(
            egui::vec2(PIE_RADIUS * 2.0, PIE_RADIUS * 2.0),
            egui::Sense::hover(),
        );
        let center = rect.center();
        let painter = ui.painter();
        let text_color = ui.visuals().strong_text_color();

        let mut start_angle = -std::f32::consts::FRAC_PI_2;
        for (i, slice) in p.slices.iter().enumerate() {
            let sweep_angle = slice.fraction as f32 * std::f32::consts::TAU;
            if sweep_angle < 0.001 {
                continue;
            }
            let end_angle = start_angle + sweep_angle;
            let color = crate::theme::palette_color(i);

            // convex_polygon needs convex input, so wide slices are split in halves
            let pieces = if sweep_angle > std::f32::consts::PI { 2 } else { 1 };
            let piece_sweep = sweep_angle / pieces as f32;
            for piece in 0..pieces {
                let piece_start = start_angle + piece as f32 * piece_sweep;
                painter.add(egui::Shape::convex_polygon(
                    wedge_points(center, PIE_RADIUS, piece_start, piece_sweep),
                    color,
                    egui::Stroke::NONE,
                ));
            }

            let mid = start_angle + sweep_angle / 2.0;
            let label_pos = center + egui::vec2(mid.cos(), mid.sin()) * PIE_RADIUS * 0.65;
            painter.text(
                label_pos,
                egui::Align2::CENTER_CENTER,
                slice.percent_label(),
                egui::FontId::proportional(12.0),
                text_color,
            );

            start_angle = end_angle;
        }

        ui.add_space(crate::theme::SPACING_MEDIUM);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(&p.column).strong());
            for (i, slice) in p.slices.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("■").color(crate::theme::palette_color(i)),
                    );
                    ui.label(format!("{} ({})", slice.label, slice.count));
                });
            }
        });
    });
}

fn wedge_points(center: egui::Pos2, radius: f32, start: f32, sweep: f32) -> Vec<egui::Pos2> {
    let n_points = ((sweep / (std::f32::consts::PI / 32.0)).ceil() as usize).max(3);
    let mut points = Vec::with_capacity(n_points + 2);
    points.push(center);
    for j in 0..=n_points {
        let angle = start + (j as f32 / n_points as f32) * sweep;
        points.push(center + egui::vec2(angle.cos(), angle.sin()) * radius);
    }
    points
}
