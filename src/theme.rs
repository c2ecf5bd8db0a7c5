use eframe::egui;
use egui::{Color32, CornerRadius, Margin, Stroke};

pub const ACCENT_COLOR: Color32 = Color32::from_rgb(46, 125, 200);
pub const CURVE_COLOR: Color32 = Color32::from_rgb(255, 179, 102);
pub const WARNING_COLOR: Color32 = Color32::from_rgb(230, 180, 60);
pub const ERROR_COLOR: Color32 = Color32::from_rgb(220, 80, 80);

/// Categorical palette for scatter groups and pie wedges.
pub const PALETTE: [Color32; 8] = [
    Color32::from_rgb(76, 114, 176),
    Color32::from_rgb(221, 132, 82),
    Color32::from_rgb(85, 168, 104),
    Color32::from_rgb(196, 78, 82),
    Color32::from_rgb(129, 114, 179),
    Color32::from_rgb(147, 120, 96),
    Color32::from_rgb(218, 139, 195),
    Color32::from_rgb(140, 140, 140),
];

pub const SPACING_SMALL: f32 = 8.0;
pub const SPACING_MEDIUM: f32 = 12.0;

pub const MARGIN_SIDEBAR: f32 = 10.0;
pub const MARGIN_CARD: f32 = 12.0;

pub fn palette_color(index: usize) -> Color32 {
    PALETTE
        .get(index % PALETTE.len())
        .copied()
        .unwrap_or(ACCENT_COLOR)
}

pub fn apply_dashboard_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();

    visuals.widgets.active.bg_fill = ACCENT_COLOR;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(33, 100, 170);
    visuals.widgets.hovered.corner_radius = CornerRadius::same(6);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(45, 45, 45);
    visuals.widgets.inactive.corner_radius = CornerRadius::same(6);

    visuals.selection.bg_fill = ACCENT_COLOR.linear_multiply(0.4);

    visuals.faint_bg_color = Color32::from_rgb(35, 35, 35);
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 20);

    ctx.set_visuals(visuals);
}

pub fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(MARGIN_CARD as i8))
        .stroke(Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
}

pub fn sidebar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgb(25, 25, 25))
        .inner_margin(Margin::same(MARGIN_SIDEBAR as i8))
}
