//! Light palette tuned for pastel task bars, plus the sizes shared by the
//! form, the task list and the chart.

use egui::style::WidgetVisuals;
use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// Surfaces
pub const BG_CANVAS: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_PANEL: Color32 = Color32::from_rgb(246, 247, 249);
pub const BG_HEADER: Color32 = Color32::from_rgb(233, 236, 241);
pub const BG_FIELD: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_ROW_ALT: Color32 = Color32::from_rgb(241, 243, 247);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(6, 24, 36, 40);

// Lines and text
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(206, 211, 220);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(31, 119, 180);
pub const BAR_OUTLINE: Color32 = Color32::from_rgb(60, 64, 72);
pub const GRID_LINE: Color32 = Color32::from_rgb(226, 229, 235);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(33, 37, 43);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(88, 95, 108);
pub const TEXT_DIM: Color32 = Color32::from_rgb(138, 145, 158);

pub const ACCENT: Color32 = Color32::from_rgb(31, 119, 180);
/// Marker for today; also used for inline error hints.
pub const TODAY_LINE: Color32 = Color32::from_rgb(214, 39, 40);

// Chart and form geometry, in points
pub const ROW_HEIGHT: f32 = 34.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const LABEL_GUTTER: f32 = 150.0;
pub const BAR_ROUNDING: f32 = 3.0;
pub const FORM_FIELD_WIDTH: f32 = 220.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

const WIDGET_ROUNDING: f32 = 4.0;

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

fn widget(visuals: &mut WidgetVisuals, fill: Color32, border: Color32, text: Stroke) {
    visuals.bg_fill = fill;
    visuals.weak_bg_fill = fill;
    visuals.bg_stroke = Stroke::new(1.0, border);
    visuals.fg_stroke = text;
    visuals.rounding = Rounding::same(WIDGET_ROUNDING);
}

/// Install the palette on the context. Called every frame, so it must stay cheap.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.faint_bg_color = BG_ROW_ALT;

    let w = &mut visuals.widgets;
    widget(&mut w.noninteractive, BG_PANEL, BORDER_SUBTLE, Stroke::new(1.0, TEXT_SECONDARY));
    widget(&mut w.inactive, Color32::from_rgb(228, 231, 237), BORDER_SUBTLE, Stroke::new(1.0, TEXT_PRIMARY));
    widget(&mut w.hovered, Color32::from_rgb(218, 224, 233), ACCENT, Stroke::new(1.0, TEXT_PRIMARY));
    widget(&mut w.active, Color32::from_rgb(205, 214, 228), ACCENT, Stroke::new(1.5, TEXT_PRIMARY));
    widget(&mut w.open, Color32::from_rgb(218, 224, 233), ACCENT, Stroke::new(1.0, TEXT_PRIMARY));

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
    });
}
