use crate::app::GanttApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top menu bar.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_header()), |ui| {
            if ui.button("  Load from CSV...").clicked() {
                app.load_from_dialog();
                ui.close_menu();
            }
            if ui.button("  Save to CSV...        Ctrl+S").clicked() {
                app.save_to_dialog();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_header()), |ui| {
            if ui.button("  Show Gantt Chart").clicked() {
                app.show_chart();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.chart.axis.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.chart.axis.zoom_out();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_header()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned name of the current file
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = match &app.file_path {
                Some(path) => path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                None => "(unsaved)".to_string(),
            };
            ui.label(RichText::new(label).size(11.0).weak());
        });
    });
}
