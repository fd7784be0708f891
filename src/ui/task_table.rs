use crate::model::TaskStore;
use crate::ui::theme;
use egui::{RichText, Ui};

/// Render the list of entered tasks under the form, in chart row order.
pub fn show_task_table(store: &TaskStore, selected: Option<usize>, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", store.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    if store.is_empty() {
        ui.label(
            RichText::new("No tasks yet. Fill in the form and press Add Task.")
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("task_table_grid")
                .num_columns(5)
                .spacing([14.0, 4.0])
                .show(ui, |ui| {
                    for header in ["", "TASK", "START", "DAYS", "COLOR"] {
                        ui.label(RichText::new(header).size(9.0).color(theme::TEXT_DIM).strong());
                    }
                    ui.end_row();

                    for (i, task) in store.iter().enumerate() {
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot_rect.center(), 4.0, task.color.rgb());

                        let mut name = RichText::new(&task.name).size(12.0);
                        if selected == Some(i) {
                            name = name.color(theme::BORDER_ACCENT).strong();
                        }
                        ui.add(egui::Label::new(name).truncate());
                        ui.label(
                            RichText::new(task.start_text())
                                .size(11.0)
                                .color(theme::TEXT_SECONDARY),
                        );
                        ui.label(
                            RichText::new(task.duration.to_string())
                                .size(11.0)
                                .color(theme::TEXT_SECONDARY),
                        );
                        ui.label(
                            RichText::new(task.color.as_str())
                                .size(10.0)
                                .color(theme::TEXT_DIM),
                        );
                        ui.end_row();
                    }
                });
        });
}
