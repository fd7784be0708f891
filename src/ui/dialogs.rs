use crate::model::{Task, TaskColor, TaskDraft};
use crate::ui::task_form::color_selector;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// State of the "Edit Task" dialog opened by double-clicking a bar.
#[derive(Debug, Clone)]
pub struct EditDialog {
    pub index: usize,
    pub draft: TaskDraft,
    custom_color: Color32,
}

impl EditDialog {
    /// Pre-fill the dialog from the task at `index`.
    pub fn new(index: usize, task: &Task) -> Self {
        Self {
            index,
            draft: TaskDraft::from_task(task),
            custom_color: task.color.rgb(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    Confirm,
    Cancel,
}

/// Render the "Edit Task" dialog.
pub fn show_edit_dialog(dialog: &mut EditDialog, presets: &[String], ctx: &Context) -> DialogAction {
    let mut action = DialogAction::None;
    Window::new(RichText::new("Edit Task").strong().size(14.0))
        .id(egui::Id::new("edit_task_dialog"))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("edit_task_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Task Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [theme::FORM_FIELD_WIDTH, 24.0],
                        egui::TextEdit::singleline(&mut dialog.draft.name),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Start Date (YYYY-MM-DD)").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [theme::FORM_FIELD_WIDTH, 24.0],
                        egui::TextEdit::singleline(&mut dialog.draft.start),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Duration (days)").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [theme::FORM_FIELD_WIDTH, 24.0],
                        egui::TextEdit::singleline(&mut dialog.draft.duration),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Task Color").color(theme::TEXT_SECONDARY));
                    ui.vertical(|ui| {
                        ui.add_sized(
                            [theme::FORM_FIELD_WIDTH, 24.0],
                            egui::TextEdit::singleline(&mut dialog.draft.color),
                        );
                        color_selector(
                            ui,
                            "edit_color",
                            &mut dialog.draft.color,
                            &mut dialog.custom_color,
                            presets,
                        );
                    });
                    ui.end_row();
                });

            if !dialog.draft.is_complete() {
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Leave no field blank, or the edit is discarded.")
                        .size(10.0)
                        .color(theme::TEXT_DIM),
                );
            } else if TaskColor::parse(&dialog.draft.color).is_err() {
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Unknown color.")
                        .size(10.0)
                        .color(theme::TODAY_LINE),
                );
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let ok_btn = egui::Button::new(RichText::new("OK").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], ok_btn).clicked() {
                    action = DialogAction::Confirm;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    action = DialogAction::Cancel;
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = DialogAction::Cancel;
    }
    action
}

/// Render the "About" dialog.
pub fn show_about_dialog(open: &mut bool, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Gantt Planner").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag a bar to move a task.");
                ui.label("Double-click a bar to edit it.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        *open = false;
    }
}
