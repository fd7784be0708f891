use chrono::NaiveDate;
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::model::task::DATE_FORMAT;
use crate::model::{TaskColor, TaskDraft};
use crate::ui::theme;

/// Buttons on the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    AddTask,
    ShowChart,
    Save,
    Load,
}

/// Text the user is typing into the entry form.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub draft: TaskDraft,
    /// Backing value for the date picker; copied into `draft.start` when picked.
    pub picked_date: NaiveDate,
    pub custom_color: Color32,
}

impl TaskForm {
    pub fn new(default_color: &str, today: NaiveDate) -> Self {
        Self {
            draft: TaskDraft {
                color: default_color.to_string(),
                ..Default::default()
            },
            picked_date: today,
            custom_color: TaskColor::parse(default_color)
                .map(|c| c.rgb())
                .unwrap_or(Color32::from_rgb(135, 206, 235)),
        }
    }

    /// Empty the text fields after a successful add. The color choice stays.
    pub fn clear(&mut self) {
        self.draft.name.clear();
        self.draft.start.clear();
        self.draft.duration.clear();
    }
}

/// Render the data-entry form.
pub fn show_task_form(form: &mut TaskForm, presets: &[String], ui: &mut Ui) -> FormAction {
    let mut action = FormAction::None;

    ui.add_space(2.0);
    ui.label(
        RichText::new("New Task")
            .strong()
            .size(15.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    egui::Grid::new("task_form_grid")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Task Name").color(theme::TEXT_SECONDARY));
            ui.add_sized(
                [theme::FORM_FIELD_WIDTH, 24.0],
                egui::TextEdit::singleline(&mut form.draft.name).hint_text("Task name..."),
            );
            ui.end_row();

            ui.label(RichText::new("Start Date (YYYY-MM-DD)").color(theme::TEXT_SECONDARY));
            ui.horizontal(|ui| {
                ui.add_sized(
                    [theme::FORM_FIELD_WIDTH - 40.0, 24.0],
                    egui::TextEdit::singleline(&mut form.draft.start).hint_text("2024-01-01"),
                );
                let picker = ui.add(
                    egui_extras::DatePickerButton::new(&mut form.picked_date)
                        .id_salt("form_start_picker"),
                );
                if picker.changed() {
                    form.draft.start = form.picked_date.format(DATE_FORMAT).to_string();
                }
            });
            ui.end_row();

            ui.label(RichText::new("Duration (days)").color(theme::TEXT_SECONDARY));
            ui.add_sized(
                [theme::FORM_FIELD_WIDTH, 24.0],
                egui::TextEdit::singleline(&mut form.draft.duration).hint_text("5"),
            );
            ui.end_row();

            ui.label(RichText::new("Task Color").color(theme::TEXT_SECONDARY));
            color_selector(
                ui,
                "form_color",
                &mut form.draft.color,
                &mut form.custom_color,
                presets,
            );
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.horizontal_wrapped(|ui| {
        let add_btn = egui::Button::new(
            RichText::new(format!("{}  Add Task", icons::PLUS)).color(Color32::WHITE),
        )
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(5.0));
        if ui.add(add_btn).clicked() {
            action = FormAction::AddTask;
        }
        if ui
            .button(format!("{}  Show Gantt Chart", icons::CHART_BAR_HORIZONTAL))
            .clicked()
        {
            action = FormAction::ShowChart;
        }
        if ui.button(format!("{}  Save to CSV", icons::FLOPPY_DISK)).clicked() {
            action = FormAction::Save;
        }
        if ui.button(format!("{}  Load from CSV", icons::FOLDER_OPEN)).clicked() {
            action = FormAction::Load;
        }
    });

    action
}

/// Preset dropdown, custom color picker and a preview swatch, all editing one color string.
pub fn color_selector(
    ui: &mut Ui,
    id_salt: &str,
    color_text: &mut String,
    custom: &mut Color32,
    presets: &[String],
) {
    ui.horizontal(|ui| {
        let swatch = TaskColor::parse(color_text)
            .map(|c| c.rgb())
            .unwrap_or(Color32::TRANSPARENT);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, egui::Rounding::same(3.0), swatch);
        ui.painter().rect_stroke(
            rect,
            egui::Rounding::same(3.0),
            egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        );

        egui::ComboBox::from_id_salt(id_salt)
            .selected_text(RichText::new(color_text.as_str()).size(11.0))
            .width(130.0)
            .show_ui(ui, |ui| {
                for preset in presets {
                    if ui
                        .selectable_label(*color_text == *preset, preset.as_str())
                        .clicked()
                    {
                        *color_text = preset.clone();
                    }
                }
            });

        let picker = ui
            .color_edit_button_srgba(custom)
            .on_hover_text("Choose custom color");
        if picker.changed() {
            *color_text = TaskColor::from_rgb(*custom).as_str().to_string();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_keeps_the_color() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut form = TaskForm::new("plum", today);
        form.draft.name = "Design".into();
        form.draft.start = "2024-05-01".into();
        form.draft.duration = "3".into();
        form.clear();
        assert_eq!(form.draft.name, "");
        assert_eq!(form.draft.start, "");
        assert_eq!(form.draft.duration, "");
        assert_eq!(form.draft.color, "plum");
        assert_eq!(form.custom_color, Color32::from_rgb(221, 160, 221));
    }
}
