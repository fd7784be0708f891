use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::chart::{ChartEvent, DragState};
use crate::config::AppSettings;
use crate::error::{GanttError, Result};
use crate::model::{EditOutcome, StoreEvent, TaskStore};
use crate::ui;
use crate::ui::dialogs::{DialogAction, EditDialog};
use crate::ui::gantt_chart::ChartView;
use crate::ui::task_form::{FormAction, TaskForm};

/// Main application state.
pub struct GanttApp {
    pub store: TaskStore,
    pub form: TaskForm,
    pub chart: ChartView,
    pub edit_dialog: Option<EditDialog>,
    pub file_path: Option<PathBuf>,
    pub settings: AppSettings,
    settings_path: PathBuf,

    // Status message
    pub status_message: String,
    pub show_about: bool,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = AppSettings::settings_path();
        let settings = AppSettings::load(&settings_path);
        info!("settings loaded from {}", settings_path.display());
        Self::with_settings(settings, settings_path)
    }

    pub fn with_settings(settings: AppSettings, settings_path: PathBuf) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            store: TaskStore::new(),
            form: TaskForm::new(&settings.default_color, today),
            chart: ChartView::new(settings.pixels_per_day),
            edit_dialog: None,
            file_path: None,
            settings,
            settings_path,
            status_message: "Ready".to_string(),
            show_about: false,
        }
    }

    // --- Task operations ---

    /// Add the task described by the form, then clear the form.
    pub fn submit_form(&mut self) -> Result<()> {
        let draft = &self.form.draft;
        let task = self
            .store
            .add(&draft.name, &draft.start, &draft.duration, &draft.color)?;
        info!("added task '{}' starting {}", task.name, task.start_text());
        self.status_message = format!("Task '{}' added", task.name);
        self.form.clear();
        Ok(())
    }

    pub fn add_task(&mut self) {
        if let Err(e) = self.submit_form() {
            self.report_error(&e);
        }
    }

    /// Open the chart window. Refused when there is nothing to draw.
    pub fn try_show_chart(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return Err(GanttError::EmptyChart);
        }
        self.chart.open(&self.store);
        self.status_message = format!("Showing {} task(s)", self.store.len());
        Ok(())
    }

    pub fn show_chart(&mut self) {
        if let Err(e) = self.try_show_chart() {
            self.report_error(&e);
        }
    }

    /// Apply a request coming from the chart.
    pub fn handle_chart_event(&mut self, event: ChartEvent) -> Result<()> {
        if let ChartEvent::EditRequested { index } = event {
            if let Some(task) = self.store.get(index) {
                debug!("opening editor for row {}", index);
                self.edit_dialog = Some(EditDialog::new(index, task));
            }
            return Ok(());
        }
        if let Some(change) = event.into_store_event() {
            self.apply_store_event(change)?;
        }
        Ok(())
    }

    /// Close the edit dialog, committing its fields on confirm.
    pub fn finish_edit(&mut self, action: DialogAction) -> Result<()> {
        match action {
            DialogAction::None => Ok(()),
            DialogAction::Cancel => {
                self.edit_dialog = None;
                self.status_message = "Edit cancelled".to_string();
                Ok(())
            }
            DialogAction::Confirm => {
                let Some(dialog) = self.edit_dialog.take() else {
                    return Ok(());
                };
                self.apply_store_event(StoreEvent::TaskEdited {
                    index: dialog.index,
                    draft: dialog.draft,
                })
            }
        }
    }

    fn apply_store_event(&mut self, event: StoreEvent) -> Result<()> {
        let index = match &event {
            StoreEvent::TaskDragged { index, .. } | StoreEvent::TaskEdited { index, .. } => *index,
        };
        let dragged = matches!(event, StoreEvent::TaskDragged { .. });
        let outcome = self.store.apply(event)?;
        match (outcome, self.store.get(index)) {
            (EditOutcome::Applied, Some(task)) if dragged => {
                debug!("row {} moved to {}", index, task.start_text());
                self.status_message = format!("Moved '{}' to {}", task.name, task.start_text());
            }
            (EditOutcome::Applied, Some(task)) => {
                info!("row {} edited: '{}'", index, task.name);
                self.status_message = format!("Task '{}' updated", task.name);
            }
            _ => {
                debug!("change to row {} dropped", index);
                self.status_message = "Edit discarded".to_string();
            }
        }
        Ok(())
    }

    // --- File operations ---

    pub fn save_to_path(&mut self, path: &Path) -> Result<usize> {
        let count = crate::io::save_csv(self.store.export(), path)?;
        self.file_path = Some(path.to_path_buf());
        self.remember_directory(path);
        self.status_message = format!("Saved {} task(s) to {}", count, path.display());
        Ok(count)
    }

    /// Replace all tasks with the file's contents. On any error the current tasks stay.
    pub fn load_from_path(&mut self, path: &Path) -> Result<usize> {
        let tasks = crate::io::load_csv(path)?;
        let count = tasks.len();
        self.store.replace_all(tasks);
        self.edit_dialog = None;
        self.chart.drag = DragState::Idle;
        if self.store.is_empty() {
            self.chart.close();
        } else {
            self.chart.fit(&self.store);
        }
        self.file_path = Some(path.to_path_buf());
        self.remember_directory(path);
        self.status_message = format!("Loaded {} task(s) from {}", count, path.display());
        Ok(count)
    }

    pub fn save_to_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name("tasks.csv");
        if let Some(dir) = &self.settings.last_directory {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            if let Err(e) = self.save_to_path(&path) {
                self.report_error(&e);
            }
        }
    }

    /// Ctrl+S: write to the current file, or ask for one.
    pub fn quick_save(&mut self) {
        match self.file_path.clone() {
            Some(path) => {
                if let Err(e) = self.save_to_path(&path) {
                    self.report_error(&e);
                }
            }
            None => self.save_to_dialog(),
        }
    }

    pub fn load_from_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("CSV files", &["csv"]);
        if let Some(dir) = &self.settings.last_directory {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            if let Err(e) = self.load_from_path(&path) {
                self.report_error(&e);
            }
        }
    }

    fn remember_directory(&mut self, path: &Path) {
        let dir = path.parent().map(Path::to_path_buf);
        if dir.is_some() && dir != self.settings.last_directory {
            self.settings.last_directory = dir;
            self.persist_settings();
        }
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            warn!("could not save settings to {}: {}", self.settings_path.display(), e);
        }
    }

    /// Show a blocking error box. The application state is left as it was.
    fn report_error(&mut self, err: &GanttError) {
        warn!("{}", err);
        self.status_message = format!("Error: {}", err);
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title("Error")
            .set_description(err.to_string())
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn close_chart(&mut self) {
        self.chart.close();
        self.edit_dialog = None;
        if self.settings.pixels_per_day != self.chart.axis.pixels_per_day {
            self.settings.pixels_per_day = self.chart.axis.pixels_per_day;
            self.persist_settings();
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.quick_save();
        }

        // Top panel: menu bar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.store.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: entry form and task list
        let mut form_action = FormAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            form_action =
                ui::task_form::show_task_form(&mut self.form, &self.settings.presets, ui);
            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);
            ui::task_table::show_task_table(&self.store, self.chart.drag.selected(), ui);
        });

        match form_action {
            FormAction::AddTask => self.add_task(),
            FormAction::ShowChart => self.show_chart(),
            FormAction::Save => self.save_to_dialog(),
            FormAction::Load => self.load_from_dialog(),
            FormAction::None => {}
        }

        // Chart window
        if self.chart.open {
            let interaction = ui::gantt_chart::show_chart_viewport(
                ctx,
                &mut self.chart,
                &self.store,
                self.edit_dialog.as_mut(),
                &self.settings.presets,
            );
            if interaction.closed {
                self.close_chart();
            } else {
                let redraw = !interaction.events.is_empty();
                for event in interaction.events {
                    if let Err(e) = self.handle_chart_event(event) {
                        self.report_error(&e);
                    }
                }
                if let Some(action) = interaction.dialog {
                    if let Err(e) = self.finish_edit(action) {
                        self.report_error(&e);
                    }
                }
                if redraw {
                    ctx.request_repaint();
                }
            }
        }

        if self.show_about {
            ui::dialogs::show_about_dialog(&mut self.show_about, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::model::TaskDraft;
    use chrono::NaiveDate;

    fn app(dir: &tempfile::TempDir) -> GanttApp {
        GanttApp::with_settings(AppSettings::default(), dir.path().join("settings.json"))
    }

    fn fill_form(app: &mut GanttApp, name: &str, start: &str, duration: &str, color: &str) {
        app.form.draft = TaskDraft {
            name: name.into(),
            start: start.into(),
            duration: duration.into(),
            color: color.into(),
        };
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn submitting_the_form_appends_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        fill_form(&mut app, "Design", "2024-01-01", "5", "lightgreen");
        app.submit_form().unwrap();

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.get(0).unwrap().name, "Design");
        assert!(app.form.draft.name.is_empty());
        assert!(app.form.draft.start.is_empty());
        assert!(app.form.draft.duration.is_empty());
        assert_eq!(app.form.draft.color, "lightgreen");
    }

    #[test]
    fn invalid_form_keeps_fields_and_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        fill_form(&mut app, "", "not-a-date", "x", "red");
        let err = app.submit_form().unwrap_err();
        assert!(matches!(
            err,
            GanttError::Validation(ValidationError::InvalidDate(_))
        ));
        assert!(app.store.is_empty());
        assert_eq!(app.form.draft.start, "not-a-date");
    }

    #[test]
    fn empty_chart_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        assert!(matches!(app.try_show_chart(), Err(GanttError::EmptyChart)));
        assert!(!app.chart.open);

        fill_form(&mut app, "Design", "2024-01-01", "5", "skyblue");
        app.submit_form().unwrap();
        app.try_show_chart().unwrap();
        assert!(app.chart.open);
    }

    #[test]
    fn double_click_edit_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        fill_form(&mut app, "Design", "2024-01-01", "5", "skyblue");
        app.submit_form().unwrap();

        app.handle_chart_event(ChartEvent::EditRequested { index: 0 }).unwrap();
        let dialog = app.edit_dialog.as_mut().expect("dialog opens");
        assert_eq!(dialog.draft.start, "2024-01-01");
        assert_eq!(dialog.draft.duration, "5");
        dialog.draft.name = "Design review".into();
        dialog.draft.duration = "7".into();

        app.finish_edit(DialogAction::Confirm).unwrap();
        assert!(app.edit_dialog.is_none());
        let task = app.store.get(0).unwrap();
        assert_eq!(task.name, "Design review");
        assert_eq!(task.duration, 7);
    }

    #[test]
    fn invalid_edit_is_reported_and_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        fill_form(&mut app, "Design", "2024-01-01", "5", "skyblue");
        app.submit_form().unwrap();
        let before = app.store.clone();

        app.handle_chart_event(ChartEvent::EditRequested { index: 0 }).unwrap();
        app.edit_dialog.as_mut().unwrap().draft.duration = "five".into();
        assert!(app.finish_edit(DialogAction::Confirm).is_err());
        assert!(app.edit_dialog.is_none());
        assert_eq!(app.store, before);
    }

    #[test]
    fn cancelled_or_blank_edit_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        fill_form(&mut app, "Design", "2024-01-01", "5", "skyblue");
        app.submit_form().unwrap();
        let before = app.store.clone();

        app.handle_chart_event(ChartEvent::EditRequested { index: 0 }).unwrap();
        app.edit_dialog.as_mut().unwrap().draft.name = "Renamed".into();
        app.finish_edit(DialogAction::Cancel).unwrap();
        assert_eq!(app.store, before);

        app.handle_chart_event(ChartEvent::EditRequested { index: 0 }).unwrap();
        app.edit_dialog.as_mut().unwrap().draft.color = String::new();
        app.finish_edit(DialogAction::Confirm).unwrap();
        assert_eq!(app.store, before);
    }

    #[test]
    fn drag_event_moves_task() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        fill_form(&mut app, "Design", "2024-01-01", "5", "skyblue");
        app.submit_form().unwrap();

        app.handle_chart_event(ChartEvent::TaskDragged {
            index: 0,
            start: date(2024, 1, 4),
        })
        .unwrap();
        assert_eq!(app.store.get(0).unwrap().start, date(2024, 1, 4));
        assert!(app.status_message.contains("2024-01-04"));
    }

    #[test]
    fn save_and_load_round_trip_and_remember_folder() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        fill_form(&mut app, "Design", "2024-01-01", "5", "skyblue");
        app.submit_form().unwrap();
        fill_form(&mut app, "Build", "2024-01-06", "3", "#336699");
        app.submit_form().unwrap();

        let path = dir.path().join("plan.csv");
        assert_eq!(app.save_to_path(&path).unwrap(), 2);
        assert_eq!(app.settings.last_directory.as_deref(), Some(dir.path()));

        let mut other = GanttApp::with_settings(AppSettings::default(), dir.path().join("s2.json"));
        assert_eq!(other.load_from_path(&path).unwrap(), 2);
        assert_eq!(other.store, app.store);
    }

    #[test]
    fn failed_load_keeps_current_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        fill_form(&mut app, "Design", "2024-01-01", "5", "skyblue");
        app.submit_form().unwrap();
        let before = app.store.clone();

        let path = dir.path().join("broken.csv");
        std::fs::write(
            &path,
            "Task Name,Start Date,Duration (days),Color\nA,2024-01-01,3,red\nB,2024-01-02,x,red\n",
        )
        .unwrap();
        assert!(matches!(
            app.load_from_path(&path),
            Err(GanttError::Row { line: 3, .. })
        ));
        assert_eq!(app.store, before);
    }
}
