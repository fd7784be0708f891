use chrono::{Datelike, Days, Duration, Months, NaiveDate};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::chart::layout::BarGeometry;
use crate::chart::{fit_range, hit_test, ChartEvent, ChartLayout, ChartPoint, DragState, PointerEvent};
use crate::model::timeline::{date_from_num, date_to_num};
use crate::model::{ChartAxis, TaskStore, TimelineScale};
use crate::ui::dialogs::{self, DialogAction, EditDialog};
use crate::ui::theme;

/// The chart window: whether it is open, how it maps dates to pixels, and the drag state.
#[derive(Debug, Clone)]
pub struct ChartView {
    pub open: bool,
    pub axis: ChartAxis,
    pub drag: DragState,
}

impl ChartView {
    pub fn new(pixels_per_day: f32) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            open: false,
            axis: ChartAxis::new(
                today - Duration::days(7),
                today + Duration::days(30),
                pixels_per_day,
                theme::ROW_HEIGHT,
            ),
            drag: DragState::Idle,
        }
    }

    pub fn open(&mut self, store: &TaskStore) {
        self.fit(store);
        self.drag = DragState::Idle;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.drag = DragState::Idle;
        self.open = false;
    }

    /// Fit the visible date range to the tasks.
    pub fn fit(&mut self, store: &TaskStore) {
        if let Some((start, end)) = fit_range(store) {
            self.axis.start_num = date_to_num(start);
            self.axis.end_num = date_to_num(end);
        }
    }
}

/// What happened in the chart window this frame.
#[derive(Debug, Default)]
pub struct ChartInteraction {
    pub events: Vec<ChartEvent>,
    pub dialog: Option<DialogAction>,
    pub closed: bool,
}

/// Show the chart in its own native window, or as an embedded window when the
/// backend cannot open more viewports. The edit dialog, when open, is shown on
/// top of the chart and blocks pointer input to it.
pub fn show_chart_viewport(
    ctx: &egui::Context,
    view: &mut ChartView,
    store: &TaskStore,
    mut edit: Option<&mut EditDialog>,
    presets: &[String],
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let interactive = edit.is_none();

    ctx.show_viewport_immediate(
        egui::ViewportId::from_hash_of("gantt_chart"),
        egui::ViewportBuilder::default()
            .with_title("Gantt Chart")
            .with_inner_size([1000.0, 480.0])
            .with_min_inner_size([480.0, 240.0]),
        |ctx, class| {
            if class == egui::ViewportClass::Embedded {
                let mut still_open = true;
                egui::Window::new("Gantt Chart")
                    .open(&mut still_open)
                    .default_size([900.0, 420.0])
                    .show(ctx, |ui| {
                        interaction.events = show_gantt_chart(view, store, interactive, ui);
                    });
                interaction.closed = !still_open;
            } else {
                let frame = egui::Frame::default()
                    .fill(theme::BG_CANVAS)
                    .inner_margin(egui::Margin::ZERO);
                egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
                    interaction.events = show_gantt_chart(view, store, interactive, ui);
                });
                if ctx.input(|i| i.viewport().close_requested()) {
                    interaction.closed = true;
                }
            }

            if let Some(dialog) = edit.as_deref_mut() {
                interaction.dialog = Some(dialogs::show_edit_dialog(dialog, presets, ctx));
            }
        },
    );

    interaction
}

/// Render the chart and run pointer input through the drag state machine.
pub fn show_gantt_chart(
    view: &mut ChartView,
    store: &TaskStore,
    interactive: bool,
    ui: &mut Ui,
) -> Vec<ChartEvent> {
    let layout = ChartLayout::build(store);

    // Handle zoom with ctrl + scroll wheel
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            view.axis.zoom_in();
        } else if scroll_delta.y < 0.0 {
            view.axis.zoom_out();
        }
    }

    let available = ui.available_size();
    let plot_width = view.axis.total_width().max(available.x - theme::LABEL_GUTTER);
    let chart_width = theme::LABEL_GUTTER + plot_width;
    let chart_height = (theme::HEADER_HEIGHT + layout.rows() as f32 * theme::ROW_HEIGHT + 20.0)
        .max(available.y);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(chart_width, chart_height), Sense::click_and_drag());
            let canvas = response.rect;
            let plot_rect = Rect::from_min_max(
                Pos2::new(canvas.left() + theme::LABEL_GUTTER, canvas.top() + theme::HEADER_HEIGHT),
                canvas.max,
            );
            view.axis.origin = plot_rect.min;

            painter.rect_filled(canvas, 0.0, theme::BG_CANVAS);
            draw_rows(&painter, &view.axis, &layout, plot_rect);
            draw_timeline_header(&painter, &view.axis, canvas, plot_rect);
            draw_today_line(&painter, &view.axis, plot_rect);
            draw_row_labels(&painter, &view.axis, &layout, canvas, plot_rect);

            let selected = view.drag.selected();
            let bar_painter = painter.with_clip_rect(plot_rect);
            for bar in &layout.bars {
                draw_task_bar(&bar_painter, &view.axis, bar, selected == Some(bar.index));
            }

            let mut events = Vec::new();
            if !interactive {
                return events;
            }

            for pointer in pointer_events(ui, &response, plot_rect, &view.axis, view.drag) {
                if let Some(event) = view.drag.handle(store, pointer) {
                    events.push(event);
                }
            }

            if let DragState::Dragging { .. } = view.drag {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            } else if let Some(pos) = response.hover_pos().filter(|p| plot_rect.contains(*p)) {
                let (x, y) = view.axis.from_screen(pos);
                if let Some(task) = hit_test(store, x, y).and_then(|i| store.get(i)) {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new("task-tip"),
                        |ui| {
                            ui.strong(&task.name);
                            ui.label(format!(
                                "{} → {}",
                                task.start_text(),
                                task.end().pred_opt().unwrap_or(task.start).format("%Y-%m-%d"),
                            ));
                            ui.label(format!("{} day(s)", task.duration));
                        },
                    );
                }
            }
            events
        })
        .inner
}

/// Translate this frame's raw pointer input into chart-space events.
///
/// Press, motion and double-click only count inside the plot area; release
/// counts anywhere, and a drag whose release was missed is ended.
fn pointer_events(
    ui: &Ui,
    response: &egui::Response,
    plot_rect: Rect,
    axis: &ChartAxis,
    drag: DragState,
) -> Vec<PointerEvent> {
    let (pressed, released, down, moved, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.primary_down(),
            i.pointer.delta() != Vec2::ZERO,
            i.pointer.interact_pos(),
        )
    });
    let to_point = |p: Pos2| {
        let (x, y) = axis.from_screen(p);
        ChartPoint::new(x, y)
    };
    let in_plot = pos.filter(|p| plot_rect.contains(*p)).map(to_point);
    let dragging = matches!(drag, DragState::Dragging { .. });

    let mut out = Vec::new();
    if let Some(point) = in_plot {
        if pressed && response.hovered() {
            out.push(PointerEvent::Press(point));
        }
        if moved && down && dragging {
            out.push(PointerEvent::Motion(point));
        }
        if response.double_clicked() {
            out.push(PointerEvent::DoubleClick(point));
        }
    }
    if released || (dragging && !down && !pressed) {
        out.push(PointerEvent::Release);
    }
    out
}

fn draw_rows(painter: &egui::Painter, axis: &ChartAxis, layout: &ChartLayout, plot_rect: Rect) {
    for tick in &layout.ticks {
        let top = axis.y_to_screen(tick.y - 0.5);
        if tick.y as usize % 2 == 1 {
            painter.rect_filled(
                Rect::from_min_max(
                    Pos2::new(plot_rect.left(), top),
                    Pos2::new(plot_rect.right(), top + axis.row_height),
                ),
                0.0,
                theme::BG_ROW_ALT,
            );
        }
        // Horizontal grid line through the row center, one per y tick.
        let y = axis.y_to_screen(tick.y);
        painter.line_segment(
            [Pos2::new(plot_rect.left(), y), Pos2::new(plot_rect.right(), y)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn draw_row_labels(
    painter: &egui::Painter,
    axis: &ChartAxis,
    layout: &ChartLayout,
    canvas: Rect,
    plot_rect: Rect,
) {
    let gutter = Rect::from_min_max(
        Pos2::new(canvas.left(), plot_rect.top()),
        Pos2::new(plot_rect.left(), canvas.bottom()),
    );
    painter.rect_filled(gutter, 0.0, theme::BG_PANEL);
    painter.line_segment(
        [
            Pos2::new(plot_rect.left(), plot_rect.top()),
            Pos2::new(plot_rect.left(), canvas.bottom()),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let clipped = painter.with_clip_rect(gutter.shrink2(Vec2::new(6.0, 0.0)));
    for tick in &layout.ticks {
        clipped.text(
            Pos2::new(gutter.right() - 8.0, axis.y_to_screen(tick.y)),
            egui::Align2::RIGHT_CENTER,
            &tick.label,
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );
    }
}

fn draw_timeline_header(painter: &egui::Painter, axis: &ChartAxis, canvas: Rect, plot_rect: Rect) {
    let header = Rect::from_min_max(canvas.min, Pos2::new(canvas.right(), plot_rect.top()));
    painter.rect_filled(header, 0.0, theme::BG_HEADER);
    painter.line_segment(
        [header.left_bottom(), header.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let columns = painter.with_clip_rect(Rect::from_min_max(
        Pos2::new(plot_rect.left(), canvas.top()),
        canvas.max,
    ));
    let grid_line = |x: f32| {
        columns.line_segment(
            [Pos2::new(x, plot_rect.top()), Pos2::new(x, plot_rect.bottom())],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    };
    let label = |x: f32, y_offset: f32, text: String, primary: bool| {
        let (font, color) = if primary {
            (theme::font_header(), theme::TEXT_PRIMARY)
        } else {
            (theme::font_sub(), theme::TEXT_SECONDARY)
        };
        columns.text(
            Pos2::new(x + 3.0, canvas.top() + y_offset),
            egui::Align2::LEFT_CENTER,
            text,
            font,
            color,
        );
    };

    let mut date = axis.start_date();
    let (right_num, _) = axis.from_screen(plot_rect.right_top());
    let end = date_from_num(right_num);

    match axis.scale() {
        TimelineScale::Days => {
            while date <= end {
                let x = axis.x_to_screen(date_to_num(date));
                grid_line(x);
                label(x, 28.0, date.format("%d").to_string(), false);
                if date.day() == 1 || date == axis.start_date() {
                    label(x, 12.0, date.format("%b %Y").to_string(), true);
                }
                match date.checked_add_days(Days::new(1)) {
                    Some(next) => date = next,
                    None => break,
                }
            }
        }
        TimelineScale::Weeks => {
            let weekday = date.weekday().num_days_from_monday();
            date = date.checked_sub_days(Days::new(weekday as u64)).unwrap_or(date);
            while date <= end {
                let x = axis.x_to_screen(date_to_num(date));
                grid_line(x);
                label(x, 28.0, date.format("W%V").to_string(), false);
                if date.day() <= 7 {
                    label(x, 12.0, date.format("%b %Y").to_string(), true);
                }
                match date.checked_add_days(Days::new(7)) {
                    Some(next) => date = next,
                    None => break,
                }
            }
        }
        TimelineScale::Months => {
            date = date.with_day(1).unwrap_or(date);
            while date <= end {
                let x = axis.x_to_screen(date_to_num(date));
                grid_line(x);
                label(x, 20.0, date.format("%b %Y").to_string(), true);
                match date.checked_add_months(Months::new(1)) {
                    Some(next) => date = next,
                    None => break,
                }
            }
        }
    }
}

fn draw_today_line(painter: &egui::Painter, axis: &ChartAxis, plot_rect: Rect) {
    let today: NaiveDate = chrono::Local::now().date_naive();
    let x = axis.x_to_screen(date_to_num(today));
    if x < plot_rect.left() || x > plot_rect.right() {
        return;
    }
    painter.line_segment(
        [Pos2::new(x, plot_rect.top()), Pos2::new(x, plot_rect.bottom())],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, plot_rect.top() - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_task_bar(painter: &egui::Painter, axis: &ChartAxis, bar: &BarGeometry, is_selected: bool) {
    let bar_rect = axis.rect(bar.x, bar.x_end(), bar.y_top(), bar.y_bottom());
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(bar_rect, rounding, bar.fill);
    painter.rect_stroke(bar_rect, rounding, Stroke::new(0.75, theme::BAR_OUTLINE));

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Label anchored at the bar's left edge; may run past a short bar.
    painter.text(
        Pos2::new(bar_rect.left() + 5.0, bar_rect.center().y),
        egui::Align2::LEFT_CENTER,
        &bar.label,
        theme::font_bar(),
        bar.text_color,
    );
}
