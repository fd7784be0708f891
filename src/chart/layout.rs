use chrono::{Days, NaiveDate};
use egui::Color32;

use crate::model::timeline::date_to_num;
use crate::model::TaskStore;

/// Half the bar height in row units; bars fill 80% of their row.
pub const BAR_HALF_HEIGHT: f64 = 0.4;

/// Days of padding on each side of the fitted date range.
const FIT_PADDING_DAYS: u64 = 2;

/// One bar in chart coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub index: usize,
    pub label: String,
    /// Left edge as a date number.
    pub x: f64,
    /// Width in days.
    pub width: f64,
    /// Row center.
    pub y: f64,
    pub fill: Color32,
    pub text_color: Color32,
}

impl BarGeometry {
    pub fn x_end(&self) -> f64 {
        self.x + self.width
    }

    pub fn y_top(&self) -> f64 {
        self.y - BAR_HALF_HEIGHT
    }

    pub fn y_bottom(&self) -> f64 {
        self.y + BAR_HALF_HEIGHT
    }
}

/// A y-axis tick: one per task.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTick {
    pub y: f64,
    pub label: String,
}

/// Everything the painter needs to draw the chart, rebuilt from the store on every frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartLayout {
    pub bars: Vec<BarGeometry>,
    pub ticks: Vec<RowTick>,
}

impl ChartLayout {
    pub fn build(store: &TaskStore) -> Self {
        let bars = store
            .iter()
            .enumerate()
            .map(|(i, task)| BarGeometry {
                index: i,
                label: task.name.clone(),
                x: date_to_num(task.start),
                width: task.duration as f64,
                y: i as f64,
                fill: task.color.rgb(),
                text_color: task.color.contrast_text(),
            })
            .collect();
        let ticks = store
            .iter()
            .enumerate()
            .map(|(i, task)| RowTick {
                y: i as f64,
                label: task.name.clone(),
            })
            .collect();
        Self { bars, ticks }
    }

    pub fn rows(&self) -> usize {
        self.ticks.len()
    }
}

/// Date range covering every task plus padding, or `None` for an empty store.
pub fn fit_range(store: &TaskStore) -> Option<(NaiveDate, NaiveDate)> {
    let min = store.iter().map(|t| t.start).min()?;
    let max = store.iter().map(|t| t.end()).max()?;
    let pad = Days::new(FIT_PADDING_DAYS);
    Some((
        min.checked_sub_days(pad).unwrap_or(min),
        max.checked_add_days(pad).unwrap_or(max),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, TaskColor};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_bar_per_task_in_list_order() {
        let mut store = TaskStore::new();
        store.add("Design", "2024-01-01", "5", "skyblue").unwrap();
        store.add("Build", "2024-01-03", "2", "#102030").unwrap();

        let layout = ChartLayout::build(&store);
        assert_eq!(layout.bars.len(), 2);
        assert_eq!(layout.rows(), 2);

        let design = &layout.bars[0];
        assert_eq!(design.x, date_to_num(date(2024, 1, 1)));
        assert_eq!(design.x_end() - design.x, 5.0);
        assert_eq!(design.y, 0.0);
        assert_eq!((design.y_top(), design.y_bottom()), (-0.4, 0.4));
        assert_eq!(design.fill, Color32::from_rgb(135, 206, 235));

        assert_eq!(layout.bars[1].y, 1.0);
        assert_eq!(layout.ticks[1].label, "Build");
    }

    #[test]
    fn empty_store_has_no_range() {
        assert_eq!(fit_range(&TaskStore::new()), None);
    }

    #[test]
    fn range_covers_all_tasks() {
        let mut store = TaskStore::new();
        store.add("A", "2024-01-10", "5", "red").unwrap();
        store.add("B", "2024-01-01", "2", "red").unwrap();
        assert_eq!(
            fit_range(&store),
            Some((date(2023, 12, 30), date(2024, 1, 17)))
        );
    }

    #[test]
    fn range_near_the_last_date_does_not_overflow() {
        let mut store = TaskStore::new();
        let near_end = NaiveDate::MAX.checked_sub_days(Days::new(3)).unwrap();
        store.replace_all(vec![Task {
            name: "Late".into(),
            start: near_end,
            duration: 3,
            color: TaskColor::default(),
        }]);
        assert_eq!(fit_range(&store), Some((near_end - Days::new(2), NaiveDate::MAX)));
    }
}
