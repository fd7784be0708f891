use chrono::{Duration, NaiveDate};
use egui::{Pos2, Rect};

/// Date used as day zero for chart x coordinates.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Days since 1970-01-01.
pub fn date_to_num(date: NaiveDate) -> f64 {
    (date - epoch()).num_days() as f64
}

/// Convert a chart x coordinate back to a calendar day, discarding the time of day.
/// Coordinates beyond the calendar clamp to its first or last day.
pub fn date_from_num(num: f64) -> NaiveDate {
    // Absorbs float noise left by `x - offset` so an exact day never rounds down.
    let days = (num + 1e-9).floor() as i64;
    Duration::try_days(days)
        .and_then(|delta| epoch().checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Controls what granularity the date axis labels use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineScale {
    Days,
    Weeks,
    Months,
}

/// Maps chart coordinates (date number, row number) to screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartAxis {
    /// Date number shown at the left edge of the plot.
    pub start_num: f64,
    /// Date number shown at the right edge of the plot.
    pub end_num: f64,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
    /// Height of one task row in pixels.
    pub row_height: f32,
    /// Top-left corner of the plot area in screen space.
    pub origin: Pos2,
}

pub const MIN_PIXELS_PER_DAY: f32 = 2.0;
pub const MAX_PIXELS_PER_DAY: f32 = 80.0;

impl ChartAxis {
    pub fn new(start: NaiveDate, end: NaiveDate, pixels_per_day: f32, row_height: f32) -> Self {
        Self {
            start_num: date_to_num(start),
            end_num: date_to_num(end),
            pixels_per_day: pixels_per_day.clamp(MIN_PIXELS_PER_DAY, MAX_PIXELS_PER_DAY),
            row_height,
            origin: Pos2::ZERO,
        }
    }

    pub fn x_to_screen(&self, x: f64) -> f32 {
        self.origin.x + ((x - self.start_num) as f32) * self.pixels_per_day
    }

    /// Row `i` is centered at `y = i`, with row 0 at the top of the plot.
    pub fn y_to_screen(&self, y: f64) -> f32 {
        self.origin.y + (y as f32 + 0.5) * self.row_height
    }

    pub fn to_screen(&self, x: f64, y: f64) -> Pos2 {
        Pos2::new(self.x_to_screen(x), self.y_to_screen(y))
    }

    /// Inverse of [`Self::to_screen`].
    pub fn from_screen(&self, pos: Pos2) -> (f64, f64) {
        let x = self.start_num + ((pos.x - self.origin.x) / self.pixels_per_day) as f64;
        let y = ((pos.y - self.origin.y) / self.row_height) as f64 - 0.5;
        (x, y)
    }

    /// Screen rectangle spanned by a chart-space box.
    pub fn rect(&self, x0: f64, x1: f64, y0: f64, y1: f64) -> Rect {
        Rect::from_min_max(self.to_screen(x0, y0), self.to_screen(x1, y1))
    }

    /// Total plot width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        ((self.end_num - self.start_num) as f32 * self.pixels_per_day).max(0.0)
    }

    pub fn start_date(&self) -> NaiveDate {
        date_from_num(self.start_num)
    }

    /// Pick label granularity from the zoom level.
    pub fn scale(&self) -> TimelineScale {
        if self.pixels_per_day >= 20.0 {
            TimelineScale::Days
        } else if self.pixels_per_day >= 5.0 {
            TimelineScale::Weeks
        } else {
            TimelineScale::Months
        }
    }

    /// Zoom in (increase pixels per day).
    pub fn zoom_in(&mut self) {
        self.pixels_per_day = (self.pixels_per_day * 1.2).min(MAX_PIXELS_PER_DAY);
    }

    /// Zoom out (decrease pixels per day).
    pub fn zoom_out(&mut self) {
        self.pixels_per_day = (self.pixels_per_day / 1.2).max(MIN_PIXELS_PER_DAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_numbers_count_days_from_epoch() {
        assert_eq!(date_to_num(date(1970, 1, 1)), 0.0);
        assert_eq!(date_to_num(date(2024, 1, 1)), 19723.0);
        assert_eq!(date_from_num(19723.0), date(2024, 1, 1));
    }

    #[test]
    fn fractional_days_truncate() {
        assert_eq!(date_from_num(19723.99), date(2024, 1, 1));
        assert_eq!(date_from_num(19724.01), date(2024, 1, 2));
        assert_eq!(date_from_num(-0.5), date(1969, 12, 31));
        assert_eq!(date_from_num(1e18), NaiveDate::MAX);
        assert_eq!(date_from_num(-1e18), NaiveDate::MIN);
    }

    #[test]
    fn screen_mapping_round_trips() {
        let mut axis = ChartAxis::new(date(2024, 1, 1), date(2024, 2, 1), 20.0, 30.0);
        axis.origin = Pos2::new(100.0, 50.0);

        let p = axis.to_screen(19725.0, 2.0);
        assert_eq!(p, Pos2::new(140.0, 125.0));

        let (x, y) = axis.from_screen(p);
        assert!((x - 19725.0).abs() < 1e-3);
        assert!((y - 2.0).abs() < 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut axis = ChartAxis::new(date(2024, 1, 1), date(2024, 2, 1), 500.0, 30.0);
        assert_eq!(axis.pixels_per_day, MAX_PIXELS_PER_DAY);
        axis.zoom_in();
        assert_eq!(axis.pixels_per_day, MAX_PIXELS_PER_DAY);
        for _ in 0..50 {
            axis.zoom_out();
        }
        assert_eq!(axis.pixels_per_day, MIN_PIXELS_PER_DAY);
    }
}
