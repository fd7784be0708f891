use chrono::{Duration, NaiveDate};

use super::color::TaskColor;
use crate::error::ValidationError;

/// Date format used by the form, the edit dialog, and the CSV file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single task bar in the Gantt chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub start: NaiveDate,
    /// Length in whole days, always at least one.
    pub duration: i64,
    pub color: TaskColor,
}

impl Task {
    /// Build a task from raw text fields, validating date, duration and color.
    pub fn parse(
        name: &str,
        start_text: &str,
        duration_text: &str,
        color_text: &str,
    ) -> Result<Self, ValidationError> {
        let start = parse_start(start_text)?;
        let duration = parse_duration(duration_text)?;
        if end_date(start, duration).is_none() {
            return Err(ValidationError::DurationOutOfRange(duration));
        }
        let color = TaskColor::parse(color_text)?;
        Ok(Self {
            name: name.to_string(),
            start,
            duration,
            color,
        })
    }

    /// First day after the task (exclusive end).
    pub fn end(&self) -> NaiveDate {
        end_date(self.start, self.duration).unwrap_or(NaiveDate::MAX)
    }

    pub fn start_text(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }
}

/// Exclusive end of a task, or `None` when it falls outside the calendar.
pub fn end_date(start: NaiveDate, duration: i64) -> Option<NaiveDate> {
    start.checked_add_signed(Duration::try_days(duration)?)
}

pub fn parse_start(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(text.to_string()))
}

pub fn parse_duration(text: &str) -> Result<i64, ValidationError> {
    let days: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidDuration(text.to_string()))?;
    if days < 1 {
        return Err(ValidationError::NonPositiveDuration(days));
    }
    Ok(days)
}

/// The four text fields of the form or the edit dialog, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub start: String,
    pub duration: String,
    pub color: String,
}

impl TaskDraft {
    /// Pre-fill the fields from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            start: task.start_text(),
            duration: task.duration.to_string(),
            color: task.color.as_str().to_string(),
        }
    }

    /// True when no field is empty; an edit with an empty field is dropped.
    /// Whitespace counts as a value and is left to validation.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.start, &self.duration, &self.color]
            .iter()
            .all(|field| !field.is_empty())
    }

    pub fn to_task(&self) -> Result<Task, ValidationError> {
        Task::parse(&self.name, &self.start, &self.duration, &self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_fields() {
        let task = Task::parse("Design", "2024-01-01", "5", "skyblue").unwrap();
        assert_eq!(task.name, "Design");
        assert_eq!(task.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(task.duration, 5);
        assert_eq!(task.end(), NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
        assert_eq!(task.start_text(), "2024-01-01");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let task = Task::parse("Build", " 2024-02-29 ", " 3 ", "plum").unwrap();
        assert_eq!(task.start, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(task.duration, 3);
    }

    #[test]
    fn date_is_checked_before_duration() {
        assert_eq!(
            Task::parse("", "not-a-date", "x", "red"),
            Err(ValidationError::InvalidDate("not-a-date".into()))
        );
    }

    #[test]
    fn rejects_bad_dates() {
        for bad in ["2024/01/01", "01-01-2024", "2023-02-29", ""] {
            assert!(matches!(
                parse_start(bad),
                Err(ValidationError::InvalidDate(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_durations() {
        assert_eq!(
            parse_duration("2.5"),
            Err(ValidationError::InvalidDuration("2.5".into()))
        );
        assert_eq!(parse_duration("0"), Err(ValidationError::NonPositiveDuration(0)));
        assert_eq!(parse_duration("-4"), Err(ValidationError::NonPositiveDuration(-4)));
    }

    #[test]
    fn rejects_durations_running_off_the_calendar() {
        assert_eq!(
            Task::parse("Long", "9999-12-31", "100000000", "red"),
            Err(ValidationError::DurationOutOfRange(100_000_000))
        );
        assert_eq!(
            Task::parse("Longer", "2024-01-01", &i64::MAX.to_string(), "red"),
            Err(ValidationError::DurationOutOfRange(i64::MAX))
        );
        assert!(end_date(NaiveDate::MAX, 1).is_none());
        assert!(Task::parse("Last day", &NaiveDate::MAX.to_string(), "1", "red").is_err());
    }

    #[test]
    fn end_saturates_after_a_far_move() {
        let mut task = Task::parse("Moved", "2024-01-01", "10", "red").unwrap();
        task.start = NaiveDate::MAX;
        assert_eq!(task.end(), NaiveDate::MAX);
    }

    #[test]
    fn draft_round_trips_a_task() {
        let task = Task::parse("Review", "2024-03-10", "2", "#ff8800").unwrap();
        let draft = TaskDraft::from_task(&task);
        assert!(draft.is_complete());
        assert_eq!(draft.to_task().unwrap(), task);
    }

    #[test]
    fn draft_with_blank_field_is_incomplete() {
        let mut draft = TaskDraft {
            name: "A".into(),
            start: "2024-01-01".into(),
            duration: "1".into(),
            color: "red".into(),
        };
        assert!(draft.is_complete());
        draft.color = String::new();
        assert!(!draft.is_complete());

        draft.color = "  ".into();
        assert!(draft.is_complete());
        assert_eq!(
            draft.to_task(),
            Err(ValidationError::UnknownColor("  ".into()))
        );
    }
}
