use std::path::PathBuf;

/// Input that could not be turned into a task field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid duration '{0}': expected a whole number of days")]
    InvalidDuration(String),
    #[error("Invalid duration {0}: a task must last at least one day")]
    NonPositiveDuration(i64),
    #[error("Invalid duration {0}: the task would end past the last supported date")]
    DurationOutOfRange(i64),
    #[error("Unknown color '{0}': use a CSS color name or #RRGGBB")]
    UnknownColor(String),
}

/// Every failure the application reports to the user.
#[derive(thiserror::Error, Debug)]
pub enum GanttError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No tasks to show")]
    EmptyChart,
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: ValidationError,
    },
    #[error("Line {line}: missing '{field}' column")]
    MissingField { line: u64, field: &'static str },
}

pub type Result<T, E = GanttError> = std::result::Result<T, E>;
