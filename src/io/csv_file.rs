use std::path::Path;

use log::{info, warn};

use crate::error::{GanttError, Result};
use crate::model::Task;

/// Header row written at the top of every task file.
pub const HEADER: [&str; 4] = ["Task Name", "Start Date", "Duration (days)", "Color"];

/// Save tasks to a comma-separated file, header first, one row per task.
/// Returns the number of tasks written.
pub fn save_csv(tasks: &[Task], path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;
    for task in tasks {
        wtr.write_record([
            task.name.as_str(),
            task.start_text().as_str(),
            task.duration.to_string().as_str(),
            task.color.as_str(),
        ])?;
    }
    wtr.flush().map_err(|source| GanttError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("saved {} tasks to {}", tasks.len(), path.display());
    Ok(tasks.len())
}

/// Load tasks from a file written by [`save_csv`].
///
/// The first row is skipped as a header. Every remaining row must parse; the
/// first bad row fails the whole load so the caller can keep its current tasks.
pub fn load_csv(path: &Path) -> Result<Vec<Task>> {
    let content = std::fs::read_to_string(path).map_err(|source| GanttError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tasks = parse_csv(&content)?;
    info!("loaded {} tasks from {}", tasks.len(), path.display());
    Ok(tasks)
}

/// Parse file contents. Split out from [`load_csv`] so it can run on in-memory text.
pub fn parse_csv(content: &str) -> Result<Vec<Task>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut tasks = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() > HEADER.len() {
            warn!("line {}: ignoring {} extra column(s)", line, record.len() - HEADER.len());
        }
        let mut fields = [""; 4];
        for (i, slot) in fields.iter_mut().enumerate() {
            *slot = record.get(i).ok_or(GanttError::MissingField {
                line,
                field: HEADER[i],
            })?;
        }
        let [name, start, duration, color] = fields;

        let task = Task::parse(name, start, duration, color)
            .map_err(|source| GanttError::Row { line, source })?;
        tasks.push(task);
    }
    Ok(tasks)
}
