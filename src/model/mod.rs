pub mod color;
pub mod store;
pub mod task;
pub mod timeline;

pub use color::TaskColor;
pub use store::{EditOutcome, StoreEvent, TaskStore};
pub use task::{Task, TaskDraft};
pub use timeline::{ChartAxis, TimelineScale};
