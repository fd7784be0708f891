//! Pointer handling for the chart: press/drag/release to reschedule a task,
//! double-click to edit it.
//!
//! The chart never mutates the store itself. It turns pointer input into
//! [`ChartEvent`]s, and the application applies them.

use chrono::NaiveDate;
use log::debug;

use super::hit_test::hit_test;
use crate::model::task::end_date;
use crate::model::timeline::{date_from_num, date_to_num};
use crate::model::{StoreEvent, TaskStore};

/// A point in chart coordinates: `x` in date numbers, `y` in rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pointer input already translated into chart space.
///
/// Presses, motion and double-clicks outside the plot area are not forwarded;
/// a release is always forwarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(ChartPoint),
    Motion(ChartPoint),
    Release,
    DoubleClick(ChartPoint),
}

/// Requests the chart sends back to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartEvent {
    TaskDragged { index: usize, start: NaiveDate },
    EditRequested { index: usize },
}

impl ChartEvent {
    /// The store change this event maps to directly, if any.
    pub fn into_store_event(self) -> Option<StoreEvent> {
        match self {
            ChartEvent::TaskDragged { index, start } => Some(StoreEvent::TaskDragged { index, start }),
            ChartEvent::EditRequested { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `offset` is the pointer's distance from the bar's left edge at press time,
    /// kept so the bar does not jump under the pointer.
    Dragging { index: usize, offset: f64 },
}

impl DragState {
    /// Advance the state machine by one pointer event.
    pub fn handle(&mut self, store: &TaskStore, event: PointerEvent) -> Option<ChartEvent> {
        match event {
            PointerEvent::Press(p) => {
                if let DragState::Idle = self {
                    let index = hit_test(store, p.x, p.y)?;
                    let task = store.get(index)?;
                    let offset = p.x - date_to_num(task.start);
                    debug!("drag start on row {} (offset {:.2} days)", index, offset);
                    *self = DragState::Dragging { index, offset };
                }
                None
            }
            PointerEvent::Motion(p) => {
                let DragState::Dragging { index, offset } = *self else {
                    return None;
                };
                let Some(task) = store.get(index) else {
                    *self = DragState::Idle;
                    return None;
                };
                let start = date_from_num(p.x - offset);
                // A move that would push the end past the calendar is ignored.
                end_date(start, task.duration)?;
                (start != task.start).then_some(ChartEvent::TaskDragged { index, start })
            }
            PointerEvent::Release => {
                *self = DragState::Idle;
                None
            }
            PointerEvent::DoubleClick(p) => {
                hit_test(store, p.x, p.y).map(|index| ChartEvent::EditRequested { index })
            }
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { index, .. } => Some(*index),
        }
    }
}
