//! GUI-independent chart logic: geometry, hit-testing and pointer interaction.

pub mod hit_test;
pub mod interaction;
pub mod layout;

pub use hit_test::hit_test;
pub use interaction::{ChartEvent, ChartPoint, DragState, PointerEvent};
pub use layout::{fit_range, ChartLayout};
