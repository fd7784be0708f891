use super::layout::BAR_HALF_HEIGHT;
use crate::model::timeline::date_to_num;
use crate::model::TaskStore;

/// Find the task whose bar contains the chart point `(x, y)`.
///
/// Edges are inclusive on both axes. When bars overlap the lowest index wins.
pub fn hit_test(store: &TaskStore, x: f64, y: f64) -> Option<usize> {
    store.iter().enumerate().find_map(|(i, task)| {
        let start = date_to_num(task.start);
        let row = i as f64;
        let in_span = start <= x && x <= start + task.duration as f64;
        let in_row = row - BAR_HALF_HEIGHT <= y && y <= row + BAR_HALF_HEIGHT;
        (in_span && in_row).then_some(i)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TaskStore {
        let mut store = TaskStore::new();
        store.add("Design", "2024-01-01", "5", "skyblue").unwrap();
        store.add("Build", "2024-01-03", "4", "plum").unwrap();
        store
    }

    const JAN_1: f64 = 19723.0;
    const JAN_3: f64 = 19725.0;

    #[test]
    fn left_edge_at_row_center_hits() {
        let store = store();
        assert_eq!(hit_test(&store, JAN_1, 0.0), Some(0));
        assert_eq!(hit_test(&store, JAN_3, 1.0), Some(1));
    }

    #[test]
    fn right_edge_is_inclusive() {
        assert_eq!(hit_test(&store(), JAN_1 + 5.0, 0.4), Some(0));
        assert_eq!(hit_test(&store(), JAN_1 + 5.01, 0.0), None);
    }

    #[test]
    fn outside_the_bar_height_misses() {
        let store = store();
        assert_eq!(hit_test(&store, JAN_1 + 1.0, 0.41), None);
        assert_eq!(hit_test(&store, JAN_1 + 1.0, -0.41), None);
        assert_eq!(hit_test(&store, JAN_3 + 1.0, 1.41), None);
    }

    #[test]
    fn gap_between_rows_misses() {
        assert_eq!(hit_test(&store(), JAN_3 + 1.0, 0.5), None);
    }

    #[test]
    fn each_row_only_answers_for_its_own_task() {
        let mut store = store();
        store.add("Design again", "2024-01-01", "5", "red").unwrap();
        assert_eq!(hit_test(&store, JAN_1 + 2.0, 0.0), Some(0));
        assert_eq!(hit_test(&store, JAN_1 + 2.0, 2.0), Some(2));
    }

    #[test]
    fn empty_store_never_hits() {
        assert_eq!(hit_test(&TaskStore::new(), JAN_1, 0.0), None);
    }
}
