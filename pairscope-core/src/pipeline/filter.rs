//! Selection filter — narrow a dataset to brushed row positions.

use crate::domain::dataset::{DatasetView, PairDataset, Selection};

/// Resolve a selection against a dataset.
///
/// The empty selection means the entire dataset, in original order. A
/// non-empty selection yields exactly its in-range positions, preserving the
/// selection's own order (brushing may be non-contiguous and unsorted).
/// Positions beyond the dataset's row count are dropped without error: a
/// stale selection surviving an identifier change usually references rows
/// past the rebuilt dataset's bounds.
pub fn apply<'a>(dataset: &'a PairDataset, selection: &Selection) -> DatasetView<'a> {
    let positions = if selection.is_all() {
        (0..dataset.len()).collect()
    } else {
        selection
            .positions()
            .iter()
            .copied()
            .filter(|&p| p < dataset.len())
            .collect()
    };
    DatasetView::new(dataset, positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::PairRow;
    use chrono::NaiveDate;

    fn dataset(rows: usize) -> PairDataset {
        let rows = (0..rows)
            .map(|i| PairRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 2 + i as u32).unwrap(),
                first: 10.0 + i as f64,
                second: 20.0 - i as f64,
                first_return: 1.0,
                second_return: -1.0,
            })
            .collect();
        PairDataset::from_rows("A", "B", rows)
    }

    #[test]
    fn empty_selection_passes_whole_dataset_through() {
        let ds = dataset(4);
        let view = apply(&ds, &Selection::all());

        assert_eq!(view.len(), ds.len());
        let dates: Vec<_> = view.rows().map(|r| r.date).collect();
        let expected: Vec<_> = ds.rows().iter().map(|r| r.date).collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn selection_order_is_preserved() {
        let ds = dataset(5);
        let view = apply(&ds, &Selection::of(vec![3, 0, 4]));

        let firsts: Vec<f64> = view.rows().map(|r| r.first).collect();
        assert_eq!(firsts, vec![13.0, 10.0, 14.0]);
    }

    #[test]
    fn out_of_range_positions_are_dropped() {
        let ds = dataset(3);
        let view = apply(&ds, &Selection::of(vec![1, 7, 2, 100]));

        assert_eq!(view.len(), 2);
        let firsts: Vec<f64> = view.rows().map(|r| r.first).collect();
        assert_eq!(firsts, vec![11.0, 12.0]);
    }

    #[test]
    fn fully_stale_selection_yields_empty_view() {
        let ds = dataset(2);
        let view = apply(&ds, &Selection::of(vec![5, 6]));
        assert!(view.is_empty());
    }
}
