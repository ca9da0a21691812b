#![forbid(unsafe_code)]

//! Greedy row partitioning of a flat item list.
//!
//! Items are accumulated into the current row until its spans sum to exactly
//! [`GRID_COLUMNS`]; the row is then closed. A full-width item always sits in
//! a row of its own.
//!
//! # Invariants
//! 1. Concatenating `rows` yields the input list in order.
//! 2. A full-width item is the only member of its row.
//! 3. The partitioner never fails. A run that never sums to exactly 12 is left
//!    as an open row; callers tolerate it.

use gridform_core::{GRID_COLUMNS, Item, ItemId};

/// Rows derived from one layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPartition<P> {
    pub rows: Vec<Vec<Item<P>>>,
    /// Row holding the hovered item, if it was found.
    pub over_row_index: Option<usize>,
    /// Row holding the dragged item, if it was found.
    pub active_row_index: Option<usize>,
}

impl<P> GridPartition<P> {
    /// Row index of an item.
    #[must_use]
    pub fn row_of(&self, id: &ItemId) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.iter().any(|item| &item.id == id))
    }

    /// Sum of spans per row.
    #[must_use]
    pub fn row_sums(&self) -> Vec<u32> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|item| u32::from(item.span.get())).sum())
            .collect()
    }

    /// Every row except possibly the last sums to exactly 12.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let sums = self.row_sums();
        let Some((_, complete)) = sums.split_last() else {
            return true;
        };
        complete
            .iter()
            .all(|&sum| sum == u32::from(GRID_COLUMNS))
    }

    /// Flat list index at which each row begins.
    #[must_use]
    pub fn row_starts(&self) -> Vec<usize> {
        let mut starts = Vec::with_capacity(self.rows.len());
        let mut offset = 0;
        for row in &self.rows {
            starts.push(offset);
            offset += row.len();
        }
        starts
    }

    /// Total number of items across all rows.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Group `items` into rows and report which rows hold `over` and `active`.
#[must_use]
pub fn partition<P: Clone>(
    items: &[Item<P>],
    over: Option<&ItemId>,
    active: Option<&ItemId>,
) -> GridPartition<P> {
    let full = u32::from(GRID_COLUMNS);
    let mut rows: Vec<Vec<Item<P>>> = Vec::new();
    let mut current: Vec<Item<P>> = Vec::new();
    let mut current_span = 0_u32;
    let mut over_row_index = None;
    let mut active_row_index = None;

    for item in items {
        let span = u32::from(item.span.get());
        let joins_current = !item.span.is_full() && current_span < full;

        // Attribute the item to the row it lands in.
        let landing_row = if joins_current || current.is_empty() {
            rows.len()
        } else {
            // The open row closes first; the item occupies the row after it.
            rows.len() + 1
        };
        if over == Some(&item.id) {
            over_row_index = Some(landing_row);
        }
        if active == Some(&item.id) {
            active_row_index = Some(landing_row);
        }

        if joins_current {
            current.push(item.clone());
            current_span += span;
            if current_span == full {
                rows.push(std::mem::take(&mut current));
                current_span = 0;
            }
        } else {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            rows.push(vec![item.clone()]);
            current_span = 0;
        }
    }

    if !current.is_empty() {
        rows.push(current);
    }

    GridPartition {
        rows,
        over_row_index,
        active_row_index,
    }
}
