#![forbid(unsafe_code)]

//! Span rebalancing for rows that gained or lost a member.
//!
//! Two policies:
//!
//! - **Vertical insertion** (`top` / `bottom`): the moved item becomes a
//!   full-width row of its own. Nothing else is touched.
//! - **Horizontal insertion** (`left` / `right` / none): every member of the
//!   row is scaled by `12 / total` so relative widths survive, each result is
//!   floored at one column, and the rounding remainder is applied to the last
//!   member of the row.
//!
//! # Invariants
//! 1. A rebalanced row of at most 12 members sums to exactly 12.
//! 2. Every rebalanced span is at least 1.
//! 3. The output list has the input's order; only ids in the row change.
//!
//! # Failure Modes
//! An empty row, or one with more members than there are columns, cannot be
//! rebalanced. The list is returned unchanged.

use gridform_core::{GRID_COLUMNS, Item, ItemId, Span};
use rustc_hash::FxHashMap;

use crate::classify::EdgePosition;

/// Rebalance `row_items` inside `full_list` for a drop at `edge`.
///
/// Returns a new list in `full_list` order. Items not named by the active
/// policy keep their spans.
#[must_use]
pub fn rebalance<P: Clone>(
    row_items: &[Item<P>],
    full_list: &[Item<P>],
    moved: &Item<P>,
    edge: Option<EdgePosition>,
) -> Vec<Item<P>> {
    if edge.is_some_and(EdgePosition::is_vertical) {
        return full_list
            .iter()
            .map(|item| {
                if item.id == moved.id {
                    item.with_span(Span::FULL)
                } else {
                    item.clone()
                }
            })
            .collect();
    }

    let spans: Vec<Span> = row_items.iter().map(|item| item.span).collect();
    let Some(scaled) = rebalance_spans(&spans) else {
        return full_list.to_vec();
    };
    let updates: FxHashMap<&ItemId, Span> = row_items
        .iter()
        .map(|item| &item.id)
        .zip(scaled)
        .collect();

    full_list
        .iter()
        .map(|item| match updates.get(&item.id) {
            Some(&span) => item.with_span(span),
            None => item.clone(),
        })
        .collect()
}

/// Scale `spans` so they sum to exactly 12.
///
/// Returns `None` for an empty row or a row with more than 12 members.
#[must_use]
pub fn rebalance_spans(spans: &[Span]) -> Option<Vec<Span>> {
    let columns = i64::from(GRID_COLUMNS);
    if spans.is_empty() || spans.len() > usize::from(GRID_COLUMNS) {
        return None;
    }
    let total: i64 = spans.iter().map(|span| i64::from(span.get())).sum();
    if total == 0 {
        return None;
    }

    let mut scaled: Vec<i64> = spans
        .iter()
        .map(|span| round_half_up(i64::from(span.get()) * columns, total).max(1))
        .collect();

    let difference = columns - scaled.iter().sum::<i64>();
    let last = scaled.len() - 1;
    scaled[last] += difference;

    // Keep the floor: anything the last member cannot give back comes from
    // its predecessors, nearest first.
    if scaled[last] < 1 {
        let mut deficit = 1 - scaled[last];
        scaled[last] = 1;
        for value in scaled[..last].iter_mut().rev() {
            if deficit == 0 {
                break;
            }
            let give = deficit.min(*value - 1);
            *value -= give;
            deficit -= give;
        }
    }

    Some(scaled.into_iter().map(Span::saturating).collect())
}

/// `round(numerator / denominator)` with halves rounded up, for positive
/// operands.
fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator) / (2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(raw: u8) -> Span {
        Span::new(raw).expect("test span must be in range")
    }

    fn spans(raw: &[u8]) -> Vec<Span> {
        raw.iter().copied().map(span).collect()
    }

    fn raw(spans: &[Span]) -> Vec<u8> {
        spans.iter().map(|span| span.get()).collect()
    }

    fn item(id: &str, width: u8) -> Item<()> {
        Item::new(ItemId::new(id).expect("test id"), span(width), ())
    }

    fn layout(items: &[Item<()>]) -> Vec<(&str, u8)> {
        items
            .iter()
            .map(|item| (item.id.as_str(), item.span.get()))
            .collect()
    }

    #[test]
    fn balanced_row_is_untouched() {
        let scaled = rebalance_spans(&spans(&[6, 6])).expect("row is rebalanceable");
        assert_eq!(raw(&scaled), vec![6, 6]);
    }

    #[test]
    fn shrunken_row_scales_up() {
        let scaled = rebalance_spans(&spans(&[4, 4])).expect("row is rebalanceable");
        assert_eq!(raw(&scaled), vec![6, 6]);
        let scaled = rebalance_spans(&spans(&[3, 3])).expect("row is rebalanceable");
        assert_eq!(raw(&scaled), vec![6, 6]);
    }

    #[test]
    fn single_member_becomes_full_width() {
        for width in 1..=12 {
            let scaled = rebalance_spans(&spans(&[width])).expect("row is rebalanceable");
            assert_eq!(raw(&scaled), vec![12]);
        }
    }

    #[test]
    fn remainder_goes_to_last_member() {
        // 48/18 rounds to 3, 72/18 is 4; the sum of 13 costs the last member one.
        let scaled = rebalance_spans(&spans(&[4, 4, 4, 6])).expect("row is rebalanceable");
        assert_eq!(raw(&scaled), vec![3, 3, 3, 3]);
        // 12/7 rounds to 2, 24/7 rounds to 3; the last member gives one back.
        let scaled = rebalance_spans(&spans(&[1, 1, 1, 1, 1, 2])).expect("row is rebalanceable");
        assert_eq!(scaled.iter().map(|s| u32::from(s.get())).sum::<u32>(), 12);
        assert_eq!(raw(&scaled), vec![2, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn halves_round_up() {
        // 12 * 1/8 = 1.5 -> 2; 12 * 7/8 = 10.5 -> 11; last absorbs -1.
        let scaled = rebalance_spans(&spans(&[1, 7])).expect("row is rebalanceable");
        assert_eq!(raw(&scaled), vec![2, 10]);
    }

    #[test]
    fn floor_holds_when_last_member_is_narrow() {
        // Thirteen columns across ten members: ones stay at one, the four
        // rounds to four, and the last member cannot give back the surplus.
        let scaled =
            rebalance_spans(&spans(&[1, 1, 1, 1, 1, 1, 1, 1, 4, 1])).expect("row is rebalanceable");
        assert!(scaled.iter().all(|span| span.get() >= 1));
        assert_eq!(scaled.iter().map(|s| u32::from(s.get())).sum::<u32>(), 12);
        assert_eq!(raw(&scaled), vec![1, 1, 1, 1, 1, 1, 1, 1, 3, 1]);
    }

    #[test]
    fn twelve_narrow_members_fit_exactly() {
        let scaled = rebalance_spans(&spans(&[1; 12])).expect("row is rebalanceable");
        assert_eq!(raw(&scaled), vec![1; 12]);
    }

    #[test]
    fn degenerate_rows_are_refused() {
        assert_eq!(rebalance_spans(&[]), None);
        assert_eq!(rebalance_spans(&spans(&[1; 13])), None);
    }

    #[test]
    fn departure_widens_remaining_neighbours() {
        let list = vec![item("a", 6), item("b", 3), item("c", 3)];
        let row = vec![list[1].clone(), list[2].clone()];
        let out = rebalance(&row, &list, &list[0], None);
        assert_eq!(layout(&out), vec![("a", 6), ("b", 6), ("c", 6)]);
    }

    #[test]
    fn vertical_insertion_only_widens_moved_item() {
        let list = vec![item("a", 4), item("b", 4), item("c", 4)];
        let row = vec![list[1].clone(), list[2].clone()];
        let out = rebalance(&row, &list, &list[0], Some(EdgePosition::Top));
        assert_eq!(layout(&out), vec![("a", 12), ("b", 4), ("c", 4)]);
        let out = rebalance(&row, &list, &list[2], Some(EdgePosition::Bottom));
        assert_eq!(layout(&out), vec![("a", 4), ("b", 4), ("c", 12)]);
    }

    #[test]
    fn empty_row_returns_list_unchanged() {
        let list = vec![item("a", 12), item("b", 5)];
        let out = rebalance(&[], &list, &list[0], Some(EdgePosition::Left));
        assert_eq!(out, list);
    }

    #[test]
    fn only_row_members_change() {
        let list = vec![item("x", 12), item("a", 4), item("b", 4), item("y", 5)];
        let row = vec![list[1].clone(), list[2].clone()];
        let out = rebalance(&row, &list, &list[1], Some(EdgePosition::Right));
        assert_eq!(layout(&out), vec![("x", 12), ("a", 6), ("b", 6), ("y", 5)]);
    }
}
