#![forbid(unsafe_code)]

//! Drop planning: new order plus rebalanced spans for one drag-and-drop.
//!
//! ```text
//! partition -> destination row (+ moved item) -> rebalance(edge)
//!           -> origin row (- moved item)      -> rebalance(horizontal)
//!           -> adjust index for edge          -> splice -> settle (vertical)
//! ```
//!
//! # Invariants
//! 1. The output has the input's length and the same set of ids.
//! 2. Starting from a list whose rows all sum to 12, every row of the output
//!    sums to 12.
//! 3. After a `top` / `bottom` drop the moved item spans the full row and
//!    starts a row of its own.
//!
//! # Failure Modes
//! Unknown ids, dropping an item on itself, and joining a row that already
//! holds one item per column are reported as [`MoveOutcome::Unchanged`] with
//! a [`MoveNoopReason`]. Nothing here panics on malformed input.

use gridform_core::{GRID_COLUMNS, Item, ItemId};
use serde::{Deserialize, Serialize};

use crate::classify::EdgePosition;
use crate::partition::partition;
use crate::rebalance::rebalance;

/// Why a drop left the list unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveNoopReason {
    SameItem,
    MissingActive,
    MissingOver,
    RowAtCapacity,
}

impl MoveNoopReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SameItem => "same_item",
            Self::MissingActive => "missing_active",
            Self::MissingOver => "missing_over",
            Self::RowAtCapacity => "row_at_capacity",
        }
    }
}

/// A planned drop.
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan<P> {
    /// Reordered list carrying the rebalanced spans.
    pub items: Vec<Item<P>>,
    /// Index of the moved item before the drop.
    pub from_index: usize,
    /// Index of the moved item after the drop.
    pub to_index: usize,
    /// Index of the hovered item before the drop.
    pub over_index: usize,
    /// Row the moved item left.
    pub origin_row: usize,
    /// Row of the hovered item.
    pub destination_row: usize,
    pub edge: Option<EdgePosition>,
}

impl<P> MovePlan<P> {
    /// Whether the list order is different from the input.
    #[must_use]
    pub fn reorders(&self) -> bool {
        self.from_index != self.to_index
    }
}

/// Result of [`plan_move`].
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome<P> {
    Moved(MovePlan<P>),
    Unchanged(MoveNoopReason),
}

impl<P: Clone> MoveOutcome<P> {
    #[must_use]
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }

    /// The planned list, or `original` for a no-op.
    #[must_use]
    pub fn into_items(self, original: &[Item<P>]) -> Vec<Item<P>> {
        match self {
            Self::Moved(plan) => plan.items,
            Self::Unchanged(_) => original.to_vec(),
        }
    }
}

/// Target index for the moved item before splicing.
///
/// Removing the moved item shifts everything after it left by one; the drop
/// edge decides whether the item lands before or after the hovered one. Each
/// edge/direction pair is its own rule.
#[must_use]
pub fn adjusted_drop_index(
    from_index: usize,
    over_index: usize,
    edge: Option<EdgePosition>,
) -> usize {
    match edge {
        Some(EdgePosition::Right) if from_index > over_index => over_index + 1,
        Some(EdgePosition::Top) if from_index < over_index => over_index + 1,
        Some(EdgePosition::Bottom) if from_index > over_index => over_index + 1,
        Some(EdgePosition::Left) if from_index < over_index => over_index.saturating_sub(1),
        _ => over_index,
    }
}

/// Whether a drop would put the item back where it already is.
///
/// Hosts skip these drops entirely so an item released over its own
/// neighbour does not jitter.
#[must_use]
pub fn is_redundant_drop(from_index: usize, over_index: usize, edge: Option<EdgePosition>) -> bool {
    match edge {
        Some(EdgePosition::Left | EdgePosition::Right) => {
            adjusted_drop_index(from_index, over_index, edge) == from_index
        }
        Some(EdgePosition::Top) => over_index == from_index + 1,
        Some(EdgePosition::Bottom) => from_index == over_index + 1,
        None => false,
    }
}

/// Plan dropping `active` at `edge` of `over`.
#[must_use]
pub fn plan_move<P: Clone>(
    items: &[Item<P>],
    active: &ItemId,
    over: &ItemId,
    edge: Option<EdgePosition>,
) -> MoveOutcome<P> {
    if active == over {
        return MoveOutcome::Unchanged(MoveNoopReason::SameItem);
    }
    let Some(over_index) = items.iter().position(|item| &item.id == over) else {
        return MoveOutcome::Unchanged(MoveNoopReason::MissingOver);
    };
    let Some(from_index) = items.iter().position(|item| &item.id == active) else {
        return MoveOutcome::Unchanged(MoveNoopReason::MissingActive);
    };

    let layout = partition(items, Some(over), Some(active));
    let Some((destination_row, mut destination)) = layout
        .over_row_index
        .and_then(|row| layout.rows.get(row).map(|members| (row, members.clone())))
    else {
        return MoveOutcome::Unchanged(MoveNoopReason::MissingOver);
    };
    let Some((origin_row, origin)) = layout.active_row_index.and_then(|row| {
        layout.rows.get(row).map(|members| {
            let remaining: Vec<Item<P>> = members
                .iter()
                .filter(|item| &item.id != active)
                .cloned()
                .collect();
            (row, remaining)
        })
    }) else {
        return MoveOutcome::Unchanged(MoveNoopReason::MissingActive);
    };

    let moved = items[from_index].clone();
    if !destination.iter().any(|item| &item.id == active) {
        destination.push(moved.clone());
    }
    let vertical = edge.is_some_and(EdgePosition::is_vertical);
    if !vertical && destination.len() > usize::from(GRID_COLUMNS) {
        return MoveOutcome::Unchanged(MoveNoopReason::RowAtCapacity);
    }

    let mut next = rebalance(&destination, items, &moved, edge);
    // A vertical drop always leaves the origin row, even when hovering a
    // row-mate.
    if origin_row != destination_row || vertical {
        next = rebalance(&origin, &next, &moved, None);
    }

    let target = adjusted_drop_index(from_index, over_index, edge);
    let spliced = next.remove(from_index);
    let target = target.min(next.len());
    next.insert(target, spliced);

    let (next, to_index) = match edge {
        Some(edge) if edge.is_vertical() => settle_on_row_boundary(next, target, edge),
        _ => (next, target),
    };

    MoveOutcome::Moved(MovePlan {
        items: next,
        from_index,
        to_index,
        over_index,
        origin_row,
        destination_row,
        edge,
    })
}

/// [`plan_move`], returning `items` unchanged on any no-op.
#[must_use]
pub fn apply_move<P: Clone>(
    items: &[Item<P>],
    active: &ItemId,
    over: &ItemId,
    edge: Option<EdgePosition>,
) -> Vec<Item<P>> {
    plan_move(items, active, over, edge).into_items(items)
}

/// Move a freshly inserted full-width item off the middle of a row: to the
/// row's start for `top`, past its end for `bottom`.
///
/// A short last row stays last, so an item that would land after it is
/// placed at that row's start instead.
fn settle_on_row_boundary<P: Clone>(
    mut items: Vec<Item<P>>,
    index: usize,
    edge: EdgePosition,
) -> (Vec<Item<P>>, usize) {
    let moved = items.remove(index);
    let remaining = partition(&items, None, None);
    let starts = remaining.row_starts();
    let on_boundary = index == items.len() || starts.contains(&index);
    let mut target = if on_boundary {
        index
    } else if edge == EdgePosition::Top {
        starts
            .iter()
            .copied()
            .filter(|&start| start < index)
            .max()
            .unwrap_or(0)
    } else {
        starts
            .iter()
            .copied()
            .find(|&start| start > index)
            .unwrap_or(items.len())
    };
    if target == items.len()
        && let (Some(&last_start), Some(&last_sum)) =
            (starts.last(), remaining.row_sums().last())
        && last_sum != u32::from(GRID_COLUMNS)
    {
        target = last_start;
    }
    items.insert(target, moved);
    (items, target)
}
