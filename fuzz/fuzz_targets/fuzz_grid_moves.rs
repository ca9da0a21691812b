#![no_main]

use arbitrary::Arbitrary;
use gridform_core::{Item, ItemId, Span};
use gridform_layout::{EdgePosition, MoveOutcome, partition, plan_move};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    rows: Vec<Vec<u8>>,
    tail: Vec<u8>,
    drops: Vec<(u16, u16, u8)>,
}

fn edge(selector: u8) -> Option<EdgePosition> {
    match selector % 5 {
        0 => Some(EdgePosition::Left),
        1 => Some(EdgePosition::Right),
        2 => Some(EdgePosition::Top),
        3 => Some(EdgePosition::Bottom),
        _ => None,
    }
}

/// Complete rows, where widths are taken until 12 columns are used, then a
/// short last row that stays under 12 columns.
fn build(rows: &[Vec<u8>], tail: &[u8]) -> Vec<Item<u32>> {
    let mut items = Vec::new();
    for raw in rows.iter().take(16) {
        let mut remaining = 12_u8;
        for &width in raw.iter().take(12) {
            if remaining == 0 {
                break;
            }
            let width = (width % 12 + 1).min(remaining);
            remaining -= width;
            push(&mut items, width);
        }
        if remaining > 0 {
            push(&mut items, remaining);
        }
    }
    let mut used = 0_u8;
    for &width in tail.iter().take(11) {
        let width = width % 11 + 1;
        if used + width >= 12 {
            break;
        }
        used += width;
        push(&mut items, width);
    }
    items
}

fn push(items: &mut Vec<Item<u32>>, width: u8) {
    let n = items.len() as u32;
    let id = ItemId::new(format!("item-{n}")).expect("generated id");
    items.push(Item::new(id, Span::saturating(i64::from(width)), n));
}

fuzz_target!(|input: Input| {
    let mut items = build(&input.rows, &input.tail);
    let complete_rows_only = partition(&items, None, None)
        .row_sums()
        .iter()
        .all(|&sum| sum == 12);
    if items.is_empty() {
        return;
    }
    let mut ids: Vec<ItemId> = items.iter().map(|item| item.id.clone()).collect();
    ids.sort();

    for (active, over, selector) in input.drops.into_iter().take(64) {
        let active = items[usize::from(active) % items.len()].id.clone();
        let over = items[usize::from(over) % items.len()].id.clone();
        let edge = edge(selector);

        let MoveOutcome::Moved(plan) = plan_move(&items, &active, &over, edge) else {
            continue;
        };

        let mut after: Vec<ItemId> = plan.items.iter().map(|item| item.id.clone()).collect();
        after.sort();
        assert_eq!(after, ids, "ids changed");
        assert_eq!(plan.items[plan.to_index].id, active, "moved item misplaced");

        let layout = partition(&plan.items, None, Some(&active));
        assert!(layout.is_balanced(), "row sums {:?}", layout.row_sums());
        if complete_rows_only {
            assert!(
                layout.row_sums().iter().all(|&sum| sum == 12),
                "row sums {:?}",
                layout.row_sums()
            );
        }
        if edge.is_some_and(EdgePosition::is_vertical) {
            let row = layout.active_row_index.expect("active laid out");
            assert_eq!(layout.rows[row].len(), 1, "vertical drop shares a row");
        }
        items = plan.items;
    }
});
