#![no_main]

use arbitrary::Arbitrary;
use gridform_core::{
    DragCancelReason, DragEvent, DragEventKind, HoverTarget, Item, ItemId, ItemRect,
    PointerPosition, Span,
};
use gridform_runtime::{GridSurface, MemoryStore};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Start { item: u8, x: f64, y: f64 },
    Hover { item: Option<u8>, x: f64, y: f64, width: f64, height: f64 },
    End { item: Option<u8>, x: f64, y: f64 },
    Cancel,
    Stale,
    Insert { span: u8 },
}

fuzz_target!(|steps: Vec<Step>| {
    // [a12] [b4 c4 d4] [e6 f6]
    let widths = [12_u8, 4, 4, 4, 6, 6];
    let ids: Vec<ItemId> = (0..widths.len())
        .map(|n| ItemId::new(format!("item-{n}")).expect("generated id"))
        .collect();
    let items = ids
        .iter()
        .zip(widths)
        .map(|(id, width)| Item::new(id.clone(), Span::saturating(i64::from(width)), ()))
        .collect();
    let mut surface = GridSurface::new(MemoryStore::new(items));
    let pick = |n: u8| ids[usize::from(n) % ids.len()].clone();

    let mut expected_len = ids.len();
    let mut sequence = 0_u64;
    for step in steps.into_iter().take(128) {
        sequence += 1;
        let kind = match step {
            Step::Start { item, x, y } => DragEventKind::DragStart {
                active: pick(item),
                pointer: PointerPosition::new(x, y),
            },
            Step::Hover { item, x, y, width, height } => DragEventKind::DragOver {
                pointer: PointerPosition::new(x, y),
                over: item.map(|n| HoverTarget::new(pick(n), ItemRect::new(0.0, 0.0, width, height))),
            },
            Step::End { item, x, y } => DragEventKind::DragEnd {
                pointer: PointerPosition::new(x, y),
                over: item.map(pick),
            },
            Step::Cancel => DragEventKind::Cancel {
                reason: DragCancelReason::PointerCancel,
            },
            Step::Stale => {
                // A replayed sequence number must be rejected, never applied.
                if let Some(last) = surface.session().last_sequence() {
                    let version = surface.store().version();
                    let replay = DragEvent::new(
                        last,
                        DragEventKind::Cancel {
                            reason: DragCancelReason::Programmatic,
                        },
                    );
                    assert!(surface.handle_event(&replay).is_err(), "replayed sequence accepted");
                    assert_eq!(surface.store().version(), version);
                }
                continue;
            }
            Step::Insert { span } => {
                // Only ever one short row, and only at the end.
                let complete = surface.layout().row_sums().iter().all(|&sum| sum == 12);
                if complete && surface.insert_item((), Span::saturating(i64::from(span % 11 + 1))).is_ok() {
                    expected_len += 1;
                }
                continue;
            }
        };
        let _ = surface.handle_event(&DragEvent::new(sequence, kind));

        let list = surface.items();
        assert_eq!(list.len(), expected_len, "item count changed");
        let layout = surface.layout();
        assert!(layout.is_balanced(), "row sums {:?}", layout.row_sums());
    }
});
