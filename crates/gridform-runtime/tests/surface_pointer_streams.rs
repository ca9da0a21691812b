//! Surface driven by pointer streams laid out with `GridGeometry`.
//!
//! Every hover and release position is computed from the solved rectangles,
//! the same way a host would feed the surface from real pointer input.

use std::sync::{Arc, Mutex};

use gridform_core::{DragEvent, DragEventKind, Item, ItemId, ItemRect, PointerPosition, Span};
use gridform_layout::{EdgePosition, GridGeometry, GridInvariantReport};
use gridform_runtime::{
    DragEffect, DropResolution, GridSurface, MemoryStore, SurfaceConfig, SurfaceUpdate,
};
use tracing_subscriber::layer::SubscriberExt;

type Surface = GridSurface<&'static str, MemoryStore<&'static str>>;

const CONTAINER: ItemRect = ItemRect::new(0.0, 0.0, 120.0, 0.0);

fn id(raw: &str) -> ItemId {
    ItemId::new(raw).expect("test id must be non-empty")
}

fn config(suppress_redundant_drops: bool) -> SurfaceConfig {
    SurfaceConfig {
        suppress_redundant_drops,
        geometry: GridGeometry {
            column_gap: 0.0,
            row_gap: 0.0,
            row_height: 50.0,
        },
        ..SurfaceConfig::default()
    }
}

/// `[a12] [b4 c4 d4] [e12]`
fn form(suppress_redundant_drops: bool) -> Surface {
    let items = [("a", 12), ("b", 4), ("c", 4), ("d", 4), ("e", 12)]
        .iter()
        .map(|&(name, span)| Item::new(id(name), Span::new(span).expect("test span"), "field"))
        .collect();
    GridSurface::with_config(MemoryStore::new(items), config(suppress_redundant_drops))
        .expect("test config is valid")
}

struct Driver {
    surface: Surface,
    sequence: u64,
}

impl Driver {
    fn new(surface: Surface) -> Self {
        Self {
            surface,
            sequence: 0,
        }
    }

    fn send(&mut self, kind: DragEventKind) -> SurfaceUpdate {
        self.sequence += 1;
        self.surface
            .handle_event(&DragEvent::new(self.sequence, kind))
            .expect("driver events are valid and ordered")
    }

    fn pointer_on(&self, item: &str, fraction_x: f64, fraction_y: f64) -> PointerPosition {
        self.surface
            .solve(CONTAINER)
            .point_within(&id(item), fraction_x, fraction_y)
            .expect("item is laid out")
    }

    fn grab(&mut self, item: &str) -> SurfaceUpdate {
        let pointer = self.pointer_on(item, 0.5, 0.5);
        self.send(DragEventKind::DragStart {
            active: id(item),
            pointer,
        })
    }

    fn hover(&mut self, item: &str, fraction_x: f64, fraction_y: f64) -> SurfaceUpdate {
        let pointer = self.pointer_on(item, fraction_x, fraction_y);
        let over = self.surface.solve(CONTAINER).hover_target(pointer);
        self.send(DragEventKind::DragMove { pointer, over })
    }

    fn release(&mut self, item: &str, fraction_x: f64, fraction_y: f64) -> SurfaceUpdate {
        let pointer = self.pointer_on(item, fraction_x, fraction_y);
        let over = self.surface.solve(CONTAINER).hit_test(pointer).cloned();
        self.send(DragEventKind::DragEnd { pointer, over })
    }

    fn rows(&self) -> Vec<Vec<(String, u8)>> {
        self.surface
            .layout()
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|item| (item.id.to_string(), item.span.get()))
                    .collect()
            })
            .collect()
    }

    fn version(&self) -> u64 {
        self.surface.store().version()
    }
}

fn row(entries: &[(&str, u8)]) -> Vec<(String, u8)> {
    entries
        .iter()
        .map(|&(name, span)| (name.to_string(), span))
        .collect()
}

#[test]
fn dropping_on_top_of_full_width_item_opens_a_new_row() {
    let mut driver = Driver::new(form(true));
    driver.grab("e");
    let hovered = driver.hover("a", 0.5, 0.2);
    assert_eq!(
        hovered.transition.effect,
        DragEffect::Hovered {
            active: id("e"),
            over: id("a"),
            position: EdgePosition::Top,
        }
    );
    let released = driver.release("a", 0.5, 0.2);
    assert_eq!(
        released.drop,
        Some(DropResolution::Applied {
            from_index: 4,
            to_index: 0,
            edge: Some(EdgePosition::Top),
        })
    );
    assert_eq!(
        driver.rows(),
        vec![
            row(&[("e", 12)]),
            row(&[("a", 12)]),
            row(&[("b", 4), ("c", 4), ("d", 4)]),
        ]
    );
}

#[test]
fn reordering_within_a_row_keeps_spans() {
    let mut driver = Driver::new(form(true));
    driver.grab("c");
    driver.hover("b", 0.1, 0.5);
    let released = driver.release("b", 0.1, 0.5);
    assert!(matches!(
        released.drop,
        Some(DropResolution::Applied { to_index: 1, .. })
    ));
    assert_eq!(driver.rows()[1], row(&[("c", 4), ("b", 4), ("d", 4)]));
}

#[test]
fn last_hover_edge_is_used_on_release() {
    let mut driver = Driver::new(form(true));
    driver.grab("c");
    driver.hover("b", 0.1, 0.5);
    driver.hover("d", 0.9, 0.5);
    let released = driver.release("d", 0.9, 0.5);
    assert!(matches!(
        released.drop,
        Some(DropResolution::Applied {
            edge: Some(EdgePosition::Right),
            ..
        })
    ));
    assert_eq!(driver.rows()[1], row(&[("b", 4), ("d", 4), ("c", 4)]));
}

#[test]
fn redundant_drop_is_skipped_by_default() {
    let mut driver = Driver::new(form(true));
    driver.grab("b");
    driver.hover("c", 0.1, 0.5);
    let released = driver.release("c", 0.1, 0.5);
    assert_eq!(
        released.drop,
        Some(DropResolution::SkippedRedundant {
            from_index: 1,
            over_index: 2,
            edge: Some(EdgePosition::Left),
        })
    );
    assert_eq!(driver.version(), 0);
}

#[test]
fn redundant_drop_is_applied_when_policy_is_off() {
    let mut driver = Driver::new(form(false));
    driver.grab("b");
    driver.hover("c", 0.1, 0.5);
    let released = driver.release("c", 0.1, 0.5);
    assert_eq!(
        released.drop,
        Some(DropResolution::Applied {
            from_index: 1,
            to_index: 1,
            edge: Some(EdgePosition::Left),
        })
    );
    assert_eq!(driver.version(), 1);
    assert_eq!(driver.rows()[1], row(&[("b", 4), ("c", 4), ("d", 4)]));
}

#[test]
fn joining_a_full_width_row_splits_it() {
    let mut driver = Driver::new(form(true));
    driver.grab("d");
    // Right third of `a`, outside the vertical band.
    driver.hover("a", 0.9, 0.5);
    driver.release("a", 0.9, 0.5);
    let rows = driver.rows();
    assert_eq!(rows.len(), 3);
    for sums in rows.iter().map(|row| row.iter().map(|(_, span)| u32::from(*span)).sum::<u32>()) {
        assert_eq!(sums, 12);
    }
    assert_eq!(rows[0].iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(), ["a", "d"]);
    assert_eq!(rows[1], row(&[("b", 6), ("c", 6)]));
}

#[test]
fn session_rows_follow_the_pointer() {
    let mut driver = Driver::new(form(true));
    driver.grab("b");
    driver.hover("e", 0.5, 0.8);
    let layout = driver.surface.layout();
    assert_eq!(layout.active_row_index, Some(1));
    assert_eq!(layout.over_row_index, Some(2));
    assert_eq!(driver.surface.session().position(), Some(EdgePosition::Bottom));
}

#[test]
fn vertical_drop_beside_a_partial_insert_keeps_rows_full() {
    let mut driver = Driver::new(form(true));
    let inserted = driver
        .surface
        .insert_item("field", Span::new(4).expect("test span"))
        .expect("allocator has room");
    assert_eq!(inserted.as_str(), "item-1");
    assert_eq!(driver.surface.layout().row_sums(), vec![12, 12, 12, 4]);

    driver.grab("b");
    let hovered = driver.hover("item-1", 0.5, 0.8);
    assert_eq!(
        hovered.transition.effect,
        DragEffect::Hovered {
            active: id("b"),
            over: id("item-1"),
            position: EdgePosition::Bottom,
        }
    );
    let released = driver.release("item-1", 0.5, 0.8);
    assert_eq!(
        released.drop,
        Some(DropResolution::Applied {
            from_index: 1,
            to_index: 4,
            edge: Some(EdgePosition::Bottom),
        })
    );

    assert_eq!(
        driver.rows(),
        vec![
            row(&[("a", 12)]),
            row(&[("c", 6), ("d", 6)]),
            row(&[("e", 12)]),
            row(&[("b", 12)]),
            row(&[("item-1", 4)]),
        ]
    );
    let layout = driver.surface.layout();
    assert!(layout.is_balanced());
    assert!(!GridInvariantReport::inspect(&driver.surface.items()).has_errors());
}

#[derive(Clone, Default)]
struct MessageCapture {
    messages: Arc<Mutex<Vec<(tracing::Level, String)>>>,
}

struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for MessageCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        self.messages
            .lock()
            .expect("capture lock")
            .push((*event.metadata().level(), message));
    }
}

#[test]
fn drops_are_logged_without_invariant_warnings() {
    let capture = MessageCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, || {
        let mut driver = Driver::new(form(true));
        driver.grab("e");
        driver.hover("a", 0.5, 0.2);
        driver.release("a", 0.5, 0.2);
    });

    let messages = capture.messages.lock().expect("capture lock");
    assert!(messages.iter().any(|(_, message)| message == "drop applied"));
    assert!(
        messages
            .iter()
            .all(|(level, _)| *level != tracing::Level::WARN)
    );
}
