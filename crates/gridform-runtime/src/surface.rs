#![forbid(unsafe_code)]

//! Interactive grid surface.
//!
//! Binds a [`DragSessionMachine`] to a caller-owned [`ItemStore`]. Drag
//! events go in; on a drop the surface plans the move against a fresh
//! snapshot and writes the whole planned list back. Canceled drags and
//! releases outside every item never touch the store.
//!
//! # Invariants
//! 1. The store is written at most once per event, and only with a complete
//!    planned list.
//! 2. `layout()` always reflects the store as it is now, with the session's
//!    hovered and grasped rows marked.

use std::marker::PhantomData;

use gridform_core::{
    DragEvent, GridModelError, Item, ItemId, ItemIdAllocator, ItemRect, Span,
};
use gridform_layout::{
    EdgePosition, GridInvariantReport, GridLayout, GridPartition, MoveNoopReason, MoveOutcome,
    is_redundant_drop, partition, plan_move, rebalance,
};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SurfaceConfig};
use crate::session::{DragEffect, DragSessionError, DragSessionMachine, DragTransition};
use crate::store::ItemStore;

/// What happened to the list on a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum DropResolution {
    /// The planned list was written to the store.
    Applied {
        from_index: usize,
        to_index: usize,
        edge: Option<EdgePosition>,
    },
    /// The drop would put the item back where it already is.
    SkippedRedundant {
        from_index: usize,
        over_index: usize,
        edge: Option<EdgePosition>,
    },
    /// The planner declined the drop.
    Unchanged { reason: MoveNoopReason },
}

/// Result of [`GridSurface::handle_event`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceUpdate {
    pub transition: DragTransition,
    /// Set when the transition was a drop.
    pub drop: Option<DropResolution>,
}

/// A grid of items driven by drag events.
#[derive(Debug)]
pub struct GridSurface<P, S> {
    store: S,
    machine: DragSessionMachine,
    config: SurfaceConfig,
    allocator: ItemIdAllocator,
    _payload: PhantomData<fn() -> P>,
}

impl<P, S> GridSurface<P, S>
where
    P: Clone,
    S: ItemStore<P>,
{
    /// Surface with the default configuration.
    #[must_use]
    pub fn new(store: S) -> Self {
        let allocator = ItemIdAllocator::from_items("item", &store.get());
        Self {
            store,
            machine: DragSessionMachine::new(),
            config: SurfaceConfig::default(),
            allocator,
            _payload: PhantomData,
        }
    }

    /// Surface with a validated configuration.
    pub fn with_config(store: S, config: SurfaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut surface = Self::new(store);
        surface.config = config;
        Ok(surface)
    }

    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &DragSessionMachine {
        &self.machine
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Current list snapshot.
    #[must_use]
    pub fn items(&self) -> Vec<Item<P>> {
        self.store.get()
    }

    /// Rows for the render layer, with the session's rows marked.
    #[must_use]
    pub fn layout(&self) -> GridPartition<P> {
        partition(&self.store.get(), self.machine.over(), self.machine.active())
    }

    /// Pixel rectangles for the current list inside `container`.
    #[must_use]
    pub fn solve(&self, container: ItemRect) -> GridLayout {
        self.config.geometry.solve(&self.layout(), container)
    }

    /// Feed one drag event.
    pub fn handle_event(&mut self, event: &DragEvent) -> Result<SurfaceUpdate, DragSessionError> {
        let items = self.store.get();
        let transition = self
            .machine
            .apply_event(event, &items, &self.config.classifier)?;

        let drop = match &transition.effect {
            DragEffect::Dropped {
                active,
                over,
                position,
                ..
            } => Some(self.resolve_drop(items, active, over, *position)),
            DragEffect::Canceled { active, reason } => {
                tracing::debug!(
                    target: "gridform.surface",
                    active = ?active,
                    reason = ?reason,
                    "drag canceled; list untouched"
                );
                None
            }
            _ => None,
        };

        Ok(SurfaceUpdate { transition, drop })
    }

    /// Cancel any drag in progress.
    pub fn cancel(&mut self) -> Option<DragTransition> {
        self.machine.force_cancel()
    }

    /// Append a new item with a freshly allocated id.
    pub fn insert_item(&mut self, payload: P, span: Span) -> Result<ItemId, GridModelError> {
        let id = self.allocator.allocate()?;
        let mut items = self.store.get();
        items.push(Item::new(id.clone(), span, payload));
        self.store.set(items);
        tracing::debug!(target: "gridform.surface", item = %id, span = span.get(), "item inserted");
        Ok(id)
    }

    /// Remove an item; the rest of its row widens to fill the gap.
    ///
    /// Cancels the drag in progress if it involves the removed item.
    pub fn remove_item(&mut self, id: &ItemId) -> Option<Item<P>> {
        let items = self.store.get();
        let index = items.iter().position(|item| &item.id == id)?;

        if self.machine.active() == Some(id) || self.machine.over() == Some(id) {
            self.machine.force_cancel();
        }

        let layout = partition(&items, None, Some(id));
        let remaining: Vec<Item<P>> = layout
            .active_row_index
            .and_then(|row| layout.rows.get(row))
            .map(|row| row.iter().filter(|item| &item.id != id).cloned().collect())
            .unwrap_or_default();

        let removed = items[index].clone();
        let mut next = rebalance(&remaining, &items, &removed, None);
        next.remove(index);
        self.store.set(next);
        tracing::debug!(target: "gridform.surface", item = %id, "item removed");
        Some(removed)
    }

    fn resolve_drop(
        &mut self,
        items: Vec<Item<P>>,
        active: &ItemId,
        over: &ItemId,
        edge: Option<EdgePosition>,
    ) -> DropResolution {
        let from_index = items.iter().position(|item| &item.id == active);
        let over_index = items.iter().position(|item| &item.id == over);
        if self.config.suppress_redundant_drops
            && let (Some(from_index), Some(over_index)) = (from_index, over_index)
            && is_redundant_drop(from_index, over_index, edge)
        {
            tracing::debug!(
                target: "gridform.surface",
                active = %active,
                over = %over,
                from_index,
                over_index,
                "redundant drop skipped"
            );
            return DropResolution::SkippedRedundant {
                from_index,
                over_index,
                edge,
            };
        }

        match plan_move(&items, active, over, edge) {
            MoveOutcome::Moved(plan) => {
                let report = GridInvariantReport::inspect(&plan.items);
                if report.has_errors() {
                    tracing::warn!(
                        target: "gridform.surface",
                        active = %active,
                        over = %over,
                        issues = report.issues.len(),
                        "planned list breaks grid invariants"
                    );
                }
                let resolution = DropResolution::Applied {
                    from_index: plan.from_index,
                    to_index: plan.to_index,
                    edge,
                };
                tracing::debug!(
                    target: "gridform.surface",
                    active = %active,
                    over = %over,
                    from_index = plan.from_index,
                    to_index = plan.to_index,
                    "drop applied"
                );
                self.store.set(plan.items);
                resolution
            }
            MoveOutcome::Unchanged(reason) => {
                tracing::debug!(
                    target: "gridform.surface",
                    active = %active,
                    over = %over,
                    reason = reason.as_str(),
                    "drop left list unchanged"
                );
                DropResolution::Unchanged { reason }
            }
        }
    }
}
