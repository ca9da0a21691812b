#![forbid(unsafe_code)]

//! Grid layout and drag-reinsertion engine.
//!
//! Everything here is a pure function over an item list: it takes a snapshot,
//! returns a new one, and never holds on to either.
//!
//! - [`partition`] groups items into rows of 12 columns.
//! - [`rebalance`] rescales a row's spans so it sums to exactly 12.
//! - [`classify`] maps a pointer over a hovered item to an [`EdgePosition`].
//! - [`plan_move`] combines the three into one drop: new order, new spans.
//!
//! [`GridGeometry`] and [`GridInvariantReport`] support hosts that draw the
//! grid themselves or want to audit a list.

pub mod classify;
pub mod geometry;
pub mod invariants;
pub mod partition;
pub mod plan;
pub mod rebalance;

pub use classify::{ClassifierTuning, ClassifierTuningError, EdgePosition, classify};
pub use geometry::{GridGeometry, GridLayout};
pub use gridform_core::{
    GRID_COLUMNS, HoverTarget, Item, ItemId, ItemRect, PointerPosition, Span,
};
pub use invariants::{
    GridInvariantCode, GridInvariantIssue, GridInvariantReport, GridInvariantSeverity,
};
pub use partition::{GridPartition, partition};
pub use plan::{
    MoveNoopReason, MoveOutcome, MovePlan, adjusted_drop_index, apply_move, is_redundant_drop,
    plan_move,
};
pub use rebalance::{rebalance, rebalance_spans};
