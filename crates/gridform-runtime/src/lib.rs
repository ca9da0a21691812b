#![forbid(unsafe_code)]

//! Interactive grid surface runtime.
//!
//! # Role in gridform
//! `gridform-runtime` is where drag events meet the pure layout engine. It
//! owns the one piece of mutable interaction state, the drag session, and
//! writes planned lists back to the caller's store.
//!
//! # Primary responsibilities
//! - **DragSessionMachine**: `Idle -> Dragging -> Idle`, with hover
//!   classification and explicit no-op reasons.
//! - **GridSurface**: applies drops, inserts and removes items, and exposes
//!   the current partition to the render layer.
//! - **ItemStore**: the seam to the caller's list, plus an in-memory store.
//! - **SurfaceConfig**: classifier tuning and drop policy, loadable from
//!   TOML or JSON with the `config` feature.
//!
//! # Logging
//! Transitions and drops are logged through `tracing` under the
//! `gridform.session` and `gridform.surface` targets.

pub mod config;
pub mod session;
pub mod store;
pub mod surface;

pub use config::{ConfigError, SurfaceConfig};
pub use session::{
    DragEffect, DragNoopReason, DragSessionError, DragSessionMachine, DragSessionState,
    DragTransition,
};
pub use store::{ItemStore, MemoryStore};
pub use surface::{DropResolution, GridSurface, SurfaceUpdate};
