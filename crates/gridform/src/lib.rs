#![forbid(unsafe_code)]

//! gridform public facade crate.
//!
//! Re-exports the item model, the layout engine and (with the default
//! `runtime` feature) the interactive surface, plus a prelude for
//! day-to-day use.
//!
//! ```rust,ignore
//! use gridform::prelude::*;
//!
//! let mut surface = GridSurface::new(MemoryStore::new(items));
//! let update = surface.handle_event(&event)?;
//! let rows = surface.layout().rows;
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use gridform_core::{
    DragCancelReason, DragEvent, DragEventError, DragEventKind, GRID_COLUMNS, GridModelError,
    HoverTarget, Item, ItemId, ItemIdAllocator, ItemRect, PointerPosition, Span,
};

// --- Layout re-exports -----------------------------------------------------

pub use gridform_layout::{
    ClassifierTuning, ClassifierTuningError, EdgePosition, GridGeometry, GridInvariantReport,
    GridLayout, GridPartition, MoveNoopReason, MoveOutcome, MovePlan, apply_move, classify,
    is_redundant_drop, partition, plan_move, rebalance,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use gridform_runtime::{
    ConfigError, DragEffect, DragSessionError, DragSessionMachine, DropResolution, GridSurface,
    ItemStore, MemoryStore, SurfaceConfig, SurfaceUpdate,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for gridform hosts.
#[derive(Debug)]
pub enum Error {
    /// An item, span or id could not be built.
    Model(GridModelError),
    /// A drag event was rejected.
    #[cfg(feature = "runtime")]
    Session(DragSessionError),
    /// Configuration failed to load or validate.
    #[cfg(feature = "runtime")]
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Session(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Session(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Config(err) => Some(err),
        }
    }
}

impl From<GridModelError> for Error {
    fn from(err: GridModelError) -> Self {
        Self::Model(err)
    }
}

#[cfg(feature = "runtime")]
impl From<DragSessionError> for Error {
    fn from(err: DragSessionError) -> Self {
        Self::Session(err)
    }
}

#[cfg(feature = "runtime")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for gridform APIs.
pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{
        DragEvent, DragEventKind, EdgePosition, Error, GridPartition, HoverTarget, Item, ItemId,
        ItemRect, MoveOutcome, PointerPosition, Result, Span, partition, plan_move,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{DragEffect, DropResolution, GridSurface, ItemStore, MemoryStore, SurfaceConfig};

    pub use crate::{core, layout};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use gridform_core as core;
pub use gridform_layout as layout;
#[cfg(feature = "runtime")]
pub use gridform_runtime as runtime;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[cfg(feature = "runtime")]
    fn build() -> Result<Vec<Item<&'static str>>> {
        Ok(vec![
            Item::new(ItemId::new("name")?, Span::new(6)?, "text"),
            Item::new(ItemId::new("email")?, Span::new(6)?, "email"),
        ])
    }

    #[test]
    fn model_errors_convert_into_facade_error() {
        let err: Error = Span::new(0).map_err(Error::from).expect_err("zero span");
        assert!(matches!(err, Error::Model(_)));
        assert!(err.to_string().contains("outside"));
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn prelude_covers_a_full_drop() -> Result<()> {
        let items = build()?;
        let mut surface = GridSurface::new(MemoryStore::new(items));
        surface.handle_event(&DragEvent::new(
            1,
            DragEventKind::DragStart {
                active: ItemId::new("name")?,
                pointer: PointerPosition::new(0.0, 0.0),
            },
        ))?;
        let update = surface.handle_event(&DragEvent::new(
            2,
            DragEventKind::DragEnd {
                pointer: PointerPosition::new(0.0, 0.0),
                over: Some(ItemId::new("email")?),
            },
        ))?;
        assert!(matches!(update.drop, Some(DropResolution::Applied { .. })));
        let order: Vec<String> = surface.items().iter().map(|item| item.id.to_string()).collect();
        assert_eq!(order, ["email", "name"]);
        Ok(())
    }
}
