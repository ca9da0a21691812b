#![forbid(unsafe_code)]

//! Drag events reported by the host pointer source.
//!
//! A drag sequence is always `DragStart` → zero or more `DragMove` /
//! `DragOver` → `DragEnd` or `Cancel`. Sequence numbers are assigned by the
//! host and must be non-zero; ordering across events is enforced by the
//! session machine in `gridform-runtime`, not here.
//!
//! Every hover tick carries the hovered item's id and its current bounding
//! box together with the raw pointer coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{ItemRect, PointerPosition};
use crate::item::ItemId;

/// The item under the pointer and where it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverTarget {
    pub item: ItemId,
    pub rect: ItemRect,
}

impl HoverTarget {
    #[must_use]
    pub fn new(item: ItemId, rect: ItemRect) -> Self {
        Self { item, rect }
    }
}

/// Why a drag session ended without a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragCancelReason {
    EscapeKey,
    PointerCancel,
    FocusLost,
    DroppedOutside,
    Programmatic,
}

/// Drag event kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEventKind {
    DragStart {
        active: ItemId,
        pointer: PointerPosition,
    },
    DragMove {
        pointer: PointerPosition,
        over: Option<HoverTarget>,
    },
    DragOver {
        pointer: PointerPosition,
        over: Option<HoverTarget>,
    },
    /// Pointer released. `over` is `None` when released outside every item.
    DragEnd {
        pointer: PointerPosition,
        over: Option<ItemId>,
    },
    Cancel {
        reason: DragCancelReason,
    },
}

/// Sequenced drag event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    pub sequence: u64,
    #[serde(flatten)]
    pub kind: DragEventKind,
}

impl DragEvent {
    #[must_use]
    pub fn new(sequence: u64, kind: DragEventKind) -> Self {
        Self { sequence, kind }
    }

    /// Validate the event in isolation.
    pub fn validate(&self) -> Result<(), DragEventError> {
        if self.sequence == 0 {
            return Err(DragEventError::ZeroSequence);
        }

        match &self.kind {
            DragEventKind::DragStart { pointer, .. } | DragEventKind::DragEnd { pointer, .. } => {
                check_pointer(*pointer)?;
            }
            DragEventKind::DragMove { pointer, over } | DragEventKind::DragOver { pointer, over } => {
                check_pointer(*pointer)?;
                if let Some(target) = over
                    && !target.rect.is_well_formed()
                {
                    return Err(DragEventError::MalformedRect {
                        item: target.item.clone(),
                    });
                }
            }
            DragEventKind::Cancel { .. } => {}
        }

        Ok(())
    }

    /// Pointer coordinates carried by the event, if any.
    #[must_use]
    pub fn pointer(&self) -> Option<PointerPosition> {
        match &self.kind {
            DragEventKind::DragStart { pointer, .. }
            | DragEventKind::DragMove { pointer, .. }
            | DragEventKind::DragOver { pointer, .. }
            | DragEventKind::DragEnd { pointer, .. } => Some(*pointer),
            DragEventKind::Cancel { .. } => None,
        }
    }
}

fn check_pointer(pointer: PointerPosition) -> Result<(), DragEventError> {
    if pointer.is_finite() {
        Ok(())
    } else {
        Err(DragEventError::NonFinitePointer)
    }
}

/// Validation failures for drag events.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEventError {
    ZeroSequence,
    NonFinitePointer,
    MalformedRect { item: ItemId },
}

impl fmt::Display for DragEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSequence => write!(f, "drag event sequence must be non-zero"),
            Self::NonFinitePointer => write!(f, "drag event pointer coordinates must be finite"),
            Self::MalformedRect { item } => {
                write!(f, "hover rectangle for item {item} is not finite or has negative size")
            }
        }
    }
}

impl std::error::Error for DragEventError {}
