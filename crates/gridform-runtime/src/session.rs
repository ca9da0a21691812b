#![forbid(unsafe_code)]

//! Drag session lifecycle.
//!
//! ```text
//! Idle --drag_start--> Dragging --drag_move / drag_over--> Dragging
//!   ^                     |
//!   \-----drag_end / cancel
//! ```
//!
//! The machine owns the only mutable drag state: which item is grasped,
//! which item is hovered, and the edge the pointer currently targets. It
//! never touches the item list; a `Dropped` effect tells the caller what to
//! plan.
//!
//! # Invariants
//! 1. Every accepted event has a strictly larger sequence than the previous
//!    accepted event.
//! 2. `over` is never the grasped item itself.
//! 3. `position` is `Some` only while `over` is `Some`.
//!
//! # Failure Modes
//! Malformed events and out-of-order sequences are rejected with a
//! [`DragSessionError`] and leave the machine untouched. Events that are
//! well-formed but meaningless in the current state become
//! [`DragEffect::Noop`] with a reason.

use std::fmt;

use gridform_core::{
    DragCancelReason, DragEvent, DragEventError, DragEventKind, HoverTarget, Item, ItemId,
    PointerPosition,
};
use gridform_layout::{ClassifierTuning, EdgePosition};
use serde::{Deserialize, Serialize};

/// Session state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragSessionState {
    #[default]
    Idle,
    Dragging {
        active: ItemId,
        over: Option<ItemId>,
        position: Option<EdgePosition>,
        pointer: PointerPosition,
        started_sequence: u64,
    },
}

impl DragSessionState {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    DragAlreadyInProgress,
    UnknownItem,
    HoverUnchanged,
}

/// What one event did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        active: ItemId,
        pointer: PointerPosition,
    },
    Hovered {
        active: ItemId,
        over: ItemId,
        position: EdgePosition,
    },
    HoverCleared {
        active: ItemId,
    },
    /// Pointer released over `over`. `position` is the last edge classified
    /// over that same item, if any.
    Dropped {
        active: ItemId,
        over: ItemId,
        position: Option<EdgePosition>,
        pointer: PointerPosition,
    },
    Canceled {
        active: Option<ItemId>,
        reason: DragCancelReason,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One state-machine step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub sequence: u64,
    pub from: DragSessionState,
    pub to: DragSessionState,
    pub effect: DragEffect,
}

/// Drag session state machine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DragSessionMachine {
    state: DragSessionState,
    transition_counter: u64,
    last_sequence: Option<u64>,
}

impl DragSessionMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &DragSessionState {
        &self.state
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.state.is_idle()
    }

    /// Grasped item, while dragging.
    #[must_use]
    pub fn active(&self) -> Option<&ItemId> {
        match &self.state {
            DragSessionState::Dragging { active, .. } => Some(active),
            DragSessionState::Idle => None,
        }
    }

    /// Hovered item, while dragging over one.
    #[must_use]
    pub fn over(&self) -> Option<&ItemId> {
        match &self.state {
            DragSessionState::Dragging { over, .. } => over.as_ref(),
            DragSessionState::Idle => None,
        }
    }

    /// Edge currently targeted.
    #[must_use]
    pub fn position(&self) -> Option<EdgePosition> {
        match &self.state {
            DragSessionState::Dragging { position, .. } => *position,
            DragSessionState::Idle => None,
        }
    }

    /// Sequence of the last accepted event.
    #[must_use]
    pub const fn last_sequence(&self) -> Option<u64> {
        self.last_sequence
    }

    /// Reset to Idle without an event.
    ///
    /// Returns `None` when already idle. The transition carries sequence 0
    /// and [`DragCancelReason::Programmatic`].
    pub fn force_cancel(&mut self) -> Option<DragTransition> {
        let DragSessionState::Dragging { active, .. } = &self.state else {
            return None;
        };
        let effect = DragEffect::Canceled {
            active: Some(active.clone()),
            reason: DragCancelReason::Programmatic,
        };
        let from = std::mem::take(&mut self.state);
        self.transition_counter = self.transition_counter.saturating_add(1);
        tracing::debug!(
            target: "gridform.session",
            transition_id = self.transition_counter,
            "drag session force-canceled"
        );
        Some(DragTransition {
            transition_id: self.transition_counter,
            sequence: 0,
            from,
            to: DragSessionState::Idle,
            effect,
        })
    }

    /// Apply one drag event.
    ///
    /// `items` is the current list snapshot; it resolves hovered items and
    /// tells the classifier whether the hovered item is first or last.
    pub fn apply_event<P>(
        &mut self,
        event: &DragEvent,
        items: &[Item<P>],
        tuning: &ClassifierTuning,
    ) -> Result<DragTransition, DragSessionError> {
        event.validate().map_err(DragSessionError::InvalidEvent)?;
        if let Some(last) = self.last_sequence
            && event.sequence <= last
        {
            return Err(DragSessionError::SequenceOutOfOrder {
                last,
                got: event.sequence,
            });
        }
        self.last_sequence = Some(event.sequence);

        let from = self.state.clone();
        let effect = match (&self.state, &event.kind) {
            (DragSessionState::Idle, DragEventKind::DragStart { active, pointer }) => {
                if items.iter().any(|item| &item.id == active) {
                    self.state = DragSessionState::Dragging {
                        active: active.clone(),
                        over: None,
                        position: None,
                        pointer: *pointer,
                        started_sequence: event.sequence,
                    };
                    DragEffect::Started {
                        active: active.clone(),
                        pointer: *pointer,
                    }
                } else {
                    DragEffect::Noop {
                        reason: DragNoopReason::UnknownItem,
                    }
                }
            }
            (DragSessionState::Idle, _) => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            },
            (DragSessionState::Dragging { .. }, DragEventKind::DragStart { .. }) => {
                DragEffect::Noop {
                    reason: DragNoopReason::DragAlreadyInProgress,
                }
            }
            (
                DragSessionState::Dragging { .. },
                DragEventKind::DragMove { pointer, over }
                | DragEventKind::DragOver { pointer, over },
            ) => self.hover(*pointer, over.as_ref(), items, tuning),
            (
                DragSessionState::Dragging {
                    active,
                    over: hovered,
                    position,
                    ..
                },
                DragEventKind::DragEnd { pointer, over },
            ) => {
                let effect = match over {
                    Some(target) if target != active => DragEffect::Dropped {
                        active: active.clone(),
                        over: target.clone(),
                        position: if hovered.as_ref() == Some(target) {
                            *position
                        } else {
                            None
                        },
                        pointer: *pointer,
                    },
                    _ => DragEffect::Canceled {
                        active: Some(active.clone()),
                        reason: DragCancelReason::DroppedOutside,
                    },
                };
                self.state = DragSessionState::Idle;
                effect
            }
            (DragSessionState::Dragging { active, .. }, DragEventKind::Cancel { reason }) => {
                let effect = DragEffect::Canceled {
                    active: Some(active.clone()),
                    reason: *reason,
                };
                self.state = DragSessionState::Idle;
                effect
            }
        };

        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = DragTransition {
            transition_id: self.transition_counter,
            sequence: event.sequence,
            from,
            to: self.state.clone(),
            effect,
        };
        tracing::debug!(
            target: "gridform.session",
            transition_id = transition.transition_id,
            sequence = transition.sequence,
            effect = ?transition.effect,
            "drag session transition"
        );
        Ok(transition)
    }

    fn hover<P>(
        &mut self,
        pointer: PointerPosition,
        target: Option<&HoverTarget>,
        items: &[Item<P>],
        tuning: &ClassifierTuning,
    ) -> DragEffect {
        let DragSessionState::Dragging {
            active,
            over,
            position,
            pointer: current,
            ..
        } = &mut self.state
        else {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            };
        };
        *current = pointer;

        let target = target.filter(|target| target.item != *active);
        let Some(target) = target else {
            if over.take().is_some() {
                *position = None;
                return DragEffect::HoverCleared {
                    active: active.clone(),
                };
            }
            return DragEffect::Noop {
                reason: DragNoopReason::HoverUnchanged,
            };
        };

        let Some(index) = items.iter().position(|item| item.id == target.item) else {
            return DragEffect::Noop {
                reason: DragNoopReason::UnknownItem,
            };
        };
        let is_first = index == 0;
        let is_last = index + 1 == items.len();
        let edge = tuning.classify(pointer, target.rect, &items[index], is_first, is_last);
        tracing::trace!(
            target: "gridform.session",
            over = %target.item,
            edge = %edge,
            x = pointer.x,
            y = pointer.y,
            "hover classified"
        );

        if over.as_ref() == Some(&target.item) && *position == Some(edge) {
            return DragEffect::Noop {
                reason: DragNoopReason::HoverUnchanged,
            };
        }
        *over = Some(target.item.clone());
        *position = Some(edge);
        DragEffect::Hovered {
            active: active.clone(),
            over: target.item.clone(),
            position: edge,
        }
    }
}

/// Errors raised by [`DragSessionMachine::apply_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum DragSessionError {
    InvalidEvent(DragEventError),
    SequenceOutOfOrder { last: u64, got: u64 },
}

impl fmt::Display for DragSessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEvent(error) => write!(f, "invalid drag event: {error}"),
            Self::SequenceOutOfOrder { last, got } => {
                write!(f, "drag event sequence {got} does not follow {last}")
            }
        }
    }
}

impl std::error::Error for DragSessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::InvalidEvent(error) = self {
            return Some(error);
        }
        None
    }
}
