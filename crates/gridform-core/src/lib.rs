#![forbid(unsafe_code)]

//! Core: item model, geometry, and drag events.
//!
//! # Role in gridform
//! `gridform-core` is the vocabulary layer. It owns the typed [`Item`]
//! record that every other crate passes around, the pixel geometry that the
//! pointer source reports, and the normalized drag events that the runtime
//! consumes.
//!
//! # Primary responsibilities
//! - **Item**: id + column span + opaque payload, with a range-checked [`Span`].
//! - **Geometry**: [`ItemRect`] and [`PointerPosition`] in host pixels.
//! - **DragEvent**: sequenced drag-start / move / over / end / cancel events.
//!
//! # How it fits in the system
//! `gridform-layout` consumes item lists and geometry and stays pure.
//! `gridform-runtime` consumes [`DragEvent`] values, drives the layout engine,
//! and writes the results back to the caller's store.

pub mod event;
pub mod geometry;
pub mod item;

pub use event::{DragCancelReason, DragEvent, DragEventError, DragEventKind, HoverTarget};
pub use geometry::{ItemRect, PointerPosition};
pub use item::{GRID_COLUMNS, GridModelError, Item, ItemId, ItemIdAllocator, Span};
