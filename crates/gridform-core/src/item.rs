#![forbid(unsafe_code)]

//! Grid item model.
//!
//! An [`Item`] is the atomic grid cell: a stable string id, a column [`Span`]
//! in `1..=12`, and an opaque payload owned by the caller. The engine treats
//! item lists as values. Nothing in this workspace mutates an item that was
//! handed in; every operation builds new items.
//!
//! # Invariants
//! 1. `Span` always holds a value in `1..=GRID_COLUMNS`.
//! 2. `ItemId` is never empty.
//! 3. `ItemIdAllocator` never issues an id it has issued before, and when
//!    seeded from a list never issues an id already present in it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of columns in one grid row.
pub const GRID_COLUMNS: u8 = 12;

/// Number of grid columns an item occupies.
///
/// Always in `1..=GRID_COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Span(u8);

impl Span {
    /// Narrowest span.
    pub const MIN: Self = Self(1);
    /// Full-width span.
    pub const FULL: Self = Self(GRID_COLUMNS);

    /// Create a span, rejecting values outside `1..=12`.
    pub fn new(raw: u8) -> Result<Self, GridModelError> {
        if raw == 0 || raw > GRID_COLUMNS {
            return Err(GridModelError::SpanOutOfRange { raw: i64::from(raw) });
        }
        Ok(Self(raw))
    }

    /// Clamp any integer into `1..=12`.
    ///
    /// Used where externally supplied (possibly corrupted) spans enter the
    /// engine.
    #[must_use]
    pub fn saturating(raw: i64) -> Self {
        Self(raw.clamp(1, i64::from(GRID_COLUMNS)) as u8)
    }

    /// Raw column count.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this span fills a whole row.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 == GRID_COLUMNS
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u8> for Span {
    type Error = GridModelError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Span> for u8 {
    fn from(span: Span) -> Self {
        span.0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier for grid items.
///
/// Assigned at creation and never reused. The empty string is reserved.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Create an id, rejecting the empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, GridModelError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(GridModelError::EmptyItemId);
        }
        Ok(Self(raw))
    }

    /// Borrow the id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = GridModelError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One grid cell.
///
/// `payload` is opaque to the engine; only `id` and `span` are ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<P> {
    pub id: ItemId,
    pub span: Span,
    pub payload: P,
}

impl<P> Item<P> {
    #[must_use]
    pub fn new(id: ItemId, span: Span, payload: P) -> Self {
        Self { id, span, payload }
    }

    /// Copy of this item with a different span.
    #[must_use]
    pub fn with_span(&self, span: Span) -> Self
    where
        P: Clone,
    {
        Self {
            id: self.id.clone(),
            span,
            payload: self.payload.clone(),
        }
    }
}

/// Deterministic id allocator issuing `item-1`, `item-2`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdAllocator {
    prefix: String,
    next: u64,
}

impl ItemIdAllocator {
    /// Allocator for ids of the form `{prefix}-{n}`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Seed from an existing list so no id already present is issued again.
    #[must_use]
    pub fn from_items<P>(prefix: impl Into<String>, items: &[Item<P>]) -> Self {
        let mut allocator = Self::new(prefix);
        let marker = format!("{}-", allocator.prefix);
        let highest = items
            .iter()
            .filter_map(|item| item.id.as_str().strip_prefix(marker.as_str()))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max();
        if let Some(highest) = highest {
            allocator.next = highest.saturating_add(1);
        }
        allocator
    }

    /// Issue the next id.
    pub fn allocate(&mut self) -> Result<ItemId, GridModelError> {
        let current = self.next;
        let Some(next) = current.checked_add(1) else {
            return Err(GridModelError::IdAllocatorOverflow);
        };
        self.next = next;
        ItemId::new(format!("{}-{current}", self.prefix))
    }
}

impl Default for ItemIdAllocator {
    fn default() -> Self {
        Self::new("item")
    }
}

/// Errors raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridModelError {
    SpanOutOfRange { raw: i64 },
    EmptyItemId,
    IdAllocatorOverflow,
}

impl fmt::Display for GridModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpanOutOfRange { raw } => {
                write!(f, "span {raw} is outside 1..={GRID_COLUMNS}")
            }
            Self::EmptyItemId => write!(f, "item id must not be empty"),
            Self::IdAllocatorOverflow => write!(f, "item id allocator exhausted"),
        }
    }
}

impl std::error::Error for GridModelError {}
