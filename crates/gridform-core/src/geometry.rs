#![forbid(unsafe_code)]

//! Geometric primitives in host pixel space.
//!
//! The pointer source reports raw coordinates and bounding boxes in the same
//! space (typically CSS pixels). Nothing is pre-relativized; the classifier
//! does that itself.

use serde::{Deserialize, Serialize};

/// Raw pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Bounding box of a rendered grid item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ItemRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> PointerPosition {
        PointerPosition::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[must_use]
    pub fn contains(&self, point: PointerPosition) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }

    /// All fields finite and extents non-negative.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Pointer position as a fraction of this rectangle on each axis.
    ///
    /// Not clamped: a fast pointer can report values outside `0..=1`. A
    /// degenerate extent maps to the centre (`0.5`) on that axis.
    #[must_use]
    pub fn relative(&self, point: PointerPosition) -> (f64, f64) {
        (
            relative_on_axis(point.x, self.left, self.width),
            relative_on_axis(point.y, self.top, self.height),
        )
    }
}

fn relative_on_axis(coordinate: f64, origin: f64, extent: f64) -> f64 {
    if !extent.is_finite() || extent <= 0.0 {
        return 0.5;
    }
    let relative = (coordinate - origin) / extent;
    if relative.is_finite() { relative } else { 0.5 }
}
