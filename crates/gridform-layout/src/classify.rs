#![forbid(unsafe_code)]

//! Drag position classification.
//!
//! Turns a raw pointer position over a hovered item into the edge the drop
//! targets. Vertical (new-row) edges are only offered inside the central
//! horizontal band, and only where "above" or "below" is unambiguous: on a
//! full-width item, or on the first or last item of the list. Everywhere else
//! the pointer picks a column neighbour (`left` / `right`).

use std::fmt;

use gridform_core::{Item, ItemRect, PointerPosition};
use serde::{Deserialize, Serialize};

/// Edge of the hovered item a drop targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePosition {
    Left,
    Right,
    Top,
    Bottom,
}

impl EdgePosition {
    /// `top` / `bottom`: the dropped item becomes its own row.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `left` / `right`: the dropped item joins the hovered row.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for EdgePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band and split lines used by [`classify`], as fractions of the hovered
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierTuning {
    /// Inclusive lower bound of the central band on the x axis.
    pub band_low: f64,
    /// Inclusive upper bound of the central band on the x axis.
    pub band_high: f64,
    /// `y` below this is `top`.
    pub vertical_split: f64,
    /// `x` below this is `left`.
    pub horizontal_split: f64,
}

impl ClassifierTuning {
    /// Reject bands outside `0..=1` or inverted.
    pub fn validate(&self) -> Result<(), ClassifierTuningError> {
        let fields = [
            ("band_low", self.band_low),
            ("band_high", self.band_high),
            ("vertical_split", self.vertical_split),
            ("horizontal_split", self.horizontal_split),
        ];
        for (field, value) in fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ClassifierTuningError::OutOfUnitRange { field, value });
            }
        }
        if self.band_low > self.band_high {
            return Err(ClassifierTuningError::InvertedBand {
                low: self.band_low,
                high: self.band_high,
            });
        }
        Ok(())
    }

    /// Classify with this tuning.
    #[must_use]
    pub fn classify<P>(
        &self,
        pointer: PointerPosition,
        rect: ItemRect,
        over: &Item<P>,
        is_first: bool,
        is_last: bool,
    ) -> EdgePosition {
        let (relative_x, relative_y) = rect.relative(pointer);
        let in_band = (self.band_low..=self.band_high).contains(&relative_x);
        let offers_vertical = over.span.is_full() || is_first || is_last;

        if in_band && offers_vertical {
            if relative_y < self.vertical_split {
                EdgePosition::Top
            } else {
                EdgePosition::Bottom
            }
        } else if relative_x < self.horizontal_split {
            EdgePosition::Left
        } else {
            EdgePosition::Right
        }
    }
}

impl Default for ClassifierTuning {
    fn default() -> Self {
        Self {
            band_low: 0.33,
            band_high: 0.66,
            vertical_split: 0.5,
            horizontal_split: 0.5,
        }
    }
}

/// Classify a pointer over `over` with the default tuning.
///
/// `is_first` / `is_last` say whether `over` is the first or last item of
/// the whole list.
#[must_use]
pub fn classify<P>(
    pointer: PointerPosition,
    rect: ItemRect,
    over: &Item<P>,
    is_first: bool,
    is_last: bool,
) -> EdgePosition {
    ClassifierTuning::default().classify(pointer, rect, over, is_first, is_last)
}

/// Invalid classifier tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassifierTuningError {
    OutOfUnitRange { field: &'static str, value: f64 },
    InvertedBand { low: f64, high: f64 },
}

impl fmt::Display for ClassifierTuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfUnitRange { field, value } => {
                write!(f, "classifier {field} must be within [0, 1] (got {value})")
            }
            Self::InvertedBand { low, high } => {
                write!(f, "classifier band is inverted: low {low} > high {high}")
            }
        }
    }
}

impl std::error::Error for ClassifierTuningError {}

#[cfg(test)]
mod tests {
    use super::*;
    use gridform_core::{ItemId, Span};

    fn item(span: u8) -> Item<()> {
        Item::new(
            ItemId::new("over").expect("test id"),
            Span::new(span).expect("test span"),
            (),
        )
    }

    const RECT: ItemRect = ItemRect::new(0.0, 0.0, 100.0, 50.0);

    fn at(x: f64, y: f64) -> PointerPosition {
        PointerPosition::new(x, y)
    }

    #[test]
    fn first_item_offers_top_in_central_band() {
        let edge = classify(at(50.0, 10.0), RECT, &item(6), true, false);
        assert_eq!(edge, EdgePosition::Top);
    }

    #[test]
    fn outside_band_is_horizontal() {
        let edge = classify(at(10.0, 25.0), RECT, &item(6), true, false);
        assert_eq!(edge, EdgePosition::Left);
        let edge = classify(at(90.0, 25.0), RECT, &item(12), false, false);
        assert_eq!(edge, EdgePosition::Right);
    }

    #[test]
    fn middle_item_never_offers_vertical() {
        assert_eq!(
            classify(at(40.0, 5.0), RECT, &item(4), false, false),
            EdgePosition::Left
        );
        assert_eq!(
            classify(at(60.0, 45.0), RECT, &item(4), false, false),
            EdgePosition::Right
        );
    }

    #[test]
    fn full_width_item_offers_both_vertical_edges() {
        assert_eq!(
            classify(at(50.0, 20.0), RECT, &item(12), false, false),
            EdgePosition::Top
        );
        assert_eq!(
            classify(at(50.0, 25.0), RECT, &item(12), false, false),
            EdgePosition::Bottom
        );
    }

    #[test]
    fn last_item_offers_bottom() {
        assert_eq!(
            classify(at(45.0, 40.0), RECT, &item(3), false, true),
            EdgePosition::Bottom
        );
    }

    #[test]
    fn band_bounds_are_inclusive() {
        assert_eq!(
            classify(at(33.0, 5.0), RECT, &item(12), false, false),
            EdgePosition::Top
        );
        assert_eq!(
            classify(at(66.0, 45.0), RECT, &item(12), false, false),
            EdgePosition::Bottom
        );
        assert_eq!(
            classify(at(32.0, 5.0), RECT, &item(12), false, false),
            EdgePosition::Left
        );
    }

    #[test]
    fn pointer_outside_rect_is_not_clamped() {
        assert_eq!(
            classify(at(-40.0, 25.0), RECT, &item(12), false, false),
            EdgePosition::Left
        );
        assert_eq!(
            classify(at(250.0, 25.0), RECT, &item(12), false, false),
            EdgePosition::Right
        );
    }

    #[test]
    fn degenerate_rect_classifies_from_center() {
        let flat = ItemRect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            classify(at(3.0, 3.0), flat, &item(12), false, false),
            EdgePosition::Bottom
        );
        assert_eq!(
            classify(at(3.0, 3.0), flat, &item(6), false, false),
            EdgePosition::Right
        );
    }

    #[test]
    fn tuning_validation() {
        assert!(ClassifierTuning::default().validate().is_ok());
        let inverted = ClassifierTuning {
            band_low: 0.7,
            band_high: 0.2,
            ..ClassifierTuning::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ClassifierTuningError::InvertedBand { .. })
        ));
        let wide = ClassifierTuning {
            vertical_split: 1.5,
            ..ClassifierTuning::default()
        };
        assert!(matches!(
            wide.validate(),
            Err(ClassifierTuningError::OutOfUnitRange {
                field: "vertical_split",
                ..
            })
        ));
    }

    #[test]
    fn wider_band_offers_vertical_sooner() {
        let tuning = ClassifierTuning {
            band_low: 0.1,
            band_high: 0.9,
            ..ClassifierTuning::default()
        };
        assert_eq!(
            tuning.classify(at(15.0, 5.0), RECT, &item(12), false, false),
            EdgePosition::Top
        );
    }
}
