#![forbid(unsafe_code)]

//! Pixel geometry for a partitioned grid.
//!
//! Lays rows out on a 12-column track: every column has the same width, gaps
//! separate columns and rows, and every row has the same height. Hosts that
//! render with CSS grid never need this; it exists for hosts that draw
//! themselves and for driving the engine with synthetic pointer streams.

use gridform_core::{GRID_COLUMNS, HoverTarget, ItemId, ItemRect, PointerPosition};
use serde::{Deserialize, Serialize};

use crate::partition::GridPartition;

/// Track sizing for [`GridGeometry::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridGeometry {
    pub column_gap: f64,
    pub row_gap: f64,
    pub row_height: f64,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            column_gap: 16.0,
            row_gap: 16.0,
            row_height: 64.0,
        }
    }
}

impl GridGeometry {
    /// Width of one column inside `container_width`.
    #[must_use]
    pub fn column_width(&self, container_width: f64) -> f64 {
        let gaps = self.column_gap.max(0.0) * f64::from(GRID_COLUMNS - 1);
        ((container_width - gaps) / f64::from(GRID_COLUMNS)).max(0.0)
    }

    /// Solve item rectangles for `partition` inside `container`.
    ///
    /// Only `container.left`, `container.top` and `container.width` are used;
    /// rows grow downward without limit.
    #[must_use]
    pub fn solve<P>(&self, partition: &GridPartition<P>, container: ItemRect) -> GridLayout {
        let column = self.column_width(container.width);
        let column_gap = self.column_gap.max(0.0);
        let row_stride = self.row_height.max(0.0) + self.row_gap.max(0.0);
        let mut rects = Vec::with_capacity(partition.item_count());

        for (row_index, row) in partition.rows.iter().enumerate() {
            let top = container.top + row_stride * row_index as f64;
            let mut column_start = 0_u32;
            for item in row {
                let span = f64::from(item.span.get());
                let left = container.left + f64::from(column_start) * (column + column_gap);
                let width = span * column + (span - 1.0) * column_gap;
                rects.push((
                    item.id.clone(),
                    ItemRect::new(left, top, width, self.row_height.max(0.0)),
                ));
                column_start += u32::from(item.span.get());
            }
        }

        GridLayout { rects }
    }
}

/// Solved rectangles in list order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    rects: Vec<(ItemId, ItemRect)>,
}

impl GridLayout {
    /// Rectangle of an item.
    #[must_use]
    pub fn rect(&self, id: &ItemId) -> Option<ItemRect> {
        self.rects
            .iter()
            .find(|(item, _)| item == id)
            .map(|(_, rect)| *rect)
    }

    /// Iterate items and rectangles in list order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, ItemRect)> + '_ {
        self.rects.iter().map(|(id, rect)| (id, *rect))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Whether `id` is the first item of the whole list.
    #[must_use]
    pub fn is_first(&self, id: &ItemId) -> bool {
        self.rects.first().is_some_and(|(first, _)| first == id)
    }

    /// Whether `id` is the last item of the whole list.
    #[must_use]
    pub fn is_last(&self, id: &ItemId) -> bool {
        self.rects.last().is_some_and(|(last, _)| last == id)
    }

    /// Item under `pointer`, if any.
    #[must_use]
    pub fn hit_test(&self, pointer: PointerPosition) -> Option<&ItemId> {
        self.rects
            .iter()
            .find(|(_, rect)| rect.contains(pointer))
            .map(|(id, _)| id)
    }

    /// Hover target under `pointer`, ready to put in a drag event.
    #[must_use]
    pub fn hover_target(&self, pointer: PointerPosition) -> Option<HoverTarget> {
        self.rects
            .iter()
            .find(|(_, rect)| rect.contains(pointer))
            .map(|(id, rect)| HoverTarget::new(id.clone(), *rect))
    }

    /// Pointer position at the given fractions of an item's rectangle.
    #[must_use]
    pub fn point_within(&self, id: &ItemId, fraction_x: f64, fraction_y: f64) -> Option<PointerPosition> {
        let rect = self.rect(id)?;
        Some(PointerPosition::new(
            rect.left + rect.width * fraction_x,
            rect.top + rect.height * fraction_y,
        ))
    }
}
