//! Pixel grid → world coordinate mapping for the barrel wall behind the screen.

use crate::foundation::core::{PixelPos, WorldPos};

/// Placement of the barrel wall in the world.
///
/// The wall is a flat plane at `origin.x`; rows step along the vertical axis by `row_offset`
/// and columns step along `z` by `column_offset`. Offsets may have any sign, so the wall can
/// grow in either direction from the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BarrelLayout {
    /// World position of pixel `(0, 0)`.
    pub origin: WorldPos,
    /// Vertical step between consecutive rows.
    pub row_offset: i32,
    /// `z` step between consecutive columns.
    pub column_offset: i32,
}

impl BarrelLayout {
    /// Create a layout.
    pub const fn new(origin: WorldPos, row_offset: i32, column_offset: i32) -> Self {
        Self {
            origin,
            row_offset,
            column_offset,
        }
    }

    /// World coordinate of the barrel backing `pixel`.
    ///
    /// Total: no bounds checks are made against world height or border limits.
    pub fn pixel_to_world(&self, pixel: PixelPos) -> WorldPos {
        WorldPos {
            x: self.origin.x,
            y: self.origin.y + i64::from(pixel.y) * i64::from(self.row_offset),
            z: self.origin.z + i64::from(pixel.x) * i64::from(self.column_offset),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/layout/mapper.rs"]
mod tests;
