use crate::foundation::error::{ScreenError, ScreenResult};

/// Item stacks per shulker box.
pub const SHULKER_SLOTS: usize = 27;
/// Shulker boxes per barrel.
pub const BARREL_SLOTS: usize = 27;
/// Item stacks one barrel can hold across all of its shulker boxes.
pub const BARREL_CAPACITY: usize = SHULKER_SLOTS * BARREL_SLOTS;
/// Largest count a single item stack can carry, and the run duration ceiling.
pub const MAX_STACK_COUNT: u32 = 64;

/// One of the two screen colors.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum Color {
    /// Dark pixel (bit 0).
    Off = 0,
    /// Lit pixel (bit 1).
    On = 1,
}

impl Color {
    /// Map a thresholded bit to a color; any non-zero value is [`Color::On`].
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 { Self::Off } else { Self::On }
    }

    /// The color's bit value.
    pub fn bit(self) -> u8 {
        self as u8
    }
}

/// Pixel index on the logical screen grid: `x` is the column, `y` the row.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelPos {
    /// Column, 0-based from the left.
    pub x: u32,
    /// Row, 0-based from the top.
    pub y: u32,
}

impl PixelPos {
    /// Create a pixel position.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Block coordinate in the voxel world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct WorldPos {
    /// East/west axis.
    pub x: i64,
    /// Vertical axis.
    pub y: i64,
    /// North/south axis.
    pub z: i64,
}

impl WorldPos {
    /// Create a world coordinate.
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for WorldPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Screen dimensions in pixels (one barrel per pixel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

impl Resolution {
    /// Create a validated resolution with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ScreenResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScreenError::validation(
                "screen width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Total number of pixels.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Column-major pixel index: all rows of column 0, then column 1, and so on.
    ///
    /// This is the emission order of the placement commands.
    pub fn column_major_index(self, pos: PixelPos) -> usize {
        pos.x as usize * self.height as usize + pos.y as usize
    }

    /// Inverse of [`Resolution::column_major_index`].
    pub fn pixel_at_column_major(self, idx: usize) -> PixelPos {
        let h = self.height as usize;
        PixelPos::new((idx / h) as u32, (idx % h) as u32)
    }

    /// Iterate pixels in column-major order.
    pub fn pixels_column_major(self) -> impl Iterator<Item = PixelPos> {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| PixelPos::new(x, y)))
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ScreenResult<Self> {
        if den == 0 {
            return Err(ScreenError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ScreenError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Rate after keeping every `scaling`-th frame.
    ///
    /// Integral rates are divided with floor semantics and never drop below 1 fps.
    pub fn downsample(self, scaling: u32) -> Self {
        let scaling = scaling.max(1);
        if self.den == 1 {
            return Self {
                num: (self.num / scaling).max(1),
                den: 1,
            };
        }
        Self {
            num: self.num,
            den: self.den.saturating_mul(scaling),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
