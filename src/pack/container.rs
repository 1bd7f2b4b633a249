use crate::encode::runs::Run;
use crate::foundation::core::{
    BARREL_CAPACITY, BARREL_SLOTS, Color, MAX_STACK_COUNT, PixelPos, SHULKER_SLOTS, WorldPos,
};
use crate::foundation::error::{ScreenError, ScreenResult};
use crate::layout::BarrelLayout;

/// Physical encoding of one run: a stack of `count` items of the color's material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStack {
    color: Color,
    count: u32,
}

impl ItemStack {
    /// Create a stack, rejecting counts outside `1..=64`.
    pub fn new(color: Color, count: u32) -> ScreenResult<Self> {
        if !(1..=MAX_STACK_COUNT).contains(&count) {
            return Err(ScreenError::DurationOutOfRange { count });
        }
        Ok(Self { color, count })
    }

    /// Stack encoding `run`.
    pub fn from_run(run: &Run) -> ScreenResult<Self> {
        Self::new(run.color, run.duration)
    }

    /// Encoded color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Item count.
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// A shulker box: up to 27 stacks, slot index = insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shulker {
    stacks: Vec<ItemStack>,
}

impl Shulker {
    /// Create an empty shulker box.
    pub fn new() -> Self {
        Self {
            stacks: Vec::with_capacity(SHULKER_SLOTS),
        }
    }

    /// Put `stack` in the next free slot.
    pub fn push(&mut self, stack: ItemStack) -> ScreenResult<()> {
        if self.is_full() {
            return Err(ScreenError::validation(format!(
                "shulker box already holds {SHULKER_SLOTS} stacks"
            )));
        }
        self.stacks.push(stack);
        Ok(())
    }

    /// Filled slots in slot order.
    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// `true` when no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// `true` when every slot is filled.
    pub fn is_full(&self) -> bool {
        self.stacks.len() >= SHULKER_SLOTS
    }
}

/// A barrel bound to one pixel: up to 27 shulker boxes placed at the pixel's world position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Barrel {
    pixel: PixelPos,
    position: WorldPos,
    shulkers: Vec<Shulker>,
}

impl Barrel {
    /// Create an empty barrel for `pixel` at `position`.
    pub fn new(pixel: PixelPos, position: WorldPos) -> Self {
        Self {
            pixel,
            position,
            shulkers: Vec::with_capacity(BARREL_SLOTS),
        }
    }

    /// Put `shulker` in the next free slot.
    pub fn push_shulker(&mut self, shulker: Shulker) -> ScreenResult<()> {
        if self.shulkers.len() >= BARREL_SLOTS {
            return Err(ScreenError::validation(format!(
                "barrel for pixel ({}, {}) already holds {BARREL_SLOTS} shulker boxes",
                self.pixel.x, self.pixel.y
            )));
        }
        self.shulkers.push(shulker);
        Ok(())
    }

    /// Pixel this barrel encodes.
    pub fn pixel(&self) -> PixelPos {
        self.pixel
    }

    /// World position of the barrel.
    pub fn position(&self) -> WorldPos {
        self.position
    }

    /// Filled slots in slot order.
    pub fn shulkers(&self) -> &[Shulker] {
        &self.shulkers
    }

    /// Stacks across all shulker boxes.
    pub fn stack_count(&self) -> usize {
        self.shulkers.iter().map(Shulker::len).sum()
    }

    /// Stacks in chronological order.
    pub fn stacks(&self) -> impl Iterator<Item = &ItemStack> + '_ {
        self.shulkers.iter().flat_map(|s| s.stacks.iter())
    }
}

/// Pack one pixel's runs into a barrel at its mapped world position.
///
/// Shulker boxes are filled slot by slot in run order; a full box moves into the barrel and a
/// fresh one is started. Once the runs are consumed the box in progress is placed as well,
/// partial or empty, unless the barrel already holds 27 boxes (exactly 729 runs).
///
/// Fails with [`ScreenError::CapacityOverflow`] before packing anything when the pixel needs
/// more than 729 stacks, and with [`ScreenError::DurationOutOfRange`] for a run that cannot be
/// a single stack.
pub fn pack_pixel(pixel: PixelPos, runs: &[Run], layout: &BarrelLayout) -> ScreenResult<Barrel> {
    if runs.len() > BARREL_CAPACITY {
        return Err(ScreenError::CapacityOverflow {
            pixel,
            runs_required: runs.len(),
        });
    }

    let mut barrel = Barrel::new(pixel, layout.pixel_to_world(pixel));
    let mut shulker = Shulker::new();
    for run in runs {
        shulker.push(ItemStack::from_run(run)?)?;
        if shulker.is_full() {
            barrel.push_shulker(std::mem::take(&mut shulker))?;
        }
    }
    if barrel.shulkers.len() < BARREL_SLOTS {
        barrel.push_shulker(shulker)?;
    }
    Ok(barrel)
}

#[cfg(test)]
#[path = "../../tests/unit/pack/container.rs"]
mod tests;
