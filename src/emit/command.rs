use std::fmt::Write as _;

use crate::foundation::core::Color;
use crate::pack::container::{Barrel, ItemStack, Shulker};

/// Command appended after all barrels: removes item entities scattered by `setblock ... destroy`
/// replacing whatever occupied the barrel positions before.
pub const CLEANUP_COMMAND: &str = "kill @e[type=minecraft:item]";

/// Item ids used to encode the two colors, plus the container item for the inner boxes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Item id for [`Color::Off`].
    pub off: String,
    /// Item id for [`Color::On`].
    pub on: String,
    /// Item id of the shulker boxes placed in each barrel.
    pub shulker: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            off: "black_wool".to_string(),
            on: "white_wool".to_string(),
            shulker: "white_shulker_box".to_string(),
        }
    }
}

impl Palette {
    /// Item id for `color`.
    pub fn item_id(&self, color: Color) -> &str {
        match color {
            Color::Off => &self.off,
            Color::On => &self.on,
        }
    }
}

/// `setblock` command that places `barrel` with all of its contents.
pub fn barrel_command(barrel: &Barrel, palette: &Palette) -> String {
    let mut out = String::with_capacity(96 + barrel.stack_count() * 40);
    let _ = write!(
        out,
        "setblock {} minecraft:barrel[facing=east]{{Items:[",
        barrel.position()
    );
    for (slot, shulker) in barrel.shulkers().iter().enumerate() {
        if slot > 0 {
            out.push(',');
        }
        write_shulker(&mut out, slot, shulker, palette);
    }
    out.push_str("]} destroy");
    out
}

fn write_shulker(out: &mut String, slot: usize, shulker: &Shulker, palette: &Palette) {
    let _ = write!(
        out,
        "{{Slot:{slot},id:{},Count:1,tag:{{BlockEntityTag:{{Items:[",
        palette.shulker
    );
    for (i, stack) in shulker.stacks().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_stack(out, i, stack, palette);
    }
    out.push_str("]}}}");
}

fn write_stack(out: &mut String, slot: usize, stack: &ItemStack, palette: &Palette) {
    let _ = write!(
        out,
        "{{Slot:{slot},id:{},Count:{}}}",
        palette.item_id(stack.color()),
        stack.count()
    );
}

#[cfg(test)]
#[path = "../../tests/unit/emit/command.rs"]
mod tests;
