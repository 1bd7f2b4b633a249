use super::*;
use crate::encode::runs::Run;
use crate::foundation::core::{PixelPos, WorldPos};
use crate::layout::BarrelLayout;
use crate::pack::container::pack_pixel;

fn layout() -> BarrelLayout {
    BarrelLayout::new(WorldPos::new(0, 64, 0), -3, 2)
}

#[test]
fn single_shulker_barrel_command() {
    let runs = [Run::new(Color::Off, 3), Run::new(Color::On, 64)];
    let barrel = pack_pixel(PixelPos::new(2, 1), &runs, &layout()).unwrap();
    assert_eq!(
        barrel_command(&barrel, &Palette::default()),
        "setblock 0 61 4 minecraft:barrel[facing=east]{Items:[\
         {Slot:0,id:white_shulker_box,Count:1,tag:{BlockEntityTag:{Items:[\
         {Slot:0,id:black_wool,Count:3},{Slot:1,id:white_wool,Count:64}\
         ]}}}]} destroy"
    );
}

#[test]
fn empty_shulker_renders_empty_item_list() {
    let barrel = pack_pixel(PixelPos::new(0, 0), &[], &layout()).unwrap();
    assert_eq!(
        barrel_command(&barrel, &Palette::default()),
        "setblock 0 64 0 minecraft:barrel[facing=east]{Items:[\
         {Slot:0,id:white_shulker_box,Count:1,tag:{BlockEntityTag:{Items:[]}}}]} destroy"
    );
}

#[test]
fn second_shulker_restarts_item_slots() {
    let runs = vec![Run::new(Color::On, 2); 28];
    let barrel = pack_pixel(PixelPos::new(0, 0), &runs, &layout()).unwrap();
    let cmd = barrel_command(&barrel, &Palette::default());
    assert!(cmd.contains("{Slot:26,id:white_wool,Count:2}]}}},{Slot:1,id:white_shulker_box"));
    assert!(cmd.ends_with("{Slot:0,id:white_wool,Count:2}]}}}]} destroy"));
}

#[test]
fn full_first_shulker_is_followed_by_an_empty_one() {
    let runs = vec![Run::new(Color::Off, 64); 27];
    let barrel = pack_pixel(PixelPos::new(0, 0), &runs, &layout()).unwrap();
    let cmd = barrel_command(&barrel, &Palette::default());
    assert!(cmd.ends_with(
        "{Slot:26,id:black_wool,Count:64}]}}},\
         {Slot:1,id:white_shulker_box,Count:1,tag:{BlockEntityTag:{Items:[]}}}]} destroy"
    ));
}

#[test]
fn palette_overrides_item_ids() {
    let palette = Palette {
        off: "minecraft:black_concrete".to_string(),
        on: "minecraft:white_concrete".to_string(),
        shulker: "minecraft:black_shulker_box".to_string(),
    };
    let barrel = pack_pixel(PixelPos::new(0, 0), &[Run::new(Color::On, 1)], &layout()).unwrap();
    let cmd = barrel_command(&barrel, &palette);
    assert!(cmd.contains("id:minecraft:black_shulker_box"));
    assert!(cmd.contains("id:minecraft:white_concrete,Count:1"));
}
