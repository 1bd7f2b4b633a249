use super::*;

#[test]
fn capacity_constants_multiply_out() {
    assert_eq!(BARREL_CAPACITY, 729);
    assert_eq!(MAX_STACK_COUNT, 64);
}

#[test]
fn color_from_bit_treats_nonzero_as_on() {
    assert_eq!(Color::from_bit(0), Color::Off);
    assert_eq!(Color::from_bit(1), Color::On);
    assert_eq!(Color::from_bit(255), Color::On);
    assert_eq!(Color::On.bit(), 1);
}

#[test]
fn column_major_index_walks_rows_first() {
    let res = Resolution::new(3, 2).unwrap();
    let order: Vec<PixelPos> = res.pixels_column_major().collect();
    assert_eq!(
        order,
        vec![
            PixelPos::new(0, 0),
            PixelPos::new(0, 1),
            PixelPos::new(1, 0),
            PixelPos::new(1, 1),
            PixelPos::new(2, 0),
            PixelPos::new(2, 1),
        ]
    );
    for (i, p) in order.iter().enumerate() {
        assert_eq!(res.column_major_index(*p), i);
        assert_eq!(res.pixel_at_column_major(i), *p);
    }
}

#[test]
fn resolution_rejects_zero() {
    assert!(Resolution::new(0, 4).is_err());
    assert!(Resolution::new(4, 0).is_err());
}

#[test]
fn world_pos_formats_as_command_triplet() {
    assert_eq!(WorldPos::new(0, -61, 4).to_string(), "0 -61 4");
}

#[test]
fn fps_downsample_uses_floor_for_integral_rates() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.downsample(1), fps);
    assert_eq!(fps.downsample(4), Fps { num: 7, den: 1 });
    assert_eq!(fps.downsample(100), Fps { num: 1, den: 1 });

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(ntsc.downsample(2), Fps { num: 30000, den: 2002 });
}
