use super::*;

fn res(w: u32, h: u32) -> Resolution {
    Resolution::new(w, h).unwrap()
}

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn frame_rejects_wrong_pixel_count() {
    assert!(Frame::from_bits(res(2, 2), &[0, 1, 0]).is_err());
    assert!(Frame::from_bits(res(2, 2), &[0, 1, 0, 1]).is_ok());
}

#[test]
fn frame_get_is_row_major() {
    let f = Frame::from_bits(res(3, 2), &[0, 0, 1, 1, 0, 0]).unwrap();
    assert_eq!(f.get(PixelPos::new(2, 0)), Color::On);
    assert_eq!(f.get(PixelPos::new(0, 1)), Color::On);
    assert_eq!(f.get(PixelPos::new(1, 1)), Color::Off);
}

#[test]
fn sequence_rejects_empty_and_mismatched_frames() {
    assert!(FrameSequence::new(res(2, 2), fps(), vec![]).is_err());

    let frames = vec![
        Frame::filled(res(2, 2), Color::Off),
        Frame::filled(res(3, 2), Color::Off),
    ];
    let err = FrameSequence::new(res(2, 2), fps(), frames).unwrap_err();
    assert!(err.to_string().contains("frame 1"));
}

#[test]
fn timeline_reads_one_pixel_across_frames() {
    let seq = FrameSequence::from_fn(res(2, 1), fps(), 4, |f, p| {
        Color::from_bit(((f + p.x as usize) % 2) as u8)
    })
    .unwrap();
    let t: Vec<Color> = seq.timeline(PixelPos::new(1, 0)).collect();
    assert_eq!(t, vec![Color::On, Color::Off, Color::On, Color::Off]);
    assert_eq!(seq.len(), 4);
}

#[test]
fn gray8_maps_on_to_white() {
    let f = Frame::from_bits(res(2, 1), &[1, 0]).unwrap();
    assert_eq!(f.to_gray8(), vec![255, 0]);
}
