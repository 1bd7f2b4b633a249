use super::*;
use crate::foundation::core::{Color, PixelPos};

fn window(start: u64, finish: Option<u64>, fps_scaling: u32) -> FrameWindow {
    FrameWindow {
        start,
        finish,
        fps_scaling,
    }
}

#[test]
fn open_finish_runs_to_the_end() {
    assert_eq!(window(0, None, 1).resolve(100).unwrap(), (0, 100));
}

#[test]
fn finish_past_the_end_is_clamped() {
    assert_eq!(window(10, Some(500), 1).resolve(100).unwrap(), (10, 100));
}

#[test]
fn bad_windows_are_rejected() {
    assert!(window(100, None, 1).resolve(100).is_err());
    assert!(window(20, Some(20), 1).resolve(100).is_err());
    assert!(window(30, Some(20), 1).resolve(100).is_err());
    assert!(window(0, None, 0).resolve(100).is_err());
}

#[test]
fn sampling_counts_from_start() {
    let w = window(3, Some(10), 3);
    let kept: Vec<u64> = (0..10).filter(|&i| w.is_sampled(i)).collect();
    assert_eq!(kept, vec![3, 6, 9]);
    assert_eq!(w.sampled_len(3, 10), 3);
    assert_eq!(w.sampled_len(3, 9), 2);
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_frames").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn image_dir_frames_are_sorted_sampled_and_binarized() {
    let dir = temp_dir("image_dir");
    // Frame i is white when i is odd.
    for i in 0..6u8 {
        let luma = if i % 2 == 1 { 255 } else { 0 };
        let img = image::GrayImage::from_pixel(8, 6, image::Luma([luma]));
        img.save(dir.join(format!("frame_{i:03}.png"))).unwrap();
    }
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let source = FrameSource::from_path(&dir, Fps::new(24, 1).unwrap());
    assert!(matches!(source, FrameSource::ImageDir { .. }));

    let res = Resolution::new(4, 3).unwrap();
    let seq = load_frames(&source, &window(1, Some(6), 2), res).unwrap();
    // Kept source frames: 1, 3, 5 -> all white.
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.fps(), Fps { num: 12, den: 1 });
    assert!(
        seq.timeline(PixelPos::new(3, 2))
            .all(|c| c == Color::On)
    );
}

#[test]
fn empty_image_dir_is_an_error() {
    let dir = temp_dir("empty_dir");
    assert!(list_image_files(&dir).is_err());
}
