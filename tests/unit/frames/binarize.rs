use super::*;
use crate::foundation::core::PixelPos;

#[test]
fn threshold_is_strictly_above_127() {
    let gray = GrayImage::from_raw(4, 1, vec![0, 127, 128, 255]).unwrap();
    let f = binarize_gray(&gray, Resolution::new(4, 1).unwrap()).unwrap();
    assert_eq!(
        f.pixels(),
        &[Color::Off, Color::Off, Color::On, Color::On]
    );
}

#[test]
fn downscale_averages_blocks() {
    // Left half white, right half black at 8x4, downscaled to 2x1.
    let gray = GrayImage::from_fn(8, 4, |x, _| {
        if x < 4 { image::Luma([255]) } else { image::Luma([0]) }
    });
    let f = binarize_gray(&gray, Resolution::new(2, 1).unwrap()).unwrap();
    assert_eq!(f.get(PixelPos::new(0, 0)), Color::On);
    assert_eq!(f.get(PixelPos::new(1, 0)), Color::Off);
}

#[test]
fn color_images_go_through_luma() {
    let rgb = image::RgbImage::from_pixel(3, 3, image::Rgb([250, 250, 250]));
    let f = binarize_image(
        &image::DynamicImage::ImageRgb8(rgb),
        Resolution::new(3, 3).unwrap(),
    )
    .unwrap();
    assert!(f.pixels().iter().all(|&c| c == Color::On));
}
