use image::{GrayImage, imageops::FilterType};

use crate::foundation::core::{Color, Resolution};
use crate::foundation::error::ScreenResult;
use crate::frames::buffer::Frame;

/// Luma values strictly above this become [`Color::On`].
pub const LUMA_THRESHOLD: u8 = 127;

/// Resize a grayscale frame to the screen resolution and threshold it.
///
/// Downscaling uses a triangle filter, which averages the source area each pixel covers.
pub fn binarize_gray(gray: &GrayImage, target: Resolution) -> ScreenResult<Frame> {
    let resized;
    let src = if gray.dimensions() == (target.width, target.height) {
        gray
    } else {
        resized = image::imageops::resize(gray, target.width, target.height, FilterType::Triangle);
        &resized
    };

    let pixels = src
        .as_raw()
        .iter()
        .map(|&l| {
            if l > LUMA_THRESHOLD {
                Color::On
            } else {
                Color::Off
            }
        })
        .collect();
    Frame::new(target, pixels)
}

/// Threshold any decoded image after converting it to luma.
pub fn binarize_image(img: &image::DynamicImage, target: Resolution) -> ScreenResult<Frame> {
    binarize_gray(&img.to_luma8(), target)
}

#[cfg(test)]
#[path = "../../tests/unit/frames/binarize.rs"]
mod tests;
