use std::path::Path;

use image::imageops::FilterType;

use crate::diagnostics::ffmpeg::GrayVideoWriter;
use crate::foundation::core::Resolution;
use crate::foundation::error::{ScreenError, ScreenResult};
use crate::frames::buffer::{Frame, FrameSequence};

/// Size of a preview rendered `scale` times larger than the screen.
pub fn preview_resolution(resolution: Resolution, scale: u32) -> ScreenResult<Resolution> {
    if scale == 0 {
        return Err(ScreenError::validation("preview scale must be >= 1"));
    }
    match (
        resolution.width.checked_mul(scale),
        resolution.height.checked_mul(scale),
    ) {
        (Some(w), Some(h)) => Resolution::new(w, h),
        _ => Err(ScreenError::validation(format!(
            "preview scale {scale} overflows a {}x{} screen",
            resolution.width, resolution.height
        ))),
    }
}

/// Upscale a row-major gray8 frame by an integer factor, each pixel becoming a solid block.
pub fn scale_gray8(gray: Vec<u8>, resolution: Resolution, scale: u32) -> ScreenResult<Vec<u8>> {
    let target = preview_resolution(resolution, scale)?;
    if scale == 1 {
        return Ok(gray);
    }
    let img = image::GrayImage::from_raw(resolution.width, resolution.height, gray)
        .ok_or_else(|| ScreenError::validation("gray frame does not match its resolution"))?;
    Ok(image::imageops::resize(&img, target.width, target.height, FilterType::Nearest).into_raw())
}

/// Render the binarized clip as a black/white video at the sampled frame rate, upscaled by
/// `scale`.
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn write_debug_video(seq: &FrameSequence, out_path: &Path, scale: u32) -> ScreenResult<usize> {
    let res = seq.resolution();
    let mut writer = GrayVideoWriter::create(out_path, preview_resolution(res, scale)?, seq.fps())?;
    for frame in seq.frames() {
        writer.write_frame(&scale_gray8(frame.to_gray8(), res, scale)?)?;
    }
    let written = writer.finish()?;
    tracing::info!(path = %out_path.display(), frames = written, "debug video written");
    Ok(written)
}

/// Render where pixels change: white where frame `i` differs from frame `i - 1`.
///
/// One frame shorter than the clip; a single-frame clip produces no video. Upscaled by
/// `scale` like [`write_debug_video`].
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn write_update_map_video(
    seq: &FrameSequence,
    out_path: &Path,
    scale: u32,
) -> ScreenResult<usize> {
    if seq.len() < 2 {
        tracing::warn!("update map needs at least two frames, skipping");
        return Ok(0);
    }
    let res = seq.resolution();
    let mut writer = GrayVideoWriter::create(out_path, preview_resolution(res, scale)?, seq.fps())?;
    for pair in seq.frames().windows(2) {
        writer.write_frame(&scale_gray8(update_map(&pair[0], &pair[1]), res, scale)?)?;
    }
    let written = writer.finish()?;
    tracing::info!(path = %out_path.display(), frames = written, "update map video written");
    Ok(written)
}

/// Row-major gray8 mask of the pixels that differ between two frames.
pub fn update_map(prev: &Frame, next: &Frame) -> Vec<u8> {
    prev.pixels()
        .iter()
        .zip(next.pixels())
        .map(|(a, b)| if a != b { 255 } else { 0 })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/diagnostics/video.rs"]
mod tests;
