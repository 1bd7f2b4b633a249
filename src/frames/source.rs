use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Fps, Resolution};
use crate::foundation::error::{ScreenError, ScreenResult};
use crate::frames::binarize::{binarize_gray, binarize_image};
use crate::frames::buffer::FrameSequence;
use crate::frames::ffmpeg::{GrayFrameReader, probe_video};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

/// Which part of the source to keep and how densely to sample it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameWindow {
    /// First source frame to keep (0-based).
    pub start: u64,
    /// Exclusive end frame; `None` or past the end of the source means "to the end".
    pub finish: Option<u64>,
    /// Keep one frame out of every `fps_scaling`, counted from `start`.
    pub fps_scaling: u32,
}

impl Default for FrameWindow {
    fn default() -> Self {
        Self {
            start: 0,
            finish: None,
            fps_scaling: 1,
        }
    }
}

impl FrameWindow {
    /// Resolve against a source of `source_frames` frames into a half-open `[start, end)`.
    pub fn resolve(&self, source_frames: u64) -> ScreenResult<(u64, u64)> {
        if self.fps_scaling == 0 {
            return Err(ScreenError::validation("fps_scaling must be >= 1"));
        }
        let end = match self.finish {
            Some(f) if f <= source_frames => f,
            Some(f) => {
                tracing::warn!(
                    finish = f,
                    source_frames,
                    "finish frame past end of source, clamping"
                );
                source_frames
            }
            None => source_frames,
        };
        if self.start >= source_frames {
            return Err(ScreenError::validation(format!(
                "start frame {} out of bounds for a source of {source_frames} frames",
                self.start
            )));
        }
        if self.start >= end {
            return Err(ScreenError::validation(format!(
                "start frame {} must be before finish frame {end}",
                self.start
            )));
        }
        Ok((self.start, end))
    }

    /// `true` when source frame `index` (inside the window) is kept.
    pub fn is_sampled(&self, index: u64) -> bool {
        index >= self.start && (index - self.start).is_multiple_of(u64::from(self.fps_scaling.max(1)))
    }

    /// Number of frames kept from `[start, end)`.
    pub fn sampled_len(&self, start: u64, end: u64) -> u64 {
        end.saturating_sub(start).div_ceil(u64::from(self.fps_scaling.max(1)))
    }
}

/// Where frames come from.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameSource {
    /// A video file decoded by the system `ffmpeg`.
    Video(PathBuf),
    /// A directory of still images, one per frame, ordered by file name.
    ImageDir {
        /// Directory holding the frames.
        dir: PathBuf,
        /// Rate the images were captured at.
        fps: Fps,
    },
}

impl FrameSource {
    /// Pick the source kind from the filesystem: directories are image sequences.
    pub fn from_path(path: impl Into<PathBuf>, dir_fps: Fps) -> Self {
        let path = path.into();
        if path.is_dir() {
            Self::ImageDir {
                dir: path,
                fps: dir_fps,
            }
        } else {
            Self::Video(path)
        }
    }
}

/// Load, binarize and downsample `source` into the screen's frame buffer.
#[tracing::instrument(skip(source), fields(source = ?source))]
pub fn load_frames(
    source: &FrameSource,
    window: &FrameWindow,
    resolution: Resolution,
) -> ScreenResult<FrameSequence> {
    let seq = match source {
        FrameSource::Video(path) => load_video(path, window, resolution)?,
        FrameSource::ImageDir { dir, fps } => load_image_dir(dir, *fps, window, resolution)?,
    };
    tracing::info!(
        frames = seq.len(),
        width = resolution.width,
        height = resolution.height,
        fps = seq.fps().as_f64(),
        "frames loaded"
    );
    Ok(seq)
}

fn load_video(
    path: &Path,
    window: &FrameWindow,
    resolution: Resolution,
) -> ScreenResult<FrameSequence> {
    let info = probe_video(path)?;
    let (start, end) = window.resolve(info.frame_count)?;
    tracing::debug!(
        source_frames = info.frame_count,
        start,
        end,
        native_width = info.width,
        native_height = info.height,
        "decoding video"
    );

    let mut reader = GrayFrameReader::spawn(&info, end)?;
    let mut frames = Vec::with_capacity(window.sampled_len(start, end) as usize);
    let mut buf = Vec::new();
    let mut index = 0u64;
    while index < end && reader.read_frame(&mut buf)? {
        if window.is_sampled(index) {
            let gray = image::GrayImage::from_raw(info.width, info.height, std::mem::take(&mut buf))
                .ok_or_else(|| ScreenError::media("decoded frame does not match probed size"))?;
            frames.push(binarize_gray(&gray, resolution)?);
        }
        index += 1;
    }
    reader.finish()?;

    if index < end {
        tracing::warn!(decoded = index, expected = end, "video ended early");
    }
    FrameSequence::new(resolution, info.fps.downsample(window.fps_scaling), frames)
}

fn load_image_dir(
    dir: &Path,
    fps: Fps,
    window: &FrameWindow,
    resolution: Resolution,
) -> ScreenResult<FrameSequence> {
    let files = list_image_files(dir)?;
    let (start, end) = window.resolve(files.len() as u64)?;

    let mut frames = Vec::with_capacity(window.sampled_len(start, end) as usize);
    for (index, file) in files.iter().enumerate().take(end as usize) {
        if !window.is_sampled(index as u64) {
            continue;
        }
        let img = image::open(file).with_context(|| format!("decode frame '{}'", file.display()))?;
        frames.push(binarize_image(&img, resolution)?);
    }
    FrameSequence::new(resolution, fps.downsample(window.fps_scaling), frames)
}

/// Image files in `dir`, sorted by file name.
pub fn list_image_files(dir: &Path) -> ScreenResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read frame directory '{}'", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("read frame directory '{}'", dir.display()))?
            .path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if path.is_file() && is_image {
            files.push(path);
        }
    }
    files.sort();
    if files.is_empty() {
        return Err(ScreenError::validation(format!(
            "no image frames found in '{}'",
            dir.display()
        )));
    }
    Ok(files)
}

#[cfg(test)]
#[path = "../../tests/unit/frames/source.rs"]
mod tests;
