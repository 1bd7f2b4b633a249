use crate::foundation::core::{Color, Fps, PixelPos, Resolution};
use crate::foundation::error::{ScreenError, ScreenResult};

/// One sampled, thresholded frame. Pixels are stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    resolution: Resolution,
    pixels: Vec<Color>,
}

impl Frame {
    /// Wrap row-major pixels, checking the length against `resolution`.
    pub fn new(resolution: Resolution, pixels: Vec<Color>) -> ScreenResult<Self> {
        if pixels.len() != resolution.pixel_count() {
            return Err(ScreenError::validation(format!(
                "frame has {} pixels, expected {}x{}",
                pixels.len(),
                resolution.width,
                resolution.height
            )));
        }
        Ok(Self { resolution, pixels })
    }

    /// Build a frame from row-major 0/1 bits.
    pub fn from_bits(resolution: Resolution, bits: &[u8]) -> ScreenResult<Self> {
        Self::new(resolution, bits.iter().copied().map(Color::from_bit).collect())
    }

    /// A frame of a single color.
    pub fn filled(resolution: Resolution, color: Color) -> Self {
        Self {
            resolution,
            pixels: vec![color; resolution.pixel_count()],
        }
    }

    /// Frame dimensions.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Color at `pos`.
    ///
    /// Panics when `pos` lies outside the frame.
    pub fn get(&self, pos: PixelPos) -> Color {
        self.pixels[pos.y as usize * self.resolution.width as usize + pos.x as usize]
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Row-major gray8 image: `On` is 255, `Off` is 0.
    pub fn to_gray8(&self) -> Vec<u8> {
        self.pixels.iter().map(|c| c.bit() * 255).collect()
    }
}

/// The whole binarized, downsampled clip that the encoder consumes.
///
/// Always holds at least one frame, and every frame matches `resolution`.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    resolution: Resolution,
    fps: Fps,
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Validate and wrap sampled frames. `fps` is the sampled (output) rate.
    pub fn new(resolution: Resolution, fps: Fps, frames: Vec<Frame>) -> ScreenResult<Self> {
        if frames.is_empty() {
            return Err(ScreenError::validation(
                "frame sequence must contain at least one frame",
            ));
        }
        if let Some((i, f)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.resolution() != resolution)
        {
            return Err(ScreenError::validation(format!(
                "frame {i} is {}x{}, sequence is {}x{}",
                f.resolution().width,
                f.resolution().height,
                resolution.width,
                resolution.height
            )));
        }
        Ok(Self {
            resolution,
            fps,
            frames,
        })
    }

    /// Build a sequence by evaluating `color_at(frame_index, pixel)` for every pixel.
    pub fn from_fn(
        resolution: Resolution,
        fps: Fps,
        frame_count: usize,
        mut color_at: impl FnMut(usize, PixelPos) -> Color,
    ) -> ScreenResult<Self> {
        let mut frames = Vec::with_capacity(frame_count);
        for f in 0..frame_count {
            let mut pixels = Vec::with_capacity(resolution.pixel_count());
            for y in 0..resolution.height {
                for x in 0..resolution.width {
                    pixels.push(color_at(f, PixelPos::new(x, y)));
                }
            }
            frames.push(Frame { resolution, pixels });
        }
        Self::new(resolution, fps, frames)
    }

    /// Screen dimensions.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Sampled frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Number of sampled frames (never zero).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in chronological order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Chronological colors of one pixel.
    pub fn timeline(&self, pos: PixelPos) -> impl Iterator<Item = Color> + '_ {
        self.frames.iter().map(move |f| f.get(pos))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/buffer.rs"]
mod tests;
