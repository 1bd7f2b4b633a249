use rayon::prelude::*;

use crate::foundation::core::{
    BARREL_CAPACITY, BARREL_SLOTS, Color, MAX_STACK_COUNT, PixelPos, Resolution, SHULKER_SLOTS,
};
use crate::foundation::error::{ScreenError, ScreenResult};
use crate::foundation::threading::EncodeThreading;
use crate::frames::buffer::FrameSequence;

/// A pixel held `color` for `duration` consecutive sampled frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Run {
    /// Color held during the run.
    pub color: Color,
    /// Sampled frames the color persisted, in `1..=64` for encoder output.
    pub duration: u32,
}

impl Run {
    /// Create a run.
    pub const fn new(color: Color, duration: u32) -> Self {
        Self { color, duration }
    }
}

/// Streaming run-length state for one pixel.
///
/// Feed the pixel's values in chronological order with [`PixelEncoder::push`], then call
/// [`PixelEncoder::finish`]. A run is closed when the value changes or when the elapsed-frame
/// counter reaches 64, whichever comes first; when both happen on the same frame a single run
/// is closed with the color held going into that frame.
#[derive(Clone, Debug, Default)]
pub struct PixelEncoder {
    prev: Option<Color>,
    counter: u32,
    runs: Vec<Run>,
}

impl PixelEncoder {
    /// Create an encoder with no frames seen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the next frame's value.
    pub fn push(&mut self, value: Color) {
        let Some(prev) = self.prev else {
            self.prev = Some(value);
            return;
        };

        self.counter += 1;
        if value != prev || self.counter >= MAX_STACK_COUNT {
            self.runs.push(Run::new(prev, self.counter));
            self.counter = 0;
        }
        self.prev = Some(value);
    }

    /// Close the trailing run and return the pixel's run list.
    ///
    /// The trailing run goes through the same 64-frame ceiling as every other run: a tail
    /// longer than the ceiling is split into full runs followed by the remainder. An encoder
    /// that never saw a frame returns no runs.
    pub fn finish(mut self) -> Vec<Run> {
        let Some(last) = self.prev else {
            return self.runs;
        };

        self.counter += 1;
        while self.counter > MAX_STACK_COUNT {
            self.runs.push(Run::new(last, MAX_STACK_COUNT));
            self.counter -= MAX_STACK_COUNT;
        }
        self.runs.push(Run::new(last, self.counter));
        self.runs
    }
}

/// Run-length encode one chronological timeline.
pub fn encode_timeline(values: impl IntoIterator<Item = Color>) -> Vec<Run> {
    let mut enc = PixelEncoder::new();
    for v in values {
        enc.push(v);
    }
    enc.finish()
}

/// Replay runs back into a per-frame timeline.
pub fn expand_runs(runs: &[Run]) -> Vec<Color> {
    runs.iter()
        .flat_map(|r| std::iter::repeat_n(r.color, r.duration as usize))
        .collect()
}

/// Summary counters for one encoded clip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Pixels (barrels) on the screen.
    pub pixels: usize,
    /// Sampled frames encoded.
    pub frames: usize,
    /// Runs across all pixels.
    pub runs_total: usize,
    /// Longest run list of any pixel.
    pub max_runs_per_pixel: usize,
    /// Shulker boxes the packed screen needs.
    pub shulkers_total: usize,
    /// Pixels whose run list exceeds one barrel.
    pub overflowing_pixels: usize,
}

/// Run lists for every pixel, stored contiguously in column-major pixel order.
#[derive(Clone, Debug)]
pub struct RunTable {
    resolution: Resolution,
    frames: usize,
    offsets: Vec<usize>,
    runs: Vec<Run>,
}

impl RunTable {
    /// Assemble a table from per-pixel run lists given in column-major order.
    ///
    /// Exactly one list per screen pixel is required.
    pub fn from_pixel_runs(
        resolution: Resolution,
        frames: usize,
        per_pixel: impl IntoIterator<Item = Vec<Run>>,
    ) -> ScreenResult<Self> {
        let mut offsets = Vec::with_capacity(resolution.pixel_count() + 1);
        let mut runs = Vec::new();
        offsets.push(0);
        for pixel_runs in per_pixel {
            runs.extend(pixel_runs);
            offsets.push(runs.len());
        }
        let lists = offsets.len() - 1;
        if lists != resolution.pixel_count() {
            return Err(ScreenError::validation(format!(
                "run table for {}x{} needs {} pixel run lists, got {lists}",
                resolution.width,
                resolution.height,
                resolution.pixel_count()
            )));
        }
        Ok(Self {
            resolution,
            frames,
            offsets,
            runs,
        })
    }

    /// Screen dimensions.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Run list of one pixel.
    ///
    /// Panics when `pos` lies outside the screen.
    pub fn pixel_runs(&self, pos: PixelPos) -> &[Run] {
        self.runs_at(self.resolution.column_major_index(pos))
    }

    fn runs_at(&self, idx: usize) -> &[Run] {
        &self.runs[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Pixels with their run lists, in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (PixelPos, &[Run])> + '_ {
        (0..self.offsets.len() - 1)
            .map(|i| (self.resolution.pixel_at_column_major(i), self.runs_at(i)))
    }

    /// Counters describing the table.
    pub fn stats(&self) -> EncodeStats {
        let mut stats = EncodeStats {
            pixels: self.offsets.len() - 1,
            frames: self.frames,
            runs_total: self.runs.len(),
            ..EncodeStats::default()
        };
        for (_, runs) in self.iter() {
            stats.max_runs_per_pixel = stats.max_runs_per_pixel.max(runs.len());
            stats.shulkers_total += (runs.len() / SHULKER_SLOTS + 1).min(BARREL_SLOTS);
            if runs.len() > BARREL_CAPACITY {
                stats.overflowing_pixels += 1;
            }
        }
        stats
    }
}

/// Run-length encode every pixel of `seq`.
///
/// Pixels are split into contiguous column-major chunks; each chunk makes one chronological
/// pass over all frames with its own [`PixelEncoder`]s, so workers share nothing mutable.
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn encode_sequence(seq: &FrameSequence, threading: &EncodeThreading) -> ScreenResult<RunTable> {
    let res = seq.resolution();
    let pixel_count = res.pixel_count();
    let chunk = threading.chunk_len();
    let chunks: Vec<(usize, usize)> = (0..pixel_count)
        .step_by(chunk)
        .map(|start| (start, (start + chunk).min(pixel_count)))
        .collect();

    let encoded: Vec<Vec<Vec<Run>>> = match threading.pool()? {
        Some(pool) => pool.install(|| {
            chunks
                .par_iter()
                .map(|&(start, end)| encode_chunk(seq, start, end))
                .collect()
        }),
        None => chunks
            .iter()
            .map(|&(start, end)| encode_chunk(seq, start, end))
            .collect(),
    };

    let table = RunTable::from_pixel_runs(res, seq.len(), encoded.into_iter().flatten())?;
    tracing::debug!(runs = table.runs.len(), chunks = chunks.len(), "run encoding done");
    Ok(table)
}

fn encode_chunk(seq: &FrameSequence, start: usize, end: usize) -> Vec<Vec<Run>> {
    let res = seq.resolution();
    let positions: Vec<PixelPos> = (start..end).map(|i| res.pixel_at_column_major(i)).collect();
    let mut encoders = vec![PixelEncoder::new(); positions.len()];
    for frame in seq.frames() {
        for (enc, pos) in encoders.iter_mut().zip(&positions) {
            enc.push(frame.get(*pos));
        }
    }
    encoders.into_iter().map(PixelEncoder::finish).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/runs.rs"]
mod tests;
