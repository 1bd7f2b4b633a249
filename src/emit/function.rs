use rayon::prelude::*;

use crate::emit::command::{CLEANUP_COMMAND, Palette, barrel_command};
use crate::emit::sink::{CommandSink, SinkConfig};
use crate::encode::runs::{EncodeStats, Run, RunTable, encode_sequence};
use crate::foundation::core::{BARREL_CAPACITY, PixelPos};
use crate::foundation::error::{ScreenError, ScreenResult};
use crate::foundation::threading::EncodeThreading;
use crate::frames::buffer::FrameSequence;
use crate::layout::BarrelLayout;
use crate::pack::container::pack_pixel;

/// Options for turning a clip into placement commands.
#[derive(Clone, Debug)]
pub struct EmitOpts {
    /// Where the barrel wall sits in the world.
    pub layout: BarrelLayout,
    /// Item ids for the two colors.
    pub palette: Palette,
    /// Worker settings for encoding and packing.
    pub threading: EncodeThreading,
}

/// Dry-run capacity accounting: the first pixel (column-major) whose runs overflow a barrel.
pub fn check_capacity(table: &RunTable) -> ScreenResult<()> {
    match table
        .iter()
        .find(|(_, runs)| runs.len() > BARREL_CAPACITY)
    {
        Some((pixel, runs)) => Err(ScreenError::CapacityOverflow {
            pixel,
            runs_required: runs.len(),
        }),
        None => Ok(()),
    }
}

/// Pack every pixel and render its barrel command, in column-major order.
///
/// Pixels may be packed on worker threads; the result order is fixed regardless. The first
/// failing pixel in column-major order decides the error.
pub fn build_commands(table: &RunTable, opts: &EmitOpts) -> ScreenResult<Vec<String>> {
    let build = |(pixel, runs): (PixelPos, &[Run])| -> ScreenResult<String> {
        let barrel = pack_pixel(pixel, runs, &opts.layout)?;
        Ok(barrel_command(&barrel, &opts.palette))
    };

    let built: Vec<ScreenResult<String>> = match opts.threading.pool()? {
        Some(pool) => {
            let pixels: Vec<_> = table.iter().collect();
            pool.install(|| {
                pixels
                    .par_iter()
                    .with_min_len(opts.threading.chunk_len())
                    .map(|&item| build(item))
                    .collect()
            })
        }
        None => table.iter().map(build).collect(),
    };
    built.into_iter().collect()
}

/// Write a run table to `sink`: one barrel command per pixel, then the cleanup command.
///
/// Every command is built before `sink.begin` is called, so a capacity overflow leaves the
/// sink untouched.
#[tracing::instrument(skip_all)]
pub fn emit_table(
    table: &RunTable,
    opts: &EmitOpts,
    sink: &mut dyn CommandSink,
) -> ScreenResult<EncodeStats> {
    let stats = table.stats();
    if stats.overflowing_pixels > 0 {
        tracing::error!(
            overflowing_pixels = stats.overflowing_pixels,
            max_runs_per_pixel = stats.max_runs_per_pixel,
            "pixels exceed barrel capacity"
        );
    }
    check_capacity(table)?;
    let commands = build_commands(table, opts)?;

    sink.begin(SinkConfig {
        resolution: table.resolution(),
        commands: commands.len() + 1,
    })?;
    for cmd in &commands {
        sink.push_command(cmd)?;
    }
    sink.push_command(CLEANUP_COMMAND)?;
    sink.end()?;

    tracing::info!(
        pixels = stats.pixels,
        frames = stats.frames,
        runs = stats.runs_total,
        max_runs_per_pixel = stats.max_runs_per_pixel,
        shulkers = stats.shulkers_total,
        "function emitted"
    );
    Ok(stats)
}

/// Encode `seq` and write its placement commands to `sink`.
pub fn emit_function(
    seq: &FrameSequence,
    opts: &EmitOpts,
    sink: &mut dyn CommandSink,
) -> ScreenResult<EncodeStats> {
    let table = encode_sequence(seq, &opts.threading)?;
    emit_table(&table, opts, sink)
}

#[cfg(test)]
#[path = "../../tests/unit/emit/function.rs"]
mod tests;
