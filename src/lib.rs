//! barrel-screen turns a two-color video into a Minecraft function that rebuilds it as a wall
//! of barrels.
//!
//! Every screen pixel is backed by one barrel holding up to 27 shulker boxes of up to 27 item
//! stacks. A stack's item encodes the pixel color and its count how many sampled frames the
//! color persisted, so a barrel replays up to 729 color runs of at most 64 frames each.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode the source (system `ffmpeg` or an image directory), binarize and
//!    downsample into a [`FrameSequence`]
//! 2. **Encode**: run-length encode every pixel's timeline into a [`RunTable`]
//! 3. **Pack**: fill one [`Barrel`] per pixel, failing with
//!    [`ScreenError::CapacityOverflow`] when a pixel needs more than 729 runs
//! 4. **Emit**: render `setblock` commands in column-major order plus one cleanup command into
//!    a [`CommandSink`]
//!
//! Output is byte-identical for identical input and configuration, whatever the thread count,
//! and nothing is committed to disk unless every pixel packs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod diagnostics;
mod emit;
mod encode;
mod foundation;
mod frames;
mod pack;

/// JSON job configuration.
pub mod config;
/// Pixel grid to world coordinate mapping.
pub mod layout;
/// End-to-end jobs.
pub mod pipeline;

pub use crate::foundation::core::{
    BARREL_CAPACITY, BARREL_SLOTS, Color, Fps, MAX_STACK_COUNT, PixelPos, Resolution,
    SHULKER_SLOTS, WorldPos,
};
pub use crate::foundation::error::{ScreenError, ScreenResult};
pub use crate::foundation::threading::EncodeThreading;

pub use crate::config::Config;
pub use crate::diagnostics::ffmpeg::GrayVideoWriter;
pub use crate::diagnostics::video::{
    preview_resolution, scale_gray8, update_map, write_debug_video, write_update_map_video,
};
pub use crate::emit::command::{CLEANUP_COMMAND, Palette, barrel_command};
pub use crate::emit::file::{FunctionFileSink, ensure_parent_dir};
pub use crate::emit::function::{
    EmitOpts, build_commands, check_capacity, emit_function, emit_table,
};
pub use crate::emit::sink::{CommandSink, InMemorySink, SinkConfig};
pub use crate::encode::runs::{
    EncodeStats, PixelEncoder, Run, RunTable, encode_sequence, encode_timeline, expand_runs,
};
pub use crate::frames::binarize::{LUMA_THRESHOLD, binarize_gray, binarize_image};
pub use crate::frames::buffer::{Frame, FrameSequence};
pub use crate::frames::ffmpeg::{
    GrayFrameReader, VideoSourceInfo, is_ffmpeg_on_path, is_ffprobe_on_path, probe_video,
};
pub use crate::frames::source::{FrameSource, FrameWindow, list_image_files, load_frames};
pub use crate::layout::BarrelLayout;
pub use crate::pack::container::{Barrel, ItemStack, Shulker, pack_pixel};
pub use crate::pipeline::{JobReport, load_job_frames, run_diagnostics, run_job};
