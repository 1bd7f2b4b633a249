//! JSON job configuration.
//!
//! Relative paths inside a configuration file are resolved against the directory holding the
//! file, so a job directory can be moved around as a unit.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::emit::command::Palette;
use crate::emit::function::EmitOpts;
use crate::foundation::core::{Fps, Resolution, WorldPos};
use crate::foundation::error::{ScreenError, ScreenResult};
use crate::foundation::threading::EncodeThreading;
use crate::frames::source::{FrameSource, FrameWindow};
use crate::layout::BarrelLayout;

fn default_dir_fps() -> u32 {
    30
}

fn default_fps_scaling() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_preview_scale() -> u32 {
    1
}

fn default_function_ext() -> String {
    ".mcfunction".to_string()
}

/// Complete description of one encoding job.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Frame source.
    pub input: InputConfig,
    /// Screen size and frame window.
    pub screen: ScreenConfig,
    /// Barrel wall placement.
    pub layout: LayoutConfig,
    /// Output files.
    pub output: OutputConfig,
    /// Item ids for the two colors.
    #[serde(default)]
    pub palette: Palette,
    /// Worker settings.
    #[serde(default)]
    pub threading: EncodeThreading,
}

/// Frame source settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Video file, or directory of still images.
    pub path: PathBuf,
    /// Capture rate of an image directory; video files use their own rate.
    #[serde(default = "default_dir_fps")]
    pub fps: u32,
}

/// Screen size and frame window.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenConfig {
    /// Columns (barrels per row).
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// Keep one source frame out of every `fps_scaling`.
    #[serde(default = "default_fps_scaling")]
    pub fps_scaling: u32,
    /// First source frame to encode.
    #[serde(default)]
    pub start_frame: u64,
    /// Exclusive last source frame; `null` encodes to the end.
    #[serde(default)]
    pub finish_frame: Option<u64>,
}

/// Barrel wall placement.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// World position `[x, y, z]` of pixel `(0, 0)`.
    pub origin: [i64; 3],
    /// Vertical step between rows.
    pub row_offset: i32,
    /// `z` step between columns.
    pub column_offset: i32,
}

/// Output files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Write the `.mcfunction` file.
    #[serde(default = "default_true")]
    pub generate_function: bool,
    /// Directory of the function file (usually a datapack's `functions` folder).
    pub functions_dir: PathBuf,
    /// Function file stem.
    pub function_name: String,
    /// Function file extension, dot included.
    #[serde(default = "default_function_ext")]
    pub function_ext: String,
    /// Optional black/white preview of the binarized clip.
    #[serde(default)]
    pub debug_video: Option<PathBuf>,
    /// Optional video of per-frame pixel changes.
    #[serde(default)]
    pub update_map_video: Option<PathBuf>,
    /// Integer upscale factor of both diagnostic videos.
    #[serde(default = "default_preview_scale")]
    pub preview_scale: u32,
}

impl Config {
    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> ScreenResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg: Config = serde_json::from_str(&text)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        if let Some(base) = path.parent() {
            cfg.resolve_relative_to(base);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve every relative path against `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        let fix = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        fix(&mut self.input.path);
        fix(&mut self.output.functions_dir);
        if let Some(p) = self.output.debug_video.as_mut() {
            fix(p);
        }
        if let Some(p) = self.output.update_map_video.as_mut() {
            fix(p);
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> ScreenResult<()> {
        Resolution::new(self.screen.width, self.screen.height)?;
        if self.screen.fps_scaling == 0 {
            return Err(ScreenError::validation("screen.fps_scaling must be >= 1"));
        }
        if let Some(finish) = self.screen.finish_frame
            && finish <= self.screen.start_frame
        {
            return Err(ScreenError::validation(format!(
                "screen.start_frame {} must be before screen.finish_frame {finish}",
                self.screen.start_frame
            )));
        }
        if self.output.preview_scale == 0 {
            return Err(ScreenError::validation("output.preview_scale must be >= 1"));
        }
        if self.input.fps == 0 {
            return Err(ScreenError::validation("input.fps must be >= 1"));
        }
        if self.output.function_name.trim().is_empty() {
            return Err(ScreenError::validation(
                "output.function_name must not be empty",
            ));
        }
        if self.threading.threads == Some(0) {
            return Err(ScreenError::validation(
                "threading.threads must be >= 1 when set",
            ));
        }
        for (name, id) in [
            ("off", &self.palette.off),
            ("on", &self.palette.on),
            ("shulker", &self.palette.shulker),
        ] {
            if id.trim().is_empty() || id.contains(char::is_whitespace) {
                return Err(ScreenError::validation(format!(
                    "palette.{name} must be a single item id, got '{id}'"
                )));
            }
        }
        Ok(())
    }

    /// Screen resolution.
    pub fn resolution(&self) -> ScreenResult<Resolution> {
        Resolution::new(self.screen.width, self.screen.height)
    }

    /// Frame window and sampling.
    pub fn window(&self) -> FrameWindow {
        FrameWindow {
            start: self.screen.start_frame,
            finish: self.screen.finish_frame,
            fps_scaling: self.screen.fps_scaling,
        }
    }

    /// Frame source for `input.path`.
    pub fn frame_source(&self) -> ScreenResult<FrameSource> {
        Ok(FrameSource::from_path(
            self.input.path.clone(),
            Fps::new(self.input.fps, 1)?,
        ))
    }

    /// Barrel wall placement.
    pub fn barrel_layout(&self) -> BarrelLayout {
        let [x, y, z] = self.layout.origin;
        BarrelLayout::new(
            WorldPos::new(x, y, z),
            self.layout.row_offset,
            self.layout.column_offset,
        )
    }

    /// Full path of the function file.
    pub fn function_path(&self) -> PathBuf {
        self.output.functions_dir.join(format!(
            "{}{}",
            self.output.function_name, self.output.function_ext
        ))
    }

    /// Emission options derived from this configuration.
    pub fn emit_opts(&self) -> EmitOpts {
        EmitOpts {
            layout: self.barrel_layout(),
            palette: self.palette.clone(),
            threading: self.threading.clone(),
        }
    }

    /// A complete example configuration.
    pub fn example() -> Self {
        Self {
            input: InputConfig {
                path: PathBuf::from("input.mp4"),
                fps: default_dir_fps(),
            },
            screen: ScreenConfig {
                width: 48,
                height: 36,
                fps_scaling: 2,
                start_frame: 0,
                finish_frame: None,
            },
            layout: LayoutConfig {
                origin: [0, 100, 0],
                row_offset: -1,
                column_offset: 1,
            },
            output: OutputConfig {
                generate_function: true,
                functions_dir: PathBuf::from("datapack/data/screen/functions"),
                function_name: "program".to_string(),
                function_ext: default_function_ext(),
                debug_video: Some(PathBuf::from("debug.avi")),
                update_map_video: None,
                preview_scale: 10,
            },
            palette: Palette::default(),
            threading: EncodeThreading::default(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
