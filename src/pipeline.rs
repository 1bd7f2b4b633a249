use std::path::PathBuf;

use crate::config::Config;
use crate::diagnostics::video::{write_debug_video, write_update_map_video};
use crate::emit::file::FunctionFileSink;
use crate::emit::function::emit_function;
use crate::encode::runs::EncodeStats;
use crate::foundation::error::ScreenResult;
use crate::frames::buffer::FrameSequence;
use crate::frames::source::load_frames;

/// What a job produced.
#[derive(Clone, Debug, Default)]
pub struct JobReport {
    /// Sampled frames loaded from the source.
    pub frames: usize,
    /// Encoding counters, when a function was written.
    pub stats: Option<EncodeStats>,
    /// Committed function file.
    pub function_path: Option<PathBuf>,
    /// SHA-256 of the committed function file, lowercase hex.
    pub digest: Option<String>,
    /// Frames written to the debug video.
    pub debug_frames: Option<usize>,
    /// Frames written to the update-map video.
    pub update_map_frames: Option<usize>,
}

/// Load the clip described by `cfg` into the screen's frame buffer.
pub fn load_job_frames(cfg: &Config) -> ScreenResult<FrameSequence> {
    load_frames(&cfg.frame_source()?, &cfg.window(), cfg.resolution()?)
}

/// Run a full job: load frames, encode and commit the function file, then write the
/// configured diagnostic videos.
///
/// The function file is only replaced once every pixel has been packed; on failure a
/// previous file at the same path is left as it was. A diagnostic video that cannot be written
/// is logged and left out of the report without failing the job.
pub fn run_job(cfg: &Config) -> ScreenResult<JobReport> {
    let seq = load_job_frames(cfg)?;
    let mut report = JobReport {
        frames: seq.len(),
        ..JobReport::default()
    };

    if cfg.output.generate_function {
        let path = cfg.function_path();
        let mut sink = FunctionFileSink::new(&path);
        report.stats = Some(emit_function(&seq, &cfg.emit_opts(), &mut sink)?);
        report.digest = sink.digest_hex().map(str::to_string);
        tracing::info!(path = %path.display(), "function written");
        report.function_path = Some(path);
    }

    write_diagnostics(cfg, &seq, &mut report, DiagnosticErrors::Warn)?;
    Ok(report)
}

/// Load frames and write only the configured diagnostic videos.
pub fn run_diagnostics(cfg: &Config) -> ScreenResult<JobReport> {
    let seq = load_job_frames(cfg)?;
    let mut report = JobReport {
        frames: seq.len(),
        ..JobReport::default()
    };
    write_diagnostics(cfg, &seq, &mut report, DiagnosticErrors::Fail)?;
    Ok(report)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DiagnosticErrors {
    Fail,
    Warn,
}

fn write_diagnostics(
    cfg: &Config,
    seq: &FrameSequence,
    report: &mut JobReport,
    on_error: DiagnosticErrors,
) -> ScreenResult<()> {
    let scale = cfg.output.preview_scale;
    let settle = |kind: &str, res: ScreenResult<usize>| -> ScreenResult<Option<usize>> {
        match res {
            Ok(n) => Ok(Some(n)),
            Err(e) if on_error == DiagnosticErrors::Warn => {
                tracing::warn!(video = kind, error = %e, "diagnostic video skipped");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    };
    if let Some(path) = cfg.output.debug_video.as_deref() {
        report.debug_frames = settle("debug", write_debug_video(seq, path, scale))?;
    }
    if let Some(path) = cfg.output.update_map_video.as_deref() {
        report.update_map_frames =
            settle("update_map", write_update_map_video(seq, path, scale))?;
    }
    Ok(())
}
