use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::emit::file::ensure_parent_dir;
use crate::foundation::core::{Fps, Resolution};
use crate::foundation::error::{ScreenError, ScreenResult};
use crate::frames::ffmpeg::is_ffmpeg_on_path;

/// Encodes gray8 frames to a Motion-JPEG video through the system `ffmpeg`.
///
/// The container follows the output file extension (`.avi`, `.mkv`, `.mov`).
pub struct GrayVideoWriter {
    resolution: Resolution,
    child: Child,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    frames_written: usize,
}

impl GrayVideoWriter {
    /// Spawn `ffmpeg` writing to `out_path`, overwriting any existing file.
    pub fn create(out_path: impl Into<PathBuf>, resolution: Resolution, fps: Fps) -> ScreenResult<Self> {
        let out_path = out_path.into();
        ensure_parent_dir(&out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(ScreenError::media(
                "ffmpeg is required for diagnostic videos, but was not found on PATH",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .args([
                "-y",
                "-loglevel",
                "error",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "gray",
                "-s",
                &format!("{}x{}", resolution.width, resolution.height),
                "-r",
                &format!("{}/{}", fps.num, fps.den),
                "-i",
                "pipe:0",
                "-an",
                "-c:v",
                "mjpeg",
                "-q:v",
                "3",
                "-pix_fmt",
                "yuvj444p",
            ])
            .arg(&out_path)
            .spawn()
            .map_err(|e| {
                ScreenError::media(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScreenError::media("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ScreenError::media("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        Ok(Self {
            resolution,
            child,
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
            frames_written: 0,
        })
    }

    /// Write one row-major gray8 frame.
    pub fn write_frame(&mut self, gray: &[u8]) -> ScreenResult<()> {
        if gray.len() != self.resolution.pixel_count() {
            return Err(ScreenError::validation(format!(
                "diagnostic frame has {} bytes, expected {}x{}",
                gray.len(),
                self.resolution.width,
                self.resolution.height
            )));
        }
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ScreenError::media("ffmpeg writer is already finalized"));
        };
        stdin.write_all(gray).map_err(|e| {
            ScreenError::media(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames_written += 1;
        Ok(())
    }

    /// Close the input and wait for `ffmpeg`; returns the number of frames written.
    pub fn finish(mut self) -> ScreenResult<usize> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| ScreenError::media(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| ScreenError::media("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| ScreenError::media(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        if !status.success() {
            return Err(ScreenError::media(format!(
                "ffmpeg exited with status {}: {}",
                status,
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        Ok(self.frames_written)
    }
}
