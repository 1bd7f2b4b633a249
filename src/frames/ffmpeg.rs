use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::foundation::core::Fps;
use crate::foundation::error::{ScreenError, ScreenResult};

/// Stream facts reported by `ffprobe`.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoSourceInfo {
    /// Probed file.
    pub source_path: PathBuf,
    /// Native frame width.
    pub width: u32,
    /// Native frame height.
    pub height: u32,
    /// Native frame rate.
    pub fps: Fps,
    /// Frame count, from the stream header or estimated from the duration.
    pub frame_count: u64,
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    tool_on_path("ffmpeg")
}

/// Return `true` when `ffprobe` can be invoked from `PATH`.
pub fn is_ffprobe_on_path() -> bool {
    tool_on_path("ffprobe")
}

fn tool_on_path(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Probe the first video stream of `source_path`.
pub fn probe_video(source_path: &Path) -> ScreenResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        nb_frames: Option<String>,
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| ScreenError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(ScreenError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| ScreenError::media(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ScreenError::media("no video stream found"))?;
    let width = stream
        .width
        .ok_or_else(|| ScreenError::media("missing video width from ffprobe"))?;
    let height = stream
        .height
        .ok_or_else(|| ScreenError::media("missing video height from ffprobe"))?;
    let fps = parse_ff_ratio(stream.r_frame_rate.as_deref().unwrap_or("0/1"))
        .ok_or_else(|| ScreenError::media("invalid video r_frame_rate"))?;

    let frame_count = match stream.nb_frames.as_deref().and_then(|s| s.parse::<u64>().ok()) {
        Some(n) if n > 0 => n,
        _ => {
            let duration_sec = stream
                .duration
                .as_deref()
                .or(parsed.format.as_ref().and_then(|f| f.duration.as_deref()))
                .and_then(|s| s.parse::<f64>().ok())
                .unwrap_or(0.0);
            (duration_sec * fps.as_f64()).round().max(0.0) as u64
        }
    };

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps,
        frame_count,
    })
}

fn parse_ff_ratio(s: &str) -> Option<Fps> {
    let (num, den) = s.split_once('/')?;
    Fps::new(num.trim().parse().ok()?, den.trim().parse().ok()?).ok()
}

/// Streams native-size gray8 frames out of the system `ffmpeg`.
pub struct GrayFrameReader {
    child: Child,
    stdout: ChildStdout,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    frame_len: usize,
}

impl GrayFrameReader {
    /// Start decoding at most `max_frames` frames of `source`.
    pub fn spawn(source: &VideoSourceInfo, max_frames: u64) -> ScreenResult<Self> {
        let frame_len = source.width as usize * source.height as usize;
        if frame_len == 0 {
            return Err(ScreenError::media(
                "decoded video frame size is zero (invalid source dimensions)",
            ));
        }
        if !is_ffmpeg_on_path() {
            return Err(ScreenError::media(
                "ffmpeg is required for video input, but was not found on PATH",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(&source.source_path)
            .args([
                "-frames:v",
                &max_frames.to_string(),
                "-f",
                "rawvideo",
                "-pix_fmt",
                "gray",
                "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ScreenError::media(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ScreenError::media("failed to open ffmpeg stdout (unexpected)"))?;
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
            child,
            stdout,
            stderr_drain: Some(stderr_drain),
            frame_len,
        })
    }

    /// Read the next frame into `buf`; `Ok(false)` at end of stream.
    pub fn read_frame(&mut self, buf: &mut Vec<u8>) -> ScreenResult<bool> {
        buf.resize(self.frame_len, 0);
        let mut filled = 0;
        while filled < self.frame_len {
            let n = self
                .stdout
                .read(&mut buf[filled..])
                .map_err(|e| ScreenError::media(format!("failed to read ffmpeg output: {e}")))?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        match filled {
            0 => Ok(false),
            n if n == self.frame_len => Ok(true),
            n => Err(ScreenError::media(format!(
                "truncated frame from ffmpeg: got {n} bytes, expected {}",
                self.frame_len
            ))),
        }
    }

    /// Wait for `ffmpeg` and surface its stderr on failure.
    pub fn finish(self) -> ScreenResult<()> {
        let Self {
            mut child,
            stdout,
            mut stderr_drain,
            ..
        } = self;
        drop(stdout);

        let status = child
            .wait()
            .map_err(|e| ScreenError::media(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = match stderr_drain.take() {
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
        Ok(())
    }
}
