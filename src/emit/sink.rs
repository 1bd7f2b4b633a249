use sha2::Digest as _;

use crate::foundation::core::Resolution;
use crate::foundation::error::{ScreenError, ScreenResult};

/// Configuration handed to a [`CommandSink`] before the first command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Screen the commands build.
    pub resolution: Resolution,
    /// Commands that will be pushed, cleanup included.
    pub commands: usize,
}

/// Consumer of placement commands.
///
/// Ordering contract: `begin` once, then `push_command` in output order, then `end` once.
/// `begin` is only called after every command of the job has been built, so a sink never sees
/// a job that later fails to pack.
pub trait CommandSink {
    /// Called once before any command is pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ScreenResult<()>;
    /// Push one command (without line terminator).
    fn push_command(&mut self, cmd: &str) -> ScreenResult<()>;
    /// Called once after the last command; the output is committed here.
    fn end(&mut self) -> ScreenResult<()>;
}

/// In-memory sink for tests and digests.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    commands: Vec<String>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured commands in output order.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The function file text: one command per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for c in &self.commands {
            out.push_str(c);
            out.push('\n');
        }
        out
    }

    /// SHA-256 of [`InMemorySink::to_text`], lowercase hex.
    pub fn digest_hex(&self) -> String {
        let mut hasher = sha2::Sha256::new();
        for c in &self.commands {
            hasher.update(c.as_bytes());
            hasher.update(b"\n");
        }
        hex(&hasher.finalize())
    }
}

impl CommandSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ScreenResult<()> {
        self.cfg = Some(cfg);
        self.commands.clear();
        self.commands.reserve(cfg.commands);
        self.finished = false;
        Ok(())
    }

    fn push_command(&mut self, cmd: &str) -> ScreenResult<()> {
        if self.cfg.is_none() {
            return Err(ScreenError::validation("in-memory sink not started"));
        }
        self.commands.push(cmd.to_string());
        Ok(())
    }

    fn end(&mut self) -> ScreenResult<()> {
        self.finished = true;
        Ok(())
    }
}

pub(crate) fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
