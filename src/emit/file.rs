use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use sha2::Digest as _;

use crate::emit::sink::{CommandSink, SinkConfig, hex};
use crate::foundation::error::{ScreenError, ScreenResult};

/// Sink that writes a `.mcfunction` file atomically.
///
/// Commands stream into a hidden sibling temporary file; `end` flushes it and renames it over
/// the target. If the sink is dropped before `end` the temporary file is removed and any
/// previous file at the target path is left untouched.
pub struct FunctionFileSink {
    out_path: PathBuf,
    tmp: TempFileGuard,
    writer: Option<BufWriter<File>>,
    hasher: sha2::Sha256,
    digest: Option<String>,
}

impl FunctionFileSink {
    /// Create a sink targeting `out_path`. Nothing is touched on disk until `begin`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            tmp: TempFileGuard(None),
            writer: None,
            hasher: sha2::Sha256::new(),
            digest: None,
        }
    }

    /// Target path.
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    /// SHA-256 of the committed file, lowercase hex; `None` before `end` succeeds.
    pub fn digest_hex(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    fn tmp_path(&self) -> ScreenResult<PathBuf> {
        let name = self.out_path.file_name().ok_or_else(|| {
            ScreenError::validation(format!(
                "function output path '{}' has no file name",
                self.out_path.display()
            ))
        })?;
        Ok(self.out_path.with_file_name(format!(
            ".{}.tmp-{}",
            name.to_string_lossy(),
            std::process::id()
        )))
    }
}

impl CommandSink for FunctionFileSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ScreenResult<()> {
        ensure_parent_dir(&self.out_path)?;
        let tmp = self.tmp_path()?;
        let f = File::create(&tmp)
            .with_context(|| format!("create temporary function file '{}'", tmp.display()))?;
        self.tmp.0 = Some(tmp);
        self.writer = Some(BufWriter::new(f));
        self.hasher = sha2::Sha256::new();
        self.digest = None;
        Ok(())
    }

    fn push_command(&mut self, cmd: &str) -> ScreenResult<()> {
        let Some(w) = self.writer.as_mut() else {
            return Err(ScreenError::validation("function file sink not started"));
        };
        w.write_all(cmd.as_bytes())
            .and_then(|_| w.write_all(b"\n"))
            .context("write function command")?;
        self.hasher.update(cmd.as_bytes());
        self.hasher.update(b"\n");
        Ok(())
    }

    fn end(&mut self) -> ScreenResult<()> {
        let w = self
            .writer
            .take()
            .ok_or_else(|| ScreenError::validation("function file sink not started"))?;
        let f = w
            .into_inner()
            .map_err(|e| e.into_error())
            .context("flush function file")?;
        f.sync_all().context("sync function file")?;
        drop(f);

        let tmp = self
            .tmp
            .0
            .take()
            .ok_or_else(|| ScreenError::validation("function file sink lost its temporary file"))?;
        if let Err(e) = std::fs::rename(&tmp, &self.out_path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(anyhow::Error::new(e)
                .context(format!(
                    "move function file into place at '{}'",
                    self.out_path.display()
                ))
                .into());
        }

        let hasher = std::mem::take(&mut self.hasher);
        self.digest = Some(hex(&hasher.finalize()));
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ScreenResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}
