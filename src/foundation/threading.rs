use crate::foundation::error::{ScreenError, ScreenResult};

/// Threading controls for the per-pixel encode and pack phases.
///
/// Output is byte-identical whatever these are set to; they only affect wall time.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncodeThreading {
    /// Run pixel work on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Pixels handed to a worker at a time.
    pub chunk_pixels: usize,
}

impl Default for EncodeThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            chunk_pixels: 256,
        }
    }
}

impl EncodeThreading {
    /// Single-threaded settings.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub(crate) fn chunk_len(&self) -> usize {
        self.chunk_pixels.max(1)
    }

    /// Build the worker pool, or `None` in sequential mode.
    pub(crate) fn pool(&self) -> ScreenResult<Option<rayon::ThreadPool>> {
        if !self.parallel {
            return Ok(None);
        }
        build_thread_pool(self.threads).map(Some)
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> ScreenResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ScreenError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScreenError::validation(format!("failed to build rayon thread pool: {e}")))
}
