//! Diagnostic videos rendered from the binarized frame buffer.

pub(crate) mod ffmpeg;
pub(crate) mod video;
