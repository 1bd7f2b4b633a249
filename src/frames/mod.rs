//! Frame input: decoding, binarization, downsampling and the in-memory frame buffer.

pub(crate) mod binarize;
pub(crate) mod buffer;
pub(crate) mod ffmpeg;
pub(crate) mod source;
