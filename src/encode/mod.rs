//! Temporal run-length encoding of per-pixel timelines.

pub(crate) mod runs;
