//! Two-level barrel/shulker packing of run lists.

pub(crate) mod container;
