//! Placement command rendering and output sinks.

pub(crate) mod command;
pub(crate) mod file;
pub(crate) mod function;
pub(crate) mod sink;
