use crate::foundation::core::{BARREL_CAPACITY, MAX_STACK_COUNT, PixelPos};

/// Convenience result type used throughout the crate.
pub type ScreenResult<T> = Result<T, ScreenError>;

/// Top-level error type for frame loading, encoding, packing and emission.
#[derive(thiserror::Error, Debug)]
pub enum ScreenError {
    /// Invalid configuration or input shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure while probing, decoding or encoding media.
    #[error("media error: {0}")]
    Media(String),

    /// A pixel needs more item stacks than one barrel can hold.
    #[error(
        "capacity overflow at pixel ({}, {}): {runs_required} item stacks required, {} available",
        pixel.x,
        pixel.y,
        BARREL_CAPACITY
    )]
    CapacityOverflow {
        /// Offending pixel.
        pixel: PixelPos,
        /// Number of runs the pixel's timeline produced.
        runs_required: usize,
    },

    /// A run or item stack count outside `1..=64`.
    #[error("item stack count {count} outside 1..={}", MAX_STACK_COUNT)]
    DurationOutOfRange {
        /// Offending count.
        count: u32,
    },

    /// Wrapped I/O or third-party error with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScreenError {
    /// Build a [`ScreenError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScreenError::Media`].
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
