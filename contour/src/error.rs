//! Error types.

use thiserror::Error;

use crate::control::ControlId;

#[derive(Debug, Error)]
pub enum ContourError {
    #[error("surface size {width}x{height} is not addressable")]
    SurfaceSize { width: u32, height: u32 },

    #[error("pixel buffer too small: need {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("row stride {stride} is shorter than one row ({min} bytes)")]
    InvalidStride { stride: usize, min: usize },

    #[error("unknown control: {0:?}")]
    UnknownControl(ControlId),

    #[error("not a container: {0:?}")]
    NotAContainer(ControlId),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ContourError>;

/// A platform capability that the current backend cannot provide.
///
/// This is not a failure: callers skip the enhancement that needed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("the display backend does not expose frame extents")]
    Unsupported,

    #[error("the window manager has not reported frame extents")]
    NotReported,

    #[error("frame extents property has {items} items, expected 4")]
    Malformed { items: usize },
}
