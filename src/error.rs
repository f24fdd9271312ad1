//! Error type shared by the generator, settings and texture decoding

/// Result alias carrying [`LabyrinthError`].
pub type Result<T> = std::result::Result<T, LabyrinthError>;

/// Everything that can go wrong outside a tick.
///
/// Ticks themselves never fail: off-grid probes and positions are treated as
/// "no interaction".
#[derive(Debug, thiserror::Error)]
pub enum LabyrinthError {
    #[error("labyrinth side {side} is out of range ({min}..={max})")]
    InvalidSide { side: usize, min: usize, max: usize },

    #[error("braid factor {0} must be within 0.0..=1.0")]
    InvalidBraid(f32),

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("grid side {actual} does not match configured side {expected}")]
    SideMismatch { expected: usize, actual: usize },

    #[error("grid has no open cell to stand on")]
    NoOpenCells,

    #[error("texel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("texel {texel:?} at cell {index} is not a known cell encoding")]
    UnknownTexel { index: usize, texel: [u8; 4] },

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl LabyrinthError {
    pub(crate) fn setting(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            reason: reason.into(),
        }
    }
}
