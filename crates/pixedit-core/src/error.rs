//! Error taxonomy for editor operations.

use std::fmt;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::transform::CropRejection;

/// Which history stack an operation tried to pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryDirection::Undo => f.write_str("undo"),
            HistoryDirection::Redo => f.write_str("redo"),
        }
    }
}

/// Everything a user-triggered editor operation can fail with.
#[derive(Debug, Error)]
pub enum EditError {
    /// An edit, crop or save was requested before any image was loaded.
    #[error("no image available")]
    NoImageLoaded,

    /// Undo or redo with an empty stack.
    #[error("nothing to {0}")]
    EmptyHistory(HistoryDirection),

    /// The crop selection was too small or mapped to no pixels.
    #[error("{0}")]
    InvalidCropRegion(#[from] CropRejection),

    /// The image codec could not read the input.
    #[error("{0}")]
    Decode(#[from] DecodeError),

    /// The image codec could not produce or write the output.
    #[error("{0}")]
    Encode(#[from] EncodeError),
}
