//! The editor's image operations: grayscale, quarter-turn rotation and crop.
//!
//! Every operation takes the current buffer by reference and returns a new
//! one. Nothing is modified in place, so snapshots held by the history stay
//! valid.
//!
//! # Coordinate System
//!
//! - Crop selections are in preview pixels and carry the preview's scale ratio
//! - Rotation is always 90 degrees clockwise
//! - Origin is top-left corner

mod crop;
mod grayscale;
mod rotation;

use serde::{Deserialize, Serialize};

use crate::decode::PixelBuffer;
use crate::error::EditError;

pub use crop::{apply_crop, CropRegion, CropRejection, PreviewPoint, SourceRect};
pub use grayscale::apply_grayscale;
pub use rotation::rotate_clockwise;

/// One edit the history can apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    Grayscale,
    Rotate,
    Crop(CropRegion),
}

impl Transform {
    /// Run the transform against `image`, producing a new buffer.
    pub fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, EditError> {
        match self {
            Transform::Grayscale => Ok(apply_grayscale(image)),
            Transform::Rotate => Ok(rotate_clockwise(image)),
            Transform::Crop(region) => Ok(apply_crop(image, region)?),
        }
    }

    /// Short verb phrase used in log lines and notices.
    pub fn describe(&self) -> &'static str {
        match self {
            Transform::Grayscale => "applying grayscale",
            Transform::Rotate => "rotating image",
            Transform::Crop(_) => "cropping image",
        }
    }
}
