//! Output format selection and saving to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::types::EncodeError;
use super::{encode_jpeg, encode_png};
use crate::decode::PixelBuffer;

/// Formats the editor can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format implied by a file extension (case-insensitive).
    ///
    /// A missing extension means PNG.
    pub fn from_extension(extension: Option<&str>) -> Result<Self, EncodeError> {
        let Some(ext) = extension else {
            return Ok(OutputFormat::Png);
        };
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            other => Err(EncodeError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Pick the format implied by a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        Self::from_extension(path.extension().and_then(|ext| ext.to_str()))
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Encode a buffer in the given format. `jpeg_quality` is ignored for PNG.
pub fn encode_image(
    image: &PixelBuffer,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(image),
        OutputFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, jpeg_quality),
    }
}

/// The file a save to `path` actually writes: `.png` is appended when the
/// path has no extension.
pub fn output_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// Encode a buffer in the format implied by `path` and write it to
/// [`output_path`]`(path)`.
///
/// Nothing is written when encoding fails.
pub fn save_image_file(
    path: &Path,
    image: &PixelBuffer,
    jpeg_quality: u8,
) -> Result<OutputFormat, EncodeError> {
    let format = OutputFormat::from_path(path)?;
    let bytes = encode_image(image, format, jpeg_quality)?;
    let path = output_path(path);

    std::fs::write(&path, &bytes)
        .map_err(|e| EncodeError::IoError(format!("{}: {}", path.display(), e)))?;

    tracing::info!(
        path = %path.display(),
        ?format,
        bytes = bytes.len(),
        "saved image"
    );
    Ok(format)
}
