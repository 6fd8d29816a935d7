//! Image encoding for saving edits.
//!
//! This module provides:
//! - PNG and JPEG encoders over `PixelBuffer` / raw RGB data
//! - Format selection from a destination path's extension
//! - Writing the displayed image to disk
//!
//! Encoding happens fully in memory before anything touches the filesystem.

mod jpeg;
mod output;
mod png;
mod types;

pub use jpeg::encode_jpeg;
pub use output::{encode_image, output_path, save_image_file, OutputFormat};
pub use png::encode_png;
pub use types::EncodeError;
