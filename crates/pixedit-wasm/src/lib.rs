//! Pixedit WASM - WebAssembly bindings for Pixedit
//!
//! This crate exposes the pixedit-core editing session and its stateless
//! operations to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - `JsEditor`, the undoable session (crop gesture, zoom, previews)
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - PNG/JPEG decoding
//! - `encode` - PNG/JPEG encoding
//! - `transform` - Grayscale, rotate, crop and preview sizing without history
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor } from '@pixedit/wasm';
//!
//! await init();
//!
//! const editor = new JsEditor();
//! editor.load(new Uint8Array(await file.arrayBuffer()));
//! editor.grayscale();
//! const png = editor.export('gray.png');
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod encode;
mod error;
mod transform;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use editor::JsEditor;
pub use encode::{encode_image, encode_jpeg, encode_png, mime_type_for};
pub use transform::{crop_preview_region, grayscale, preview_dimensions, rotate_clockwise};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
