//! WASM bindings for the undoable editing session.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditor } from '@pixedit/wasm';
//!
//! const editor = new JsEditor({ canvas: { width: 480, height: 360 } });
//! editor.load(new Uint8Array(await file.arrayBuffer()));
//!
//! editor.begin_crop();
//! canvas.onpointerdown = (e) => editor.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => editor.pointer_move(e.offsetX, e.offsetY);
//! canvas.onpointerup = (e) => editor.pointer_up(e.offsetX, e.offsetY);
//!
//! const preview = editor.modified_preview();
//! ctx.putImageData(new ImageData(
//!   new Uint8ClampedArray(preview.rgba_pixels()), preview.width, preview.height), 0, 0);
//! ```
//!
//! Failed operations throw an `Error` whose message is the user-facing notice
//! (for example "Error applying grayscale: no image available").

use std::path::Path;

use crate::error::{notice_error, to_js_error};
use crate::types::JsPixelBuffer;
use pixedit_core::config::EditorConfig;
use pixedit_core::editor::{Editor, Operation, PointerEvent};
use pixedit_core::encode::OutputFormat;
use pixedit_core::error::EditError;
use pixedit_core::preview::Preview;
use pixedit_core::transform::PreviewPoint;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Snapshot of the session for UI state (button enablement and the like).
#[derive(Debug, Clone, PartialEq, Serialize)]
struct SessionStatus {
    loaded: bool,
    zoom_percent: u16,
    can_undo: bool,
    can_redo: bool,
    crop_active: bool,
    width: Option<u32>,
    height: Option<u32>,
    scale_ratio: f64,
}

#[wasm_bindgen]
pub struct JsEditor {
    inner: Editor,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor.
    ///
    /// `config` is an optional partial `EditorConfig` object; missing fields
    /// take their defaults.
    ///
    /// # Errors
    /// Throws if `config` has the wrong shape.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditor, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| to_js_error(format!("Invalid editor config: {}", e)))?
        };
        Ok(Self::from_config(config))
    }

    /// Decode PNG or JPEG bytes and start a new session with them.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner
            .load_bytes(bytes)
            .map_err(|e| notice_error(Operation::Load, e))
    }

    /// Arm the crop gesture on the modified preview.
    pub fn begin_crop(&mut self) -> Result<(), JsValue> {
        self.inner
            .begin_crop()
            .map_err(|e| notice_error(Operation::BeginCrop, e))
    }

    /// Drop an armed or in-progress crop.
    pub fn cancel_crop(&mut self) -> bool {
        self.inner.cancel_crop()
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) -> Result<(), JsValue> {
        self.pointer(PointerEvent::Press(PreviewPoint::new(x, y)))
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) -> Result<(), JsValue> {
        self.pointer(PointerEvent::Drag(PreviewPoint::new(x, y)))
    }

    /// Finish the selection; applies the crop if the drag was large enough.
    pub fn pointer_up(&mut self, x: i32, y: i32) -> Result<(), JsValue> {
        self.pointer(PointerEvent::Release(PreviewPoint::new(x, y)))
    }

    pub fn grayscale(&mut self) -> Result<(), JsValue> {
        self.inner
            .grayscale()
            .map_err(|e| notice_error(Operation::Grayscale, e))
    }

    pub fn rotate(&mut self) -> Result<(), JsValue> {
        self.inner
            .rotate()
            .map_err(|e| notice_error(Operation::Rotate, e))
    }

    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.inner.undo().map_err(|e| notice_error(Operation::Undo, e))
    }

    pub fn redo(&mut self) -> Result<(), JsValue> {
        self.inner.redo().map_err(|e| notice_error(Operation::Redo, e))
    }

    /// Set the zoom in percent; values outside the configured range clamp.
    pub fn set_zoom(&mut self, percent: u16) -> Result<(), JsValue> {
        self.inner
            .set_zoom(percent)
            .map_err(|e| notice_error(Operation::Display, e))
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> u16 {
        self.inner.zoom().percent()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.state().can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.state().can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn crop_active(&self) -> bool {
        self.inner.gesture().is_active()
    }

    /// Source pixels per modified-preview pixel.
    #[wasm_bindgen(getter)]
    pub fn scale_ratio(&self) -> f64 {
        self.inner.state().scale_ratio()
    }

    pub fn original_preview(&self) -> Option<JsPixelBuffer> {
        self.inner
            .previews()
            .map(|p| preview_buffer(&p.original))
    }

    pub fn modified_preview(&self) -> Option<JsPixelBuffer> {
        self.inner
            .previews()
            .map(|p| preview_buffer(&p.modified))
    }

    /// The full-resolution image that would be saved.
    pub fn displayed(&self) -> Option<JsPixelBuffer> {
        self.inner
            .state()
            .displayed()
            .cloned()
            .map(JsPixelBuffer::from_buffer)
    }

    /// Rubber-band rectangle `[x1, y1, x2, y2]` while a crop is being dragged.
    pub fn crop_overlay(&self) -> Option<Vec<i32>> {
        self.inner
            .selection_overlay()
            .map(|o| vec![o.start.x, o.start.y, o.end.x, o.end.y])
    }

    /// Session state as a plain object.
    pub fn status(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.status_snapshot()).map_err(to_js_error)
    }

    /// Encode the displayed image for download. The format comes from
    /// `file_name`'s extension (`.png`, `.jpg`, `.jpeg`; none means PNG).
    /// Writing the bytes anywhere is up to the caller.
    pub fn export(&self, file_name: &str) -> Result<Vec<u8>, JsValue> {
        self.export_bytes(file_name)
            .map_err(|e| notice_error(Operation::Save, e))
    }
}

impl JsEditor {
    pub(crate) fn from_config(config: EditorConfig) -> Self {
        Self {
            inner: Editor::new(config),
        }
    }

    fn pointer(&mut self, event: PointerEvent) -> Result<(), JsValue> {
        self.inner
            .pointer(event)
            .map_err(|e| notice_error(Operation::Crop, e))
    }

    fn export_bytes(&self, file_name: &str) -> Result<Vec<u8>, EditError> {
        let format = OutputFormat::from_path(Path::new(file_name))?;
        self.inner.encode_displayed(format)
    }

    fn status_snapshot(&self) -> SessionStatus {
        let state = self.inner.state();
        let displayed = state.displayed();
        SessionStatus {
            loaded: state.is_loaded(),
            zoom_percent: self.inner.zoom().percent(),
            can_undo: state.can_undo(),
            can_redo: state.can_redo(),
            crop_active: self.inner.gesture().is_active(),
            width: displayed.map(|img| img.width),
            height: displayed.map(|img| img.height),
            scale_ratio: state.scale_ratio(),
        }
    }
}

fn preview_buffer(preview: &Preview) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(preview.image.clone())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_with_undefined_config() {
        let editor = JsEditor::new(JsValue::UNDEFINED).unwrap();
        assert_eq!(editor.zoom(), 75);
    }

    #[wasm_bindgen_test]
    fn test_thrown_message_matches_core_notice() {
        use wasm_bindgen::JsCast;

        let mut editor = JsEditor::new(JsValue::UNDEFINED).unwrap();
        let err: js_sys::Error = editor.grayscale().unwrap_err().dyn_into().unwrap();
        assert_eq!(
            String::from(err.message()),
            "Error applying grayscale: no image available"
        );

        let err: js_sys::Error = editor.load(b"junk").unwrap_err().dyn_into().unwrap();
        assert!(String::from(err.message()).starts_with("Failed to load image: "));
    }

    #[wasm_bindgen_test]
    fn test_edit_before_load_throws() {
        let mut editor = JsEditor::new(JsValue::UNDEFINED).unwrap();
        assert!(editor.grayscale().is_err());
        assert!(editor.begin_crop().is_err());
        assert!(editor.undo().is_err());
    }

    #[wasm_bindgen_test]
    fn test_small_crop_throws_and_keeps_history() {
        let mut editor = JsEditor::new(JsValue::UNDEFINED).unwrap();
        let png = pixedit_core::encode::encode_png(&pixedit_core::decode::PixelBuffer::filled(
            100,
            100,
            [0, 0, 0],
        ))
        .unwrap();
        editor.load(&png).unwrap();

        editor.begin_crop().unwrap();
        editor.pointer_down(10, 10).unwrap();
        assert!(editor.pointer_up(12, 12).is_err());
        assert!(!editor.can_undo());
    }

    #[wasm_bindgen_test]
    fn test_export_unsupported_extension_throws() {
        let mut editor = JsEditor::new(JsValue::UNDEFINED).unwrap();
        let png = pixedit_core::encode::encode_png(&pixedit_core::decode::PixelBuffer::filled(
            4,
            4,
            [0, 0, 0],
        ))
        .unwrap();
        editor.load(&png).unwrap();
        assert!(editor.export("out.bmp").is_err());
    }
}
