//! Pixedit Core - Image editing library
//!
//! This crate provides the editing core behind Pixedit: PNG/JPEG load and
//! save, grayscale/rotate/crop transforms, an undo/redo history, fit-to-canvas
//! previews and the pointer gesture used to select a crop on the preview.
//!
//! Hosts drive everything through [`Editor`], either with the typed methods or
//! by feeding it [`Command`]s and [`PointerEvent`]s.

pub mod config;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod error;
pub mod gesture;
pub mod history;
pub mod luminance;
pub mod preview;
pub mod transform;

pub use config::{CanvasSize, EditorConfig};
pub use decode::{decode_image, load_image_file, FilterType, PixelBuffer};
pub use editor::{Command, Editor, Notice, NoticeLevel, Operation, PointerEvent};
pub use encode::{encode_image, output_path, save_image_file, OutputFormat};
pub use error::{EditError, HistoryDirection};
pub use gesture::{CropGesture, GestureState, SelectionOverlay};
pub use history::EditorState;
pub use preview::{preview_dimensions, render_preview, Preview, Previews, Zoom};
pub use transform::{
    apply_crop, apply_grayscale, rotate_clockwise, CropRegion, CropRejection, PreviewPoint,
    Transform,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_crop_flow() {
        // 1400x700 fits to 350x175 at zoom 100, so each preview pixel is 4
        let mut editor = Editor::new(EditorConfig::default());
        editor
            .load_buffer(PixelBuffer::filled(1400, 700, [200, 100, 50]))
            .unwrap();
        editor.handle(Command::Zoom(100));
        assert_eq!(editor.state().scale_ratio(), 4.0);

        editor.handle(Command::Crop);
        editor.handle_pointer(PointerEvent::Press(PreviewPoint::new(60, 45)));
        editor.handle_pointer(PointerEvent::Release(PreviewPoint::new(10, 20)));

        let displayed = editor.state().displayed().unwrap();
        assert_eq!((displayed.width, displayed.height), (200, 100));
        assert_eq!(displayed.pixel(0, 0), Some([200, 100, 50]));
    }

    #[test]
    fn test_grayscale_then_rotate() {
        let mut editor = Editor::default();
        editor
            .load_buffer(PixelBuffer::filled(4, 2, [255, 0, 0]))
            .unwrap();

        assert_eq!(editor.handle(Command::Grayscale), None);
        assert_eq!(editor.handle(Command::Rotate), None);

        let displayed = editor.state().displayed().unwrap();
        assert_eq!((displayed.width, displayed.height), (2, 4));
        assert_eq!(displayed.pixel(1, 3), Some([76, 76, 76]));
    }
}
