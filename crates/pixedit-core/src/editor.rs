//! The editing session: commands in, previews and notices out.
//!
//! `Editor` owns the history, the zoom level, the crop gesture and the last
//! rendered previews. Hosts either call the typed methods directly (which
//! return `Result`) or feed `Command`s / `PointerEvent`s through
//! [`Editor::handle`] and [`Editor::handle_pointer`], which never fail and turn
//! every error into a [`Notice`] for the user.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::decode::{decode_image, load_image_file, DecodeError, PixelBuffer};
use crate::encode::{encode_image, output_path, save_image_file, OutputFormat};
use crate::error::EditError;
use crate::gesture::{CropGesture, SelectionOverlay};
use crate::history::EditorState;
use crate::preview::{render_preview, Previews, Zoom};
use crate::transform::{PreviewPoint, Transform};

/// The user-facing command set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load the image at a path chosen by the host's file picker.
    SelectImage(PathBuf),
    /// Arm the crop gesture on the modified preview.
    Crop,
    Grayscale,
    Rotate,
    Undo,
    Redo,
    /// Set the zoom, in percent.
    Zoom(u16),
    /// Save the displayed image; the extension picks the format.
    Save(PathBuf),
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Command::SelectImage(_) => Operation::Load,
            Command::Crop => Operation::BeginCrop,
            Command::Grayscale => Operation::Grayscale,
            Command::Rotate => Operation::Rotate,
            Command::Undo => Operation::Undo,
            Command::Redo => Operation::Redo,
            Command::Zoom(_) => Operation::Display,
            Command::Save(_) => Operation::Save,
        }
    }
}

/// What the user was doing when something failed. Owns the wording of error
/// notices so every host reports failures the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Load,
    BeginCrop,
    Crop,
    Grayscale,
    Rotate,
    Undo,
    Redo,
    Display,
    Save,
}

impl Operation {
    pub fn describe(self) -> &'static str {
        match self {
            Operation::Load => "loading image",
            Operation::BeginCrop => "starting crop",
            Operation::Crop => "during crop",
            Operation::Grayscale => "applying grayscale",
            Operation::Rotate => "rotating image",
            Operation::Undo => "during undo",
            Operation::Redo => "during redo",
            Operation::Display => "displaying image",
            Operation::Save => "saving image",
        }
    }

    /// User-facing text for `err` raised by this operation.
    pub fn failure_message(self, err: &EditError) -> String {
        match self {
            Operation::Load => format!("Failed to load image: {}", err),
            _ => format!("Error {}: {}", self.describe(), err),
        }
    }
}

/// Pointer activity on the modified preview, in preview pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Press(PreviewPoint),
    Drag(PreviewPoint),
    Release(PreviewPoint),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message the host should show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(operation: Operation, err: &EditError) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            message: operation.failure_message(err),
        }
    }

    pub fn saved(path: &Path) -> Self {
        Self::info(format!("Image saved to: {}", path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    state: EditorState,
    zoom: Zoom,
    gesture: CropGesture,
    previews: Option<Previews>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let config = config.validated();
        Self {
            state: EditorState::with_history_limit(config.history_limit),
            zoom: Zoom::from_percent(config.default_zoom_percent),
            gesture: CropGesture::new(config.min_crop_drag),
            previews: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn gesture(&self) -> &CropGesture {
        &self.gesture
    }

    /// Previews from the last successful render, if an image is loaded.
    pub fn previews(&self) -> Option<&Previews> {
        self.previews.as_ref()
    }

    pub fn selection_overlay(&self) -> Option<SelectionOverlay> {
        self.gesture.overlay()
    }

    /// Decode `bytes` and start a new session with them. Nothing changes if
    /// decoding fails.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), EditError> {
        let image = decode_image(bytes)?;
        self.load_buffer(image)
    }

    /// Read and decode `path`, then start a new session with it.
    pub fn load_path(&mut self, path: &Path) -> Result<(), EditError> {
        let image = load_image_file(path)?;
        self.load_buffer(image)
    }

    /// Start a new session with `image`.
    ///
    /// Previews are rendered before anything is replaced, so on error the
    /// previous image, its history and its previews are all kept.
    pub fn load_buffer(&mut self, image: PixelBuffer) -> Result<(), EditError> {
        if image.is_empty() {
            return Err(DecodeError::InvalidDimensions {
                width: image.width,
                height: image.height,
            }
            .into());
        }
        let previews = self.render(&image, &image)?;

        tracing::info!(width = image.width, height = image.height, "image loaded");
        self.gesture.cancel();
        self.state.load_image(image);
        self.commit(previews);
        Ok(())
    }

    /// Arm the crop gesture. The next press/drag/release on the modified
    /// preview selects the region.
    pub fn begin_crop(&mut self) -> Result<(), EditError> {
        if !self.state.is_loaded() {
            return Err(EditError::NoImageLoaded);
        }
        self.gesture.arm();
        tracing::debug!("crop armed");
        Ok(())
    }

    /// Drop an armed or in-progress crop. Returns whether there was one.
    pub fn cancel_crop(&mut self) -> bool {
        self.gesture.cancel()
    }

    pub fn grayscale(&mut self) -> Result<(), EditError> {
        self.gesture.cancel();
        self.edit(Transform::Grayscale)
    }

    pub fn rotate(&mut self) -> Result<(), EditError> {
        self.gesture.cancel();
        self.edit(Transform::Rotate)
    }

    pub fn undo(&mut self) -> Result<(), EditError> {
        self.gesture.cancel();
        self.state.undo()?;
        self.refresh()
    }

    pub fn redo(&mut self) -> Result<(), EditError> {
        self.gesture.cancel();
        self.state.redo()?;
        self.refresh()
    }

    /// Change the zoom (clamped to the configured range) and re-render.
    ///
    /// A selection being dragged is dropped because its coordinates belong to
    /// the old preview; an armed gesture stays armed.
    pub fn set_zoom(&mut self, percent: u16) -> Result<(), EditError> {
        self.zoom = Zoom::from_percent(self.config.clamp_zoom(percent));
        self.gesture.restart();
        if self.state.is_loaded() {
            self.refresh()?;
        }
        Ok(())
    }

    /// Route a pointer event to the crop gesture.
    ///
    /// Events are ignored unless the gesture is armed. A release that ends a
    /// valid drag applies the crop using the scale ratio of the last render.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<(), EditError> {
        match event {
            PointerEvent::Press(point) => {
                self.gesture.press(point);
            }
            PointerEvent::Drag(point) => {
                self.gesture.drag(point);
            }
            PointerEvent::Release(point) => {
                let ratio = self.state.scale_ratio();
                if let Some(selection) = self.gesture.release(point, ratio) {
                    let region = selection?;
                    self.edit(Transform::Crop(region))?;
                }
            }
        }
        Ok(())
    }

    /// Encode the displayed image.
    pub fn encode_displayed(&self, format: OutputFormat) -> Result<Vec<u8>, EditError> {
        let image = self.state.displayed().ok_or(EditError::NoImageLoaded)?;
        Ok(encode_image(image, format, self.config.jpeg_quality)?)
    }

    /// Save the displayed image to `path`.
    pub fn save_path(&self, path: &Path) -> Result<OutputFormat, EditError> {
        let image = self.state.displayed().ok_or(EditError::NoImageLoaded)?;
        Ok(save_image_file(path, image, self.config.jpeg_quality)?)
    }

    /// Run a command, returning the typed error on failure.
    pub fn execute(&mut self, command: &Command) -> Result<(), EditError> {
        if !matches!(command, Command::Crop | Command::Zoom(_)) {
            self.gesture.cancel();
        }

        match command {
            Command::SelectImage(path) => self.load_path(path),
            Command::Crop => self.begin_crop(),
            Command::Grayscale => self.grayscale(),
            Command::Rotate => self.rotate(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Zoom(percent) => self.set_zoom(*percent),
            Command::Save(path) => self.save_path(path).map(|_| ()),
        }
    }

    /// Run a command at the user boundary. Failures are logged and returned
    /// as an error notice; a successful save yields an info notice.
    pub fn handle(&mut self, command: Command) -> Option<Notice> {
        match self.execute(&command) {
            Ok(()) => match command {
                Command::Save(path) => Some(Notice::saved(&output_path(&path))),
                _ => None,
            },
            Err(err) => {
                let operation = command.operation();
                tracing::warn!(command = operation.describe(), error = %err, "command failed");
                Some(Notice::error(operation, &err))
            }
        }
    }

    /// Pointer counterpart of [`Editor::handle`].
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Notice> {
        match self.pointer(event) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(?event, error = %err, "crop failed");
                Some(Notice::error(Operation::Crop, &err))
            }
        }
    }

    fn edit(&mut self, transform: Transform) -> Result<(), EditError> {
        self.state.apply_edit(&transform)?;
        self.refresh()
    }

    /// Re-render both previews from the current state.
    fn refresh(&mut self) -> Result<(), EditError> {
        let (Some(original), Some(displayed)) = (self.state.original(), self.state.displayed())
        else {
            self.previews = None;
            return Ok(());
        };
        let previews = self.render(original, displayed)?;
        self.commit(previews);
        Ok(())
    }

    fn render(&self, original: &PixelBuffer, displayed: &PixelBuffer) -> Result<Previews, EditError> {
        let canvas = self.config.canvas;
        let filter = self.config.preview_filter;
        Ok(Previews {
            original: render_preview(original, canvas, self.zoom, filter)?,
            modified: render_preview(displayed, canvas, self.zoom, filter)?,
        })
    }

    /// Install rendered previews and remember the modified preview's ratio.
    fn commit(&mut self, previews: Previews) {
        self.state.set_scale_ratio(previews.modified.scale_ratio);
        tracing::debug!(
            zoom = self.zoom.percent(),
            preview_width = previews.modified.image.width,
            preview_height = previews.modified.image.height,
            scale_ratio = previews.modified.scale_ratio,
            "previews rendered"
        );
        self.previews = Some(previews);
    }
}
