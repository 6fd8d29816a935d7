//! Editor settings.
//!
//! Every field has a default, so hosts can deserialize a partial object and
//! only override what they care about. Run [`EditorConfig::validated`] on
//! anything that came from outside before handing it to an `Editor`.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;

/// Size of a preview canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 350,
            height: 350,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas each preview is fitted into.
    pub canvas: CanvasSize,
    /// Zoom applied right after startup, in percent.
    pub default_zoom_percent: u16,
    pub min_zoom_percent: u16,
    pub max_zoom_percent: u16,
    /// Minimum crop drag, in preview pixels, on each axis.
    pub min_crop_drag: u32,
    /// Quality used when saving JPEG files (1-100).
    pub jpeg_quality: u8,
    /// Resampling filter for previews.
    pub preview_filter: FilterType,
    /// Maximum undo depth; `None` keeps every snapshot.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            default_zoom_percent: 75,
            min_zoom_percent: 25,
            max_zoom_percent: 125,
            min_crop_drag: 5,
            jpeg_quality: 95,
            preview_filter: FilterType::Area,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Repair values that would make the editor misbehave.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.canvas.width == 0 || self.canvas.height == 0 {
            tracing::warn!(canvas = ?self.canvas, "canvas must be non-empty; using default");
            self.canvas = defaults.canvas;
        }
        if self.min_zoom_percent > self.max_zoom_percent {
            std::mem::swap(&mut self.min_zoom_percent, &mut self.max_zoom_percent);
        }
        self.min_zoom_percent = self.min_zoom_percent.max(1);
        self.max_zoom_percent = self.max_zoom_percent.max(self.min_zoom_percent);
        self.default_zoom_percent = self.clamp_zoom(self.default_zoom_percent);
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        if self.history_limit == Some(0) {
            tracing::warn!("history_limit of 0 would disable undo; keeping all snapshots");
            self.history_limit = None;
        }

        self
    }

    /// Clamp a zoom percentage into the configured range.
    pub fn clamp_zoom(&self, percent: u16) -> u16 {
        percent.clamp(self.min_zoom_percent, self.max_zoom_percent)
    }
}
