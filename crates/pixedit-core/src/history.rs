//! Linear undo/redo history over full image snapshots.
//!
//! The state keeps the loaded original, the current edit result and two
//! stacks of snapshots. Every edit pushes the image it replaced onto the undo
//! stack and clears the redo stack, so undoing and then editing again drops
//! the undone branch for good.

use std::collections::VecDeque;

use crate::decode::PixelBuffer;
use crate::error::{EditError, HistoryDirection};
use crate::transform::Transform;

/// Everything the editor knows about the image being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    original: Option<PixelBuffer>,
    current: Option<PixelBuffer>,
    undo_stack: VecDeque<PixelBuffer>,
    redo_stack: VecDeque<PixelBuffer>,
    scale_ratio: f64,
    history_limit: Option<usize>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            original: None,
            current: None,
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            scale_ratio: 1.0,
            history_limit: None,
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` undo snapshots, dropping the oldest first.
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            history_limit: limit.filter(|&n| n > 0),
            ..Self::default()
        }
    }

    /// Start over with a freshly loaded image. Both stacks are cleared and
    /// the previous edit result is discarded.
    pub fn load_image(&mut self, buffer: PixelBuffer) {
        tracing::debug!(
            width = buffer.width,
            height = buffer.height,
            discarded_undo = self.undo_stack.len(),
            discarded_redo = self.redo_stack.len(),
            "loading image into history"
        );
        self.original = Some(buffer);
        self.current = None;
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn is_loaded(&self) -> bool {
        self.original.is_some()
    }

    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    pub fn current(&self) -> Option<&PixelBuffer> {
        self.current.as_ref()
    }

    /// The image shown as "modified": the latest edit, or the original when
    /// nothing has been edited yet.
    pub fn displayed(&self) -> Option<&PixelBuffer> {
        self.current.as_ref().or(self.original.as_ref())
    }

    /// Apply `transform` to the displayed image.
    ///
    /// The transform runs first; only when it succeeds is the previous image
    /// pushed onto the undo stack and the redo stack cleared.
    pub fn apply_edit(&mut self, transform: &Transform) -> Result<(), EditError> {
        let edited = {
            let previous = self.displayed().ok_or(EditError::NoImageLoaded)?;
            transform.apply(previous)?
        };

        let snapshot = match self.current.take() {
            Some(current) => current,
            None => self.original.clone().ok_or(EditError::NoImageLoaded)?,
        };
        self.push_undo(snapshot);
        self.redo_stack.clear();
        self.current = Some(edited);

        tracing::debug!(
            edit = transform.describe(),
            undo_depth = self.undo_stack.len(),
            "applied edit"
        );
        Ok(())
    }

    /// Step back one edit.
    pub fn undo(&mut self) -> Result<(), EditError> {
        let previous = self
            .undo_stack
            .pop_back()
            .ok_or(EditError::EmptyHistory(HistoryDirection::Undo))?;

        if let Some(current) = self.current.take() {
            self.redo_stack.push_back(current);
        }
        self.current = Some(previous);

        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "undo"
        );
        Ok(())
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self) -> Result<(), EditError> {
        let next = self
            .redo_stack
            .pop_back()
            .ok_or(EditError::EmptyHistory(HistoryDirection::Redo))?;

        if let Some(current) = self.current.take() {
            self.push_undo(current);
        }
        self.current = Some(next);

        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "redo"
        );
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Source pixels per preview pixel of the last rendered modified preview.
    pub fn scale_ratio(&self) -> f64 {
        self.scale_ratio
    }

    pub fn set_scale_ratio(&mut self, ratio: f64) {
        self.scale_ratio = ratio;
    }

    fn push_undo(&mut self, snapshot: PixelBuffer) {
        self.undo_stack.push_back(snapshot);
        if let Some(limit) = self.history_limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let len = (w * h * 3) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| PixelBuffer::new(w, h, pixels))
        })
    }

    fn edit_strategy() -> impl Strategy<Value = Transform> {
        prop_oneof![Just(Transform::Grayscale), Just(Transform::Rotate)]
    }

    proptest! {
        /// Property: n edits followed by n undos restore the original image.
        #[test]
        fn prop_undo_all_restores_original(
            img in image_strategy(),
            edits in prop::collection::vec(edit_strategy(), 1..8),
        ) {
            let mut state = EditorState::new();
            state.load_image(img.clone());

            for edit in &edits {
                state.apply_edit(edit).unwrap();
            }
            for _ in &edits {
                state.undo().unwrap();
            }

            prop_assert_eq!(state.displayed(), Some(&img));
            prop_assert!(!state.can_undo());
            prop_assert_eq!(state.redo_depth(), edits.len());
        }

        /// Property: undo, redo, undo equals a single undo.
        #[test]
        fn prop_undo_redo_undo_symmetry(
            img in image_strategy(),
            edits in prop::collection::vec(edit_strategy(), 1..6),
        ) {
            let mut state = EditorState::new();
            state.load_image(img);
            for edit in &edits {
                state.apply_edit(edit).unwrap();
            }

            let mut single = state.clone();
            single.undo().unwrap();

            state.undo().unwrap();
            state.redo().unwrap();
            state.undo().unwrap();

            prop_assert_eq!(state, single);
        }

        /// Property: any successful edit empties a non-empty redo stack.
        #[test]
        fn prop_edit_clears_redo(
            img in image_strategy(),
            edits in prop::collection::vec(edit_strategy(), 1..6),
            undos in 1usize..6,
            next in edit_strategy(),
        ) {
            let mut state = EditorState::new();
            state.load_image(img);
            for edit in &edits {
                state.apply_edit(edit).unwrap();
            }
            for _ in 0..undos.min(edits.len()) {
                state.undo().unwrap();
            }
            prop_assert!(state.can_redo());

            let depth_before = state.undo_depth();
            state.apply_edit(&next).unwrap();

            prop_assert_eq!(state.redo_depth(), 0);
            prop_assert_eq!(state.undo_depth(), depth_before + 1);
        }
    }
}
