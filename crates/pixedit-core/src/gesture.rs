//! Pointer state machine for drawing a crop selection on the preview.
//!
//! ```text
//! Inactive --arm--> Armed --press--> Dragging --release--> Inactive
//!                     ^                 |
//!                     +----cancel-------+ (cancel from any state -> Inactive)
//! ```
//!
//! Pointer events are ignored unless the gesture is armed. Releasing always
//! disarms, whether the selection was accepted or not, so a new crop needs a
//! new "begin crop" command.

use serde::{Deserialize, Serialize};

use crate::transform::{CropRegion, CropRejection, PreviewPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// Pointer events are not routed to the gesture.
    #[default]
    Inactive,
    /// Waiting for the button press that starts the selection.
    Armed,
    /// Button held; the overlay follows the pointer.
    Dragging {
        start: PreviewPoint,
        current: PreviewPoint,
    },
}

/// The rubber-band rectangle to draw while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOverlay {
    pub start: PreviewPoint,
    pub end: PreviewPoint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropGesture {
    state: GestureState,
    min_drag: u32,
}

impl CropGesture {
    pub fn new(min_drag: u32) -> Self {
        Self {
            state: GestureState::Inactive,
            min_drag,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn min_drag(&self) -> u32 {
        self.min_drag
    }

    /// True while armed or dragging.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Inactive)
    }

    pub fn arm(&mut self) {
        self.state = GestureState::Armed;
    }

    /// Drop any gesture in progress. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = GestureState::Inactive;
        was_active
    }

    /// Drop a half-drawn selection but stay armed.
    pub fn restart(&mut self) {
        if let GestureState::Dragging { .. } = self.state {
            self.state = GestureState::Armed;
        }
    }

    /// Start a selection at `point`. A press while already dragging starts
    /// over from the new point. Returns false when the gesture is inactive.
    pub fn press(&mut self, point: PreviewPoint) -> bool {
        match self.state {
            GestureState::Inactive => false,
            GestureState::Armed | GestureState::Dragging { .. } => {
                self.state = GestureState::Dragging {
                    start: point,
                    current: point,
                };
                true
            }
        }
    }

    /// Move the free corner of the selection.
    pub fn drag(&mut self, point: PreviewPoint) -> Option<SelectionOverlay> {
        if let GestureState::Dragging { current, .. } = &mut self.state {
            *current = point;
        }
        self.overlay()
    }

    /// Finish the selection at `point`.
    ///
    /// Returns `None` when no drag was in progress (the event is ignored).
    /// Otherwise the gesture disarms and yields either the selection, mapped
    /// with `scale_ratio`, or the reason it was too small.
    pub fn release(
        &mut self,
        point: PreviewPoint,
        scale_ratio: f64,
    ) -> Option<Result<CropRegion, CropRejection>> {
        let GestureState::Dragging { start, .. } = self.state else {
            return None;
        };
        self.state = GestureState::Inactive;

        let region = CropRegion::new(start, point, scale_ratio);
        Some(region.check_drag(self.min_drag).map(|()| region))
    }

    /// Current rubber-band rectangle, if dragging.
    pub fn overlay(&self) -> Option<SelectionOverlay> {
        match self.state {
            GestureState::Dragging { start, current } => Some(SelectionOverlay {
                start,
                end: current,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> PreviewPoint {
        PreviewPoint::new(x, y)
    }

    #[test]
    fn test_inactive_ignores_pointer() {
        let mut gesture = CropGesture::new(5);

        assert!(!gesture.press(p(1, 1)));
        assert_eq!(gesture.drag(p(50, 50)), None);
        assert_eq!(gesture.release(p(50, 50), 1.0), None);
        assert_eq!(gesture.state(), GestureState::Inactive);
    }

    #[test]
    fn test_full_gesture_produces_region() {
        let mut gesture = CropGesture::new(5);
        gesture.arm();
        assert!(gesture.press(p(10, 10)));

        let overlay = gesture.drag(p(60, 30)).unwrap();
        assert_eq!(overlay.start, p(10, 10));
        assert_eq!(overlay.end, p(60, 30));

        let region = gesture.release(p(110, 60), 2.0).unwrap().unwrap();
        assert_eq!(
            region,
            CropRegion {
                x1: 10,
                y1: 10,
                x2: 110,
                y2: 60,
                scale_ratio: 2.0
            }
        );
        assert!(!gesture.is_active());
        assert_eq!(gesture.overlay(), None);
    }

    #[test]
    fn test_small_drag_is_rejected_and_disarms() {
        let mut gesture = CropGesture::new(5);
        gesture.arm();
        gesture.press(p(10, 10));

        let result = gesture.release(p(12, 40), 1.0).unwrap();
        assert_eq!(
            result,
            Err(CropRejection::DragTooSmall {
                dx: 2,
                dy: 30,
                min: 5
            })
        );
        assert_eq!(gesture.state(), GestureState::Inactive);

        // Further pointer activity is ignored until re-armed
        assert!(!gesture.press(p(0, 0)));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut gesture = CropGesture::new(5);
        gesture.arm();

        assert_eq!(gesture.release(p(40, 40), 1.0), None);
        assert_eq!(gesture.state(), GestureState::Armed);
    }

    #[test]
    fn test_second_press_discards_stale_selection() {
        let mut gesture = CropGesture::new(5);
        gesture.arm();
        gesture.press(p(0, 0));
        gesture.drag(p(90, 90));

        gesture.press(p(20, 20));
        assert_eq!(
            gesture.overlay(),
            Some(SelectionOverlay {
                start: p(20, 20),
                end: p(20, 20)
            })
        );
    }

    #[test]
    fn test_cancel_and_restart() {
        let mut gesture = CropGesture::new(5);
        assert!(!gesture.cancel());

        gesture.arm();
        gesture.press(p(1, 1));
        gesture.restart();
        assert_eq!(gesture.state(), GestureState::Armed);

        assert!(gesture.cancel());
        assert_eq!(gesture.state(), GestureState::Inactive);
    }
}
