use crate::Point;

/// Default distance a pointer must travel vertically before a drag starts.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Phase of the per-item drag gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer is down but has not crossed the touch slop vertically yet.
    Pressed { last: Point, accumulated_dy: f32 },
    Dragging { last: Point },
}

/// Output of the drag gesture detector.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragEvent {
    /// The touch slop was crossed by a sufficiently vertical movement; `delta` is the vertical
    /// delta of that movement and must be applied right away.
    Started { delta: f32 },
    Moved { delta: f32 },
    /// Pointer released or cancelled after a drag started.
    Finished,
}

/// Vertical drag detector for one item.
///
/// Pointer positions go in, [`DragEvent`]s come out. The detector knows nothing about the drag
/// lease: the caller acquires it on [`DragEvent::Started`] and calls [`DragGesture::cancel`] if
/// that fails.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    phase: DragPhase,
    touch_slop: f32,
    min_swipe_horizontality: Option<f32>,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_SLOP, Some(crate::swipe::DEFAULT_MIN_SWIPE_HORIZONTALITY))
    }
}

impl DragGesture {
    /// `min_swipe_horizontality` is the horizontal/vertical ratio that makes a movement a swipe;
    /// a drag only starts when the vertical slope of the slop-crossing movement is at least its
    /// inverse. `None` (or `Some(0.0)`) disables the slope check.
    pub fn new(touch_slop: f32, min_swipe_horizontality: Option<f32>) -> Self {
        Self {
            phase: DragPhase::Idle,
            touch_slop: touch_slop.max(0.0),
            min_swipe_horizontality: min_swipe_horizontality.filter(|h| *h != 0.0),
        }
    }

    pub fn set_touch_slop(&mut self, touch_slop: f32) {
        self.touch_slop = touch_slop.max(0.0);
    }

    pub fn set_min_swipe_horizontality(&mut self, min_swipe_horizontality: Option<f32>) {
        self.min_swipe_horizontality = min_swipe_horizontality.filter(|h| *h != 0.0);
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    fn accepts_slope(&self, dx: f32, dy: f32) -> bool {
        let Some(horizontality) = self.min_swipe_horizontality else {
            return true;
        };
        let slope = if dx != 0.0 {
            (dy / dx).abs()
        } else {
            f32::INFINITY
        };
        slope >= 1.0 / horizontality
    }

    pub fn pointer_down(&mut self, position: Point) {
        self.phase = DragPhase::Pressed {
            last: position,
            accumulated_dy: 0.0,
        };
    }

    pub fn pointer_move(&mut self, position: Point) -> Option<DragEvent> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Pressed {
                last,
                accumulated_dy,
            } => {
                let dx = position.x - last.x;
                let dy = position.y - last.y;
                let accumulated_dy = accumulated_dy + dy;
                if accumulated_dy == 0.0 || accumulated_dy.abs() < self.touch_slop {
                    self.phase = DragPhase::Pressed {
                        last: position,
                        accumulated_dy,
                    };
                    return None;
                }
                if !self.accepts_slope(dx, dy) {
                    // Too horizontal: start measuring the slop again from here.
                    self.phase = DragPhase::Pressed {
                        last: position,
                        accumulated_dy: 0.0,
                    };
                    return None;
                }
                self.phase = DragPhase::Dragging { last: position };
                Some(DragEvent::Started { delta: dy })
            }
            DragPhase::Dragging { last } => {
                let dy = position.y - last.y;
                self.phase = DragPhase::Dragging { last: position };
                Some(DragEvent::Moved { delta: dy })
            }
        }
    }

    /// Pointer released. Returns [`DragEvent::Finished`] if a drag was in progress.
    pub fn pointer_up(&mut self) -> Option<DragEvent> {
        let was_dragging = self.is_dragging();
        self.phase = DragPhase::Idle;
        was_dragging.then_some(DragEvent::Finished)
    }

    /// Abandons the gesture without reporting anything (e.g. the drag lease was refused).
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }
}
