use crate::drag::DEFAULT_TOUCH_SLOP;
use crate::spring::{AnimatedValue, DAMPING_RATIO_NO_BOUNCY, STIFFNESS_MEDIUM_LOW, SpringSpec};
use crate::{AllowedSwipeDirections, DismissSwipeDirection, LayoutDirection, Point, SwipeDirection};

/// Default minimum horizontal/vertical delta ratio for a movement to start a swipe.
///
/// Relatively strict, so that slightly diagonal vertical scrolls are not taken for swipes.
pub const DEFAULT_MIN_SWIPE_HORIZONTALITY: f32 = 2.5;

/// Rendered sub-phase of a swipe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipePhase {
    #[default]
    Idle,
    Starting,
    Ongoing,
    /// Past the dismiss threshold (releasing now dismisses), or flying out after release.
    Finishing,
    Dismissed,
}

/// Distance thresholds, as fractions of the item width.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeThresholds {
    /// `Starting` becomes `Ongoing` past this fraction.
    pub ongoing_fraction: f32,
    /// Releasing past this fraction dismisses the item.
    pub dismiss_fraction: f32,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            ongoing_fraction: 0.2,
            dismiss_fraction: 0.5,
        }
    }
}

/// Output of the swipe detector.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeEvent {
    Started { delta: f32 },
    Updated { delta: f32, pressed: bool },
    /// Pointer released after a swipe started. `dismissing` tells whether the item is flying out.
    Finished { dismissing: bool },
    /// The fly-out animation completed.
    Dismissed(DismissSwipeDirection),
}

/// What to draw for a swiped item: the content offset and the action revealed behind it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeVisual {
    pub offset: f32,
    /// Direction of the revealed action (the background shows on the opposite side).
    pub direction: Option<SwipeDirection>,
    pub phase: SwipePhase,
    /// `|offset| / width`, clamped to `[0, 1]`.
    pub progress: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Tracking {
    #[default]
    Idle,
    Pressed {
        last: Point,
        accumulated_dx: f32,
    },
    Swiping {
        last: Point,
    },
}

/// Horizontal swipe-to-dismiss detector and animator for one item.
#[derive(Clone, Copy, Debug)]
pub struct SwipeGesture {
    tracking: Tracking,
    offset: AnimatedValue,
    width: f32,
    touch_slop: f32,
    min_swipe_horizontality: Option<f32>,
    allowed: AllowedSwipeDirections,
    layout_direction: LayoutDirection,
    thresholds: SwipeThresholds,
    spring: SpringSpec,
    flying_out: Option<SwipeDirection>,
    dismissed: bool,
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MIN_SWIPE_HORIZONTALITY))
    }
}

impl SwipeGesture {
    /// `None` (or `Some(0.0)`) accepts any movement crossing the touch slop horizontally.
    pub fn new(min_swipe_horizontality: Option<f32>) -> Self {
        Self {
            tracking: Tracking::Idle,
            offset: AnimatedValue::new(0.0),
            width: 0.0,
            touch_slop: DEFAULT_TOUCH_SLOP,
            min_swipe_horizontality: min_swipe_horizontality.filter(|h| *h != 0.0),
            allowed: AllowedSwipeDirections::All,
            layout_direction: LayoutDirection::Ltr,
            thresholds: SwipeThresholds::default(),
            spring: SpringSpec::new(DAMPING_RATIO_NO_BOUNCY, STIFFNESS_MEDIUM_LOW).with_threshold(0.5),
            flying_out: None,
            dismissed: false,
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop.max(0.0);
        self
    }

    pub fn with_thresholds(mut self, thresholds: SwipeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_layout_direction(mut self, layout_direction: LayoutDirection) -> Self {
        self.layout_direction = layout_direction;
        self
    }

    pub fn set_touch_slop(&mut self, touch_slop: f32) {
        self.touch_slop = touch_slop.max(0.0);
    }

    pub fn set_min_swipe_horizontality(&mut self, min_swipe_horizontality: Option<f32>) {
        self.min_swipe_horizontality = min_swipe_horizontality.filter(|h| *h != 0.0);
    }

    pub fn set_thresholds(&mut self, thresholds: SwipeThresholds) {
        self.thresholds = thresholds;
    }

    pub fn set_allowed_directions(&mut self, allowed: AllowedSwipeDirections) {
        self.allowed = allowed;
    }

    pub fn set_layout_direction(&mut self, layout_direction: LayoutDirection) {
        self.layout_direction = layout_direction;
    }

    /// Item width in pixels; the thresholds and the fly-out distance derive from it.
    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
    }

    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn is_pressed(&self) -> bool {
        !matches!(self.tracking, Tracking::Idle)
    }

    pub fn is_swiping(&self) -> bool {
        matches!(self.tracking, Tracking::Swiping { .. })
    }

    /// `true` from swipe start until the item has settled back or been dismissed.
    pub fn is_active(&self) -> bool {
        !self.dismissed && (self.is_swiping() || self.offset.value() != 0.0 || self.offset.is_running())
    }

    /// `true` from a dismissing release until [`SwipeGesture::reset`], fly-out included.
    pub fn is_flying_out(&self) -> bool {
        self.flying_out.is_some()
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn direction(&self) -> Option<SwipeDirection> {
        self.flying_out
            .or_else(|| SwipeDirection::from_offset(self.offset.value()))
    }

    fn threshold(&self, fraction: f32) -> f32 {
        self.width.max(1.0) * fraction
    }

    pub fn phase(&self) -> SwipePhase {
        if self.dismissed {
            return SwipePhase::Dismissed;
        }
        if self.flying_out.is_some() {
            return SwipePhase::Finishing;
        }
        let distance = self.offset.value().abs();
        if distance == 0.0 {
            SwipePhase::Idle
        } else if distance < self.threshold(self.thresholds.ongoing_fraction) {
            SwipePhase::Starting
        } else if distance < self.threshold(self.thresholds.dismiss_fraction) {
            SwipePhase::Ongoing
        } else {
            SwipePhase::Finishing
        }
    }

    pub fn visual(&self) -> SwipeVisual {
        let offset = self.offset.value();
        let progress = if self.width > 0.0 {
            (offset.abs() / self.width).clamp(0.0, 1.0)
        } else {
            0.0
        };
        SwipeVisual {
            offset,
            direction: self.direction(),
            phase: self.phase(),
            progress,
        }
    }

    fn accepts_slope(&self, dx: f32, dy: f32) -> bool {
        let Some(horizontality) = self.min_swipe_horizontality else {
            return true;
        };
        let ratio = if dy != 0.0 {
            (dx / dy).abs()
        } else {
            f32::INFINITY
        };
        ratio >= horizontality
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        match self.allowed {
            AllowedSwipeDirections::All => offset,
            AllowedSwipeDirections::LeftToRight => offset.max(0.0),
            AllowedSwipeDirections::RightToLeft => offset.min(0.0),
            AllowedSwipeDirections::None => 0.0,
        }
    }

    pub fn pointer_down(&mut self, position: Point) {
        if self.dismissed || self.flying_out.is_some() {
            return;
        }
        self.tracking = Tracking::Pressed {
            last: position,
            accumulated_dx: 0.0,
        };
    }

    /// Feeds a pointer move. `enabled` is `false` while any item of the list is being dragged.
    pub fn pointer_move(&mut self, position: Point, enabled: bool) -> Option<SwipeEvent> {
        match self.tracking {
            Tracking::Idle => None,
            Tracking::Pressed {
                last,
                accumulated_dx,
            } => {
                if !enabled {
                    self.tracking = Tracking::Idle;
                    return None;
                }
                let dx = position.x - last.x;
                let dy = position.y - last.y;
                let accumulated_dx = accumulated_dx + dx;
                if accumulated_dx == 0.0 || accumulated_dx.abs() < self.touch_slop {
                    self.tracking = Tracking::Pressed {
                        last: position,
                        accumulated_dx,
                    };
                    return None;
                }
                let allowed = SwipeDirection::from_offset(self.offset.value() + dx)
                    .is_some_and(|dir| self.allowed.allows(dir));
                if !allowed || !self.accepts_slope(dx, dy) {
                    self.tracking = Tracking::Pressed {
                        last: position,
                        accumulated_dx: 0.0,
                    };
                    return None;
                }
                self.tracking = Tracking::Swiping { last: position };
                let before = self.offset.value();
                self.offset.snap_to(self.clamp_offset(before + dx));
                dtrace!(delta = dx, "swipe started");
                Some(SwipeEvent::Started { delta: dx })
            }
            Tracking::Swiping { last } => {
                let dx = position.x - last.x;
                self.tracking = Tracking::Swiping { last: position };
                let before = self.offset.value();
                self.offset.snap_to(self.clamp_offset(before + dx));
                Some(SwipeEvent::Updated {
                    delta: dx,
                    pressed: true,
                })
            }
        }
    }

    /// Pointer released: flies out past the dismiss threshold, springs back otherwise.
    pub fn pointer_up(&mut self, now_ms: u64) -> Option<SwipeEvent> {
        let was_swiping = self.is_swiping();
        self.tracking = Tracking::Idle;
        if !was_swiping {
            return None;
        }

        let offset = self.offset.value();
        let dismissing = offset.abs() >= self.threshold(self.thresholds.dismiss_fraction);
        match SwipeDirection::from_offset(offset).filter(|_| dismissing) {
            Some(direction) => {
                let target = match direction {
                    SwipeDirection::LeftToRight => self.width.max(1.0),
                    SwipeDirection::RightToLeft => -self.width.max(1.0),
                };
                self.flying_out = Some(direction);
                self.offset.animate_to(target, self.spring, now_ms);
                ddebug!(?direction, "swipe released past dismiss threshold");
            }
            None => self.offset.animate_to(0.0, self.spring, now_ms),
        }
        Some(SwipeEvent::Finished {
            dismissing: self.flying_out.is_some(),
        })
    }

    /// Drops an in-flight swipe and springs back (pointer cancelled, item disabled).
    pub fn cancel(&mut self, now_ms: u64) {
        self.tracking = Tracking::Idle;
        if self.flying_out.is_none() {
            self.offset.animate_to(0.0, self.spring, now_ms);
        }
    }

    /// Advances the settle or fly-out animation. Emits [`SwipeEvent::Dismissed`] once, when the
    /// fly-out completes.
    pub fn tick(&mut self, now_ms: u64) -> Option<SwipeEvent> {
        self.offset.tick(now_ms);
        let direction = self.flying_out?;
        if self.offset.is_running() || self.dismissed {
            return None;
        }
        self.dismissed = true;
        let dismiss = direction.to_dismiss_direction(self.layout_direction);
        ddebug!(?dismiss, "swipe dismissed");
        Some(SwipeEvent::Dismissed(dismiss))
    }

    /// Brings a dismissed item back to rest (e.g. the owner kept it after the dismiss callback).
    pub fn reset(&mut self) {
        self.tracking = Tracking::Idle;
        self.offset.snap_to(0.0);
        self.flying_out = None;
        self.dismissed = false;
    }
}
