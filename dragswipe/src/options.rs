use std::sync::Arc;

use crate::drag::DEFAULT_TOUCH_SLOP;
use crate::spring::SpringSpec;
use crate::swipe::{DEFAULT_MIN_SWIPE_HORIZONTALITY, SwipeThresholds};
use crate::{AllowedSwipeDirections, LayoutDirection};

/// A per-item yes/no hook (e.g. whether the item can be dragged).
pub type ItemPredicate<K> = Arc<dyn Fn(&K) -> bool + Send + Sync>;

/// A hook that decides which swipe directions an item accepts.
pub type AllowedSwipeDirectionsFn<K> = Arc<dyn Fn(&K) -> AllowedSwipeDirections + Send + Sync>;

/// Default auto-scroll step bounds, in pixels per step.
pub const DEFAULT_MIN_AUTO_SCROLL_STEP: f32 = 1.0;
pub const DEFAULT_MAX_AUTO_SCROLL_STEP: f32 = 2.0;

/// Configuration for a drag/drop/swipe list.
///
/// Cheap to clone: the per-item hooks are stored in `Arc`s. None of these options affect the
/// correctness of reordering or auto-scrolling, only feel and presentation.
pub struct ListOptions<K> {
    /// Padding before the first item.
    pub before_content_padding: f32,
    /// Padding after the last item.
    pub after_content_padding: f32,
    /// Space between items.
    pub item_spacing: f32,
    /// Items are laid out bottom-up (chat style); drag offsets are mirrored.
    pub reverse_layout: bool,
    /// Resolves physical swipe directions into start-to-end / end-to-start.
    pub layout_direction: LayoutDirection,
    /// Whether the user may scroll the list at all. Scrolling is always suppressed while an item
    /// is dragged or swiped.
    pub user_scroll_enabled: bool,
    pub touch_slop: f32,
    /// Minimum horizontal/vertical ratio to start a swipe; `None` disables the check for both
    /// swipes and drags.
    pub min_swipe_horizontality: Option<f32>,
    pub min_auto_scroll_step: f32,
    pub max_auto_scroll_step: f32,
    pub swipe_thresholds: SwipeThresholds,
    /// Extra items laid out beyond each viewport edge.
    pub overscan: usize,
    /// Size used for items that have not been measured yet.
    pub estimated_item_size: f32,
    /// Spring for a released item settling back into its slot.
    pub settle_spring: SpringSpec,
    /// Exponential decay rate (1/s) applied to flings.
    pub fling_friction: f32,
    /// Duration of animated scrolls (auto-scroll reveal, tail insertion).
    pub scroll_animation_ms: u64,
    pub drag_enabled: Option<ItemPredicate<K>>,
    pub allowed_swipe_directions: Option<AllowedSwipeDirectionsFn<K>>,
}

impl<K> Clone for ListOptions<K> {
    fn clone(&self) -> Self {
        Self {
            before_content_padding: self.before_content_padding,
            after_content_padding: self.after_content_padding,
            item_spacing: self.item_spacing,
            reverse_layout: self.reverse_layout,
            layout_direction: self.layout_direction,
            user_scroll_enabled: self.user_scroll_enabled,
            touch_slop: self.touch_slop,
            min_swipe_horizontality: self.min_swipe_horizontality,
            min_auto_scroll_step: self.min_auto_scroll_step,
            max_auto_scroll_step: self.max_auto_scroll_step,
            swipe_thresholds: self.swipe_thresholds,
            overscan: self.overscan,
            estimated_item_size: self.estimated_item_size,
            settle_spring: self.settle_spring,
            fling_friction: self.fling_friction,
            scroll_animation_ms: self.scroll_animation_ms,
            drag_enabled: self.drag_enabled.clone(),
            allowed_swipe_directions: self.allowed_swipe_directions.clone(),
        }
    }
}

impl<K> core::fmt::Debug for ListOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("before_content_padding", &self.before_content_padding)
            .field("after_content_padding", &self.after_content_padding)
            .field("item_spacing", &self.item_spacing)
            .field("reverse_layout", &self.reverse_layout)
            .field("layout_direction", &self.layout_direction)
            .field("user_scroll_enabled", &self.user_scroll_enabled)
            .field("touch_slop", &self.touch_slop)
            .field("min_swipe_horizontality", &self.min_swipe_horizontality)
            .field("min_auto_scroll_step", &self.min_auto_scroll_step)
            .field("max_auto_scroll_step", &self.max_auto_scroll_step)
            .field("swipe_thresholds", &self.swipe_thresholds)
            .field("overscan", &self.overscan)
            .field("estimated_item_size", &self.estimated_item_size)
            .field("settle_spring", &self.settle_spring)
            .field("fling_friction", &self.fling_friction)
            .field("scroll_animation_ms", &self.scroll_animation_ms)
            .field("drag_enabled", &self.drag_enabled.as_ref().map(|_| ".."))
            .field(
                "allowed_swipe_directions",
                &self.allowed_swipe_directions.as_ref().map(|_| ".."),
            )
            .finish()
    }
}

impl<K> Default for ListOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ListOptions<K> {
    pub fn new() -> Self {
        Self {
            before_content_padding: 0.0,
            after_content_padding: 0.0,
            item_spacing: 0.0,
            reverse_layout: false,
            layout_direction: LayoutDirection::Ltr,
            user_scroll_enabled: true,
            touch_slop: DEFAULT_TOUCH_SLOP,
            min_swipe_horizontality: Some(DEFAULT_MIN_SWIPE_HORIZONTALITY),
            min_auto_scroll_step: DEFAULT_MIN_AUTO_SCROLL_STEP,
            max_auto_scroll_step: DEFAULT_MAX_AUTO_SCROLL_STEP,
            swipe_thresholds: SwipeThresholds::default(),
            overscan: 1,
            estimated_item_size: 48.0,
            settle_spring: SpringSpec::settle(),
            fling_friction: 4.2,
            scroll_animation_ms: 250,
            drag_enabled: None,
            allowed_swipe_directions: None,
        }
    }

    pub fn with_content_padding(mut self, before: f32, after: f32) -> Self {
        self.before_content_padding = before.max(0.0);
        self.after_content_padding = after.max(0.0);
        self
    }

    pub fn with_item_spacing(mut self, item_spacing: f32) -> Self {
        self.item_spacing = item_spacing.max(0.0);
        self
    }

    pub fn with_reverse_layout(mut self, reverse_layout: bool) -> Self {
        self.reverse_layout = reverse_layout;
        self
    }

    pub fn with_layout_direction(mut self, layout_direction: LayoutDirection) -> Self {
        self.layout_direction = layout_direction;
        self
    }

    pub fn with_user_scroll_enabled(mut self, enabled: bool) -> Self {
        self.user_scroll_enabled = enabled;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop.max(0.0);
        self
    }

    /// `Some(0.0)` is treated like `None`.
    pub fn with_min_swipe_horizontality(mut self, ratio: Option<f32>) -> Self {
        self.min_swipe_horizontality = ratio.filter(|r| *r != 0.0);
        self
    }

    pub fn with_auto_scroll_steps(mut self, min_step: f32, max_step: f32) -> Self {
        debug_assert!(min_step <= max_step);
        self.min_auto_scroll_step = min_step;
        self.max_auto_scroll_step = max_step;
        self
    }

    pub fn with_swipe_thresholds(mut self, thresholds: SwipeThresholds) -> Self {
        self.swipe_thresholds = thresholds;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_estimated_item_size(mut self, size: f32) -> Self {
        self.estimated_item_size = size.max(0.0);
        self
    }

    pub fn with_settle_spring(mut self, spring: SpringSpec) -> Self {
        self.settle_spring = spring;
        self
    }

    pub fn with_fling_friction(mut self, friction: f32) -> Self {
        self.fling_friction = friction.max(f32::EPSILON);
        self
    }

    pub fn with_scroll_animation_ms(mut self, duration_ms: u64) -> Self {
        self.scroll_animation_ms = duration_ms;
        self
    }

    pub fn with_drag_enabled(mut self, f: impl Fn(&K) -> bool + Send + Sync + 'static) -> Self {
        self.drag_enabled = Some(Arc::new(f));
        self
    }

    pub fn with_allowed_swipe_directions(
        mut self,
        f: impl Fn(&K) -> AllowedSwipeDirections + Send + Sync + 'static,
    ) -> Self {
        self.allowed_swipe_directions = Some(Arc::new(f));
        self
    }

    pub fn is_drag_enabled(&self, key: &K) -> bool {
        self.drag_enabled.as_ref().is_none_or(|f| f(key))
    }

    pub fn allowed_swipe_directions_for(&self, key: &K) -> AllowedSwipeDirections {
        self.allowed_swipe_directions
            .as_ref()
            .map_or(AllowedSwipeDirections::All, |f| f(key))
    }

    pub fn layout_sign(&self) -> f32 {
        if self.reverse_layout { -1.0 } else { 1.0 }
    }
}
