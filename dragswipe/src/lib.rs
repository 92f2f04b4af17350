//! A headless drag-to-reorder and swipe-to-dismiss engine for virtualized lists.
//!
//! For a ready-made viewport and a list controller that drives these pieces frame by frame, see
//! the `dragswipe-adapter` crate.
//!
//! This crate is UI-agnostic. It owns the hard parts of a reorderable, swipeable list:
//! - a single-owner drag lease over per-item drag state
//! - the reorder engine, which re-derives the provisional order from on-screen geometry
//! - edge auto-scrolling while dragging, folded back into the drag offset
//! - drag and swipe gesture detection, settle springs, and the drop commit
//!
//! A UI layer is expected to provide pointer positions, the live layout geometry of the laid-out
//! items ([`ListLayout`]), and a [`ScrollController`] for its viewport.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod autoscroll;
mod commit;
mod drag;
mod item_state;
mod key;
mod list_state;
mod options;
mod ordered;
mod reorder;
mod scroll;
mod spring;
mod style;
mod swipe;
mod types;


pub use autoscroll::{
    AutoScrollStep, AutoScroller, HiddenExtent, MIN_AUTO_SCROLL_DELAY_MS, RevealScroll,
    hidden_extent, next_step_delay_ms, scroll_step,
};
pub use commit::{force_drop, take_drop_commit};
pub use drag::{DEFAULT_TOUCH_SLOP, DragEvent, DragGesture, DragPhase};
pub use item_state::ItemState;
pub use key::ListKey;
pub use list_state::ListState;
pub use options::{
    AllowedSwipeDirectionsFn, DEFAULT_MAX_AUTO_SCROLL_STEP, DEFAULT_MIN_AUTO_SCROLL_STEP,
    ItemPredicate, ListOptions,
};
pub use ordered::{OrderedItem, changed_items, ordered_items, to_reordered_items};
pub use reorder::{Reorder, ReorderEngine, closest_item, compute_reorder, scroll_pin_for};
pub use scroll::ScrollController;
pub use spring::{
    AnimatedValue, DAMPING_RATIO_LOW_BOUNCY, DAMPING_RATIO_MEDIUM_BOUNCY, DAMPING_RATIO_NO_BOUNCY,
    STIFFNESS_MEDIUM, STIFFNESS_MEDIUM_LOW, SpringAnimation, SpringSpec,
};
pub use style::{
    DEFAULT_SHADOW_ELEVATION_WHEN_DRAGGED, Rgba, Shape, SwipeColors, SwipeIcon, SwipeIcons,
    SwipeShapes, SwipeStyle,
};
pub use swipe::{
    DEFAULT_MIN_SWIPE_HORIZONTALITY, SwipeEvent, SwipeGesture, SwipePhase, SwipeThresholds,
    SwipeVisual,
};
pub use types::{
    AllowedSwipeDirections, DismissSwipeDirection, ItemLayout, LayoutDirection, ListLayout, Point,
    ScrollPin, SwipeDirection,
};
