//! Adapter utilities for the `dragswipe` crate.
//!
//! The `dragswipe` crate is UI-agnostic and focuses on the core gesture math and state. This
//! crate provides framework-neutral pieces a UI layer typically needs on top of it:
//!
//! - A keyed, variable-size [`Viewport`] that produces the layout snapshots and implements
//!   [`dragswipe::ScrollController`]
//! - Tween and decay helpers for animated scrolls and flings
//! - [`RevealOnAdd`], an entrance animation for newly added items
//! - [`DragDropSwipeList`], which wires all of it into a single frame-driven list
//!
//! No rendering toolkit bindings live here.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod fenwick;
mod list;
mod reveal;
mod tween;
mod viewport;

#[cfg(test)]
mod tests;

pub use list::{
    DragDropSwipeList, ItemCallback, ItemDeltaCallback, ListCallbacks, RenderedItem,
    ReorderCallback, SwipeDismissCallback, SwipeUpdateCallback,
};
pub use reveal::{RevealOnAdd, RevealVisual};
pub use tween::{Decay, Easing, Tween};
pub use viewport::Viewport;
