use crate::{ListKey, ListLayout};

/// Lower bound for the delay between two auto-scroll steps, in milliseconds.
pub const MIN_AUTO_SCROLL_DELAY_MS: f32 = 0.05;

const AUTO_SCROLL_DELAY_NUMERATOR_MS: f32 = 1.5;

/// How much of the dragged item is hidden past one of the viewport edges.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HiddenExtent {
    pub item_size: f32,
    /// Hidden pixels, in `(0, item_size]`.
    pub hidden: f32,
    /// `true` when the hidden part is past the trailing edge.
    pub at_end: bool,
}

impl HiddenExtent {
    pub fn hidden_ratio(&self) -> f32 {
        if self.item_size <= 0.0 {
            return 0.0;
        }
        (self.hidden / self.item_size).clamp(0.0, 1.0)
    }

    /// Direction of the scroll that reveals the hidden part.
    pub fn scroll_sign(&self) -> f32 {
        if self.at_end { 1.0 } else { -1.0 }
    }
}

/// Computes how many pixels of the item extend past the trailing or leading viewport edge (capped
/// at the item size), with `offset_target` applied.
///
/// Returns `None` when the item is not laid out or is fully inside the viewport.
pub fn hidden_extent<K: ListKey>(
    layout: &ListLayout<K>,
    key: &K,
    offset_target: f32,
    reverse_layout: bool,
) -> Option<HiddenExtent> {
    let info = layout.find(key)?;
    let offset = offset_target * if reverse_layout { -1.0 } else { 1.0 };
    let item_start = info.offset + offset;
    let item_end = item_start + info.size;

    let end_hidden = (item_end - layout.viewport_end_offset).min(info.size);
    if end_hidden > 0.0 {
        return Some(HiddenExtent {
            item_size: info.size,
            hidden: end_hidden,
            at_end: true,
        });
    }

    let start_hidden = (layout.viewport_start_offset - item_start).min(info.size);
    if start_hidden > 0.0 {
        return Some(HiddenExtent {
            item_size: info.size,
            hidden: start_hidden,
            at_end: false,
        });
    }

    None
}

/// Scroll magnitude for one auto-scroll step.
///
/// Interpolates between `min_step` and `max_step` by `min(1, 2 * hidden_ratio)`, so the speed
/// saturates once half of the item is hidden. Returns `(center_hidden_ratio, step)`.
pub fn scroll_step(hidden_ratio: f32, min_step: f32, max_step: f32) -> (f32, f32) {
    let center = (2.0 * hidden_ratio.max(0.0)).min(1.0);
    (center, min_step + (max_step - min_step) * center)
}

/// Delay before the next auto-scroll step: inversely proportional to
/// `center_hidden_ratio * |consumed|`, clamped to [`MIN_AUTO_SCROLL_DELAY_MS`].
///
/// When nothing was consumed (scroll boundary reached) the minimum delay is used.
pub fn next_step_delay_ms(center_hidden_ratio: f32, consumed: f32) -> f32 {
    let product = center_hidden_ratio * consumed.abs();
    if !(product > 0.0) {
        return MIN_AUTO_SCROLL_DELAY_MS;
    }
    (AUTO_SCROLL_DELAY_NUMERATOR_MS / product).max(MIN_AUTO_SCROLL_DELAY_MS)
}

/// One auto-scroll decision: scroll by `delta`, then fold the consumed part into the drag offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoScrollStep {
    pub delta: f32,
    pub center_hidden_ratio: f32,
}

/// The reveal scroll to run after a drop that followed an auto-scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealScroll {
    pub delta: f32,
}

/// Per-drag auto-scroll state machine.
///
/// Drive it once per frame with [`AutoScroller::step`] while the item is dragged and call
/// [`AutoScroller::on_drop`] when it is released.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AutoScroller {
    min_step: f32,
    max_step: f32,
    drop_handling_pending: bool,
    next_step_at_ms: Option<f64>,
}

impl AutoScroller {
    pub fn new(min_step: f32, max_step: f32) -> Self {
        Self {
            min_step,
            max_step,
            drop_handling_pending: false,
            next_step_at_ms: None,
        }
    }

    pub fn set_steps(&mut self, min_step: f32, max_step: f32) {
        self.min_step = min_step;
        self.max_step = max_step;
    }

    /// `true` once an auto-scroll happened during the current drag.
    pub fn is_drop_handling_pending(&self) -> bool {
        self.drop_handling_pending
    }

    pub fn reset(&mut self) {
        self.drop_handling_pending = false;
        self.next_step_at_ms = None;
    }

    /// Decides whether to scroll this frame. Returns `None` when the item is fully visible, not
    /// laid out, or the previous step's delay has not elapsed yet.
    pub fn step<K: ListKey>(
        &mut self,
        layout: &ListLayout<K>,
        key: &K,
        offset_target: f32,
        reverse_layout: bool,
        now_ms: u64,
    ) -> Option<AutoScrollStep> {
        if let Some(at) = self.next_step_at_ms {
            if (now_ms as f64) < at {
                return None;
            }
        }
        let extent = hidden_extent(layout, key, offset_target, reverse_layout)?;
        let (center, step) = scroll_step(extent.hidden_ratio(), self.min_step, self.max_step);
        self.drop_handling_pending = true;
        Some(AutoScrollStep {
            delta: step * extent.scroll_sign(),
            center_hidden_ratio: center,
        })
    }

    /// Records how much of the step the viewport actually consumed and returns the correction to
    /// add to the drag offset target.
    pub fn consumed(
        &mut self,
        step: AutoScrollStep,
        consumed: f32,
        reverse_layout: bool,
        now_ms: u64,
    ) -> f32 {
        let delay = next_step_delay_ms(step.center_hidden_ratio, consumed);
        self.next_step_at_ms = Some(now_ms as f64 + delay as f64);
        dtrace!(delta = step.delta, consumed, delay, "auto-scroll step");
        consumed * if reverse_layout { -1.0 } else { 1.0 }
    }

    /// Called when the dragged item is released (its offset target is zero again).
    ///
    /// If an auto-scroll happened during the drag and the item's resting slot is still partially
    /// hidden, returns the scroll that fully reveals it, including the content padding on that
    /// edge.
    pub fn on_drop<K: ListKey>(
        &mut self,
        layout: &ListLayout<K>,
        key: &K,
        reverse_layout: bool,
    ) -> Option<RevealScroll> {
        let pending = self.drop_handling_pending;
        self.reset();
        if !pending {
            return None;
        }
        let extent = hidden_extent(layout, key, 0.0, reverse_layout)?;
        let delta = if extent.at_end {
            extent.hidden + layout.after_content_padding
        } else {
            -(extent.hidden + layout.before_content_padding)
        };
        Some(RevealScroll { delta })
    }
}
