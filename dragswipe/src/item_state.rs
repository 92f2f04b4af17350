use crate::spring::{AnimatedValue, SpringSpec};

/// Drag state of a single list item.
///
/// `is_being_dragged` can only change through [`crate::ListState`], which holds the list-wide
/// drag lease; everything else here is owned by the item.
#[derive(Clone, Debug)]
pub struct ItemState<K> {
    item_key: K,
    pub(crate) is_being_dragged: bool,
    pub(crate) offset_target: f32,
    pub(crate) pending_reorder_offset_correction: f32,
    pub(crate) pending_reorder_callback_invocation: bool,
    animated_offset: AnimatedValue,
}

impl<K> ItemState<K> {
    pub fn new(item_key: K) -> Self {
        Self {
            item_key,
            is_being_dragged: false,
            offset_target: 0.0,
            pending_reorder_offset_correction: 0.0,
            pending_reorder_callback_invocation: false,
            animated_offset: AnimatedValue::new(0.0),
        }
    }

    pub fn item_key(&self) -> &K {
        &self.item_key
    }

    pub fn is_being_dragged(&self) -> bool {
        self.is_being_dragged
    }

    /// The absolute pixel offset the item should currently be displayed at (zero when settled).
    pub fn offset_target(&self) -> f32 {
        self.offset_target
    }

    /// Offset adjustment queued until the item is actually relocated by a reorder.
    pub fn pending_reorder_offset_correction(&self) -> f32 {
        self.pending_reorder_offset_correction
    }

    /// `true` once a reorder happened during the current drag and the drop handler still owes a
    /// notification.
    pub fn pending_reorder_callback_invocation(&self) -> bool {
        self.pending_reorder_callback_invocation
    }

    /// The offset to render: the raw target while dragged (no animation lag under the pointer),
    /// the animated value otherwise.
    pub fn rendered_offset(&self) -> f32 {
        if self.is_being_dragged {
            self.offset_target
        } else {
            self.animated_offset.value()
        }
    }

    /// `true` while the item is dragged or still settling back into its slot.
    pub fn is_displaced(&self) -> bool {
        self.is_being_dragged || self.animated_offset.value() != 0.0
    }

    /// Drawing order: the dragged item on top, settling items above resting ones.
    pub fn z_index(&self) -> u8 {
        if self.is_being_dragged {
            2
        } else if self.animated_offset.value() != 0.0 {
            1
        } else {
            0
        }
    }

    pub(crate) fn add_offset(&mut self, delta: f32) {
        self.offset_target += delta;
    }

    pub(crate) fn queue_offset_correction(&mut self, correction: f32) {
        self.pending_reorder_offset_correction += correction;
    }

    pub(crate) fn mark_reordered(&mut self) {
        self.pending_reorder_callback_invocation = true;
    }

    /// Applies the queued offset correction once the item sits at its new position.
    ///
    /// `position` is where the item is rendered now, `new_index` where the last reorder placed
    /// it; the correction is only meaningful when both agree. Returns `true` when a correction was
    /// consumed.
    pub fn apply_pending_offset_correction(&mut self, position: usize, new_index: usize) -> bool {
        if self.pending_reorder_offset_correction == 0.0 || position != new_index {
            return false;
        }
        if self.is_being_dragged {
            self.offset_target += self.pending_reorder_offset_correction;
        }
        self.pending_reorder_offset_correction = 0.0;
        true
    }

    pub(crate) fn reset_drag(&mut self) {
        self.is_being_dragged = false;
        self.offset_target = 0.0;
        self.pending_reorder_offset_correction = 0.0;
        self.pending_reorder_callback_invocation = false;
    }

    /// Moves the rendered offset towards `offset_target`: snapping while dragged, springing back
    /// otherwise. Returns the rendered offset.
    pub fn tick_offset(&mut self, spec: SpringSpec, now_ms: u64) -> f32 {
        if self.is_being_dragged {
            self.animated_offset.snap_to(self.offset_target);
        } else if self.animated_offset.target() != self.offset_target {
            self.animated_offset
                .animate_to(self.offset_target, spec, now_ms);
        }
        self.animated_offset.tick(now_ms);
        self.rendered_offset()
    }
}
