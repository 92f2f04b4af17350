use crate::{ItemLayout, ListKey, ListLayout, OrderedItem, ScrollPin};

/// The outcome of a reorder step: the provisional order and the offset correction that keeps the
/// dragged item visually stationary once it is relocated.
#[derive(Clone, Debug, PartialEq)]
pub struct Reorder<T> {
    /// The full ordered collection, sorted by `new_index`.
    pub items: Vec<OrderedItem<T>>,
    /// Signed correction to add to the dragged item's offset target after relocation.
    pub offset_correction: f32,
    /// Position of the dragged item before this step.
    pub from_index: usize,
    /// Position of the dragged item after this step.
    pub to_index: usize,
}

fn layout_sign(reverse_layout: bool) -> f32 {
    if reverse_layout { -1.0 } else { 1.0 }
}

/// Finds the laid-out item whose center is numerically closest to `center`.
///
/// Ties go to the first item in layout order.
pub fn closest_item<K>(layout: &ListLayout<K>, center: f32) -> Option<&ItemLayout<K>> {
    layout
        .visible_items
        .iter()
        .min_by(|a, b| {
            let da = (a.center() - center).abs();
            let db = (b.center() - center).abs();
            da.total_cmp(&db)
        })
}

/// Computes the provisional reordering implied by the dragged item's current offset.
///
/// Returns `None` when the dragged item is not laid out, when it is still closest to its own
/// slot, or when the geometry needed to shift the in-between items is missing (the frame is
/// skipped rather than applied partially).
pub fn compute_reorder<T: Clone, K: ListKey>(
    ordered: &[OrderedItem<T>],
    dragged_key: &K,
    offset_target: f32,
    layout: &ListLayout<K>,
    reverse_layout: bool,
    key_of: impl Fn(&T) -> K,
) -> Option<Reorder<T>> {
    let offset = offset_target * layout_sign(reverse_layout);

    let Some(dragged_info) = layout.find(dragged_key) else {
        dtrace!(key = ?dragged_key, "compute_reorder: dragged item not laid out");
        return None;
    };
    let dragged_center = dragged_info.center() + offset;
    let closest = closest_item(layout, dragged_center)?;
    if closest.key == dragged_info.key {
        return None;
    }

    let dragged_position = ordered
        .iter()
        .position(|it| key_of(&it.value) == *dragged_key)?;

    let from = dragged_info.index;
    let to = closest.index;
    let moving_down = to > from;
    let shift: isize = if moving_down { -1 } else { 1 };
    let shifted = if moving_down { from + 1..to + 1 } else { to..from };

    let mut items = ordered.to_vec();
    let mut abs_offset_correction = 0.0f32;
    for i in shifted {
        let slot = items.get_mut(i)?;
        let key = key_of(&slot.value);
        let Some(info) = layout.find(&key) else {
            dwarn!(key = ?key, index = i, "compute_reorder: shifted item not laid out");
            return None;
        };
        abs_offset_correction += info.size + layout.item_spacing;
        slot.new_index = info.index.checked_add_signed(shift)?;
    }
    items[dragged_position].new_index = to;
    items.sort_by_key(|it| it.new_index);

    let jump_sign = if from > to { 1.0 } else { -1.0 };
    let offset_correction = abs_offset_correction * jump_sign * layout_sign(reverse_layout);

    Some(Reorder {
        items,
        offset_correction,
        from_index: from,
        to_index: to,
    })
}

/// Decides whether the scroll position must be pinned after a reorder.
///
/// When the first visible item is the dragged item's old or new slot, the viewport would try to
/// keep that slot in view and fight the drag; pinning it to its current offset prevents runaway
/// scroll jitter.
pub fn scroll_pin_for<K>(layout: &ListLayout<K>, from_index: usize, to_index: usize) -> Option<ScrollPin> {
    let first = layout.first_visible_item()?;
    (first.index == to_index || first.index == from_index).then(|| ScrollPin {
        index: first.index,
        scroll_offset: -first.offset,
    })
}

/// Stateful front-end to [`compute_reorder`] for one drag.
///
/// It only recomputes when the scroll-adjusted offset or the geometry actually changed, and it
/// never emits the same reordering twice in a row.
#[derive(Clone, Debug)]
pub struct ReorderEngine<K> {
    last_input: Option<(f32, ListLayout<K>)>,
    last_emitted: Option<(Vec<(K, usize)>, f32)>,
}

impl<K> Default for ReorderEngine<K> {
    fn default() -> Self {
        Self {
            last_input: None,
            last_emitted: None,
        }
    }
}

impl<K: ListKey> ReorderEngine<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything observed so far (call when a drag starts or ends).
    pub fn reset(&mut self) {
        self.last_input = None;
        self.last_emitted = None;
    }

    pub fn observe<T: Clone>(
        &mut self,
        ordered: &[OrderedItem<T>],
        dragged_key: &K,
        offset_target: f32,
        layout: &ListLayout<K>,
        reverse_layout: bool,
        key_of: impl Fn(&T) -> K,
    ) -> Option<Reorder<T>> {
        if let Some((last_offset, last_layout)) = &self.last_input {
            if *last_offset == offset_target && last_layout == layout {
                return None;
            }
        }
        self.last_input = Some((offset_target, layout.clone()));

        let reorder = compute_reorder(
            ordered,
            dragged_key,
            offset_target,
            layout,
            reverse_layout,
            &key_of,
        )?;

        let signature: Vec<(K, usize)> = reorder
            .items
            .iter()
            .map(|it| (key_of(&it.value), it.new_index))
            .collect();
        if let Some((last_signature, last_correction)) = &self.last_emitted {
            if *last_signature == signature && *last_correction == reorder.offset_correction {
                return None;
            }
        }
        self.last_emitted = Some((signature, reorder.offset_correction));

        ddebug!(
            key = ?dragged_key,
            from = reorder.from_index,
            to = reorder.to_index,
            correction = reorder.offset_correction,
            "reorder"
        );
        Some(reorder)
    }
}
