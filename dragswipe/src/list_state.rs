use std::collections::{HashMap, HashSet};

use crate::ListKey;
use crate::item_state::ItemState;

/// List-level coordination state.
///
/// Holds the exclusive drag lease (at most one dragged item across the whole list), the set of
/// items currently being swiped, and the per-item state records keyed by item identity. Entries
/// are created lazily the first time a key is seen and evicted when the key disappears from the
/// external collection.
#[derive(Clone, Debug)]
pub struct ListState<K: ListKey> {
    dragged_item_key: Option<K>,
    swiped_item_keys: HashSet<K>,
    items: HashMap<K, ItemState<K>>,
}

impl<K: ListKey> Default for ListState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ListKey> ListState<K> {
    pub fn new() -> Self {
        Self {
            dragged_item_key: None,
            swiped_item_keys: HashSet::new(),
            items: HashMap::new(),
        }
    }

    /// The key holding the drag lease, if any.
    pub fn dragged_item_key(&self) -> Option<&K> {
        self.dragged_item_key.as_ref()
    }

    pub fn swiped_item_keys(&self) -> &HashSet<K> {
        &self.swiped_item_keys
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged_item_key.is_some()
    }

    pub fn is_swiping(&self) -> bool {
        !self.swiped_item_keys.is_empty()
    }

    /// Clicks, long clicks and user scrolling are suppressed while any drag or swipe is active.
    pub fn is_interacting(&self) -> bool {
        self.is_dragging() || self.is_swiping()
    }

    /// `true` when another item holds the drag lease.
    pub fn is_dragging_other_than(&self, key: &K) -> bool {
        self.dragged_item_key.as_ref().is_some_and(|k| k != key)
    }

    pub fn item(&self, key: &K) -> Option<&ItemState<K>> {
        self.items.get(key)
    }

    pub fn item_mut(&mut self, key: &K) -> Option<&mut ItemState<K>> {
        self.items.get_mut(key)
    }

    /// Returns the state record for `key`, creating it on first use.
    pub fn item_or_insert(&mut self, key: &K) -> &mut ItemState<K> {
        self.items
            .entry(key.clone())
            .or_insert_with(|| ItemState::new(key.clone()))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn for_each_item(&self, mut f: impl FnMut(&ItemState<K>)) {
        for state in self.items.values() {
            f(state);
        }
    }

    pub fn for_each_item_mut(&mut self, mut f: impl FnMut(&mut ItemState<K>)) {
        for state in self.items.values_mut() {
            f(state);
        }
    }

    /// Evicts state records whose key is no longer present. Returns the evicted keys.
    ///
    /// Leases held by evicted keys are released; callers that need to emit a pending commit for a
    /// dragged key must force-drop it before evicting.
    pub fn retain_keys(&mut self, mut keep: impl FnMut(&K) -> bool) -> Vec<K> {
        let mut evicted = Vec::new();
        self.items.retain(|k, _| {
            let retained = keep(k);
            if !retained {
                evicted.push(k.clone());
            }
            retained
        });
        if self
            .dragged_item_key
            .as_ref()
            .is_some_and(|k| evicted.contains(k))
        {
            self.dragged_item_key = None;
        }
        self.swiped_item_keys.retain(|k| !evicted.contains(k));
        if !evicted.is_empty() {
            ddebug!(evicted = evicted.len(), "ListState::retain_keys");
        }
        evicted
    }

    /// Acquires the drag lease for `key` and marks the item as dragged.
    ///
    /// Fails when another item already holds the lease or any item is being swiped.
    pub fn try_begin_drag(&mut self, key: &K) -> bool {
        if self.dragged_item_key.as_ref() == Some(key) {
            return true;
        }
        if self.dragged_item_key.is_some() || self.is_swiping() {
            dtrace!(key = ?key, "try_begin_drag: rejected");
            return false;
        }
        self.dragged_item_key = Some(key.clone());
        self.item_or_insert(key).is_being_dragged = true;
        ddebug!(key = ?key, "drag started");
        true
    }

    /// Accumulates a pointer delta into the dragged item's offset target.
    ///
    /// Ignored unless `key` holds the lease.
    pub fn drag_by(&mut self, key: &K, delta: f32) -> bool {
        if self.dragged_item_key.as_ref() != Some(key) {
            return false;
        }
        let Some(state) = self.items.get_mut(key) else {
            return false;
        };
        state.add_offset(delta);
        true
    }

    /// Records that a reorder moved the dragged item: queues its offset correction and flags the
    /// drop handler to notify the owner. Ignored unless `key` holds the lease.
    pub fn record_reorder(&mut self, key: &K, offset_correction: f32) -> bool {
        if self.dragged_item_key.as_ref() != Some(key) {
            return false;
        }
        let Some(state) = self.items.get_mut(key) else {
            return false;
        };
        state.queue_offset_correction(offset_correction);
        state.mark_reordered();
        true
    }

    /// Releases the drag lease held by `key`: the item is no longer dragged and its offset target
    /// returns to zero (the settle animation takes it from there).
    ///
    /// The pending reorder notification flag is left untouched for the drop/commit engine.
    pub fn end_drag(&mut self, key: &K) -> bool {
        if self.dragged_item_key.as_ref() != Some(key) {
            return false;
        }
        self.dragged_item_key = None;
        if let Some(state) = self.items.get_mut(key) {
            state.is_being_dragged = false;
            state.offset_target = 0.0;
            state.pending_reorder_offset_correction = 0.0;
        }
        ddebug!(key = ?key, "drag finished");
        true
    }

    /// Releases the lease and fully resets the item's drag state.
    pub(crate) fn release_and_reset(&mut self, key: &K) {
        if self.dragged_item_key.as_ref() == Some(key) {
            self.dragged_item_key = None;
        }
        if let Some(state) = self.items.get_mut(key) {
            state.reset_drag();
        }
    }

    /// Marks `key` as being swiped. Fails while any item is being dragged.
    pub fn try_begin_swipe(&mut self, key: &K) -> bool {
        if self.dragged_item_key.is_some() {
            return false;
        }
        self.swiped_item_keys.insert(key.clone());
        true
    }

    pub fn end_swipe(&mut self, key: &K) -> bool {
        self.swiped_item_keys.remove(key)
    }
}
