use crate::item_state::ItemState;
use crate::list_state::ListState;
use crate::ordered::changed_items;
use crate::{ListKey, OrderedItem};

/// Takes the reorder notification owed by a released item, if any.
///
/// Only fires once the item is no longer dragged and at least one reorder happened during the
/// drag. The pending flag is cleared either way; the returned set holds exactly the items whose
/// `initial_index != new_index`, in provisional order, and is `None` when that set is empty.
pub fn take_drop_commit<K, T: Clone>(
    state: &mut ItemState<K>,
    ordered: &[OrderedItem<T>],
) -> Option<Vec<OrderedItem<T>>> {
    if state.is_being_dragged() || !state.pending_reorder_callback_invocation {
        return None;
    }
    state.pending_reorder_callback_invocation = false;
    let changed = changed_items(ordered);
    if changed.is_empty() {
        dtrace!("drop commit skipped: order unchanged");
        return None;
    }
    ddebug!(changed = changed.len(), "drop commit");
    Some(changed)
}

/// Synchronously releases `key` when its item leaves composition mid-drag.
///
/// If a reorder happened during the drag, the commit set is computed *before* the lease is
/// released, so an in-flight reorder is never lost. Afterwards the item's drag state is fully
/// reset and the list no longer has a dragged item.
///
/// Returns `None` when `key` did not hold the lease or nothing changed.
pub fn force_drop<K: ListKey, T: Clone>(
    list: &mut ListState<K>,
    key: &K,
    ordered: &[OrderedItem<T>],
) -> Option<Vec<OrderedItem<T>>> {
    if list.dragged_item_key() != Some(key) {
        return None;
    }
    let pending = list
        .item(key)
        .is_some_and(|state| state.pending_reorder_callback_invocation());
    let commit = if pending {
        Some(changed_items(ordered)).filter(|changed| !changed.is_empty())
    } else {
        None
    };
    list.release_and_reset(key);
    dwarn!(key = ?key, committed = commit.is_some(), "forced drop");
    commit
}
