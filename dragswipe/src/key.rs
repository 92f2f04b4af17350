use core::fmt::Debug;
use core::hash::Hash;

/// Identity of a list item.
///
/// Keys must be stable and unique per logical item (not per list position): per-item state,
/// measured sizes and the drag lease all follow the key across reorders.
pub trait ListKey: Hash + Eq + Clone + Debug {}
impl<K: Hash + Eq + Clone + Debug> ListKey for K {}
