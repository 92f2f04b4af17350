/// A value paired with its position in the external collection (`initial_index`) and its
/// provisional position during a drag (`new_index`).
///
/// Ordered items are rebuilt from the external collection whenever it changes outside of a drag,
/// so `initial_index == new_index` for every item at rest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedItem<T> {
    pub value: T,
    pub initial_index: usize,
    pub new_index: usize,
}

impl<T> OrderedItem<T> {
    pub fn new(value: T, initial_index: usize) -> Self {
        Self {
            value,
            initial_index,
            new_index: initial_index,
        }
    }

    pub fn with_new_index(mut self, new_index: usize) -> Self {
        self.new_index = new_index;
        self
    }

    /// `true` when the provisional position differs from the original one.
    pub fn has_moved(&self) -> bool {
        self.initial_index != self.new_index
    }
}

/// Wraps every value of the external collection, using its position as both indices.
pub fn ordered_items<T>(items: impl IntoIterator<Item = T>) -> Vec<OrderedItem<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, value)| OrderedItem::new(value, index))
        .collect()
}

/// Returns the items whose index changed, preserving their provisional order.
pub fn changed_items<T: Clone>(ordered: &[OrderedItem<T>]) -> Vec<OrderedItem<T>> {
    ordered.iter().filter(|it| it.has_moved()).cloned().collect()
}

/// Applies a reorder notification to a copy of the external collection: each changed value is
/// written into slot `new_index`.
///
/// Not efficient (it returns the whole list), but handy when the external store is a plain `Vec`
/// (tests, previews). Entries whose `new_index` is out of bounds are ignored.
pub fn to_reordered_items<T: Clone>(changes: &[OrderedItem<T>], items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    for change in changes {
        if let Some(slot) = out.get_mut(change.new_index) {
            *slot = change.value.clone();
        }
    }
    out
}
