/// Placement of one laid-out item along the list's main axis.
///
/// `offset` is measured from the start of the list content (after the leading content padding),
/// relative to the current scroll position, exactly like the viewport's own coordinate system:
/// `viewport_start_offset <= offset < viewport_end_offset` for a fully visible item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLayout<K> {
    pub key: K,
    /// Position of the item in the currently rendered order.
    pub index: usize,
    pub offset: f32,
    /// Size in the main axis (excludes spacing).
    pub size: f32,
}

impl<K> ItemLayout<K> {
    pub fn end(&self) -> f32 {
        self.offset + self.size
    }

    pub fn center(&self) -> f32 {
        self.offset + self.size / 2.0
    }
}

/// A snapshot of the live layout geometry of a list: the items that are currently laid out plus
/// the viewport bounds.
///
/// Produced by the adapter once per frame (or whenever scroll/measurements change) and consumed
/// by the reorder and auto-scroll engines.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListLayout<K> {
    /// Laid-out items, in ascending `index` order.
    pub visible_items: Vec<ItemLayout<K>>,
    /// Start of the viewport in item coordinates (`-before_content_padding` when unscrolled).
    pub viewport_start_offset: f32,
    /// End of the viewport in item coordinates.
    pub viewport_end_offset: f32,
    pub before_content_padding: f32,
    pub after_content_padding: f32,
    /// Space between adjacent items.
    pub item_spacing: f32,
    pub total_items_count: usize,
}

impl<K: PartialEq> ListLayout<K> {
    pub fn find(&self, key: &K) -> Option<&ItemLayout<K>> {
        self.visible_items.iter().find(|it| it.key == *key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}

impl<K> ListLayout<K> {
    pub fn empty() -> Self {
        Self {
            visible_items: Vec::new(),
            viewport_start_offset: 0.0,
            viewport_end_offset: 0.0,
            before_content_padding: 0.0,
            after_content_padding: 0.0,
            item_spacing: 0.0,
            total_items_count: 0,
        }
    }

    /// Height of the visible viewport.
    pub fn viewport_size(&self) -> f32 {
        (self.viewport_end_offset - self.viewport_start_offset).max(0.0)
    }

    /// The lowest-indexed item that still shows at least one pixel inside the viewport.
    ///
    /// Items that are laid out but already fully scrolled past the leading edge are skipped.
    pub fn first_visible_item(&self) -> Option<&ItemLayout<K>> {
        let top = self.viewport_start_offset;
        self.visible_items
            .iter()
            .filter(|it| (top - it.offset).min(it.size) < it.size)
            .min_by_key(|it| it.index)
    }
}

/// Physical direction of a horizontal swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeDirection {
    LeftToRight,
    RightToLeft,
}

impl SwipeDirection {
    pub fn from_offset(offset: f32) -> Option<Self> {
        if offset > 0.0 {
            Some(Self::LeftToRight)
        } else if offset < 0.0 {
            Some(Self::RightToLeft)
        } else {
            None
        }
    }

    /// Resolves the physical direction into a layout-direction-aware one.
    pub fn to_dismiss_direction(self, layout_direction: LayoutDirection) -> DismissSwipeDirection {
        match (self, layout_direction) {
            (Self::LeftToRight, LayoutDirection::Ltr) | (Self::RightToLeft, LayoutDirection::Rtl) => {
                DismissSwipeDirection::StartToEnd
            }
            (Self::RightToLeft, LayoutDirection::Ltr) | (Self::LeftToRight, LayoutDirection::Rtl) => {
                DismissSwipeDirection::EndToStart
            }
        }
    }
}

/// Logical direction reported when an item is dismissed by swiping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DismissSwipeDirection {
    StartToEnd,
    EndToStart,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Which swipe directions an item accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllowedSwipeDirections {
    #[default]
    All,
    LeftToRight,
    RightToLeft,
    None,
}

impl AllowedSwipeDirections {
    pub fn allows(self, direction: SwipeDirection) -> bool {
        match self {
            Self::All => true,
            Self::LeftToRight => direction == SwipeDirection::LeftToRight,
            Self::RightToLeft => direction == SwipeDirection::RightToLeft,
            Self::None => false,
        }
    }
}

/// A pointer position in list-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A request to pin the scroll position so that the item at `index` sits at `scroll_offset`
/// pixels past the viewport start.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPin {
    pub index: usize,
    pub scroll_offset: f32,
}
