use std::collections::HashMap;

use dragswipe::{ItemLayout, ListKey, ListLayout, ScrollController};

use crate::fenwick::Fenwick;
use crate::{Decay, Easing, Tween};

#[derive(Clone, Copy, Debug, PartialEq)]
enum ScrollAnimation {
    Tween(Tween),
    Fling(Decay),
}

/// A keyed, variable-size scroll viewport along one axis.
///
/// Holds the rendered order of the item keys, their measured sizes, and the scroll offset, and
/// produces the [`ListLayout`] snapshot the engines consume. Item offsets follow the usual lazy
/// list convention: relative to the scroll position, with `0` meaning "right after the leading
/// content padding" for an unscrolled list.
///
/// Item extents live in a Fenwick tree, so layout snapshots and offset lookups cost
/// `O(log n + laid-out items)`. Replacing the order rebuilds it in `O(n)`.
///
/// This type does not hold any UI objects. Adapters drive it by calling `set_viewport_size`,
/// `measure` and `tick(now_ms)`; animated scrolls and flings only advance inside `tick`.
#[derive(Clone, Debug)]
pub struct Viewport<K> {
    keys: Vec<K>,
    index_of: HashMap<K, usize>,
    sizes: HashMap<K, f32>,
    extents: Fenwick,
    estimated_item_size: f32,
    before_content_padding: f32,
    after_content_padding: f32,
    item_spacing: f32,
    overscan: usize,
    viewport_size: f32,
    scroll_offset: f32,
    scroll_animation_ms: u64,
    animation: Option<ScrollAnimation>,
}

impl<K: ListKey> Viewport<K> {
    pub fn new(estimated_item_size: f32) -> Self {
        Self {
            keys: Vec::new(),
            index_of: HashMap::new(),
            sizes: HashMap::new(),
            extents: Fenwick::default(),
            estimated_item_size: estimated_item_size.max(0.0),
            before_content_padding: 0.0,
            after_content_padding: 0.0,
            item_spacing: 0.0,
            overscan: 1,
            viewport_size: 0.0,
            scroll_offset: 0.0,
            scroll_animation_ms: 250,
            animation: None,
        }
    }

    /// Builds a viewport configured from the list options.
    pub fn from_options(options: &dragswipe::ListOptions<K>) -> Self {
        let mut v = Self::new(options.estimated_item_size);
        v.before_content_padding = options.before_content_padding;
        v.after_content_padding = options.after_content_padding;
        v.item_spacing = options.item_spacing;
        v.overscan = options.overscan;
        v.scroll_animation_ms = options.scroll_animation_ms;
        v
    }

    pub fn set_content_padding(&mut self, before: f32, after: f32) {
        self.before_content_padding = before.max(0.0);
        self.after_content_padding = after.max(0.0);
        self.clamp_scroll();
    }

    pub fn set_item_spacing(&mut self, item_spacing: f32) {
        self.item_spacing = item_spacing.max(0.0);
        self.rebuild_extents();
        self.clamp_scroll();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
    }

    pub fn set_viewport_size(&mut self, viewport_size: f32) {
        self.viewport_size = viewport_size.max(0.0);
        self.clamp_scroll();
    }

    pub fn viewport_size(&self) -> f32 {
        self.viewport_size
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index_of.get(key).copied()
    }

    /// Replaces the rendered order. Measurements of keys that disappeared are dropped.
    pub fn set_order(&mut self, keys: Vec<K>) {
        self.index_of.clear();
        for (i, k) in keys.iter().enumerate() {
            let previous = self.index_of.insert(k.clone(), i);
            debug_assert!(previous.is_none(), "duplicate list key {k:?}");
        }
        self.keys = keys;
        let index_of = &self.index_of;
        self.sizes.retain(|k, _| index_of.contains_key(k));
        self.rebuild_extents();
        self.clamp_scroll();
    }

    fn rebuild_extents(&mut self) {
        let sizes = self.keys.iter().map(|k| self.size_of(k));
        let extents = Fenwick::from_sizes(sizes, self.item_spacing);
        self.extents = extents;
    }

    /// Records the measured main-axis size of `key`. Returns `true` if it changed.
    pub fn measure(&mut self, key: &K, size: f32) -> bool {
        let size = size.max(0.0);
        let Some(index) = self.index_of(key) else {
            return false;
        };
        let previous = self.size_of(key);
        let changed = self.sizes.insert(key.clone(), size) != Some(size);
        if changed {
            self.extents.add(index, f64::from(size) - f64::from(previous));
            self.clamp_scroll();
        }
        changed
    }

    pub fn size_of(&self, key: &K) -> f32 {
        self.sizes
            .get(key)
            .copied()
            .unwrap_or(self.estimated_item_size)
    }

    /// Position of the item at `index` in content coordinates (leading padding included).
    fn content_start(&self, index: usize) -> f32 {
        self.before_content_padding + self.extents.prefix_sum(index) as f32
    }

    pub fn total_size(&self) -> f32 {
        self.before_content_padding + self.extents.total() as f32 + self.after_content_padding
    }

    pub fn max_scroll_offset(&self) -> f32 {
        (self.total_size() - self.viewport_size).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_scroll_offset())
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
    }

    /// Scroll offset that puts the item at `index` `scroll_offset` pixels past the viewport start.
    fn item_scroll_offset(&self, index: usize, scroll_offset: f32) -> f32 {
        let index = index.min(self.keys.len().saturating_sub(1));
        self.content_start(index) - self.before_content_padding + scroll_offset
    }

    /// Snapshot of the laid-out items (visible plus `overscan` on each side).
    pub fn layout(&self) -> ListLayout<K> {
        let mut layout = ListLayout {
            visible_items: Vec::new(),
            viewport_start_offset: -self.before_content_padding,
            viewport_end_offset: self.viewport_size - self.before_content_padding,
            before_content_padding: self.before_content_padding,
            after_content_padding: self.after_content_padding,
            item_spacing: self.item_spacing,
            total_items_count: self.keys.len(),
        };
        self.for_each_laid_out_item(|item| layout.visible_items.push(item));
        layout
    }

    /// Emits the laid-out items in index order without allocating a layout.
    pub fn for_each_laid_out_item(&self, mut f: impl FnMut(ItemLayout<K>)) {
        let n = self.keys.len();
        if n == 0 {
            return;
        }
        // Window bounds relative to the first item's start.
        let start = f64::from(self.scroll_offset - self.before_content_padding);
        let end = start + f64::from(self.viewport_size);
        if end <= 0.0 {
            return;
        }
        let spacing = f64::from(self.item_spacing);

        // Items before `count_below(start)` end (gap included) before the window.
        let mut first = self.extents.count_below(start);
        let mut pos = self.extents.prefix_sum(first);
        while first < n {
            let size = f64::from(self.size_of(&self.keys[first]));
            if pos + size > start || (size == 0.0 && pos >= start) {
                break;
            }
            pos += size + spacing;
            first += 1;
        }
        let last = self.extents.count_below(end).min(n - 1);
        if first > last {
            return;
        }

        let first = first.saturating_sub(self.overscan);
        let last = (last + self.overscan).min(n - 1);
        let scroll = f64::from(self.scroll_offset);
        let mut pos = self.extents.prefix_sum(first);
        for (i, key) in self.keys[first..=last].iter().enumerate() {
            let size = self.size_of(key);
            f(ItemLayout {
                key: key.clone(),
                index: first + i,
                offset: (pos - scroll) as f32,
                size,
            });
            pos += f64::from(size) + spacing;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    /// Sets the scroll offset immediately. Returns the applied (clamped) offset.
    pub fn scroll_to_offset(&mut self, offset: f32) -> f32 {
        self.cancel_animation();
        self.scroll_offset = self.clamp_scroll_offset(offset);
        self.scroll_offset
    }

    /// Starts a tween to an offset. Returns the clamped target offset.
    pub fn start_tween_to_offset(&mut self, offset: f32, now_ms: u64) -> f32 {
        let to = self.clamp_scroll_offset(offset);
        let tween = match self.animation {
            Some(ScrollAnimation::Tween(mut tween)) => {
                tween.retarget(now_ms, to, self.scroll_animation_ms);
                tween
            }
            _ => Tween::new(
                self.scroll_offset,
                to,
                now_ms,
                self.scroll_animation_ms,
                Easing::EaseInOutCubic,
            ),
        };
        self.animation = Some(ScrollAnimation::Tween(tween));
        to
    }

    /// Starts a fling with `velocity` px/s (positive reveals content further down).
    pub fn fling(&mut self, velocity: f32, friction: f32, now_ms: u64) {
        if velocity == 0.0 {
            return;
        }
        ddebug!(velocity, "fling");
        self.animation = Some(ScrollAnimation::Fling(Decay::new(
            self.scroll_offset,
            velocity,
            now_ms,
            friction,
        )));
    }

    /// Advances animated scrolls and flings. Returns `true` if the scroll offset moved.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let before = self.scroll_offset;
        let (target, done) = match animation {
            ScrollAnimation::Tween(tween) => (tween.sample(now_ms), tween.is_done(now_ms)),
            ScrollAnimation::Fling(decay) => (decay.sample(now_ms), decay.is_done(now_ms)),
        };
        self.scroll_offset = self.clamp_scroll_offset(target);
        // A fling stops at the boundary it runs into.
        let hit_boundary = self.scroll_offset != target;
        if done || matches!(animation, ScrollAnimation::Fling(_)) && hit_boundary {
            self.animation = None;
        }
        self.scroll_offset != before
    }
}

impl<K: ListKey> ScrollController for Viewport<K> {
    fn scroll_by(&mut self, delta: f32) -> f32 {
        self.cancel_animation();
        let before = self.scroll_offset;
        self.scroll_offset = self.clamp_scroll_offset(before + delta);
        self.scroll_offset - before
    }

    fn animate_scroll_by(&mut self, delta: f32, now_ms: u64) {
        let from = match self.animation {
            Some(ScrollAnimation::Tween(tween)) => tween.to,
            _ => self.scroll_offset,
        };
        self.start_tween_to_offset(from + delta, now_ms);
    }

    fn request_scroll_to_item(&mut self, index: usize, scroll_offset: f32) {
        if self.keys.is_empty() {
            return;
        }
        let offset = self.item_scroll_offset(index, scroll_offset);
        self.scroll_to_offset(offset);
    }

    fn animate_scroll_to_item(&mut self, index: usize, now_ms: u64) {
        if self.keys.is_empty() {
            return;
        }
        let offset = self.item_scroll_offset(index, 0.0);
        self.start_tween_to_offset(offset, now_ms);
    }
}
