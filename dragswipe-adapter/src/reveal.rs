use std::collections::{HashMap, HashSet};

use dragswipe::{
    AnimatedValue, DAMPING_RATIO_LOW_BOUNCY, DAMPING_RATIO_NO_BOUNCY, ListKey, ListLayout,
    STIFFNESS_MEDIUM, ScrollController, SpringSpec,
};

/// Transformations to apply to an item while it is being revealed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealVisual {
    pub alpha: f32,
    /// Vertical scale; also applies to the item's laid-out size.
    pub scale_y: f32,
    /// Horizontal slide-in offset.
    pub offset_x: f32,
}

impl RevealVisual {
    pub const REVEALED: Self = Self {
        alpha: 1.0,
        scale_y: 1.0,
        offset_x: 0.0,
    };

    pub const HIDDEN: Self = Self {
        alpha: 0.0,
        scale_y: 0.0,
        offset_x: 0.0,
    };
}

impl Default for RevealVisual {
    fn default() -> Self {
        Self::REVEALED
    }
}

#[derive(Clone, Copy, Debug)]
struct Reveal {
    alpha: AnimatedValue,
    scale: AnimatedValue,
    slide: AnimatedValue,
    started: bool,
}

impl Reveal {
    fn new() -> Self {
        Self {
            alpha: AnimatedValue::new(0.0),
            scale: AnimatedValue::new(0.0),
            slide: AnimatedValue::new(0.0),
            started: false,
        }
    }

    fn start(&mut self, list_width: f32, now_ms: u64) {
        let fade = SpringSpec::new(DAMPING_RATIO_NO_BOUNCY, STIFFNESS_MEDIUM);
        let slide = SpringSpec::new(DAMPING_RATIO_LOW_BOUNCY, STIFFNESS_MEDIUM).with_threshold(0.5);
        self.alpha.animate_to(1.0, fade, now_ms);
        self.scale.animate_to(1.0, fade, now_ms);
        self.slide.snap_to(-list_width);
        self.slide.animate_to(0.0, slide, now_ms);
        self.started = true;
    }

    fn is_done(&self) -> bool {
        self.started
            && !self.alpha.is_running()
            && !self.scale.is_running()
            && !self.slide.is_running()
    }

    fn visual(&self) -> RevealVisual {
        RevealVisual {
            alpha: self.alpha.value(),
            scale_y: self.scale.value(),
            offset_x: self.slide.value(),
        }
    }
}

/// Entrance animation for newly added items, plus auto-scroll to a tail insertion.
///
/// Keys present at construction are considered revealed. Any later key goes through a
/// fade/expand/slide-in animation once the list width is known; it joins the revealed set when
/// the animation completes or when it leaves the laid-out window early, and never leaves it.
#[derive(Clone, Debug)]
pub struct RevealOnAdd<K> {
    revealed: HashSet<K>,
    remembered_keys: Vec<K>,
    reveals: HashMap<K, Reveal>,
    list_width: f32,
}

impl<K: ListKey> RevealOnAdd<K> {
    pub fn new(initial_keys: &[K]) -> Self {
        Self {
            revealed: initial_keys.iter().cloned().collect(),
            remembered_keys: initial_keys.to_vec(),
            reveals: HashMap::new(),
            list_width: 0.0,
        }
    }

    pub fn set_list_width(&mut self, list_width: f32) {
        self.list_width = list_width.max(0.0);
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    pub fn is_animating(&self) -> bool {
        !self.reveals.is_empty()
    }

    pub fn visual(&self, key: &K) -> RevealVisual {
        if self.revealed.contains(key) {
            return RevealVisual::REVEALED;
        }
        self.reveals
            .get(key)
            .map_or(RevealVisual::HIDDEN, Reveal::visual)
    }

    /// Call when the item collection changes.
    ///
    /// When exactly one key was appended at the end and it is not laid out yet, starts an animated
    /// scroll to it.
    pub fn on_items_changed(
        &mut self,
        keys: &[K],
        layout: &ListLayout<K>,
        scroll: &mut impl ScrollController,
        now_ms: u64,
    ) {
        if keys.len() != layout.total_items_count || keys == self.remembered_keys.as_slice() {
            return;
        }
        let appended_one = keys.len() == self.remembered_keys.len() + 1;
        if let Some(last) = keys.last().filter(|_| appended_one) {
            if !self.remembered_keys.contains(last) && !layout.contains(last) {
                ddebug!(key = ?last, "scrolling to tail insertion");
                scroll.animate_scroll_to_item(keys.len() - 1, now_ms);
            }
        }
        self.remembered_keys = keys.to_vec();
    }

    /// Advances the reveal animations of the laid-out items.
    ///
    /// `tail` is the index and key of the last item; while it is expanding, the viewport is kept
    /// scrolled to it.
    pub fn tick(
        &mut self,
        tail: Option<(usize, &K)>,
        layout: &ListLayout<K>,
        scroll: &mut impl ScrollController,
        now_ms: u64,
    ) {
        // Early disposal: anything that left the laid-out window counts as revealed.
        let revealed = &mut self.revealed;
        self.reveals.retain(|k, _| {
            let keep = layout.contains(k);
            if !keep {
                revealed.insert(k.clone());
            }
            keep
        });

        for item in &layout.visible_items {
            if self.revealed.contains(&item.key) {
                continue;
            }
            let reveal = self.reveals.entry(item.key.clone()).or_insert_with(Reveal::new);
            if !reveal.started {
                if self.list_width <= 0.0 {
                    continue;
                }
                reveal.start(self.list_width, now_ms);
            }

            let scale_before = reveal.scale.value();
            reveal.alpha.tick(now_ms);
            reveal.scale.tick(now_ms);
            reveal.slide.tick(now_ms);

            if let Some((index, key)) = tail {
                if *key == item.key && reveal.scale.value() != scale_before {
                    scroll.request_scroll_to_item(index, 0.0);
                }
            }
        }

        let revealed = &mut self.revealed;
        self.reveals.retain(|k, reveal| {
            let done = reveal.is_done();
            if done {
                revealed.insert(k.clone());
            }
            !done
        });
    }
}
