use std::collections::HashMap;
use std::sync::Arc;

use dragswipe::{
    AutoScroller, DismissSwipeDirection, DragEvent, DragGesture, ListKey, ListLayout, ListOptions,
    ListState, OrderedItem, Point, ReorderEngine, Rgba, ScrollController, SwipeEvent,
    SwipeGesture, SwipeStyle, SwipeVisual, force_drop, ordered_items, scroll_pin_for,
    take_drop_commit,
};

use crate::{RevealOnAdd, RevealVisual, Viewport};

/// Receives the items whose index changed after a drag, in their new order.
pub type ReorderCallback<T> = Arc<dyn Fn(&[OrderedItem<T>]) + Send + Sync>;
pub type ItemCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;
/// Receives the item and a pointer delta in pixels.
pub type ItemDeltaCallback<T> = Arc<dyn Fn(&T, f32) + Send + Sync>;
/// Receives the item, a horizontal delta, and whether the pointer is still pressed.
pub type SwipeUpdateCallback<T> = Arc<dyn Fn(&T, f32, bool) + Send + Sync>;
pub type SwipeDismissCallback<T> = Arc<dyn Fn(&T, DismissSwipeDirection) + Send + Sync>;

/// Notifications emitted by [`DragDropSwipeList`].
///
/// All callbacks run synchronously from inside the pointer and `tick` calls. They receive the
/// item values, never the list itself: persist the change and feed the new collection back with
/// [`DragDropSwipeList::set_items`].
pub struct ListCallbacks<T> {
    pub on_indices_changed_via_drag_and_drop: Option<ReorderCallback<T>>,
    pub on_item_click: Option<ItemCallback<T>>,
    pub on_item_long_click: Option<ItemCallback<T>>,
    pub on_swipe_dismiss: Option<SwipeDismissCallback<T>>,
    pub on_drag_start: Option<ItemDeltaCallback<T>>,
    pub on_drag_update: Option<ItemDeltaCallback<T>>,
    pub on_drag_finish: Option<ItemCallback<T>>,
    pub on_swipe_gesture_start: Option<ItemDeltaCallback<T>>,
    pub on_swipe_gesture_update: Option<SwipeUpdateCallback<T>>,
    pub on_swipe_gesture_finish: Option<ItemCallback<T>>,
}

impl<T> Default for ListCallbacks<T> {
    fn default() -> Self {
        Self {
            on_indices_changed_via_drag_and_drop: None,
            on_item_click: None,
            on_item_long_click: None,
            on_swipe_dismiss: None,
            on_drag_start: None,
            on_drag_update: None,
            on_drag_finish: None,
            on_swipe_gesture_start: None,
            on_swipe_gesture_update: None,
            on_swipe_gesture_finish: None,
        }
    }
}

impl<T> Clone for ListCallbacks<T> {
    fn clone(&self) -> Self {
        Self {
            on_indices_changed_via_drag_and_drop: self.on_indices_changed_via_drag_and_drop.clone(),
            on_item_click: self.on_item_click.clone(),
            on_item_long_click: self.on_item_long_click.clone(),
            on_swipe_dismiss: self.on_swipe_dismiss.clone(),
            on_drag_start: self.on_drag_start.clone(),
            on_drag_update: self.on_drag_update.clone(),
            on_drag_finish: self.on_drag_finish.clone(),
            on_swipe_gesture_start: self.on_swipe_gesture_start.clone(),
            on_swipe_gesture_update: self.on_swipe_gesture_update.clone(),
            on_swipe_gesture_finish: self.on_swipe_gesture_finish.clone(),
        }
    }
}

impl<T> core::fmt::Debug for ListCallbacks<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListCallbacks").finish_non_exhaustive()
    }
}

impl<T> ListCallbacks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_indices_changed_via_drag_and_drop(
        mut self,
        f: impl Fn(&[OrderedItem<T>]) + Send + Sync + 'static,
    ) -> Self {
        self.on_indices_changed_via_drag_and_drop = Some(Arc::new(f));
        self
    }

    pub fn with_on_item_click(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_item_click = Some(Arc::new(f));
        self
    }

    pub fn with_on_item_long_click(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_item_long_click = Some(Arc::new(f));
        self
    }

    pub fn with_on_swipe_dismiss(
        mut self,
        f: impl Fn(&T, DismissSwipeDirection) + Send + Sync + 'static,
    ) -> Self {
        self.on_swipe_dismiss = Some(Arc::new(f));
        self
    }

    pub fn with_on_drag_start(mut self, f: impl Fn(&T, f32) + Send + Sync + 'static) -> Self {
        self.on_drag_start = Some(Arc::new(f));
        self
    }

    pub fn with_on_drag_update(mut self, f: impl Fn(&T, f32) + Send + Sync + 'static) -> Self {
        self.on_drag_update = Some(Arc::new(f));
        self
    }

    pub fn with_on_drag_finish(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_drag_finish = Some(Arc::new(f));
        self
    }

    pub fn with_on_swipe_gesture_start(
        mut self,
        f: impl Fn(&T, f32) + Send + Sync + 'static,
    ) -> Self {
        self.on_swipe_gesture_start = Some(Arc::new(f));
        self
    }

    pub fn with_on_swipe_gesture_update(
        mut self,
        f: impl Fn(&T, f32, bool) + Send + Sync + 'static,
    ) -> Self {
        self.on_swipe_gesture_update = Some(Arc::new(f));
        self
    }

    pub fn with_on_swipe_gesture_finish(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_swipe_gesture_finish = Some(Arc::new(f));
        self
    }
}

/// Everything an adapter needs to draw one laid-out item.
#[derive(Clone, Copy, Debug)]
pub struct RenderedItem<'a, T, K> {
    pub item: &'a T,
    pub key: &'a K,
    /// Position in the rendered (possibly provisional) order.
    pub index: usize,
    /// Slot offset in layout coordinates (see [`ListLayout`]).
    pub slot_offset: f32,
    /// Top edge on screen, relative to the list's top edge, drag offset included.
    pub screen_offset: f32,
    pub size: f32,
    /// Vertical drag/settle offset in screen pixels.
    pub drag_offset: f32,
    pub is_being_dragged: bool,
    /// 2 while dragged, 1 while settling back, 0 at rest.
    pub z_index: u8,
    pub shadow_elevation: f32,
    pub container_color: Option<Rgba>,
    pub swipe: SwipeVisual,
    pub reveal: RevealVisual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PointerMode {
    /// Waiting for one of the detectors to claim the pointer.
    Pending,
    Drag,
    Swipe,
    Scroll,
    /// The gesture was interrupted (forced drop); ignore it until release.
    Ignored,
}

#[derive(Clone, Debug)]
struct PointerSession<K> {
    key: Option<K>,
    mode: PointerMode,
    drag_armed: bool,
    last: Point,
    last_ms: u64,
    accumulated_dy: f32,
    velocity: f32,
}

#[derive(Clone, Copy, Debug, Default)]
struct ItemGestures {
    drag: DragGesture,
    swipe: SwipeGesture,
}

/// A framework-neutral reorderable, swipeable list.
///
/// Owns the provisional item order, the per-item drag/swipe state, the viewport, and the engines,
/// and runs them from a single scheduling loop. This type does not hold any UI objects. Adapters
/// drive it by calling:
/// - `set_items` whenever the authoritative collection changes
/// - `set_viewport_size` / `set_list_width` / `measure` when layout changes
/// - `pointer_down` / `pointer_move` / `pointer_up` / `pointer_cancel` for pointer input
/// - `tick(now_ms)` once per frame
///
/// and then draw the items reported by [`DragDropSwipeList::for_each_rendered_item`].
pub struct DragDropSwipeList<T, K: ListKey> {
    options: ListOptions<K>,
    style: SwipeStyle,
    callbacks: ListCallbacks<T>,
    key_of: Arc<dyn Fn(&T) -> K + Send + Sync>,
    ordered: Vec<OrderedItem<T>>,
    deferred_items: Option<Vec<T>>,
    list: ListState<K>,
    gestures: HashMap<K, ItemGestures>,
    measured: HashMap<K, f32>,
    viewport: Viewport<K>,
    reorder: ReorderEngine<K>,
    auto_scroller: AutoScroller,
    reveal: Option<RevealOnAdd<K>>,
    pointer: Option<PointerSession<K>>,
    list_width: f32,
}

impl<T, K: ListKey> core::fmt::Debug for DragDropSwipeList<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragDropSwipeList")
            .field("items", &self.ordered.len())
            .field("dragged_item_key", &self.list.dragged_item_key())
            .field("swiped_item_keys", &self.list.swiped_item_keys())
            .field("scroll_offset", &self.viewport.scroll_offset())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<T: Clone, K: ListKey> DragDropSwipeList<T, K> {
    pub fn new(
        items: Vec<T>,
        key_of: impl Fn(&T) -> K + Send + Sync + 'static,
        options: ListOptions<K>,
        callbacks: ListCallbacks<T>,
    ) -> Self {
        let mut list = Self {
            viewport: Viewport::from_options(&options),
            auto_scroller: AutoScroller::new(
                options.min_auto_scroll_step,
                options.max_auto_scroll_step,
            ),
            options,
            style: SwipeStyle::default(),
            callbacks,
            key_of: Arc::new(key_of),
            ordered: Vec::new(),
            deferred_items: None,
            list: ListState::new(),
            gestures: HashMap::new(),
            measured: HashMap::new(),
            reorder: ReorderEngine::new(),
            reveal: None,
            pointer: None,
            list_width: 0.0,
        };
        list.apply_items(items, 0);
        list
    }

    pub fn with_style(mut self, style: SwipeStyle) -> Self {
        self.style = style;
        self
    }

    /// Animates items added after this call into view and scrolls to tail insertions.
    pub fn with_reveal_on_add(mut self) -> Self {
        let keys = self.viewport.keys().to_vec();
        let mut reveal = RevealOnAdd::new(&keys);
        reveal.set_list_width(self.list_width);
        self.reveal = Some(reveal);
        self
    }

    pub fn options(&self) -> &ListOptions<K> {
        &self.options
    }

    pub fn set_options(&mut self, options: ListOptions<K>) {
        self.viewport
            .set_content_padding(options.before_content_padding, options.after_content_padding);
        self.viewport.set_item_spacing(options.item_spacing);
        self.viewport.set_overscan(options.overscan);
        self.auto_scroller
            .set_steps(options.min_auto_scroll_step, options.max_auto_scroll_step);
        for gestures in self.gestures.values_mut() {
            gestures.drag.set_touch_slop(options.touch_slop);
            gestures
                .drag
                .set_min_swipe_horizontality(options.min_swipe_horizontality);
            gestures.swipe.set_touch_slop(options.touch_slop);
            gestures
                .swipe
                .set_min_swipe_horizontality(options.min_swipe_horizontality);
            gestures.swipe.set_thresholds(options.swipe_thresholds);
            gestures.swipe.set_layout_direction(options.layout_direction);
        }
        self.options = options;
    }

    pub fn style(&self) -> &SwipeStyle {
        &self.style
    }

    pub fn set_callbacks(&mut self, callbacks: ListCallbacks<T>) {
        self.callbacks = callbacks;
    }

    pub fn state(&self) -> &ListState<K> {
        &self.list
    }

    pub fn viewport(&self) -> &Viewport<K> {
        &self.viewport
    }

    /// Programmatic scrolling. User scroll gating does not apply here.
    pub fn viewport_mut(&mut self) -> &mut Viewport<K> {
        &mut self.viewport
    }

    pub fn reveal(&self) -> Option<&RevealOnAdd<K>> {
        self.reveal.as_ref()
    }

    /// The provisional order (equal to the authoritative one outside of a drag).
    pub fn ordered_items(&self) -> &[OrderedItem<T>] {
        &self.ordered
    }

    pub fn layout(&self) -> ListLayout<K> {
        self.viewport.layout()
    }

    fn key_of(&self, item: &T) -> K {
        (self.key_of)(item)
    }

    fn item_for(&self, key: &K) -> Option<&T> {
        let index = self.viewport.index_of(key)?;
        self.ordered.get(index).map(|it| &it.value)
    }

    fn gestures_for(&mut self, key: &K) -> &mut ItemGestures {
        let options = &self.options;
        let list_width = self.list_width;
        let gestures = self.gestures.entry(key.clone()).or_insert_with(|| {
            let mut swipe = SwipeGesture::new(options.min_swipe_horizontality)
                .with_touch_slop(options.touch_slop)
                .with_thresholds(options.swipe_thresholds)
                .with_layout_direction(options.layout_direction);
            swipe.set_width(list_width);
            ItemGestures {
                drag: DragGesture::new(options.touch_slop, options.min_swipe_horizontality),
                swipe,
            }
        });
        gestures
            .swipe
            .set_allowed_directions(options.allowed_swipe_directions_for(key));
        gestures
    }

    /// Replaces the authoritative collection.
    ///
    /// While an item is being dragged the update is held back and applied right after the drop.
    pub fn set_items(&mut self, items: Vec<T>, now_ms: u64) {
        if self.list.is_dragging() {
            dtrace!(items = items.len(), "deferring external update until drop");
            self.deferred_items = Some(items);
            return;
        }
        self.apply_items(items, now_ms);
    }

    fn apply_items(&mut self, items: Vec<T>, now_ms: u64) {
        self.deferred_items = None;
        self.ordered = ordered_items(items);
        let keys: Vec<K> = self.ordered.iter().map(|it| self.key_of(&it.value)).collect();
        self.viewport.set_order(keys.clone());

        let viewport = &self.viewport;
        self.list.retain_keys(|k| viewport.index_of(k).is_some());
        self.gestures.retain(|k, _| viewport.index_of(k).is_some());
        self.measured.retain(|k, _| viewport.index_of(k).is_some());
        for (key, gestures) in self.gestures.iter_mut() {
            if gestures.swipe.is_dismissed() {
                gestures.swipe.reset();
                self.list.end_swipe(key);
            }
        }
        self.reorder.reset();
        if let Some(session) = self.pointer.as_mut() {
            if session.key.as_ref().is_some_and(|k| viewport.index_of(k).is_none()) {
                session.mode = PointerMode::Ignored;
            }
        }

        if let Some(reveal) = self.reveal.as_mut() {
            let layout = self.viewport.layout();
            reveal.on_items_changed(&keys, &layout, &mut self.viewport, now_ms);
        }
        ddebug!(items = self.ordered.len(), "items applied");
    }

    pub fn set_viewport_size(&mut self, viewport_size: f32) {
        self.viewport.set_viewport_size(viewport_size);
    }

    /// Cross-axis size of the list; drives swipe thresholds and the reveal slide-in.
    pub fn set_list_width(&mut self, list_width: f32) {
        self.list_width = list_width.max(0.0);
        for gestures in self.gestures.values_mut() {
            gestures.swipe.set_width(self.list_width);
        }
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.set_list_width(self.list_width);
        }
    }

    /// Records the measured main-axis size of an item.
    pub fn measure(&mut self, key: &K, size: f32) {
        if self.viewport.index_of(key).is_none() {
            return;
        }
        self.measured.insert(key.clone(), size.max(0.0));
        let scale = self
            .reveal
            .as_ref()
            .map_or(1.0, |reveal| reveal.visual(key).scale_y);
        self.viewport.measure(key, size * scale);
    }

    fn user_scroll_allowed(&self) -> bool {
        self.options.user_scroll_enabled && !self.list.is_interacting()
    }

    /// User scroll (wheel, scrollbar). Ignored while an item is dragged or swiped.
    ///
    /// Returns the consumed delta.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        if !self.user_scroll_allowed() {
            return 0.0;
        }
        self.viewport.scroll_by(delta)
    }

    /// User fling with `velocity` px/s in layout direction.
    pub fn fling(&mut self, velocity: f32, now_ms: u64) {
        if !self.user_scroll_allowed() {
            return;
        }
        self.viewport
            .fling(velocity, self.options.fling_friction, now_ms);
    }

    /// Screen position of a laid-out item's top edge, relative to the list's top edge.
    fn screen_offset(&self, slot_offset: f32, size: f32, drag_offset: f32) -> f32 {
        let before = self.options.before_content_padding;
        if self.options.reverse_layout {
            self.viewport.viewport_size() - before - slot_offset - size + drag_offset
        } else {
            before + slot_offset + drag_offset
        }
    }

    /// Finds the laid-out item under `position` (topmost first).
    pub fn hit_test(&self, position: Point) -> Option<K> {
        let mut hit: Option<(K, u8)> = None;
        self.viewport.for_each_laid_out_item(|item| {
            let state = self.list.item(&item.key);
            let drag_offset = state.map_or(0.0, |s| s.rendered_offset());
            let z = state.map_or(0, |s| s.z_index());
            let top = self.screen_offset(item.offset, item.size, drag_offset);
            if position.y >= top && position.y < top + item.size {
                if hit.as_ref().is_none_or(|(_, hz)| z > *hz) {
                    hit = Some((item.key, z));
                }
            }
        });
        hit.map(|(key, _)| key)
    }

    pub fn click(&self, position: Point) -> bool {
        self.notify_click(position, self.callbacks.on_item_click.as_ref())
    }

    pub fn long_click(&self, position: Point) -> bool {
        self.notify_click(position, self.callbacks.on_item_long_click.as_ref())
    }

    fn notify_click(&self, position: Point, callback: Option<&ItemCallback<T>>) -> bool {
        if self.list.is_interacting() {
            return false;
        }
        let Some(callback) = callback else {
            return false;
        };
        let Some(item) = self.hit_test(position).and_then(|key| self.item_for(&key)) else {
            return false;
        };
        callback(item);
        true
    }

    /// Starts a pointer gesture. `on_drag_handle` tells whether the pointer went down on the part
    /// of the item that can start a drag (the whole item, for most lists).
    ///
    /// Returns the key of the item under the pointer.
    pub fn pointer_down(&mut self, position: Point, on_drag_handle: bool, now_ms: u64) -> Option<K> {
        self.viewport.cancel_animation();
        let key = self.hit_test(position);

        let mut drag_armed = false;
        if let Some(key) = key.as_ref() {
            self.list.item_or_insert(key);
            let flying_out = self.gestures_for(key).swipe.is_flying_out();
            drag_armed = on_drag_handle
                && !flying_out
                && self.options.is_drag_enabled(key)
                && !self.list.is_dragging_other_than(key);
            let gestures = self.gestures_for(key);
            if drag_armed {
                gestures.drag.pointer_down(position);
            }
            gestures.swipe.pointer_down(position);
        }

        self.pointer = Some(PointerSession {
            key: key.clone(),
            mode: PointerMode::Pending,
            drag_armed,
            last: position,
            last_ms: now_ms,
            accumulated_dy: 0.0,
            velocity: 0.0,
        });
        key
    }

    pub fn pointer_move(&mut self, position: Point, now_ms: u64) {
        let Some(mut session) = self.pointer.take() else {
            return;
        };
        let dy = position.y - session.last.y;
        let dt = now_ms.saturating_sub(session.last_ms);
        if dt > 0 {
            session.velocity = dy / dt as f32 * 1000.0;
        }
        session.last = position;
        session.last_ms = now_ms;

        match (session.mode, session.key.clone()) {
            (PointerMode::Pending, Some(key)) => {
                self.claim_pointer(&mut session, &key, position, dy, now_ms);
            }
            (PointerMode::Pending, None) => {
                session.accumulated_dy += dy;
                if session.accumulated_dy.abs() >= self.options.touch_slop {
                    session.mode = PointerMode::Scroll;
                }
            }
            (PointerMode::Drag, Some(key)) => {
                if let Some(DragEvent::Moved { delta }) =
                    self.gestures_for(&key).drag.pointer_move(position)
                {
                    if self.list.drag_by(&key, delta) {
                        if let (Some(cb), Some(item)) =
                            (self.callbacks.on_drag_update.clone(), self.item_for(&key))
                        {
                            cb(item, delta);
                        }
                    }
                }
            }
            (PointerMode::Swipe, Some(key)) => {
                if let Some(SwipeEvent::Updated { delta, pressed }) =
                    self.gestures_for(&key).swipe.pointer_move(position, true)
                {
                    if let (Some(cb), Some(item)) = (
                        self.callbacks.on_swipe_gesture_update.clone(),
                        self.item_for(&key),
                    ) {
                        cb(item, delta, pressed);
                    }
                }
            }
            (PointerMode::Scroll, _) => {
                if self.user_scroll_allowed() {
                    self.viewport.scroll_by(-dy * self.options.layout_sign());
                }
            }
            _ => {}
        }
        self.pointer = Some(session);
    }

    fn claim_pointer(
        &mut self,
        session: &mut PointerSession<K>,
        key: &K,
        position: Point,
        dy: f32,
        now_ms: u64,
    ) {
        if session.drag_armed {
            if let Some(DragEvent::Started { delta }) =
                self.gestures_for(key).drag.pointer_move(position)
            {
                if self.begin_drag(key, delta, now_ms) {
                    session.mode = PointerMode::Drag;
                    return;
                }
                self.gestures_for(key).drag.cancel();
                session.drag_armed = false;
            }
        }

        let swipe_enabled = !self.list.is_dragging();
        if let Some(SwipeEvent::Started { delta }) =
            self.gestures_for(key).swipe.pointer_move(position, swipe_enabled)
        {
            if self.list.try_begin_swipe(key) {
                self.gestures_for(key).drag.cancel();
                session.mode = PointerMode::Swipe;
                if let (Some(cb), Some(item)) = (
                    self.callbacks.on_swipe_gesture_start.clone(),
                    self.item_for(key),
                ) {
                    cb(item, delta);
                }
                return;
            }
            self.gestures_for(key).swipe.cancel(now_ms);
        }

        if !session.drag_armed {
            session.accumulated_dy += dy;
            if session.accumulated_dy.abs() >= self.options.touch_slop {
                self.gestures_for(key).swipe.cancel(now_ms);
                session.mode = PointerMode::Scroll;
            }
        }
    }

    fn begin_drag(&mut self, key: &K, delta: f32, now_ms: u64) -> bool {
        if !self.list.try_begin_drag(key) {
            return false;
        }
        self.gestures_for(key).swipe.cancel(now_ms);
        self.reorder.reset();
        self.auto_scroller.reset();
        self.list.drag_by(key, delta);
        if let (Some(cb), Some(item)) = (self.callbacks.on_drag_start.clone(), self.item_for(key)) {
            cb(item, delta);
        }
        true
    }

    pub fn pointer_up(&mut self, now_ms: u64) {
        let Some(session) = self.pointer.take() else {
            return;
        };
        match (session.mode, session.key) {
            (PointerMode::Drag, Some(key)) => {
                self.gestures_for(&key).drag.pointer_up();
                self.finish_drag(&key, now_ms);
            }
            (PointerMode::Swipe, Some(key)) => {
                let event = self.gestures_for(&key).swipe.pointer_up(now_ms);
                // A dismissing item stays swiped until its fly-out completes.
                if !matches!(event, Some(SwipeEvent::Finished { dismissing: true })) {
                    self.list.end_swipe(&key);
                }
                if let Some(SwipeEvent::Finished { .. }) = event {
                    if let (Some(cb), Some(item)) = (
                        self.callbacks.on_swipe_gesture_finish.clone(),
                        self.item_for(&key),
                    ) {
                        cb(item);
                    }
                }
            }
            (PointerMode::Scroll, _) => {
                let velocity = -session.velocity * self.options.layout_sign();
                self.fling(velocity, now_ms);
            }
            (_, Some(key)) => {
                let gestures = self.gestures_for(&key);
                gestures.drag.cancel();
                gestures.swipe.pointer_up(now_ms);
            }
            (_, None) => {}
        }
    }

    /// Pointer cancelled by the system: like a release, without fling or dismissal.
    pub fn pointer_cancel(&mut self, now_ms: u64) {
        let Some(session) = self.pointer.take() else {
            return;
        };
        let Some(key) = session.key else {
            return;
        };
        match session.mode {
            PointerMode::Drag => {
                self.gestures_for(&key).drag.cancel();
                self.finish_drag(&key, now_ms);
            }
            PointerMode::Swipe => {
                self.gestures_for(&key).swipe.cancel(now_ms);
                self.list.end_swipe(&key);
                if let (Some(cb), Some(item)) = (
                    self.callbacks.on_swipe_gesture_finish.clone(),
                    self.item_for(&key),
                ) {
                    cb(item);
                }
            }
            _ => {
                let gestures = self.gestures_for(&key);
                gestures.drag.cancel();
                gestures.swipe.cancel(now_ms);
            }
        }
    }

    fn finish_drag(&mut self, key: &K, now_ms: u64) {
        if !self.list.end_drag(key) {
            return;
        }
        if let (Some(cb), Some(item)) = (self.callbacks.on_drag_finish.clone(), self.item_for(key))
        {
            cb(item);
        }

        let layout = self.viewport.layout();
        if let Some(reveal) = self
            .auto_scroller
            .on_drop(&layout, key, self.options.reverse_layout)
        {
            self.viewport.animate_scroll_by(reveal.delta, now_ms);
        }
        self.reorder.reset();

        let commit = self
            .list
            .item_mut(key)
            .and_then(|state| take_drop_commit(state, &self.ordered));
        let committed = commit.is_some();
        if let Some(changed) = commit {
            self.notify_reorder(&changed);
        }
        self.apply_deferred_items(committed, now_ms);
    }

    fn notify_reorder(&self, changed: &[OrderedItem<T>]) {
        if let Some(cb) = self.callbacks.on_indices_changed_via_drag_and_drop.as_ref() {
            cb(changed);
        }
    }

    /// Applies the collection held back during the drag.
    ///
    /// After a committed reorder, a collection holding the same keys was captured before the owner
    /// persisted the new order, so its items are laid out in the provisional order instead.
    fn apply_deferred_items(&mut self, committed: bool, now_ms: u64) {
        let Some(mut items) = self.deferred_items.take() else {
            return;
        };
        if committed {
            self.keep_provisional_order(&mut items);
        }
        self.apply_items(items, now_ms);
    }

    fn keep_provisional_order(&self, items: &mut Vec<T>) {
        if items.len() != self.viewport.len() {
            return;
        }
        let mut positions = Vec::with_capacity(items.len());
        for item in items.iter() {
            match self.viewport.index_of(&self.key_of(item)) {
                Some(position) => positions.push(position),
                None => return,
            }
        }
        let mut keyed: Vec<(usize, T)> = positions.into_iter().zip(items.drain(..)).collect();
        keyed.sort_by_key(|(position, _)| *position);
        items.extend(keyed.into_iter().map(|(_, item)| item));
        dtrace!(items = items.len(), "deferred update kept the provisional order");
    }

    /// Releases the dragged item immediately, emitting any pending reorder notification.
    fn force_drop_dragged(&mut self, now_ms: u64) {
        let Some(key) = self.list.dragged_item_key().cloned() else {
            return;
        };
        let commit = force_drop(&mut self.list, &key, &self.ordered);
        self.gestures_for(&key).drag.cancel();
        if let Some(session) = self.pointer.as_mut() {
            if session.key.as_ref() == Some(&key) {
                session.mode = PointerMode::Ignored;
            }
        }
        self.reorder.reset();
        self.auto_scroller.reset();
        let committed = commit.is_some();
        if let Some(changed) = commit {
            self.notify_reorder(&changed);
        }
        self.apply_deferred_items(committed, now_ms);
    }

    /// Tears the list down. A drag in progress is force-dropped so its reorder is not lost.
    pub fn dispose(&mut self, now_ms: u64) {
        self.force_drop_dragged(now_ms);
        self.pointer = None;
    }

    /// Advances the list by one frame.
    ///
    /// Order of work: scroll animations, edge auto-scroll, reorder (with scroll pinning and the
    /// offset correction), forced drop of a dragged item that left the laid-out window, settle
    /// springs, swipe animations and dismissals, and reveal animations.
    pub fn tick(&mut self, now_ms: u64) {
        self.viewport.tick(now_ms);

        if let Some(key) = self.list.dragged_item_key().cloned() {
            self.tick_drag(&key, now_ms);
        }

        let spring = self.options.settle_spring;
        self.list.for_each_item_mut(|state| {
            state.tick_offset(spring, now_ms);
        });

        let mut dismissed = Vec::new();
        for (key, gestures) in self.gestures.iter_mut() {
            if let Some(SwipeEvent::Dismissed(direction)) = gestures.swipe.tick(now_ms) {
                dismissed.push((key.clone(), direction));
            }
        }
        for (key, direction) in dismissed {
            self.list.end_swipe(&key);
            if let (Some(cb), Some(item)) =
                (self.callbacks.on_swipe_dismiss.clone(), self.item_for(&key))
            {
                cb(item, direction);
            }
        }

        if let Some(reveal) = self.reveal.as_mut() {
            let layout = self.viewport.layout();
            let last = self.viewport.keys().last().cloned();
            let tail = last.as_ref().map(|key| (self.viewport.len() - 1, key));
            let was_animating = reveal.is_animating();
            reveal.tick(tail, &layout, &mut self.viewport, now_ms);
            if was_animating || reveal.is_animating() {
                for (key, size) in &self.measured {
                    let scale = reveal.visual(key).scale_y;
                    self.viewport.measure(key, size * scale);
                }
            }
        }
    }

    fn tick_drag(&mut self, key: &K, now_ms: u64) {
        let reverse = self.options.reverse_layout;
        let layout = self.viewport.layout();
        if !layout.contains(key) {
            dwarn!(key = ?key, "dragged item left the laid-out window");
            self.force_drop_dragged(now_ms);
            return;
        }

        let target = self.list.item(key).map_or(0.0, |s| s.offset_target());
        if let Some(step) = self
            .auto_scroller
            .step(&layout, key, target, reverse, now_ms)
        {
            let consumed = self.viewport.scroll_by(step.delta);
            let fold = self.auto_scroller.consumed(step, consumed, reverse, now_ms);
            self.list.drag_by(key, fold);
        }

        let layout = self.viewport.layout();
        let target = self.list.item(key).map_or(0.0, |s| s.offset_target());
        let key_of = &*self.key_of;
        if let Some(reorder) = self
            .reorder
            .observe(&self.ordered, key, target, &layout, reverse, key_of)
        {
            let pin = scroll_pin_for(&layout, reorder.from_index, reorder.to_index);
            let keys: Vec<K> = reorder.items.iter().map(|it| key_of(&it.value)).collect();
            self.ordered = reorder.items;
            self.viewport.set_order(keys);
            self.list.record_reorder(key, reorder.offset_correction);
            if let Some(pin) = pin {
                self.viewport
                    .request_scroll_to_item(pin.index, pin.scroll_offset);
            }
        }

        let position = self.viewport.index_of(key);
        let new_index = position.and_then(|i| self.ordered.get(i)).map(|it| it.new_index);
        if let (Some(position), Some(new_index), Some(state)) =
            (position, new_index, self.list.item_mut(key))
        {
            state.apply_pending_offset_correction(position, new_index);
        }
    }

    /// Emits the laid-out items with everything needed to draw them, in index order.
    pub fn for_each_rendered_item(&self, mut f: impl FnMut(RenderedItem<'_, T, K>)) {
        self.viewport.for_each_laid_out_item(|layout_item| {
            let Some(ordered) = self.ordered.get(layout_item.index) else {
                return;
            };
            let Some(key) = self.viewport.keys().get(layout_item.index) else {
                return;
            };
            let state = self.list.item(key);
            let is_being_dragged = state.is_some_and(|s| s.is_being_dragged());
            let drag_offset = state.map_or(0.0, |s| s.rendered_offset());
            let is_settling = !is_being_dragged && drag_offset != 0.0;
            let swipe = self
                .gestures
                .get(key)
                .map(|g| g.swipe.visual())
                .unwrap_or_default();
            let reveal = self
                .reveal
                .as_ref()
                .map_or(RevealVisual::REVEALED, |r| r.visual(key));
            f(RenderedItem {
                item: &ordered.value,
                key,
                index: layout_item.index,
                slot_offset: layout_item.offset,
                screen_offset: self.screen_offset(layout_item.offset, layout_item.size, drag_offset),
                size: layout_item.size,
                drag_offset,
                is_being_dragged,
                z_index: state.map_or(0, |s| s.z_index()),
                shadow_elevation: self.style.shadow_elevation(is_being_dragged, is_settling),
                container_color: self.style.colors.container(is_being_dragged),
                swipe,
                reveal,
            });
        });
    }
}
