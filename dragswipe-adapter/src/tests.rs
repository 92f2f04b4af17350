use crate::*;

use crate::fenwick::Fenwick;

use dragswipe::{
    DismissSwipeDirection, ListOptions, OrderedItem, Point, ScrollController, SwipePhase,
};
use std::sync::{Arc, Mutex};

type Commits = Arc<Mutex<Vec<Vec<(u32, usize, usize)>>>>;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn commit_recorder() -> (Commits, ListCallbacks<u32>) {
    let commits: Commits = Arc::default();
    let sink = commits.clone();
    let callbacks =
        ListCallbacks::new().with_on_indices_changed_via_drag_and_drop(move |changed| {
            sink.lock().unwrap().push(
                changed
                    .iter()
                    .map(|it: &OrderedItem<u32>| (it.value, it.initial_index, it.new_index))
                    .collect(),
            );
        });
    (commits, callbacks)
}

/// `n` items keyed by value, 50px tall, in a 200px viewport that is 300px wide.
fn list_of(
    n: u32,
    options: ListOptions<u32>,
    callbacks: ListCallbacks<u32>,
) -> DragDropSwipeList<u32, u32> {
    let mut list = DragDropSwipeList::new(
        (0..n).collect(),
        |v: &u32| *v,
        options.with_estimated_item_size(50.0),
        callbacks,
    );
    list.set_viewport_size(200.0);
    list.set_list_width(300.0);
    list
}

fn tail(keys: &[u32]) -> Option<(usize, &u32)> {
    keys.last().map(|key| (keys.len() - 1, key))
}

fn order(list: &DragDropSwipeList<u32, u32>) -> Vec<u32> {
    list.ordered_items().iter().map(|it| it.value).collect()
}

/// Presses item 0 and drags it past the center of item 2, ticking along the way.
fn drag_first_item_to_third_slot(list: &mut DragDropSwipeList<u32, u32>) {
    assert_eq!(list.pointer_down(Point::new(10.0, 25.0), true, 0), Some(0));
    list.pointer_move(Point::new(10.0, 35.0), 16);
    assert_eq!(list.state().dragged_item_key(), Some(&0));
    list.tick(16);
    list.pointer_move(Point::new(10.0, 135.0), 32);
    list.tick(32);
}

#[test]
fn viewport_lays_out_visible_items_plus_overscan() {
    let mut v = Viewport::new(50.0);
    v.set_content_padding(10.0, 20.0);
    v.set_viewport_size(200.0);
    v.set_order((0..10u32).collect());

    let layout = v.layout();
    let laid_out: Vec<(u32, f32)> = layout
        .visible_items
        .iter()
        .map(|it| (it.key, it.offset))
        .collect();
    assert_eq!(
        laid_out,
        vec![(0, 0.0), (1, 50.0), (2, 100.0), (3, 150.0), (4, 200.0)]
    );
    assert_eq!(layout.viewport_start_offset, -10.0);
    assert_eq!(layout.viewport_end_offset, 190.0);
    assert_eq!(layout.total_items_count, 10);

    assert_eq!(v.total_size(), 530.0);
    assert_eq!(v.scroll_by(1_000.0), 330.0);
    assert_eq!(v.scroll_offset(), 330.0);
    assert_eq!(v.scroll_by(-1_000.0), -330.0);
}

#[test]
fn viewport_lays_out_a_window_deep_into_a_long_list() {
    let mut v = Viewport::new(20.0);
    v.set_item_spacing(4.0);
    v.set_content_padding(8.0, 8.0);
    v.set_viewport_size(100.0);
    v.set_order((0..100_000u32).collect());
    assert!(v.measure(&1, 44.0));
    assert_eq!(v.total_size(), 2_400_036.0);

    v.request_scroll_to_item(50_000, 0.0);
    assert_eq!(v.scroll_offset(), 1_200_024.0);
    let layout = v.layout();
    let laid_out: Vec<(u32, f32)> = layout
        .visible_items
        .iter()
        .map(|it| (it.key, it.offset))
        .collect();
    assert_eq!(
        laid_out,
        vec![
            (49_998, -48.0),
            (49_999, -24.0),
            (50_000, 0.0),
            (50_001, 24.0),
            (50_002, 48.0),
            (50_003, 72.0),
            (50_004, 96.0),
        ]
    );
}

#[test]
fn viewport_measurements_follow_keys() {
    let mut v = Viewport::new(50.0);
    v.set_order(vec![1u32, 2, 3]);
    assert!(v.measure(&2, 80.0));
    assert!(!v.measure(&2, 80.0));
    assert!(!v.measure(&9, 80.0));
    assert_eq!(v.total_size(), 180.0);

    // Reordering keeps the size with the key; removing the key drops it.
    v.set_order(vec![2, 1]);
    assert_eq!(v.size_of(&2), 80.0);
    v.set_order(vec![1]);
    v.set_order(vec![1, 2]);
    assert_eq!(v.size_of(&2), 50.0);
}

#[test]
fn viewport_scroll_to_item_uses_content_coordinates() {
    let mut v = Viewport::new(50.0);
    v.set_content_padding(10.0, 20.0);
    v.set_viewport_size(200.0);
    v.set_order((0..10u32).collect());

    v.request_scroll_to_item(3, -20.0);
    assert_eq!(v.scroll_offset(), 130.0);

    v.animate_scroll_to_item(4, 0);
    assert!(v.is_animating());
    let mut last = v.scroll_offset();
    for now_ms in [16u64, 64, 128, 200, 250] {
        v.tick(now_ms);
        assert!(v.scroll_offset() >= last);
        last = v.scroll_offset();
    }
    assert!(!v.is_animating());
    assert_eq!(v.scroll_offset(), 200.0);
}

#[test]
fn fling_decays_to_its_target_or_stops_at_the_boundary() {
    let mut v = Viewport::new(50.0);
    v.set_content_padding(10.0, 20.0);
    v.set_viewport_size(200.0);
    v.set_order((0..10u32).collect());

    v.fling(1_000.0, 4.2, 0);
    v.tick(500);
    assert!(v.is_animating());
    v.tick(3_000);
    assert!(!v.is_animating());
    assert!(approx(v.scroll_offset(), 1_000.0 / 4.2));

    v.fling(10_000.0, 4.2, 3_000);
    v.tick(3_500);
    assert!(!v.is_animating());
    assert_eq!(v.scroll_offset(), 330.0);
}

#[test]
fn easing_curves_hit_their_endpoints() {
    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseInOutCubic] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
    }
    let mut tween = Tween::new(0.0, 100.0, 0, 100, Easing::Linear);
    assert_eq!(tween.sample(50), 50.0);
    tween.retarget(50, 0.0, 100);
    assert_eq!(tween.sample(50), 50.0);
    assert!(tween.is_done(150));
    assert_eq!(tween.sample(150), 0.0);
}

#[test]
fn dragging_past_a_neighbour_commits_once_on_drop() {
    let (commits, callbacks) = commit_recorder();
    let finished: Arc<Mutex<Vec<u32>>> = Arc::default();
    let sink = finished.clone();
    let callbacks = callbacks.with_on_drag_finish(move |item| sink.lock().unwrap().push(*item));
    let mut list = list_of(6, ListOptions::new(), callbacks);

    drag_first_item_to_third_slot(&mut list);
    assert_eq!(order(&list), vec![1, 2, 0, 3, 4, 5]);
    // The correction keeps the item under the pointer: slot 100 + 10 = 110 = 135 - 25.
    assert_eq!(list.state().item(&0).map(|s| s.offset_target()), Some(10.0));
    assert!(commits.lock().unwrap().is_empty());

    list.tick(48);
    assert_eq!(order(&list), vec![1, 2, 0, 3, 4, 5]);

    list.pointer_up(64);
    assert!(!list.state().is_dragging());
    assert_eq!(*finished.lock().unwrap(), vec![0]);
    assert_eq!(
        *commits.lock().unwrap(),
        vec![vec![(1, 1, 0), (2, 2, 1), (0, 0, 2)]]
    );

    let mut now_ms = 64;
    while now_ms < 2_000 {
        now_ms += 16;
        list.tick(now_ms);
    }
    let state = list.state().item(&0).cloned();
    assert_eq!(state.as_ref().map(|s| s.rendered_offset()), Some(0.0));
    assert_eq!(state.map(|s| s.z_index()), Some(0));
    assert_eq!(commits.lock().unwrap().len(), 1);
}

#[test]
fn dragged_item_is_drawn_on_top_with_elevation() {
    let (_, callbacks) = commit_recorder();
    let mut list = list_of(6, ListOptions::new(), callbacks);
    drag_first_item_to_third_slot(&mut list);

    let mut dragged = Vec::new();
    list.for_each_rendered_item(|item| {
        if item.is_being_dragged {
            dragged.push((
                *item.key,
                item.index,
                item.screen_offset,
                item.z_index,
                item.shadow_elevation,
            ));
        }
    });
    assert_eq!(
        dragged,
        vec![(0, 2, 110.0, 2, dragswipe::DEFAULT_SHADOW_ELEVATION_WHEN_DRAGGED)]
    );
}

#[test]
fn external_updates_wait_for_the_drop() {
    let (commits, callbacks) = commit_recorder();
    let mut list = list_of(6, ListOptions::new(), callbacks);

    list.pointer_down(Point::new(10.0, 25.0), true, 0);
    list.pointer_move(Point::new(10.0, 35.0), 16);
    list.tick(16);
    assert!(list.state().is_dragging());

    list.set_items((0..7).collect(), 20);
    assert_eq!(list.viewport().len(), 6);
    assert_eq!(list.ordered_items().len(), 6);

    list.pointer_up(32);
    assert_eq!(list.viewport().len(), 7);
    assert_eq!(order(&list), (0..7).collect::<Vec<_>>());
    assert!(commits.lock().unwrap().is_empty());
}

#[test]
fn dragged_item_leaving_the_layout_is_force_dropped() {
    let (commits, callbacks) = commit_recorder();
    let finished: Arc<Mutex<Vec<u32>>> = Arc::default();
    let sink = finished.clone();
    let callbacks = callbacks.with_on_drag_finish(move |item| sink.lock().unwrap().push(*item));
    let mut list = list_of(12, ListOptions::new(), callbacks);

    drag_first_item_to_third_slot(&mut list);
    assert_eq!(order(&list)[..3], [1, 2, 0]);

    list.viewport_mut().scroll_to_offset(300.0);
    assert!(!list.layout().contains(&0));
    list.tick(48);

    assert!(!list.state().is_dragging());
    assert_eq!(
        *commits.lock().unwrap(),
        vec![vec![(1, 1, 0), (2, 2, 1), (0, 0, 2)]]
    );
    assert_eq!(list.state().item(&0).map(|s| s.offset_target()), Some(0.0));

    // The interrupted gesture is ignored until the pointer is released.
    list.pointer_move(Point::new(10.0, 180.0), 64);
    list.pointer_up(80);
    list.tick(96);
    assert_eq!(commits.lock().unwrap().len(), 1);
    assert!(finished.lock().unwrap().is_empty());
}

#[test]
fn dispose_force_drops_an_in_flight_drag() {
    let (commits, callbacks) = commit_recorder();
    let mut list = list_of(6, ListOptions::new(), callbacks);
    drag_first_item_to_third_slot(&mut list);

    list.dispose(48);
    assert!(!list.state().is_dragging());
    assert_eq!(commits.lock().unwrap().len(), 1);
    list.dispose(64);
    assert_eq!(commits.lock().unwrap().len(), 1);
}

#[test]
fn dragging_at_the_edge_auto_scrolls_and_reveals_on_drop() {
    let (commits, callbacks) = commit_recorder();
    let mut list = list_of(12, ListOptions::new(), callbacks);

    assert_eq!(list.pointer_down(Point::new(10.0, 125.0), true, 0), Some(2));
    list.pointer_move(Point::new(10.0, 135.0), 16);
    list.tick(16);
    assert_eq!(list.viewport().scroll_offset(), 0.0);

    // 40 of the 50px are past the bottom edge: full speed, one step per frame.
    list.pointer_move(Point::new(10.0, 215.0), 32);
    let mut now_ms = 32;
    for _ in 0..10 {
        list.tick(now_ms);
        now_ms += 16;
    }
    assert!(approx(list.viewport().scroll_offset(), 20.0));
    assert_eq!(order(&list)[..5], [0, 1, 3, 4, 2]);

    list.pointer_up(now_ms);
    assert_eq!(
        *commits.lock().unwrap(),
        vec![vec![(3, 3, 2), (4, 4, 3), (2, 2, 4)]]
    );
    assert!(list.viewport().is_animating());

    for _ in 0..30 {
        now_ms += 16;
        list.tick(now_ms);
    }
    let layout = list.layout();
    let slot = layout.find(&2).map(|it| it.end());
    assert!(slot.is_some_and(|end| end <= layout.viewport_end_offset + 1e-3));
    assert!(approx(list.viewport().scroll_offset(), 50.0));
}

#[test]
fn swipe_past_half_the_width_dismisses() {
    let started: Arc<Mutex<Vec<(u32, f32)>>> = Arc::default();
    let dismissed: Arc<Mutex<Vec<(u32, DismissSwipeDirection)>>> = Arc::default();
    let finished: Arc<Mutex<Vec<u32>>> = Arc::default();
    let (s, d, f) = (started.clone(), dismissed.clone(), finished.clone());
    let callbacks = ListCallbacks::new()
        .with_on_swipe_gesture_start(move |item, delta| s.lock().unwrap().push((*item, delta)))
        .with_on_swipe_gesture_finish(move |item| f.lock().unwrap().push(*item))
        .with_on_swipe_dismiss(move |item, dir| d.lock().unwrap().push((*item, dir)));
    let mut list = list_of(6, ListOptions::new(), callbacks);

    assert_eq!(list.pointer_down(Point::new(10.0, 75.0), true, 0), Some(1));
    list.pointer_move(Point::new(30.0, 76.0), 16);
    assert_eq!(*started.lock().unwrap(), vec![(1, 20.0)]);
    assert!(list.state().is_swiping());
    assert!(!list.state().is_dragging());

    // User scroll and clicks are suppressed while swiping.
    assert_eq!(list.scroll_by(10.0), 0.0);
    assert!(!list.click(Point::new(10.0, 175.0)));

    list.pointer_move(Point::new(200.0, 76.0), 32);
    list.pointer_up(48);
    // Still swiped while flying out.
    assert!(list.state().is_swiping());
    assert_eq!(*finished.lock().unwrap(), vec![1]);

    let mut now_ms = 48;
    while now_ms < 2_000 {
        now_ms += 16;
        list.tick(now_ms);
    }
    assert_eq!(
        *dismissed.lock().unwrap(),
        vec![(1, DismissSwipeDirection::StartToEnd)]
    );
    assert!(!list.state().is_swiping());

    let mut phase = None;
    list.for_each_rendered_item(|item| {
        if *item.key == 1 {
            phase = Some(item.swipe.phase);
        }
    });
    assert_eq!(phase, Some(SwipePhase::Dismissed));

    // Removing the dismissed item clears its state.
    list.set_items(vec![0, 2, 3, 4, 5], now_ms);
    assert!(list.state().item(&1).is_none());
}

#[test]
fn an_item_flying_out_cannot_be_dragged() {
    let dismissed: Arc<Mutex<Vec<u32>>> = Arc::default();
    let d = dismissed.clone();
    let (commits, callbacks) = commit_recorder();
    let callbacks = callbacks.with_on_swipe_dismiss(move |item, _| d.lock().unwrap().push(*item));
    let mut list = list_of(6, ListOptions::new(), callbacks);

    list.pointer_down(Point::new(10.0, 25.0), true, 0);
    list.pointer_move(Point::new(30.0, 26.0), 16);
    list.pointer_move(Point::new(200.0, 26.0), 32);
    list.pointer_up(48);

    // Grabbing the dismissed item again turns into a (suppressed) scroll, not a drag.
    assert_eq!(list.pointer_down(Point::new(200.0, 25.0), true, 64), Some(0));
    list.pointer_move(Point::new(200.0, 45.0), 80);
    list.tick(80);
    assert!(!list.state().is_dragging());
    list.pointer_up(96);

    // No other item can be dragged either until the fly-out completes.
    list.pointer_down(Point::new(10.0, 125.0), true, 112);
    list.pointer_move(Point::new(10.0, 145.0), 128);
    assert!(!list.state().is_dragging());
    list.pointer_up(144);

    let mut now_ms = 144;
    while now_ms < 2_000 {
        now_ms += 16;
        list.tick(now_ms);
    }
    assert_eq!(*dismissed.lock().unwrap(), vec![0]);
    assert!(!list.state().is_swiping());

    list.pointer_down(Point::new(10.0, 125.0), true, now_ms);
    list.pointer_move(Point::new(10.0, 145.0), now_ms + 16);
    assert_eq!(list.state().dragged_item_key(), Some(&2));
    assert!(commits.lock().unwrap().is_empty());
}

#[test]
fn changing_options_keeps_gestures_in_flight() {
    let dismissed: Arc<Mutex<Vec<u32>>> = Arc::default();
    let d = dismissed.clone();
    let (commits, callbacks) = commit_recorder();
    let callbacks = callbacks.with_on_swipe_dismiss(move |item, _| d.lock().unwrap().push(*item));
    let mut list = list_of(6, ListOptions::new(), callbacks);
    let options = || {
        ListOptions::new()
            .with_estimated_item_size(50.0)
            .with_touch_slop(12.0)
    };

    assert_eq!(list.pointer_down(Point::new(10.0, 25.0), true, 0), Some(0));
    list.pointer_move(Point::new(10.0, 35.0), 16);
    list.tick(16);
    assert!(list.state().is_dragging());

    list.set_options(options());
    assert_eq!(list.options().touch_slop, 12.0);
    list.pointer_move(Point::new(10.0, 135.0), 32);
    list.tick(32);
    assert_eq!(order(&list), vec![1, 2, 0, 3, 4, 5]);
    list.pointer_up(48);
    assert_eq!(commits.lock().unwrap().len(), 1);

    let mut now_ms = 48;
    while now_ms < 2_000 {
        now_ms += 16;
        list.tick(now_ms);
    }

    // Swipe the fourth row away and change the options while it flies out.
    assert_eq!(list.pointer_down(Point::new(10.0, 175.0), true, now_ms), Some(3));
    list.pointer_move(Point::new(30.0, 176.0), now_ms + 16);
    list.pointer_move(Point::new(200.0, 176.0), now_ms + 32);
    list.pointer_up(now_ms + 48);
    list.set_options(options());

    let end_ms = now_ms + 2_000;
    while now_ms < end_ms {
        now_ms += 16;
        list.tick(now_ms);
    }
    assert_eq!(*dismissed.lock().unwrap(), vec![3]);
}

#[test]
fn update_captured_before_the_commit_keeps_the_new_order() {
    let (commits, callbacks) = commit_recorder();
    let mut list = list_of(6, ListOptions::new(), callbacks);
    drag_first_item_to_third_slot(&mut list);

    // The owner re-emits its collection before it has seen the reorder.
    list.set_items((0..6).collect(), 40);
    list.pointer_up(48);
    assert_eq!(commits.lock().unwrap().len(), 1);
    assert_eq!(order(&list), vec![1, 2, 0, 3, 4, 5]);
    assert!(
        list.ordered_items()
            .iter()
            .enumerate()
            .all(|(i, it)| it.initial_index == i && it.new_index == i)
    );

    // A collection with other keys is applied as given.
    let (_, callbacks) = commit_recorder();
    let mut list = list_of(6, ListOptions::new(), callbacks);
    drag_first_item_to_third_slot(&mut list);
    list.set_items((0..7).collect(), 40);
    list.pointer_up(48);
    assert_eq!(order(&list), (0..7).collect::<Vec<_>>());
}

#[test]
fn vertical_pointer_moves_off_the_drag_handle_scroll_the_list() {
    let (_, callbacks) = commit_recorder();
    let mut list = list_of(12, ListOptions::new(), callbacks);

    list.pointer_down(Point::new(10.0, 150.0), false, 0);
    list.pointer_move(Point::new(10.0, 100.0), 16);
    assert!(!list.state().is_dragging());
    list.pointer_move(Point::new(10.0, 60.0), 32);
    assert_eq!(list.viewport().scroll_offset(), 40.0);
    list.pointer_up(48);

    let (_, callbacks) = commit_recorder();
    let mut locked = list_of(12, ListOptions::new().with_user_scroll_enabled(false), callbacks);
    assert_eq!(locked.scroll_by(40.0), 0.0);
    locked.pointer_down(Point::new(10.0, 150.0), false, 0);
    locked.pointer_move(Point::new(10.0, 100.0), 16);
    locked.pointer_move(Point::new(10.0, 60.0), 32);
    assert_eq!(locked.viewport().scroll_offset(), 0.0);
}

#[test]
fn user_scroll_is_ignored_while_dragging() {
    let (_, callbacks) = commit_recorder();
    let mut list = list_of(12, ListOptions::new(), callbacks);
    list.pointer_down(Point::new(10.0, 25.0), true, 0);
    list.pointer_move(Point::new(10.0, 35.0), 16);
    assert!(list.state().is_dragging());
    assert_eq!(list.scroll_by(40.0), 0.0);
    list.fling(2_000.0, 32);
    assert!(!list.viewport().is_animating());
}

#[test]
fn drag_disabled_items_do_not_start_a_drag() {
    let (_, callbacks) = commit_recorder();
    let options = ListOptions::new().with_drag_enabled(|key: &u32| *key != 0);
    let mut list = list_of(6, options, callbacks);
    list.pointer_down(Point::new(10.0, 25.0), true, 0);
    list.pointer_move(Point::new(10.0, 45.0), 16);
    assert!(!list.state().is_dragging());
}

#[test]
fn clicks_hit_the_item_under_the_pointer() {
    let clicked: Arc<Mutex<Vec<u32>>> = Arc::default();
    let long: Arc<Mutex<Vec<u32>>> = Arc::default();
    let (c, l) = (clicked.clone(), long.clone());
    let callbacks = ListCallbacks::new()
        .with_on_item_click(move |item| c.lock().unwrap().push(*item))
        .with_on_item_long_click(move |item| l.lock().unwrap().push(*item));
    let mut list = list_of(6, ListOptions::new(), callbacks);

    assert!(list.click(Point::new(10.0, 75.0)));
    assert!(list.long_click(Point::new(10.0, 199.0)));
    assert_eq!(*clicked.lock().unwrap(), vec![1]);
    assert_eq!(*long.lock().unwrap(), vec![3]);

    list.pointer_down(Point::new(10.0, 25.0), true, 0);
    list.pointer_move(Point::new(10.0, 35.0), 16);
    assert!(!list.click(Point::new(10.0, 75.0)));
    assert_eq!(clicked.lock().unwrap().len(), 1);
}

#[test]
fn reverse_layout_hit_tests_from_the_bottom() {
    let clicked: Arc<Mutex<Vec<u32>>> = Arc::default();
    let c = clicked.clone();
    let callbacks =
        ListCallbacks::new().with_on_item_click(move |item| c.lock().unwrap().push(*item));
    let mut list = list_of(6, ListOptions::new().with_reverse_layout(true), callbacks);

    assert!(list.click(Point::new(10.0, 175.0)));
    assert!(list.click(Point::new(10.0, 10.0)));
    assert_eq!(*clicked.lock().unwrap(), vec![0, 3]);

    // Dragging upwards moves the first item towards higher indices.
    list.pointer_down(Point::new(10.0, 175.0), true, 0);
    list.pointer_move(Point::new(10.0, 165.0), 16);
    list.tick(16);
    list.pointer_move(Point::new(10.0, 65.0), 32);
    list.tick(32);
    assert_eq!(order(&list)[..3], [1, 2, 0]);
    assert_eq!(list.state().item(&0).map(|s| s.offset_target()), Some(-10.0));
}

#[test]
fn reveal_animates_new_keys_only() {
    let mut v = Viewport::new(50.0);
    v.set_viewport_size(400.0);
    v.set_order(vec![0u32, 1, 2]);
    let mut reveal = RevealOnAdd::new(v.keys());
    assert!(reveal.is_revealed(&0));

    let keys = vec![0u32, 1, 2, 3];
    v.set_order(keys.clone());
    reveal.on_items_changed(&keys, &v.layout(), &mut v, 0);
    assert!(!v.is_animating());
    assert_eq!(reveal.visual(&3), RevealVisual::HIDDEN);

    // Nothing starts until the width is known.
    reveal.tick(tail(&keys), &v.layout(), &mut v, 0);
    assert_eq!(reveal.visual(&3), RevealVisual::HIDDEN);

    reveal.set_list_width(300.0);
    reveal.tick(tail(&keys), &v.layout(), &mut v, 16);
    assert_eq!(reveal.visual(&3).offset_x, -300.0);
    reveal.tick(tail(&keys), &v.layout(), &mut v, 48);
    let mid = reveal.visual(&3);
    assert!(mid.alpha > 0.0 && mid.alpha < 1.0);
    assert!(mid.offset_x > -300.0);
    assert_eq!(reveal.visual(&0), RevealVisual::REVEALED);

    let mut now_ms = 48;
    while now_ms < 2_000 {
        now_ms += 16;
        reveal.tick(tail(&keys), &v.layout(), &mut v, now_ms);
    }
    assert!(reveal.is_revealed(&3));
    assert!(!reveal.is_animating());
    assert_eq!(reveal.visual(&3), RevealVisual::REVEALED);
}

#[test]
fn reveal_marks_keys_that_leave_the_layout_as_revealed() {
    let mut v = Viewport::new(50.0);
    v.set_viewport_size(100.0);
    v.set_overscan(0);
    v.set_order(vec![0u32, 1]);
    let mut reveal = RevealOnAdd::new(&[0u32]);
    reveal.set_list_width(300.0);

    let keys = v.keys().to_vec();
    reveal.tick(tail(&keys), &v.layout(), &mut v, 0);
    assert!(reveal.is_animating());

    v.set_order(vec![2, 3, 0, 1]);
    let keys = v.keys().to_vec();
    reveal.tick(tail(&keys), &v.layout(), &mut v, 16);
    assert!(reveal.is_revealed(&1));
}

#[test]
fn single_tail_insertion_scrolls_to_the_new_item() {
    let mut v = Viewport::new(50.0);
    v.set_viewport_size(200.0);
    v.set_order((0..6u32).collect());
    let mut reveal = RevealOnAdd::new(v.keys());

    let keys: Vec<u32> = (0..7).collect();
    v.set_order(keys.clone());
    reveal.on_items_changed(&keys, &v.layout(), &mut v, 0);
    assert!(v.is_animating());
    v.tick(300);
    assert_eq!(v.scroll_offset(), 150.0);

    // Two keys at once is not a tail insertion.
    let mut v = Viewport::new(50.0);
    v.set_viewport_size(200.0);
    v.set_order((0..6u32).collect());
    let mut reveal = RevealOnAdd::new(v.keys());
    let keys: Vec<u32> = (0..8).collect();
    v.set_order(keys.clone());
    reveal.on_items_changed(&keys, &v.layout(), &mut v, 0);
    assert!(!v.is_animating());
}

#[test]
fn list_reveal_keeps_the_initial_items_revealed() {
    let (_, callbacks) = commit_recorder();
    let mut list = list_of(3, ListOptions::new(), callbacks).with_reveal_on_add();
    list.set_items(vec![0, 1, 2, 3], 0);
    list.tick(0);

    let mut visuals = Vec::new();
    list.for_each_rendered_item(|item| {
        visuals.push((*item.key, item.reveal == RevealVisual::REVEALED));
    });
    assert_eq!(visuals, vec![(0, true), (1, true), (2, true), (3, false)]);

    let mut now_ms = 0;
    while now_ms < 2_000 {
        now_ms += 16;
        list.tick(now_ms);
    }
    assert!(list.reveal().is_some_and(|r| r.is_revealed(&3)));
}

#[test]
fn prefix_sums_include_the_gap_between_items() {
    let mut f = Fenwick::from_sizes([10.0f32, 20.0, 30.0].into_iter(), 5.0);
    assert_eq!(f.len(), 3);
    assert_eq!(f.prefix_sum(0), 0.0);
    assert_eq!(f.prefix_sum(1), 15.0);
    assert_eq!(f.prefix_sum(2), 40.0);
    assert_eq!(f.total(), 70.0);

    f.add(1, 10.0);
    assert_eq!(f.prefix_sum(2), 50.0);
    assert_eq!(f.prefix_sum(3), 80.0);
    assert_eq!(f.total(), 80.0);
}

#[test]
fn count_below_finds_the_item_containing_an_offset() {
    let f = Fenwick::from_sizes([10.0f32; 8].into_iter(), 0.0);
    assert_eq!(f.count_below(0.0), 0);
    assert_eq!(f.count_below(10.0), 0);
    assert_eq!(f.count_below(10.5), 1);
    assert_eq!(f.count_below(35.0), 3);
    assert_eq!(f.count_below(1_000.0), 8);

    let empty = Fenwick::from_sizes(std::iter::empty(), 0.0);
    assert_eq!(empty.count_below(10.0), 0);
}
