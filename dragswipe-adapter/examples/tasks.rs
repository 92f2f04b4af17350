use std::sync::{Arc, Mutex};

use dragswipe::{
    AllowedSwipeDirections, DismissSwipeDirection, ListOptions, OrderedItem, Point,
};
use dragswipe_adapter::{DragDropSwipeList, ListCallbacks};

const TASK_POOL: &[&str] = &[
    "Do laundry",
    "Walk the dog",
    "Find missing socks",
    "Water invisible plants",
    "Bake cookies",
    "Solve a puzzle",
    "Talk to the plants",
    "Clean the fridge",
    "Try a new recipe",
    "Organize the chaos drawer",
];

#[derive(Clone, Debug, PartialEq, Eq)]
struct Task {
    id: u32,
    index: usize,
    title: String,
    is_locked: bool,
    is_completed: bool,
}

#[derive(Debug)]
struct TasksInner {
    tasks: Vec<Task>,
    next_id: u32,
}

impl TasksInner {
    fn reindex_from(&mut self, start: usize) {
        for (index, task) in self.tasks.iter_mut().enumerate().skip(start) {
            task.index = index;
        }
    }
}

/// In-memory stand-in for a task store.
#[derive(Debug)]
struct TasksRepository {
    inner: Mutex<TasksInner>,
}

impl TasksRepository {
    fn new(initial: u32) -> Self {
        let tasks = (0..initial).map(|id| new_task(id, id as usize)).collect();
        Self {
            inner: Mutex::new(TasksInner {
                tasks,
                next_id: initial,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TasksInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn get(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    fn find(&self, id: u32) -> Option<Task> {
        self.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Adds a new task at the end, or re-adds a removed one at its old index.
    fn add(&self, task: Option<Task>) {
        let mut inner = self.lock();
        match task {
            None => {
                let task = new_task(inner.next_id, inner.tasks.len());
                inner.tasks.push(task);
                inner.next_id += 1;
            }
            Some(mut task) if task.index >= inner.tasks.len() => {
                task.index = inner.tasks.len();
                inner.tasks.push(task);
            }
            Some(task) => {
                let at = task.index;
                inner.tasks.insert(at, task);
                inner.reindex_from(at + 1);
            }
        }
    }

    /// Writes back tasks by id, then sorts by their (possibly new) index.
    fn update(&self, updated: &[Task]) {
        let mut inner = self.lock();
        for task in updated {
            if let Some(slot) = inner.tasks.iter_mut().find(|t| t.id == task.id) {
                *slot = task.clone();
            }
        }
        inner.tasks.sort_by_key(|t| t.index);
        inner.reindex_from(0);
    }

    fn toggle_complete(&self, id: u32) {
        if let Some(task) = self.lock().tasks.iter_mut().find(|t| t.id == id) {
            task.is_completed = !task.is_completed;
        }
    }

    fn toggle_locked(&self, id: u32) {
        if let Some(task) = self.lock().tasks.iter_mut().find(|t| t.id == id) {
            task.is_locked = !task.is_locked;
        }
    }

    fn archive(&self, id: u32) {
        // Nothing keeps archived tasks around here.
        self.delete(id);
    }

    fn delete(&self, id: u32) {
        let mut inner = self.lock();
        if let Some(position) = inner.tasks.iter().position(|t| t.id == id) {
            inner.tasks.remove(position);
            inner.reindex_from(position);
        }
    }

    fn is_locked(&self, id: u32) -> bool {
        self.find(id).is_some_and(|t| t.is_locked)
    }
}

fn new_task(id: u32, index: usize) -> Task {
    Task {
        id,
        index,
        title: TASK_POOL[id as usize % TASK_POOL.len()].to_string(),
        is_locked: false,
        is_completed: false,
    }
}

/// What the list asked for during the last frame; applied to the repository afterwards.
#[derive(Debug)]
enum Action {
    Reordered(Vec<OrderedItem<Task>>),
    Dismissed(Task, DismissSwipeDirection),
    ToggleComplete(u32),
    ToggleLocked(u32),
}

fn push(actions: &Mutex<Vec<Action>>, action: Action) {
    if let Ok(mut queue) = actions.lock() {
        queue.push(action);
    }
}

fn print_tasks(label: &str, tasks: &[Task]) {
    println!("{label}:");
    for t in tasks {
        let flags = match (t.is_completed, t.is_locked) {
            (true, true) => " [done, locked]",
            (true, false) => " [done]",
            (false, true) => " [locked]",
            (false, false) => "",
        };
        println!("  #{} {}{}", t.index, t.title, flags);
    }
}

fn main() {
    // Example: a task list backed by a repository. The list never mutates the repository itself;
    // it reports actions, the app applies them, and feeds the new collection back.
    //
    // An adapter would translate real pointer events and call tick(now_ms) every frame.
    let repo = Arc::new(TasksRepository::new(6));
    let actions: Arc<Mutex<Vec<Action>>> = Arc::default();

    let callbacks = ListCallbacks::new()
        .with_on_indices_changed_via_drag_and_drop({
            let actions = actions.clone();
            move |changed: &[OrderedItem<Task>]| push(&actions, Action::Reordered(changed.to_vec()))
        })
        .with_on_swipe_dismiss({
            let actions = actions.clone();
            move |task: &Task, dir| push(&actions, Action::Dismissed(task.clone(), dir))
        })
        .with_on_item_click({
            let actions = actions.clone();
            move |task: &Task| push(&actions, Action::ToggleComplete(task.id))
        })
        .with_on_item_long_click({
            let actions = actions.clone();
            move |task: &Task| push(&actions, Action::ToggleLocked(task.id))
        });

    let options = ListOptions::new()
        .with_estimated_item_size(56.0)
        .with_item_spacing(8.0)
        .with_content_padding(16.0, 16.0)
        .with_drag_enabled({
            let repo = repo.clone();
            move |id: &u32| !repo.is_locked(*id)
        })
        .with_allowed_swipe_directions({
            let repo = repo.clone();
            move |id: &u32| {
                if repo.is_locked(*id) {
                    AllowedSwipeDirections::None
                } else {
                    AllowedSwipeDirections::All
                }
            }
        });

    let mut list = DragDropSwipeList::new(repo.get(), |t: &Task| t.id, options, callbacks)
        .with_reveal_on_add();
    list.set_viewport_size(400.0);
    list.set_list_width(360.0);

    let mut now_ms = 0u64;
    let frame = |list: &mut DragDropSwipeList<Task, u32>, now_ms: &mut u64| {
        *now_ms += 16;
        list.tick(*now_ms);
        let pending = actions
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default();
        if pending.is_empty() {
            return;
        }
        for action in pending {
            println!("action: {action:?}");
            match action {
                Action::Reordered(changed) => {
                    let tasks: Vec<Task> = changed
                        .into_iter()
                        .map(|it| Task {
                            index: it.new_index,
                            ..it.value
                        })
                        .collect();
                    repo.update(&tasks);
                }
                Action::Dismissed(task, DismissSwipeDirection::StartToEnd) => repo.delete(task.id),
                Action::Dismissed(task, DismissSwipeDirection::EndToStart) => {
                    repo.archive(task.id)
                }
                Action::ToggleComplete(id) => repo.toggle_complete(id),
                Action::ToggleLocked(id) => repo.toggle_locked(id),
            }
        }
        list.set_items(repo.get(), *now_ms);
    };

    print_tasks("initial", &repo.get());

    // Item rows start at 16 (padding) and repeat every 64px (56 + 8 spacing).
    // Drag the first task down by three rows.
    list.pointer_down(Point::new(40.0, 40.0), true, now_ms);
    let mut y = 40.0;
    while y < 232.0 {
        y += 12.0;
        list.pointer_move(Point::new(40.0, y), now_ms);
        frame(&mut list, &mut now_ms);
    }
    list.pointer_up(now_ms);
    for _ in 0..40 {
        frame(&mut list, &mut now_ms);
    }
    print_tasks("after drag", &repo.get());

    // Complete the second row and lock the third.
    list.click(Point::new(40.0, 100.0));
    list.long_click(Point::new(40.0, 170.0));
    frame(&mut list, &mut now_ms);

    // Swipe the first row to the end: delete.
    list.pointer_down(Point::new(20.0, 40.0), true, now_ms);
    for x in [40.0, 120.0, 220.0, 300.0] {
        list.pointer_move(Point::new(x, 41.0), now_ms);
        frame(&mut list, &mut now_ms);
    }
    list.pointer_up(now_ms);
    for _ in 0..60 {
        frame(&mut list, &mut now_ms);
    }

    // Add a new task; it is revealed with an entrance animation.
    repo.add(None);
    list.set_items(repo.get(), now_ms);
    for _ in 0..60 {
        frame(&mut list, &mut now_ms);
    }

    print_tasks("final", &repo.get());
    println!(
        "scroll_offset={} dragging={} swiping={}",
        list.viewport().scroll_offset(),
        list.state().is_dragging(),
        list.state().is_swiping()
    );
}
