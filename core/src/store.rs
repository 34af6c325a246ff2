//! Client-side state for the todo view.
//!
//! # Design
//! `TodoState` is plain data: the cached collection, the two pending form
//! inputs and the initial-load flag. `TodoStore` wraps it and notifies
//! subscribers after every mutation so the host can redraw. The store only
//! ever applies server-confirmed items; there are no optimistic writes.

use std::cell::{Ref, RefCell};
use std::fmt;

use crate::types::{Todo, TodoId};

/// Snapshot of everything the view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoState {
    /// Cached collection, most recently created first.
    pub todos: Vec<Todo>,
    pub title: String,
    pub description: String,
    /// True until the initial fetch settles.
    pub loading: bool,
}

impl Default for TodoState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            title: String::new(),
            description: String::new(),
            loading: true,
        }
    }
}

impl TodoState {
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }
}

type Listener = Box<dyn Fn(&TodoState)>;

/// Observable container around `TodoState`.
///
/// State and listeners sit in separate cells. A mutation finishes and
/// releases its borrow before any listener runs, so a listener may read the
/// store (or anything that reads it) while being notified.
#[derive(Default)]
pub struct TodoStore {
    state: RefCell<TodoState>,
    listeners: RefCell<Vec<Listener>>,
}

impl fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, TodoState> {
        self.state.borrow()
    }

    /// Register a callback invoked with the new state after every mutation.
    pub fn subscribe(&self, listener: impl Fn(&TodoState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.borrow_mut().title = title.into();
        self.notify();
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.state.borrow_mut().description = description.into();
        self.notify();
    }

    /// Replace the collection with the server's and end the loading phase.
    pub fn finish_loading(&self, todos: Vec<Todo>) {
        {
            let mut state = self.state.borrow_mut();
            state.todos = todos;
            state.loading = false;
        }
        self.notify();
    }

    /// Put a freshly created item first and clear both inputs.
    pub fn prepend(&self, todo: Todo) {
        {
            let mut state = self.state.borrow_mut();
            state.todos.insert(0, todo);
            state.title.clear();
            state.description.clear();
        }
        self.notify();
    }

    /// Swap in the server representation of an item. Returns `false` (and
    /// does not notify) when no local item carries that id.
    pub fn replace(&self, todo: Todo) -> bool {
        let replaced = match self.state.borrow_mut().todos.iter_mut().find(|t| t.id == todo.id) {
            Some(slot) => {
                *slot = todo;
                true
            }
            None => false,
        };
        if replaced {
            self.notify();
        }
        replaced
    }

    /// Drop the item with `id`. Returns `false` when it was not present.
    pub fn remove(&self, id: TodoId) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            let before = state.todos.len();
            state.todos.retain(|t| t.id != id);
            state.todos.len() != before
        };
        if removed {
            self.notify();
        }
        removed
    }

    /// Listeners get a snapshot, so they may also write back into the store.
    fn notify(&self) {
        let snapshot = self.state.borrow().clone();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use chrono::{TimeZone, Utc};

    use super::*;

    pub(crate) fn todo(id: TodoId, title: &str, completed: bool) -> Todo {
        let at = Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap();
        Todo {
            id,
            title: title.to_string(),
            description: String::new(),
            completed,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn new_store_is_loading_and_empty() {
        let store = TodoStore::new();
        assert!(store.state().loading);
        assert!(store.state().todos.is_empty());
    }

    #[test]
    fn finish_loading_replaces_collection() {
        let store = TodoStore::new();
        store.finish_loading(vec![todo(2, "b", false), todo(1, "a", true)]);
        assert!(!store.state().loading);
        assert_eq!(store.state().todos.len(), 2);
        assert_eq!(store.state().completed_count(), 1);
    }

    #[test]
    fn prepend_puts_item_first_and_clears_inputs() {
        let store = TodoStore::new();
        store.finish_loading(vec![todo(1, "old", false)]);
        store.set_title("new");
        store.set_description("details");
        store.prepend(todo(2, "new", false));
        assert_eq!(store.state().todos[0].id, 2);
        assert!(store.state().title.is_empty());
        assert!(store.state().description.is_empty());
    }

    #[test]
    fn replace_matches_by_id_only() {
        let store = TodoStore::new();
        store.finish_loading(vec![todo(1, "a", false), todo(2, "b", false)]);
        assert!(store.replace(todo(2, "b", true)));
        let completed: Vec<bool> = store.state().todos.iter().map(|t| t.completed).collect();
        assert_eq!(completed, vec![false, true]);
        assert!(!store.replace(todo(9, "ghost", true)));
        assert_eq!(store.state().todos.len(), 2);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let store = TodoStore::new();
        store.finish_loading(vec![todo(1, "a", false)]);
        assert!(!store.remove(5));
        assert!(store.remove(1));
        assert!(store.state().todos.is_empty());
    }

    #[test]
    fn listeners_fire_on_each_mutation() {
        let calls = Rc::new(Cell::new(0));
        let store = TodoStore::new();
        let seen = Rc::clone(&calls);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        store.finish_loading(Vec::new());
        store.set_title("x");
        store.prepend(todo(1, "x", false));
        store.replace(todo(1, "x", true));
        store.remove(1);
        assert_eq!(calls.get(), 5);

        // no-ops stay silent
        store.replace(todo(1, "x", false));
        store.remove(1);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn listener_can_read_and_write_the_store() {
        let store = Rc::new(TodoStore::new());
        let seen = Rc::new(Cell::new(0));
        let weak = Rc::downgrade(&store);
        let counter = Rc::clone(&seen);
        store.subscribe(move |snapshot| {
            let store = weak.upgrade().unwrap();
            assert_eq!(*store.state(), *snapshot);
            counter.set(store.state().todos.len());
            if snapshot.title == "echo" && snapshot.description.is_empty() {
                store.set_description("echoed");
            }
        });

        store.finish_loading(vec![todo(1, "a", false)]);
        assert_eq!(seen.get(), 1);
        store.set_title("echo");
        assert_eq!(store.state().description, "echoed");
    }
}
