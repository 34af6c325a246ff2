//! The async todo view component.
//!
//! # Design
//! `TodoView` ties a `TodoClient`, a host `Transport` and a `TodoStore`
//! together. Each operation builds a request, awaits the transport, parses
//! the response and only then touches the store. The store's cells are never
//! borrowed across an `.await`, so several operations can be in flight at
//! once on a single-threaded executor, and listeners may read the view while
//! they redraw.
//!
//! Failures of every kind (transport, status, body) are handled the same
//! way: the local mutation is skipped and a warning is logged. Responses are
//! applied in arrival order with no per-item sequencing, so when two requests
//! for the same item race, the last response to arrive wins.

use std::cell::Ref;

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::store::{TodoState, TodoStore};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};
use crate::view::{render, Screen};

pub struct TodoView<T> {
    client: TodoClient,
    transport: T,
    store: TodoStore,
}

impl<T: Transport> TodoView<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            store: TodoStore::new(),
        }
    }

    /// Register a redraw callback; see [`TodoStore::subscribe`].
    pub fn subscribe(&self, listener: impl Fn(&TodoState) + 'static) {
        self.store.subscribe(listener);
    }

    pub fn state(&self) -> Ref<'_, TodoState> {
        self.store.state()
    }

    pub fn screen(&self) -> Screen {
        render(&self.state())
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.store.set_title(title);
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.store.set_description(description);
    }

    /// Fetch the whole collection. Intended to run once, on activation.
    pub async fn load_all(&self) {
        let todos = match self.fetch_all().await {
            Ok(todos) => {
                debug!(count = todos.len(), "loaded todos");
                todos
            }
            Err(error) => {
                warn!(%error, "error fetching todos");
                Vec::new()
            }
        };
        self.store.finish_loading(todos);
    }

    /// Create from whatever is currently in the input fields.
    pub async fn submit(&self) {
        let (title, description) = {
            let state = self.state();
            (state.title.clone(), state.description.clone())
        };
        self.create(title, description).await;
    }

    pub async fn create(&self, title: String, description: String) {
        if title.trim().is_empty() {
            return;
        }
        let input = CreateTodo { title, description };
        match self.send_create(&input).await {
            Ok(todo) => {
                debug!(id = todo.id, "created todo");
                self.store.prepend(todo);
            }
            Err(error) => warn!(%error, "error creating todo"),
        }
    }

    /// Flip `completed` on the server for the item as the caller last saw it.
    pub async fn toggle(&self, todo: &Todo) {
        let update = UpdateTodo::completed(!todo.completed);
        match self.send_update(todo.id, &update).await {
            Ok(updated) => {
                let id = updated.id;
                if !self.store.replace(updated) {
                    debug!(id, "toggle response for item no longer present");
                }
            }
            Err(error) => warn!(id = todo.id, %error, "error updating todo"),
        }
    }

    pub async fn remove(&self, id: TodoId) {
        match self.send_delete(id).await {
            Ok(()) => {
                if !self.store.remove(id) {
                    debug!(id, "delete response for item no longer present");
                }
            }
            Err(error) => warn!(id, %error, "error deleting todo"),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.transport.execute(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    async fn send_create(&self, input: &CreateTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    async fn send_update(&self, id: TodoId, input: &UpdateTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    async fn send_delete(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_todo(id)).await?;
        self.client.parse_delete_todo(response)
    }
}
