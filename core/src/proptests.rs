//! Property-based tests: the cached collection tracks the server.
//!
//! An in-memory server answers the four endpoints. After every settled
//! operation, successful or not, the view's collection must equal what the
//! server would list.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use crate::{
    ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, Todo, TodoClient, TodoId,
    TodoView, Transport, UpdateTodo,
};

const BASE: &str = "http://server";
const MISSING: TodoId = 999_999;

/// Newest-first store with a switch that makes the next request fail.
#[derive(Default)]
struct InMemoryServer {
    next_id: Cell<TodoId>,
    todos: RefCell<Vec<Todo>>,
    fail_next: Cell<bool>,
}

impl InMemoryServer {
    fn list(&self) -> Vec<Todo> {
        self.todos.borrow().clone()
    }

    fn handle(&self, req: &HttpRequest) -> HttpResponse {
        if self.fail_next.replace(false) {
            return respond(500, "server error".to_string());
        }
        let Some(rest) = req.path.strip_prefix(&format!("{BASE}/api/todos/")) else {
            return respond(404, String::new());
        };
        let segments: Vec<&str> = rest.split('/').collect();
        let body = req.body.as_deref().unwrap_or_default();

        match (req.method, segments.as_slice()) {
            (HttpMethod::Get, [""]) => json(200, &*self.todos.borrow()),
            (HttpMethod::Post, ["create", ""]) => match serde_json::from_str::<CreateTodo>(body) {
                Ok(input) => {
                    self.next_id.set(self.next_id.get() + 1);
                    let now = timestamp();
                    let todo = Todo {
                        id: self.next_id.get(),
                        title: input.title,
                        description: input.description,
                        completed: false,
                        created_at: now,
                        updated_at: now,
                    };
                    self.todos.borrow_mut().insert(0, todo.clone());
                    json(201, &todo)
                }
                Err(e) => respond(400, e.to_string()),
            },
            (HttpMethod::Put, [id, ""]) => {
                let mut todos = self.todos.borrow_mut();
                let Some(todo) = find(&mut todos, id) else {
                    return respond(404, String::new());
                };
                match serde_json::from_str::<UpdateTodo>(body) {
                    Ok(input) => {
                        if let Some(completed) = input.completed {
                            todo.completed = completed;
                        }
                        json(200, &*todo)
                    }
                    Err(e) => respond(400, e.to_string()),
                }
            }
            (HttpMethod::Delete, [id, "delete", ""]) => {
                let mut todos = self.todos.borrow_mut();
                let before = todos.len();
                todos.retain(|t| Some(t.id) != id.parse().ok());
                if todos.len() == before {
                    respond(404, String::new())
                } else {
                    respond(200, r#"{"message":"Todo deleted successfully"}"#.to_string())
                }
            }
            _ => respond(404, String::new()),
        }
    }
}

impl Transport for Rc<InMemoryServer> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Ok(self.handle(&request))
    }
}

fn find<'a>(todos: &'a mut [Todo], id: &str) -> Option<&'a mut Todo> {
    let id: TodoId = id.parse().ok()?;
    todos.iter_mut().find(|t| t.id == id)
}

fn timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-01-05T10:00:00Z")
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn respond(status: u16, body: String) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn json<T: serde::Serialize + ?Sized>(status: u16, value: &T) -> HttpResponse {
    respond(status, serde_json::to_string(value).unwrap_or_default())
}

#[derive(Debug, Clone)]
enum Op {
    Create { title: String, description: String },
    /// Index into the current collection, wrapped by its length.
    Toggle(usize),
    Remove(usize),
    ToggleMissing,
    RemoveMissing,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => ("[ a-z]{0,8}", "[a-z]{0,4}")
            .prop_map(|(title, description)| Op::Create { title, description }),
        2 => any::<usize>().prop_map(Op::Toggle),
        2 => any::<usize>().prop_map(Op::Remove),
        1 => Just(Op::ToggleMissing),
        1 => Just(Op::RemoveMissing),
    ]
}

fn pick(view: &TodoView<Rc<InMemoryServer>>, index: usize) -> Option<Todo> {
    let state = view.state();
    if state.todos.is_empty() {
        return None;
    }
    Some(state.todos[index % state.todos.len()].clone())
}

async fn apply(view: &TodoView<Rc<InMemoryServer>>, op: Op) {
    match op {
        Op::Create { title, description } => view.create(title, description).await,
        Op::Toggle(index) => {
            if let Some(todo) = pick(view, index) {
                view.toggle(&todo).await;
            }
        }
        Op::Remove(index) => {
            if let Some(todo) = pick(view, index) {
                view.remove(todo.id).await;
            }
        }
        Op::ToggleMissing => {
            let ghost = Todo {
                id: MISSING,
                title: "ghost".to_string(),
                description: String::new(),
                completed: false,
                created_at: timestamp(),
                updated_at: timestamp(),
            };
            view.toggle(&ghost).await;
        }
        Op::RemoveMissing => view.remove(MISSING).await,
    }
}

proptest! {
    #[test]
    fn cache_matches_server_after_every_op(
        ops in prop::collection::vec((op(), any::<bool>()), 0..24)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let server = Rc::new(InMemoryServer::default());
            let view = TodoView::new(TodoClient::new(BASE), Rc::clone(&server));
            view.load_all().await;
            assert_eq!(view.state().todos, server.list());

            for (op, fail) in ops {
                server.fail_next.set(fail);
                apply(&view, op).await;
                server.fail_next.set(false);
                assert_eq!(view.state().todos, server.list());
            }
        });
    }

    #[test]
    fn summary_matches_collection(
        ops in prop::collection::vec((op(), any::<bool>()), 0..16)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let server = Rc::new(InMemoryServer::default());
            let view = TodoView::new(TodoClient::new(BASE), Rc::clone(&server));
            view.load_all().await;
            for (op, fail) in ops {
                server.fail_next.set(fail);
                apply(&view, op).await;
                server.fail_next.set(false);

                let crate::Screen::Loaded(page) = view.screen() else {
                    panic!("still loading");
                };
                let state = view.state();
                match page.summary {
                    Some(summary) => {
                        assert_eq!(summary.total, state.todos.len());
                        assert_eq!(summary.completed, state.todos.iter().filter(|t| t.completed).count());
                    }
                    None => assert!(state.todos.is_empty()),
                }
            }
        });
    }
}
