//! Client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), keeps a client-side cache of
//! the server collection, and renders it. The host plugs in a `Transport`
//! that performs the actual HTTP round-trip.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only `base_url` and an optional
//!   CSRF token.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoView` drives the client through a `Transport` and applies only
//!   server-confirmed results to its `TodoStore`. Nothing is optimistic.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod component;
pub mod error;
pub mod http;
pub mod store;
pub mod types;
pub mod view;

#[cfg(test)]
mod proptests;

pub use client::TodoClient;
pub use component::TodoView;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use store::{TodoState, TodoStore};
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo};
pub use view::{render, Screen};
