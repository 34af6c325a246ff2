//! Terminal front end for the todo view.
//!
//! # Design
//! The view runs on a current-thread tokio runtime inside a `LocalSet`, so
//! the `!Send` `TodoView` can be shared through `Rc` and every user command
//! becomes its own local task. A dedicated thread owns the line editor and
//! forwards lines over a channel. Redraws are driven by the store's
//! subscription, never by the command loop.

pub mod command;
pub mod config;
pub mod transport;

pub use command::{Command, CommandError};
pub use config::Config;
pub use transport::UreqTransport;
