//! Command-line configuration for the `todo` binary.

use clap::Parser;
use todo_core::TodoClient;

/// Terminal to-do list backed by the todo REST API
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Origin the `/api/todos/` endpoints are served from
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub base_url: String,

    /// CSRF token sent with every mutating request
    #[arg(long)]
    pub csrf_token: Option<String>,

    /// Log request outcomes at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn client(&self) -> TodoClient {
        let client = TodoClient::new(&self.base_url);
        match &self.csrf_token {
            Some(token) => client.with_csrf_token(token.clone()),
            None => client,
        }
    }

    /// `tracing_subscriber::EnvFilter` directive for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "todo_core=debug,todo_app=debug,warn"
        } else {
            "warn"
        }
    }
}
