//! Render model for the todo view.
//!
//! `render` turns a `TodoState` into a `Screen`: a plain description of what
//! is on screen, independent of any particular output device. The `Display`
//! impl draws it as terminal text.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::store::TodoState;
use crate::types::TodoId;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No todos yet. Add one to get started!";
pub const HEADING: &str = "My Todos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Loaded(Page),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub form: Form,
    pub body: Body,
    /// Absent exactly when the collection is empty.
    pub summary: Option<Summary>,
}

/// Current contents of the two input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    Items(Vec<ItemView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    /// Drives both the toggle glyph and the strike-through.
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub completed: usize,
    pub total: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} completed", self.completed, self.total)
    }
}

pub fn render(state: &TodoState) -> Screen {
    if state.loading {
        return Screen::Loading;
    }

    let form = Form {
        title: state.title.clone(),
        description: state.description.clone(),
    };

    if state.todos.is_empty() {
        return Screen::Loaded(Page {
            form,
            body: Body::Empty,
            summary: None,
        });
    }

    let items = state
        .todos
        .iter()
        .map(|t| ItemView {
            id: t.id,
            title: t.title.clone(),
            description: (!t.description.is_empty()).then(|| t.description.clone()),
            completed: t.completed,
            created_at: t.created_at,
        })
        .collect();

    Screen::Loaded(Page {
        form,
        body: Body::Items(items),
        summary: Some(Summary {
            completed: state.completed_count(),
            total: state.todos.len(),
        }),
    })
}

/// Short numeric date in the given zone, e.g. `1/5/2025`.
pub fn format_date<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format("%-m/%-d/%Y").to_string()
}

/// Strike text through with U+0336 combining overlays.
pub fn strike(text: &str) -> String {
    text.chars().flat_map(|c| [c, '\u{0336}']).collect()
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Loading => writeln!(f, "{LOADING_MESSAGE}"),
            Screen::Loaded(page) => fmt::Display::fmt(page, f),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADING}")?;
        writeln!(f, "  title:       {}", self.form.title)?;
        writeln!(f, "  description: {}", self.form.description)?;
        writeln!(f)?;

        match &self.body {
            Body::Empty => writeln!(f, "{EMPTY_MESSAGE}")?,
            Body::Items(items) => {
                for (n, item) in items.iter().enumerate() {
                    let mark = if item.completed { "[x]" } else { "[ ]" };
                    let title = if item.completed {
                        strike(&item.title)
                    } else {
                        item.title.clone()
                    };
                    writeln!(f, "{:>3}. {mark} {title}  (rm {})", n + 1, n + 1)?;
                    if let Some(description) = &item.description {
                        writeln!(f, "        {description}")?;
                    }
                    writeln!(f, "        {}", format_date(&item.created_at, &Local))?;
                }
            }
        }

        if let Some(summary) = &self.summary {
            writeln!(f)?;
            writeln!(f, "{summary}")?;
        }
        Ok(())
    }
}
