//! Programmatic navigation and link rendering. Route configuration lives with
//! the shell; this module only knows the paths the auth views link to.

use std::sync::Mutex;

pub mod paths {
    /// Authenticated root view.
    pub const ROOT: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
}

/// Routing collaborator used by views to change location.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: &str);

    /// Current location.
    fn location(&self) -> String;
}

/// In-memory navigation history. Starts at the location it was created with.
#[derive(Debug)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    #[must_use]
    pub fn new(start: &str) -> Self {
        Self {
            entries: Mutex::new(vec![start.to_string()]),
        }
    }

    /// Every location visited, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(paths::LOGIN)
    }
}

impl Navigator for History {
    fn navigate(&self, to: &str) {
        tracing::debug!(to, "navigate");
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(to.to_string());
        }
    }

    fn location(&self) -> String {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.last().cloned())
            .unwrap_or_else(|| paths::ROOT.to_string())
    }
}

/// A rendered link: target path plus label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub to: &'static str,
    pub label: &'static str,
}

impl Link {
    #[must_use]
    pub const fn new(to: &'static str, label: &'static str) -> Self {
        Self { to, label }
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} <{}>", self.label, self.to)
    }
}
