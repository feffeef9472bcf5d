//! Notification collaborator (toasts). Messages must be safe to show and must
//! never include secrets or tokens.

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    /// Shows a progress toast that stays until dismissed.
    fn loading(&self, message: &str) -> ToastId;
    fn success(&self, message: &str) -> ToastId;
    fn error(&self, message: &str) -> ToastId;
    fn dismiss(&self, id: ToastId);
}

/// Writes toasts to stderr, one line each.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    next_id: AtomicU64,
}

impl TerminalNotifier {
    fn show(&self, kind: ToastKind, message: &str) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let marker = match kind {
            ToastKind::Loading => "...",
            ToastKind::Success => "ok ",
            ToastKind::Error => "err",
        };
        let _ = writeln!(std::io::stderr(), "[{marker}] {message}");
        id
    }
}

impl Notifier for TerminalNotifier {
    fn loading(&self, message: &str) -> ToastId {
        self.show(ToastKind::Loading, message)
    }

    fn success(&self, message: &str) -> ToastId {
        self.show(ToastKind::Success, message)
    }

    fn error(&self, message: &str) -> ToastId {
        self.show(ToastKind::Error, message)
    }

    // Terminal lines cannot be taken back.
    fn dismiss(&self, _id: ToastId) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastEvent {
    Shown {
        id: ToastId,
        kind: ToastKind,
        message: String,
    },
    Dismissed(ToastId),
}

/// Keeps every toast event in memory, for embedding shells and tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    next_id: AtomicU64,
    events: Mutex<Vec<ToastEvent>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn events(&self) -> Vec<ToastEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Toasts shown and not yet dismissed, as `(kind, message)`.
    #[must_use]
    pub fn visible(&self) -> Vec<(ToastKind, String)> {
        let events = self.events();
        let dismissed: Vec<ToastId> = events
            .iter()
            .filter_map(|event| match event {
                ToastEvent::Dismissed(id) => Some(*id),
                ToastEvent::Shown { .. } => None,
            })
            .collect();

        events
            .into_iter()
            .filter_map(|event| match event {
                ToastEvent::Shown { id, kind, message } if !dismissed.contains(&id) => {
                    Some((kind, message))
                }
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ToastEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn show(&self, kind: ToastKind, message: &str) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.record(ToastEvent::Shown {
            id,
            kind,
            message: message.to_string(),
        });
        id
    }
}

impl Notifier for RecordingNotifier {
    fn loading(&self, message: &str) -> ToastId {
        self.show(ToastKind::Loading, message)
    }

    fn success(&self, message: &str) -> ToastId {
        self.show(ToastKind::Success, message)
    }

    fn error(&self, message: &str) -> ToastId {
        self.show(ToastKind::Error, message)
    }

    fn dismiss(&self, id: ToastId) {
        self.record(ToastEvent::Dismissed(id));
    }
}
