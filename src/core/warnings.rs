//! Warning side channel.
//!
//! The engine never raises to its caller. Failures are reported here instead,
//! exactly once per failure, through whatever sink the host injects.

use std::sync::{Mutex, MutexGuard, PoisonError};

use colored::Colorize;

/// Receiver for engine warnings.
pub trait WarningSink: Send + Sync {
    fn report(&self, message: &str);
}

/// Prints warnings to stderr in cargo style.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl WarningSink for StderrSink {
    fn report(&self, message: &str) {
        eprintln!("{} {}", "warning:".bold().yellow(), message);
    }
}

/// Keeps every reported warning in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere while holding the lock leaves the list intact.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the warnings reported so far, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any warning starts with or contains `needle`.
    pub fn has_warned(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl WarningSink for MemorySink {
    fn report(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
