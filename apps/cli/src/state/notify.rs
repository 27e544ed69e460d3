//! # Notices
//!
//! The fixed set of user-facing messages the cart store can raise, and the
//! notifiers that surface them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::state::ports::Notifier;

/// A user-facing cart failure.
///
/// ```text
/// Operation           Failure                         Notice
/// ─────────           ───────                         ──────
/// add / update        stock ceiling exceeded          OutOfStock
/// add                 inventory lookup failed         AddFailed
/// remove              product not in cart             RemoveFailed
/// update              lookup failed / not in cart     UpdateFailed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartNotice {
    OutOfStock,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl CartNotice {
    /// The message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            CartNotice::OutOfStock => "requested quantity out of stock",
            CartNotice::AddFailed => "error adding product",
            CartNotice::RemoveFailed => "error removing product",
            CartNotice::UpdateFailed => "error changing product quantity",
        }
    }
}

impl std::fmt::Display for CartNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

// =============================================================================
// Console
// =============================================================================

/// Writes notices to stderr and counts them.
///
/// The count drives the CLI exit status.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    fired: AtomicUsize,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notices raised so far.
    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        self.fired.fetch_add(1, Ordering::SeqCst);
        eprintln!("error: {}", message);
    }
}

// =============================================================================
// Recording
// =============================================================================

/// Keeps every message in order. For embedding UIs that poll, and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages raised so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Drains the recorded messages.
    pub fn take(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut m| std::mem::take(&mut *m))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            CartNotice::OutOfStock.message(),
            "requested quantity out of stock"
        );
        assert_eq!(CartNotice::AddFailed.to_string(), "error adding product");
        assert_eq!(CartNotice::RemoveFailed.message(), "error removing product");
        assert_eq!(
            CartNotice::UpdateFailed.message(),
            "error changing product quantity"
        );
    }

    #[test]
    fn test_console_notifier_counts() {
        let notifier = ConsoleNotifier::new();
        assert_eq!(notifier.fired(), 0);

        notifier.error("error adding product");
        notifier.error("error adding product");
        assert_eq!(notifier.fired(), 2);
    }

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.error("a");
        notifier.error("b");

        assert_eq!(notifier.messages(), vec!["a", "b"]);
        assert_eq!(notifier.take(), vec!["a", "b"]);
        assert!(notifier.messages().is_empty());
    }
}
