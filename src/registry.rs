//! Screen Registry - the live screen stack.
//!
//! # Problem
//! The host UI framework owns screen lifecycles. Application code still
//! needs to answer "what is on screen right now?" and "what is on top?",
//! and needs bulk teardown primitives ("close everything but login",
//! "close everything and exit"). Asking the framework each time is racy
//! and framework-specific.
//!
//! # Solution
//! A thread-safe registry that mirrors externally-driven lifecycle state:
//! the host reports created/destroyed events, the registry keeps an
//! ordered stack of live [`ScreenHandle`]s (creation order, last = top)
//! and exposes queries and close commands on it.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  host framework callbacks          ScreenRegistry              │
//! │                                                                 │
//! │  on_screen_created ──────────▶  ┌──────────────────────────┐   │
//! │  on_screen_destroyed ────────▶  │ Mutex<Vec<ScreenHandle>> │   │
//! │   (via LifecycleBridge)         │  bottom ............ top │   │
//! │                                 └──────────────────────────┘   │
//! │                                       │                        │
//! │  queries: contains / count /          ▼                        │
//! │  current / find_by_kind         close commands snapshot the    │
//! │                                 targets under the lock, then   │
//! │  commands: close_current /      call request_close() with the  │
//! │  close_by_kind / close_all /    lock RELEASED                  │
//! │  close_all_except                                              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Locking rule
//!
//! A close capability may synchronously call back into
//! `notify_destroyed` (the host delivers the destroy event on the same
//! thread). Every close path therefore captures its targets under the
//! lock, releases it, and only then invokes capabilities. Nothing in this
//! module holds the lock across external code.
//!
//! # Ownership
//!
//! The registry holds non-owning handles. It never constructs or destroys
//! screens; close commands only *request* closure and reconcile its own
//! bookkeeping. A failing close capability is logged and swallowed - the
//! bulk-close paths are exit/cleanup primitives and must not get stuck.

use parking_lot::Mutex;

use crate::config::RegistryConfig;
use crate::error::ResultExt;
use crate::handle::{ScreenHandle, ScreenKind, ScreenSnapshot};
use crate::logging;

/// Thread-safe registry of live screens, ordered by creation.
///
/// Explicitly constructed and shared (typically as `Arc<ScreenRegistry>`)
/// from the application's composition root. Running exactly one instance
/// per process is a deployment convention, not enforced here.
pub struct ScreenRegistry {
    /// Bottom-to-top stack of live handles; last element is "current".
    stack: Mutex<Vec<ScreenHandle>>,
    config: RegistryConfig,
}

impl ScreenRegistry {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            stack: Mutex::new(Vec::new()),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Lifecycle notifications
    // ------------------------------------------------------------------

    /// Track a newly-created screen by appending it to the stack.
    ///
    /// A handle id that is already tracked is ignored with a warning: a
    /// handle enters the stack at most once.
    pub fn notify_created(&self, handle: ScreenHandle) {
        let depth = {
            let mut stack = self.stack.lock();
            if stack.iter().any(|h| h.id() == handle.id()) {
                logging::log(
                    "WARN",
                    &format!(
                        "Screen {} ({}) already tracked, ignoring duplicate create",
                        handle.id(),
                        handle.kind()
                    ),
                );
                return;
            }
            logging::log(
                "SCREEN",
                &format!("Tracking screen {} ({})", handle.id(), handle.kind()),
            );
            stack.push(handle);
            stack.len()
        };

        if depth > self.config.warn_depth {
            tracing::warn!(
                depth,
                warn_depth = self.config.warn_depth,
                "Screen stack unusually deep; destroy notifications may be missing"
            );
        }
    }

    /// Forget a destroyed screen. Identity match by id; handles of the
    /// same kind are untouched. No-op if the handle is not tracked.
    pub fn notify_destroyed(&self, handle: &ScreenHandle) {
        let removed = {
            let mut stack = self.stack.lock();
            let before = stack.len();
            stack.retain(|h| h.id() != handle.id());
            stack.len() != before
        };

        if removed {
            logging::log(
                "SCREEN",
                &format!("Untracked screen {} ({})", handle.id(), handle.kind()),
            );
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Whether any live screen has the given kind.
    pub fn contains(&self, kind: &ScreenKind) -> bool {
        self.stack.lock().iter().any(|h| h.kind() == kind)
    }

    /// Number of live screens.
    pub fn count(&self) -> usize {
        self.stack.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.lock().is_empty()
    }

    /// The top (most recently created, not yet removed) screen.
    pub fn current(&self) -> Option<ScreenHandle> {
        self.stack.lock().last().cloned()
    }

    /// Kind of the current screen.
    pub fn current_kind(&self) -> Option<ScreenKind> {
        self.stack.lock().last().map(|h| h.kind().clone())
    }

    /// Kind name of the current screen.
    pub fn current_kind_name(&self) -> Option<String> {
        self.current_kind().map(|kind| kind.as_str().to_string())
    }

    /// Earliest-created live screen of the given kind.
    ///
    /// Scans from the bottom of the stack, so the oldest match wins even
    /// when several screens of the kind are live.
    pub fn find_by_kind(&self, kind: &ScreenKind) -> Option<ScreenHandle> {
        self.stack.lock().iter().find(|h| h.kind() == kind).cloned()
    }

    /// Point-in-time record of the stack, bottom to top.
    pub fn snapshot(&self) -> Vec<ScreenSnapshot> {
        self.stack.lock().iter().map(|h| h.snapshot()).collect()
    }

    /// Pretty-printed JSON of [`snapshot`](Self::snapshot), for debug surfaces.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    // ------------------------------------------------------------------
    // Close commands
    // ------------------------------------------------------------------

    /// Close the current screen: remove it from the stack and ask it to
    /// terminate. No-op on an empty stack.
    ///
    /// Removal does not depend on the capability outcome; a failing close
    /// is logged and the handle stays untracked.
    pub fn close_current(&self) {
        let handle = self.stack.lock().pop();

        if let Some(handle) = handle {
            logging::log(
                "SCREEN",
                &format!("Closing current screen {} ({})", handle.id(), handle.kind()),
            );
            handle.request_close().log_err();
        }
    }

    /// Close every live screen of the given kind, bottom to top. Each is
    /// removed from the stack and then asked to terminate.
    pub fn close_by_kind(&self, kind: &ScreenKind) {
        let to_close: Vec<ScreenHandle> = {
            let mut stack = self.stack.lock();
            let mut removed = Vec::new();
            stack.retain(|h| {
                if h.kind() == kind {
                    removed.push(h.clone());
                    false
                } else {
                    true
                }
            });
            removed
        };

        if to_close.is_empty() {
            return;
        }

        logging::log(
            "SCREEN",
            &format!("Closing {} screen(s) of kind {}", to_close.len(), kind),
        );

        for handle in &to_close {
            handle.request_close().log_err();
        }
    }

    /// Ask every live screen whose kind differs from `excluded` to close,
    /// skipping screens that report themselves already finishing.
    ///
    /// Unlike [`close_by_kind`](Self::close_by_kind) and
    /// [`close_all`](Self::close_all), this does NOT remove anything from
    /// the stack itself: bookkeeping stays consistent through the normal
    /// destroy notifications the closes will trigger. Callers that need
    /// the stack emptied immediately want `close_all` instead.
    pub fn close_all_except(&self, excluded: &ScreenKind) {
        let candidates: Vec<ScreenHandle> = self
            .stack
            .lock()
            .iter()
            .filter(|h| h.kind() != excluded)
            .cloned()
            .collect();

        for handle in &candidates {
            if handle.is_finishing() {
                logging::log(
                    "SCREEN",
                    &format!("Skipping already-finishing screen {}", handle.id()),
                );
                continue;
            }
            handle.request_close().log_err();
        }
    }

    /// Ask every live screen to close, bottom to top, then clear tracking
    /// unconditionally. Does not wait for destroy notifications - this is
    /// the full-application-exit primitive.
    pub fn close_all(&self) {
        let drained = std::mem::take(&mut *self.stack.lock());

        if drained.is_empty() {
            logging::log("SCREEN", "No screens to close");
            return;
        }

        logging::log(
            "SCREEN",
            &format!("Closing all {} screen(s)", drained.len()),
        );

        for handle in &drained {
            handle.request_close().log_err();
        }

        logging::log("SCREEN", "All screens closed and tracking cleared");
    }
}

impl Default for ScreenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
