//! Screen handles: identity, type tags, and the close capability.
//!
//! A [`ScreenHandle`] is a non-owning reference to a live screen surface.
//! The registry never creates or destroys the underlying screen; it only
//! tracks handles and may *ask* a screen to close through its
//! [`CloseScreen`] capability.
//!
//! Identity is by [`ScreenId`], never by kind: two live screens of the same
//! [`ScreenKind`] are distinct entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::ScreenError;

/// Process-wide id source. Ids are never reused, so identity matching
/// cannot alias even across multiple registries in the same process.
static NEXT_SCREEN_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of one live screen instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(u64);

impl ScreenId {
    fn next() -> Self {
        Self(NEXT_SCREEN_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A screen's type identity (e.g. `"settings"`, `"login"`).
///
/// Multiple live screens may share a kind; kind-based queries treat them as
/// distinct entries in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenKind(Cow<'static, str>);

impl ScreenKind {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ScreenKind {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for ScreenKind {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// The close capability, implemented by the host framework.
///
/// `request_close` must tolerate being invoked on a screen that is already
/// finishing or destroyed (the registry may ask twice during bulk closes).
pub trait CloseScreen: Send + Sync {
    /// Ask the underlying screen to terminate.
    fn request_close(&self) -> Result<(), ScreenError>;

    /// Whether the underlying screen is already finishing or destroyed.
    ///
    /// Bulk operations that rely on a later destroy notification
    /// (`close_all_except`) skip handles that report `true` here.
    fn is_finishing(&self) -> bool {
        false
    }
}

/// Non-owning reference to a live screen.
///
/// Clones share the same [`ScreenId`]; equality is by id only.
#[derive(Clone)]
pub struct ScreenHandle {
    id: ScreenId,
    kind: ScreenKind,
    created_at: DateTime<Utc>,
    closer: Arc<dyn CloseScreen>,
}

impl ScreenHandle {
    /// Create a handle for a freshly-created screen. Allocates a new
    /// process-unique [`ScreenId`].
    pub fn new(kind: impl Into<ScreenKind>, closer: Arc<dyn CloseScreen>) -> Self {
        Self {
            id: ScreenId::next(),
            kind: kind.into(),
            created_at: Utc::now(),
            closer,
        }
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn kind(&self) -> &ScreenKind {
        &self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Ask the underlying screen to terminate. See [`CloseScreen::request_close`].
    pub fn request_close(&self) -> Result<(), ScreenError> {
        self.closer.request_close()
    }

    /// Whether the underlying screen reports itself already finishing.
    pub fn is_finishing(&self) -> bool {
        self.closer.is_finishing()
    }

    /// Point-in-time serializable record of this handle.
    pub fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            id: self.id,
            kind: self.kind.clone(),
            created_at: self.created_at,
        }
    }
}

impl PartialEq for ScreenHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ScreenHandle {}

impl fmt::Debug for ScreenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Serializable record of one tracked screen, for debug dumps and logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenSnapshot {
    pub id: ScreenId,
    pub kind: ScreenKind,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopCloser;

    impl CloseScreen for NoopCloser {
        fn request_close(&self) -> Result<(), ScreenError> {
            Ok(())
        }
    }

    fn make_handle(kind: &'static str) -> ScreenHandle {
        ScreenHandle::new(kind, Arc::new(NoopCloser))
    }

    #[test]
    fn test_ids_are_unique() {
        let a = make_handle("settings");
        let b = make_handle("settings");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_equality_is_by_id_not_kind() {
        let a = make_handle("settings");
        let b = make_handle("settings");
        assert_ne!(a, b);

        let a2 = a.clone();
        assert_eq!(a, a2);
    }

    #[test]
    fn test_kind_accessors() {
        let kind = ScreenKind::from_static("login");
        assert_eq!(kind.as_str(), "login");
        assert_eq!(kind.to_string(), "login");
        assert_eq!(ScreenKind::from("login"), kind);
        assert_eq!(ScreenKind::from(String::from("login")), kind);
    }

    #[test]
    fn test_snapshot_serialization() {
        let handle = make_handle("home");
        let snap = handle.snapshot();

        let json = serde_json::to_string(&snap).unwrap();
        let parsed: ScreenSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, handle.id());
        assert_eq!(parsed.kind, *handle.kind());
    }

    #[test]
    fn test_default_is_finishing_is_false() {
        let handle = make_handle("home");
        assert!(!handle.is_finishing());
    }
}
