//! screen-stack - a registry of live top-level UI screens.
//!
//! Tracks the screens a host application currently has on display, in
//! creation order, and answers "what is on screen" / "what is on top"
//! alongside close commands for one screen, one kind, or everything.
//! Screen lifecycles stay externally owned: the host reports creation and
//! destruction, and closing only ever *asks* a screen to terminate.

pub mod config;
pub mod error;
pub mod handle;
pub mod lifecycle;
pub mod logging;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{ResultExt, ScreenError};
pub use handle::{CloseScreen, ScreenHandle, ScreenId, ScreenKind, ScreenSnapshot};
pub use lifecycle::LifecycleBridge;
pub use registry::ScreenRegistry;
