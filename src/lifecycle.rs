//! Host lifecycle callback glue.
//!
//! The host UI framework drives screen lifecycles and delivers callbacks;
//! [`LifecycleBridge`] is the adapter the composition root hands to the
//! framework. Created/destroyed events feed the registry; the passive
//! phases (started, resumed, paused, stopped, state-saved) never affect
//! registry state and are only logged when configured to.

use std::sync::Arc;

use crate::handle::ScreenHandle;
use crate::registry::ScreenRegistry;

/// Adapter from host framework lifecycle callbacks to the registry.
pub struct LifecycleBridge {
    registry: Arc<ScreenRegistry>,
}

impl LifecycleBridge {
    pub fn new(registry: Arc<ScreenRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ScreenRegistry> {
        &self.registry
    }

    /// The host created a screen; start tracking it.
    pub fn on_screen_created(&self, handle: ScreenHandle) {
        self.registry.notify_created(handle);
    }

    /// The host destroyed a screen; stop tracking it.
    pub fn on_screen_destroyed(&self, handle: &ScreenHandle) {
        self.registry.notify_destroyed(handle);
    }

    pub fn on_screen_started(&self, handle: &ScreenHandle) {
        self.passive_phase("started", handle);
    }

    pub fn on_screen_resumed(&self, handle: &ScreenHandle) {
        self.passive_phase("resumed", handle);
    }

    pub fn on_screen_paused(&self, handle: &ScreenHandle) {
        self.passive_phase("paused", handle);
    }

    pub fn on_screen_stopped(&self, handle: &ScreenHandle) {
        self.passive_phase("stopped", handle);
    }

    pub fn on_screen_state_saved(&self, handle: &ScreenHandle) {
        self.passive_phase("state_saved", handle);
    }

    fn passive_phase(&self, phase: &str, handle: &ScreenHandle) {
        if self.registry.config().log_passive_phases {
            tracing::debug!(
                phase,
                id = %handle.id(),
                kind = %handle.kind(),
                "Screen lifecycle phase"
            );
        }
    }
}
