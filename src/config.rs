use serde::{Deserialize, Serialize};

/// Stack depth above which `notify_created` warns. A desktop application is
/// expected to have at most a handful of live screens; exceeding this
/// usually means destroy notifications are not being delivered.
pub const DEFAULT_WARN_DEPTH: usize = 16;

/// Tuning knobs for [`crate::registry::ScreenRegistry`].
///
/// Deserializable so host applications can embed it in their own config
/// files. Missing fields fall back to the same values as `Default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Stack depth above which each additional screen logs a warning.
    #[serde(default = "default_warn_depth", rename = "warnDepth")]
    pub warn_depth: usize,
    /// Log passive lifecycle phases (started/resumed/paused/stopped/state-saved)
    /// at debug level. They never affect registry state either way.
    #[serde(default, rename = "logPassivePhases")]
    pub log_passive_phases: bool,
}

fn default_warn_depth() -> usize {
    DEFAULT_WARN_DEPTH
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            warn_depth: DEFAULT_WARN_DEPTH,
            log_passive_phases: false,
        }
    }
}
