//! Structured JSONL logging plus human-readable stderr output.
//!
//! Dual-output logging for host applications that don't install their own
//! subscriber:
//! - **JSONL to file** (~/.screen-stack/logs/screen-stack.jsonl) - structured, machine-parseable
//! - **Pretty to stderr** - human-readable for developers
//!
//! # Usage
//!
//! ```rust,ignore
//! use screen_stack::logging;
//!
//! // Initialize logging - keep the guard alive for the duration of the program
//! let _guard = logging::init();
//!
//! // Use tracing macros directly
//! tracing::info!(event_type = "app_start", "Application started");
//! ```
//!
//! Modules in this crate also route lifecycle events through
//! [`log`](crate::logging::log), which mirrors them into a small in-memory
//! ring buffer so host debug surfaces can show recent activity without
//! touching the log file.

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static LOG_BUFFER: OnceLock<Mutex<VecDeque<String>>> = OnceLock::new();
const MAX_LOG_LINES: usize = 50;

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the dual-output logging system with the default log directory.
///
/// Returns a guard that must be kept alive for the duration of the program;
/// dropping it flushes remaining logs and closes the file.
pub fn init() -> LoggingGuard {
    init_with_dir(&default_log_dir())
}

/// Initialize logging with an explicit log directory. If a global tracing
/// subscriber is already installed, the existing one is kept and only the
/// file appender guard is returned.
pub fn init_with_dir(log_dir: &Path) -> LoggingGuard {
    let _ = LOG_BUFFER.set(Mutex::new(VecDeque::with_capacity(MAX_LOG_LINES)));

    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let log_path = log_dir.join("screen-stack.jsonl");

    // Open log file with append mode
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .unwrap_or_else(|e| {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            // Fallback to /dev/null equivalent
            OpenOptions::new()
                .write(true)
                .open("/dev/null")
                .expect("Failed to open /dev/null")
        });

    // Non-blocking writer so logging never stalls lifecycle callbacks
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file);

    // Environment filter - default to info, allow override via RUST_LOG
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // JSONL layer for file output
    let json_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    // Pretty layer for stderr (human developers)
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    let install = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init();

    match install {
        Ok(()) => {
            tracing::info!(
                event_type = "lifecycle",
                action = "logging_initialized",
                log_path = %log_path.display(),
                "Screen-stack logging initialized"
            );
        }
        Err(_) => {
            // Host already installed a subscriber; its layers win.
            tracing::debug!("Subscriber already installed, keeping existing logging setup");
        }
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Default log directory (~/.screen-stack/logs/)
fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".screen-stack").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("screen-stack-logs"))
}

/// Path to the JSONL log file under the default log directory.
pub fn log_path() -> PathBuf {
    default_log_dir().join("screen-stack.jsonl")
}

/// Categorized log entry: mirrored into the ring buffer for host debug
/// surfaces and emitted through tracing.
///
/// Prefer tracing macros directly for structured fields:
/// ```rust,ignore
/// tracing::info!(category = "SCREEN", depth = 3, "Screen tracked");
/// ```
pub fn log(category: &str, message: &str) {
    add_to_buffer(category, message);
    tracing::info!(category = category, "{}", message);
}

/// Most recent log lines, oldest first. Empty if nothing has been logged.
pub fn recent_logs() -> Vec<String> {
    LOG_BUFFER
        .get()
        .and_then(|buffer| buffer.lock().ok().map(|buf| buf.iter().cloned().collect()))
        .unwrap_or_default()
}

fn add_to_buffer(category: &str, message: &str) {
    let buffer = LOG_BUFFER.get_or_init(|| Mutex::new(VecDeque::with_capacity(MAX_LOG_LINES)));
    if let Ok(mut buf) = buffer.lock() {
        if buf.len() >= MAX_LOG_LINES {
            buf.pop_front();
        }
        buf.push_back(format!("[{}] {}", category, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Other tests log through the same global buffer concurrently, so these
    // assertions stick to invariants: non-empty after a log, never above cap.
    #[test]
    fn test_ring_buffer_records_and_stays_bounded() {
        log("TEST", "hello from the registry");
        let recent = recent_logs();
        assert!(!recent.is_empty());
        assert!(recent.len() <= MAX_LOG_LINES);

        for i in 0..(MAX_LOG_LINES * 2) {
            log("TEST", &format!("entry {}", i));
        }
        assert!(recent_logs().len() <= MAX_LOG_LINES);
    }

    #[test]
    fn test_log_path_filename() {
        assert!(log_path().ends_with("screen-stack.jsonl"));
    }

    #[test]
    fn test_init_with_dir_creates_log_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let guard = init_with_dir(dir.path());
        tracing::info!("log file smoke test");
        drop(guard);
        assert!(dir.path().join("screen-stack.jsonl").exists());
    }
}
