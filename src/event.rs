//! Log callback system.
//!
//! The crate never prints. Hosts that want diagnostics install a sink with
//! [`set_log_callback`]; without one, [`emit_log`] is a no-op and callers can
//! skip message formatting entirely by checking [`log_enabled`] first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

static LOG_ENABLED: AtomicBool = AtomicBool::new(false);

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = match log_callback().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = Some(Box::new(callback));
    LOG_ENABLED.store(true, Ordering::Release);
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    let mut guard = match log_callback().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = None;
    LOG_ENABLED.store(false, Ordering::Release);
}

/// Returns true if a log callback is installed.
#[inline]
#[must_use]
pub fn log_enabled() -> bool {
    LOG_ENABLED.load(Ordering::Acquire)
}

/// Emit a log message to the registered callback.
pub fn emit_log(level: LogLevel, message: &str) {
    if !log_enabled() {
        return;
    }
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

/// Emit a lazily formatted log message.
///
/// The closure only runs when a callback is installed.
pub(crate) fn emit_log_with(level: LogLevel, message: impl FnOnce() -> String) {
    if log_enabled() {
        emit_log(level, &message());
    }
}
