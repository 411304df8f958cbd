//! crates/logging/src/global.rs
//!
//! Process-wide logger used by the call-site macros.
//!
//! The logger sits behind a mutex, so records from different threads never
//! interleave within a sink. A thread-local flag marks the thread currently
//! inside the logger; a nested call from that thread (an output that logs, or
//! a tracing event raised while dispatching) gets [`LogError::Busy`] instead
//! of deadlocking. A poisoned mutex is recovered, since every logger mutation
//! leaves it consistent.

use std::cell::Cell;
use std::sync::{Mutex, PoisonError};

use printf::Arg;

use crate::error::{LogError, LogResult};
use crate::levels::Level;
use crate::logger::Logger;
use crate::record::Record;
use crate::registry::{LogOutput, SinkId};
use crate::time::TimeSource;

static LOGGER: Mutex<Logger> = Mutex::new(Logger::new());

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Clears the thread's active flag when the call unwinds or returns.
struct ActiveGuard<'a>(&'a Cell<bool>);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Runs `f` with exclusive access to the process-wide logger.
///
/// Blocks while another thread holds the logger. Returns
/// [`LogError::Busy`] without running `f` when called from inside another
/// `with_logger` call on the same thread.
pub fn with_logger<R>(f: impl FnOnce(&mut Logger) -> R) -> LogResult<R> {
    ACTIVE.with(|active| {
        if active.replace(true) {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "xf_log::global", "re-entrant logger access refused");
            return Err(LogError::Busy);
        }
        let _guard = ActiveGuard(active);
        let mut logger = LOGGER.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut logger))
    })
}

/// Whether the current thread is inside the process-wide logger.
#[must_use]
pub fn is_active() -> bool {
    ACTIVE.with(Cell::get)
}

/// Registers an output on the process-wide logger.
pub fn register<O>(output: O) -> LogResult<SinkId>
where
    O: LogOutput + 'static,
{
    with_logger(|logger| logger.register(output))?
}

/// Removes a sink from the process-wide logger.
pub fn unregister(id: SinkId) -> LogResult<()> {
    with_logger(|logger| logger.unregister(id))?
}

/// Logs `record`, returning the bytes produced or 0 when the logger is busy.
pub fn log(record: &Record<'_>) -> usize {
    try_log(record).unwrap_or(0)
}

/// Logs `record`, reporting re-entrant calls as [`LogError::Busy`].
pub fn try_log(record: &Record<'_>) -> LogResult<usize> {
    with_logger(|logger| logger.log(record))
}

/// Raw formatted output to every sink; 0 when the logger is busy.
pub fn printf(fmt: &str, args: &[Arg<'_>]) -> usize {
    with_logger(|logger| logger.printf(fmt, args)).unwrap_or(0)
}

/// Sets the global level of the process-wide logger.
pub fn set_global_level(level: Level) -> LogResult<()> {
    with_logger(|logger| logger.set_global_level(level))
}

/// Current global level of the process-wide logger.
pub fn global_level() -> LogResult<Level> {
    with_logger(|logger| logger.global_level())
}

/// Installs or removes the process-wide time source.
pub fn set_time_source(source: Option<TimeSource>) -> LogResult<()> {
    with_logger(|logger| logger.set_time_source(source))
}

/// Replaces the process-wide logger, returning the previous one.
pub fn install(logger: Logger) -> LogResult<Logger> {
    with_logger(|current| std::mem::replace(current, logger))
}

/// Restores a fresh logger with no sinks, dropping the current one.
pub fn reset() -> LogResult<()> {
    install(Logger::new()).map(drop)
}

/// Serializes unit tests that share the process-wide logger.
#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    static SERIAL: Mutex<()> = Mutex::new(());
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}
