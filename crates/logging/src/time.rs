//! crates/logging/src/time.rs
//! Timestamp sources for the record prologue.

use std::sync::OnceLock;
use std::time::Instant;

/// Returns the current time in milliseconds. Wrapping is the caller's
/// concern; the value is printed as an unsigned decimal.
pub type TimeSource = fn() -> u32;

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Milliseconds since the first call in this process, truncated to 32 bits.
///
/// Suitable as a [`TimeSource`] on hosted targets.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn uptime_millis() -> u32 {
    let epoch = EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_millis() as u32
}
