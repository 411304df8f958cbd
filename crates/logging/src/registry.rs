//! crates/logging/src/registry.rs
//!
//! Fixed-capacity table of registered sinks.
//!
//! Registration takes the first free slot and the slot index becomes the
//! sink's [`SinkId`]. Slots are never compacted, so an id stays valid until
//! its sink is unregistered; a later registration may reuse the slot.

use std::fmt;

use crate::error::{LogError, LogResult};
use crate::filter::FilterRule;
use crate::levels::Level;

/// Destination for decorated record bytes.
///
/// `write_bytes` is called zero or more times per record and must not keep
/// the slice. It returns how many bytes it accepted; a short count is
/// reported to the caller as a partial write. State the output needs, such as
/// a file handle or a buffer, lives in the implementing value itself.
///
/// Closures taking `&[u8]` implement the trait and accept every byte.
pub trait LogOutput: Send {
    /// Receives the next run of bytes.
    fn write_bytes(&mut self, bytes: &[u8]) -> usize;
}

impl<F> LogOutput for F
where
    F: FnMut(&[u8]) + Send,
{
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        self(bytes);
        bytes.len()
    }
}

/// Stable handle to a registered sink.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SinkId(usize);

impl SinkId {
    /// Wraps a slot index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink #{}", self.0)
    }
}

/// One registered destination with its detail threshold and filter.
pub struct Sink {
    output: Box<dyn LogOutput>,
    info_level: Level,
    filter: FilterRule,
}

impl Sink {
    /// Creates a sink around `output`.
    #[must_use]
    pub fn new(output: Box<dyn LogOutput>, info_level: Level, filter: FilterRule) -> Self {
        Self {
            output,
            info_level,
            filter,
        }
    }

    /// Records at or below this level carry `[file:line(func)]`.
    #[must_use]
    pub const fn info_level(&self) -> Level {
        self.info_level
    }

    /// Updates the location threshold.
    pub fn set_info_level(&mut self, level: Level) {
        self.info_level = level;
    }

    /// Current filter rule.
    #[must_use]
    pub const fn filter(&self) -> &FilterRule {
        &self.filter
    }

    /// Mutable access to the filter rule.
    pub fn filter_mut(&mut self) -> &mut FilterRule {
        &mut self.filter
    }

    /// Mutable access to the output.
    pub fn output_mut(&mut self) -> &mut dyn LogOutput {
        self.output.as_mut()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("info_level", &self.info_level)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Table of at most `N` sinks.
pub struct SinkRegistry<const N: usize> {
    slots: [Option<Sink>; N],
}

impl<const N: usize> SinkRegistry<N> {
    /// Empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; N],
        }
    }

    /// Fixed number of slots.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of live sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no sink is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Stores `sink` in the first free slot.
    pub fn register(&mut self, sink: Sink) -> LogResult<SinkId> {
        let Some(index) = self.slots.iter().position(Option::is_none) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "xf_log::registry", capacity = N, "sink registry full");
            return Err(LogError::Full { capacity: N });
        };
        self.slots[index] = Some(sink);

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "xf_log::registry", slot = index, "sink registered");

        Ok(SinkId(index))
    }

    /// Removes and returns the sink, freeing its slot.
    pub fn unregister(&mut self, id: SinkId) -> LogResult<Sink> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(LogError::InvalidId(id))
    }

    /// Borrows a sink.
    pub fn get(&self, id: SinkId) -> LogResult<&Sink> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(LogError::InvalidId(id))
    }

    /// Mutably borrows a sink.
    pub fn get_mut(&mut self, id: SinkId) -> LogResult<&mut Sink> {
        let sink = self.slots.get_mut(id.0).and_then(Option::as_mut);

        #[cfg(feature = "tracing")]
        if sink.is_none() {
            tracing::debug!(target: "xf_log::registry", %id, "unknown sink id");
        }

        sink.ok_or(LogError::InvalidId(id))
    }

    /// Live sinks in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SinkId, &Sink)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|sink| (SinkId(index), sink)))
    }

    /// Live sinks in slot order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SinkId, &mut Sink)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|sink| (SinkId(index), sink)))
    }
}

impl<const N: usize> Default for SinkRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for SinkRegistry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
