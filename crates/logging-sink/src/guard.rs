//! crates/logging-sink/src/guard.rs
//! Scoped override of one sink's filter rule.

use logging::{FilterRule, LogResult, Logger, SinkId};

/// RAII guard that temporarily replaces a sink's [`FilterRule`].
///
/// Created by [`FilterGuard::new`]. While the guard is alive, records logged
/// through it use the override; dropping it restores the previous rule. The
/// guard dereferences to the [`Logger`] so logging calls go through it
/// directly.
#[must_use = "dropping the guard immediately restores the previous filter"]
pub struct FilterGuard<'a, const N: usize> {
    logger: Option<&'a mut Logger<N>>,
    id: SinkId,
    previous: FilterRule,
}

impl<'a, const N: usize> FilterGuard<'a, N> {
    /// Installs `rule` on sink `id` until the guard is dropped.
    pub fn new(logger: &'a mut Logger<N>, id: SinkId, rule: FilterRule) -> LogResult<Self> {
        let previous = logger.filter(id)?;
        logger.set_filter(id, rule)?;
        Ok(Self {
            logger: Some(logger),
            id,
            previous,
        })
    }

    /// Rule that will be restored on drop.
    #[must_use]
    pub const fn previous_filter(&self) -> &FilterRule {
        &self.previous
    }

    /// Consumes the guard without restoring the previous rule.
    pub fn into_inner(mut self) -> Option<&'a mut Logger<N>> {
        self.logger.take()
    }
}

impl<const N: usize> Drop for FilterGuard<'_, N> {
    fn drop(&mut self) {
        if let Some(logger) = self.logger.take() {
            // The sink may have been unregistered through the guard.
            let _ = logger.set_filter(self.id, self.previous);
        }
    }
}

impl<const N: usize> std::ops::Deref for FilterGuard<'_, N> {
    type Target = Logger<N>;

    fn deref(&self) -> &Self::Target {
        // Only `into_inner` and `drop` take the logger, and both consume the guard.
        match self.logger.as_deref() {
            Some(logger) => logger,
            None => unreachable!("filter guard outlived its logger"),
        }
    }
}

impl<const N: usize> std::ops::DerefMut for FilterGuard<'_, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self.logger.as_deref_mut() {
            Some(logger) => logger,
            None => unreachable!("filter guard outlived its logger"),
        }
    }
}

#[cfg(test)]
mod tests {
    use logging::{FilterMode, Level, LoggerConfig, Record};
    use test_support::CaptureOutput;

    use super::*;

    fn logger_with_capture() -> (Logger, SinkId, CaptureOutput) {
        let capture = CaptureOutput::new();
        let mut logger: Logger = Logger::with_config(LoggerConfig::new().with_colors(false));
        let id = logger.register(capture.clone()).unwrap();
        (logger, id, capture)
    }

    fn only(tag: &'static str) -> FilterRule {
        FilterRule {
            enabled: true,
            mode: FilterMode::Whitelist,
            tag: Some(tag),
            ..FilterRule::new()
        }
    }

    #[test]
    fn override_applies_while_guard_lives() {
        let (mut logger, id, capture) = logger_with_capture();
        {
            let mut guard = FilterGuard::new(&mut logger, id, only("net")).unwrap();
            guard.log(&Record::new(Level::Info, "disk", "hidden", &[]));
            guard.log(&Record::new(Level::Info, "net", "shown", &[]));
        }
        assert_eq!(capture.text(), "I (none)-net: shown\n");
    }

    #[test]
    fn drop_restores_previous_rule() {
        let (mut logger, id, capture) = logger_with_capture();
        {
            let guard = FilterGuard::new(&mut logger, id, only("net")).unwrap();
            assert!(!guard.previous_filter().enabled);
        }
        assert!(!logger.filter(id).unwrap().enabled);
        logger.log(&Record::new(Level::Info, "disk", "back", &[]));
        assert_eq!(capture.text(), "I (none)-disk: back\n");
    }

    #[test]
    fn into_inner_keeps_override() {
        let (mut logger, id, _capture) = logger_with_capture();
        {
            let guard = FilterGuard::new(&mut logger, id, only("net")).unwrap();
            let inner = guard.into_inner();
            assert!(inner.is_some());
        }
        assert_eq!(logger.filter(id).unwrap().tag, Some("net"));
    }

    #[test]
    fn unknown_sink_is_rejected() {
        let (mut logger, _, _) = logger_with_capture();
        let stale = SinkId::from_index(3);
        assert!(FilterGuard::new(&mut logger, stale, only("x")).is_err());
    }
}
