//! Periodic action gating on monotonic time
//!
//! Both network actions are rate-limited: NTP resync once a day, color
//! fetch once a minute. The gates run on monotonic uptime, never on the
//! wall clock - a resync that steps the wall clock must not re-arm or
//! starve its own gate.

/// Resync the RTC from NTP once per day
pub const TIME_SYNC_INTERVAL_MS: u64 = 24 * 60 * 60 * 1000;

/// Poll the CheerLights feed once per minute (it is a free API - be kind)
pub const COLOR_FETCH_INTERVAL_MS: u64 = 60 * 1000;

/// Elapsed-time gate for a periodic action
///
/// A fresh gate is due immediately; [`PeriodicGate::primed`] starts the
/// countdown at construction instead.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicGate {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl PeriodicGate {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// A gate that first becomes due one full interval after `now_ms`
    pub const fn primed(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: Some(now_ms),
        }
    }

    /// Has a full interval elapsed since the gate was last marked?
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Restart the countdown from `now_ms`
    pub fn mark(&mut self, now_ms: u64) {
        self.last_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_gate_is_due() {
        let gate = PeriodicGate::new(1000);
        assert!(gate.is_due(0));
    }

    #[test]
    fn test_primed_gate_waits_full_interval() {
        let gate = PeriodicGate::primed(1000, 500);
        assert!(!gate.is_due(500));
        assert!(!gate.is_due(1499));
        assert!(gate.is_due(1500));
    }

    #[test]
    fn test_sub_threshold_calls_are_idempotent() {
        let mut gate = PeriodicGate::primed(COLOR_FETCH_INTERVAL_MS, 0);
        for now in (0..COLOR_FETCH_INTERVAL_MS).step_by(1000) {
            assert!(!gate.is_due(now));
        }
        assert!(gate.is_due(COLOR_FETCH_INTERVAL_MS));

        gate.mark(COLOR_FETCH_INTERVAL_MS);
        assert!(!gate.is_due(COLOR_FETCH_INTERVAL_MS + 1));
        assert!(gate.is_due(2 * COLOR_FETCH_INTERVAL_MS));
    }

    #[test]
    fn test_daily_sync_gate() {
        let mut gate = PeriodicGate::primed(TIME_SYNC_INTERVAL_MS, 0);
        assert!(!gate.is_due(TIME_SYNC_INTERVAL_MS - 1));
        assert!(gate.is_due(TIME_SYNC_INTERVAL_MS));

        // A failed attempt does not mark the gate; it stays due
        assert!(gate.is_due(TIME_SYNC_INTERVAL_MS + 5000));

        gate.mark(TIME_SYNC_INTERVAL_MS + 5000);
        assert!(!gate.is_due(2 * TIME_SYNC_INTERVAL_MS));
    }

    #[test]
    fn test_monotonic_regression_does_not_fire_early() {
        // saturating_sub guards against a (buggy) backwards time source
        let gate = PeriodicGate::primed(1000, 10_000);
        assert!(!gate.is_due(9_000));
    }
}
