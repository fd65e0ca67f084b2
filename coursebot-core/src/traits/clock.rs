//! Time source and deadlines
//!
//! All polling loops take their notion of time from a [`Clock`] so tests
//! and the simulator can run them without real time passing.

/// Monotonic millisecond clock with a blocking sleep
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&mut self) -> u64;

    /// Block the control thread for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Wall-clock cutoff for a polling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    expires_at_ms: Option<u64>,
}

impl Deadline {
    /// A deadline that never expires
    pub const fn never() -> Self {
        Self { expires_at_ms: None }
    }

    /// A deadline `timeout_ms` from now
    pub fn after<C: Clock>(clock: &mut C, timeout_ms: u32) -> Self {
        Self {
            expires_at_ms: Some(clock.now_ms().saturating_add(timeout_ms as u64)),
        }
    }

    /// A deadline `timeout_ms` from now, or never if `None`
    pub fn optional<C: Clock>(clock: &mut C, timeout_ms: Option<u32>) -> Self {
        match timeout_ms {
            Some(ms) => Self::after(clock, ms),
            None => Self::never(),
        }
    }

    /// The earlier of two deadlines
    pub fn min(self, other: Deadline) -> Self {
        match (self.expires_at_ms, other.expires_at_ms) {
            (Some(a), Some(b)) => Self {
                expires_at_ms: Some(a.min(b)),
            },
            (Some(_), None) => self,
            _ => other,
        }
    }

    /// Check whether the deadline has passed
    pub fn expired<C: Clock>(&self, clock: &mut C) -> bool {
        match self.expires_at_ms {
            Some(at) => clock.now_ms() >= at,
            None => false,
        }
    }

    /// Milliseconds left before expiry (`None` for an unbounded deadline)
    pub fn remaining_ms<C: Clock>(&self, clock: &mut C) -> Option<u32> {
        self.expires_at_ms.map(|at| {
            let left = at.saturating_sub(clock.now_ms());
            left.min(u32::MAX as u64) as u32
        })
    }
}
