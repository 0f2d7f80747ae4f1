//! Clock seam for the result timestamp
//!
//! The pipeline is deterministic except for the `timestamp` field; injecting
//! the clock makes even that testable.

use chrono::{DateTime, Utc};

/// Source of the result timestamp
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time (production default)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
