//! Time source for journal timestamps.

use chrono::{DateTime, Utc};

/// Stamps navigation journal entries. Tests pin it to a fixed instant.
pub trait Clock: Send + Sync {
    /// The instant to record for an entry written now.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the player server.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_moves_forward() {
        let first = SystemClock.now();
        let second = SystemClock.now();

        assert!(second >= first);
    }
}
