//! Notification sink that reports through the `log` facade.

use crate::{info::CheckInfo, notify::TestNotification, stats::TestStats};

/// Logs each failed check at `error` level and the final stats at `info`
/// (or `error` when something failed).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter {
    failures: usize,
}

impl LogReporter {
    pub const fn new() -> Self {
        Self { failures: 0 }
    }

    /// Failed checks seen so far.
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl TestNotification for LogReporter {
    fn notify_result(&mut self, stats: TestStats) {
        if stats.is_success() {
            info!("  >>> Test results: {}", stats);
            info!("  >>> This tests PASSED!");
        } else {
            error!("  >>> Test results: {}", stats);
            error!("  >>> This tests FAILED!");
        }
    }

    fn notify_failure(&mut self, expected: &str, value: &str, info: &CheckInfo) {
        self.failures += 1;
        error!("    check failed: {}: expected {}, got {}", info, expected, value);
    }
}
