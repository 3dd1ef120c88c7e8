use core::fmt;

/// Aggregate outcome of one full run.
///
/// `error` counts individual failed checks and may exceed `failed`, which
/// counts tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestStats {
    pub total: usize,
    pub failed: usize,
    pub error: usize,
}

impl TestStats {
    pub const fn new() -> Self {
        Self {
            total: 0,
            failed: 0,
            error: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn passed(&self) -> usize {
        self.total - self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.error == 0
    }

    pub(crate) fn add_test(&mut self, success: bool) {
        self.total += 1;
        if !success {
            self.failed += 1;
        }
    }
}

impl fmt::Display for TestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} total, {} failed checks",
            self.passed(),
            self.failed,
            self.total,
            self.error
        )
    }
}
