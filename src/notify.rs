//! Callbacks through which the runner reports to the host.

use crate::{info::CheckInfo, stats::TestStats};

/// Host-side sink for run outcomes.
///
/// Both callbacks are invoked synchronously on the thread calling
/// [`Runner::run`](crate::Runner::run):
/// - `notify_failure` once per failing check, before the enclosing test returns;
/// - `notify_result` exactly once per run, after the last test.
///
/// A check failing on another thread during a run may also reach the sink
/// from that thread, hence the `Send` bound. Checks raised from inside a
/// callback are counted but not forwarded back into the sink.
pub trait TestNotification: Send {
    fn notify_result(&mut self, stats: TestStats);

    fn notify_failure(&mut self, expected: &str, value: &str, info: &CheckInfo);
}

impl<T: TestNotification + ?Sized> TestNotification for &mut T {
    fn notify_result(&mut self, stats: TestStats) {
        (**self).notify_result(stats)
    }

    fn notify_failure(&mut self, expected: &str, value: &str, info: &CheckInfo) {
        (**self).notify_failure(expected, value, info)
    }
}
