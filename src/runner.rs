//! Test registry and runner.
//!
//! Every `#[def_test]` function ends up in [`TEST_REGISTRY`], a link-time
//! slice. The process-wide [`Runner`] links those cases into its intrusive
//! list the first time it is accessed, and [`test_run()`] runs them all.

use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

use intrusive_collections::LinkedList;
use linkme::distributed_slice;

use crate::{
    check::is_equal,
    error::{RunnerError, RunnerResult},
    info::CheckInfo,
    notify::TestNotification,
    report::LogReporter,
    stats::TestStats,
    sync::Mutex,
    test_case::{TestAdapter, TestCase},
};

/// Cases registered by `#[def_test]`, in link order (not source order).
#[doc(hidden)]
#[distributed_slice]
pub static TEST_REGISTRY: [&'static TestCase] = [..];

lazy_static::lazy_static! {
    static ref RUNNER: Runner = {
        let runner = Runner::new();
        for &test in TEST_REGISTRY.iter() {
            runner.add(test);
        }
        runner
    };
}

/// Non-owning pointer to the notification sink of the active run.
#[derive(Clone, Copy)]
struct NotifyHandle(NonNull<dyn TestNotification>);

// The sink is `Send` (supertrait of `TestNotification`), and the handle is
// lent to at most one caller at a time through `SinkLease`; the run that
// owns the borrow waits for the lease to end before returning.
unsafe impl Send for NotifyHandle {}

impl NotifyHandle {
    fn new(notify: &mut dyn TestNotification) -> Self {
        let ptr = NonNull::from(notify);
        // The lifetime is erased here; `RunGuard` drops the handle before the
        // borrow it came from ends.
        Self(unsafe {
            core::mem::transmute::<
                NonNull<dyn TestNotification + '_>,
                NonNull<dyn TestNotification + 'static>,
            >(ptr)
        })
    }

    /// # Safety
    ///
    /// The run that created the handle must still be in progress, and the
    /// caller must hold the only lease on it.
    unsafe fn get<'a>(mut self) -> &'a mut dyn TestNotification {
        unsafe { self.0.as_mut() }
    }
}

struct RunState {
    stats: TestStats,
    current: Option<&'static TestCase>,
    notify: Option<NotifyHandle>,
    leased: bool,
    running: bool,
}

impl RunState {
    const fn new() -> Self {
        Self {
            stats: TestStats::new(),
            current: None,
            notify: None,
            leased: false,
            running: false,
        }
    }
}

/// Exclusive use of the sink. While it lives, `state.notify` is `None`, so
/// checks raised from inside a callback are counted but not forwarded.
struct SinkLease<'a> {
    state: &'a Mutex<RunState>,
    handle: NotifyHandle,
}

impl<'a> SinkLease<'a> {
    fn take(state: &'a Mutex<RunState>) -> Option<Self> {
        let mut guard = state.lock();
        let handle = guard.notify.take()?;
        guard.leased = true;
        Some(Self { state, handle })
    }

    fn sink(&mut self) -> &mut dyn TestNotification {
        unsafe { self.handle.get() }
    }
}

impl Drop for SinkLease<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.notify = Some(self.handle);
        state.leased = false;
    }
}

/// Returns the runner to idle, even if a test body unwinds.
///
/// Waits for an outstanding sink lease (held by a check on another thread)
/// so the sink is never used after `run` returns.
struct RunGuard<'a> {
    state: &'a Mutex<RunState>,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        loop {
            let mut state = self.state.lock();
            if !state.leased {
                state.current = None;
                state.notify = None;
                state.running = false;
                return;
            }
            drop(state);
            core::hint::spin_loop();
        }
    }
}

/// Owns the ordered list of registered tests and drives their execution.
///
/// The list lock is held for a whole run; the state lock is never held
/// while a test body or a notification callback executes, so checks can
/// report back into the runner from inside a test.
pub struct Runner {
    tests: Mutex<LinkedList<TestAdapter>>,
    state: Mutex<RunState>,
    len: AtomicUsize,
}

impl Runner {
    pub const fn new() -> Self {
        Self {
            tests: Mutex::new(LinkedList::new(TestAdapter::NEW)),
            state: Mutex::new(RunState::new()),
            len: AtomicUsize::new(0),
        }
    }

    /// The process-wide runner, holding every `#[def_test]` case.
    pub fn instance() -> &'static Runner {
        &RUNNER
    }

    /// Appends `test` to the run order.
    ///
    /// Explicit calls run in exactly the order they were made; this is the
    /// only ordering guarantee, `#[def_test]` cases follow link order.
    ///
    /// A case that is already registered (here or in another runner) is
    /// left where it is and a warning is logged.
    pub fn add(&self, test: &'static TestCase) {
        if let Err(e) = self.try_add(test) {
            warn!("{}", e);
        }
    }

    /// Fails with [`RunnerError::AlreadyRunning`] while a run is in progress
    /// and with [`RunnerError::AlreadyRegistered`] if any runner holds `test`.
    pub fn try_add(&self, test: &'static TestCase) -> RunnerResult<()> {
        if self.is_running() {
            return Err(RunnerError::AlreadyRunning);
        }
        let mut tests = self.tests.lock();
        if !test.claim() {
            return Err(RunnerError::AlreadyRegistered(test.name()));
        }
        tests.push_back(test);
        self.len.fetch_add(1, Ordering::Relaxed);
        debug!("registered test {}:{}", test.module(), test.name());
        Ok(())
    }

    /// Runs every registered test in registration order.
    ///
    /// Calling this from inside a test body logs an error and returns the
    /// stats of the enclosing run so far.
    pub fn run(&self, notify: Option<&mut dyn TestNotification>) -> TestStats {
        match self.try_run(notify) {
            Ok(stats) => stats,
            Err(e) => {
                error!("{}", e);
                self.stats()
            }
        }
    }

    pub fn try_run(&self, notify: Option<&mut dyn TestNotification>) -> RunnerResult<TestStats> {
        {
            let mut state = self.state.lock();
            if state.running {
                return Err(RunnerError::AlreadyRunning);
            }
            state.running = true;
            state.stats.reset();
            state.notify = notify.map(NotifyHandle::new);
        }
        let _guard = RunGuard { state: &self.state };

        let tests = self.tests.lock();
        info!("Starting unit tests [{} registered]...", self.len());

        let mut cursor = tests.front();
        while let Some(test) = cursor.clone_pointer() {
            cursor.move_next();

            self.state.lock().current = Some(test);
            debug!("  Running test: {}:{}", test.module(), test.name());

            let success = test.run();

            {
                let mut state = self.state.lock();
                state.current = None;
                state.stats.add_test(success);
            }
            if success {
                debug!("    Test {} ... OK", test.name());
            } else {
                warn!("    Test {} ... FAILED", test.name());
            }
        }
        drop(tests);

        let stats = self.stats();
        if let Some(mut lease) = SinkLease::take(&self.state) {
            lease.sink().notify_result(stats);
        }
        Ok(stats)
    }

    /// Records a failed check: bumps the error count, marks the running test
    /// as failed and forwards the failure to the notification sink.
    ///
    /// The sink is only reached while a run is in progress and nobody else
    /// is using it; a check raised from inside a sink callback is counted
    /// but not forwarded.
    pub fn on_check_failed(&self, expected: &str, value: &str, info: &CheckInfo) {
        {
            let mut state = self.state.lock();
            state.stats.error += 1;
            if let Some(test) = state.current {
                test.fail();
            }
        }
        debug!("check failed at {}: expected {}, got {}", info, expected, value);
        if let Some(mut lease) = SinkLease::take(&self.state) {
            lease.sink().notify_failure(expected, value, info);
        }
    }

    /// Compares two rendered values with [`is_equal`], reporting a mismatch.
    pub fn check(&self, expected: &str, value: &str, info: &CheckInfo) -> bool {
        self.check_with(expected, value, info, is_equal)
    }

    pub fn check_with<F>(&self, expected: &str, value: &str, info: &CheckInfo, is_equal: F) -> bool
    where
        F: FnOnce(&str, &str) -> bool,
    {
        if is_equal(expected, value) {
            return true;
        }
        self.on_check_failed(expected, value, info);
        false
    }

    /// Marks the running test as failed without recording a check.
    ///
    /// Returns `false` when no test is running.
    pub fn fail_current(&self) -> bool {
        match self.state.lock().current {
            Some(test) => {
                test.fail();
                true
            }
            None => false,
        }
    }

    /// Stats of the last run, or of the run in progress.
    pub fn stats(&self) -> TestStats {
        self.state.lock().stats
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs every registered test, reporting through [`LogReporter`].
///
/// # Example
/// ```no_run
/// let stats = tinytest::test_run();
/// assert_eq!(stats.failed, 0);
/// ```
pub fn test_run() -> TestStats {
    let runner = Runner::instance();
    if runner.is_empty() {
        warn!("================================");
        warn!("No tests found!");
        warn!("================================");
    }
    runner.run(Some(&mut LogReporter::new()))
}

/// Runs all tests and returns whether every check passed.
pub fn test_run_ok() -> bool {
    test_run().is_success()
}
