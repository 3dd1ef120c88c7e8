//! Test entities and the intrusive link that chains them into a runner.

use core::sync::atomic::{AtomicBool, Ordering};

use intrusive_collections::{LinkedListAtomicLink, intrusive_adapter};

/// A unit of work the runner can execute.
///
/// Implemented for every `Fn() + Sync`, so a plain `fn()` is a test body.
pub trait Testable: Sync {
    fn run(&self);
}

impl<F: Fn() + Sync> Testable for F {
    fn run(&self) {
        self()
    }
}

/// A registered test.
///
/// Cases are meant to live in statics: the runner links them into its list
/// and never unlinks them, so they must outlive it.
pub struct TestCase {
    name: &'static str,
    suite: &'static str,
    module: &'static str,
    body: &'static dyn Testable,
    success: AtomicBool,
    registered: AtomicBool,
    link: LinkedListAtomicLink,
}

intrusive_adapter!(pub(crate) TestAdapter = &'static TestCase: TestCase { link => LinkedListAtomicLink });

impl TestCase {
    pub const fn new(
        name: &'static str,
        suite: &'static str,
        module: &'static str,
        body: &'static dyn Testable,
    ) -> Self {
        Self {
            name,
            suite,
            module,
            body,
            success: AtomicBool::new(true),
            registered: AtomicBool::new(false),
            link: LinkedListAtomicLink::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn suite(&self) -> &'static str {
        self.suite
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    /// Outcome of the most recent run of this case.
    pub fn success(&self) -> bool {
        self.success.load(Ordering::Relaxed)
    }

    /// Whether the case is already linked into a runner.
    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }

    /// Reserves the case for one runner; `false` if it was already taken.
    pub(crate) fn claim(&self) -> bool {
        self.registered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn run(&self) -> bool {
        self.success.store(true, Ordering::Relaxed);
        self.body.run();
        self.success()
    }

    pub(crate) fn fail(&self) {
        self.success.store(false, Ordering::Relaxed);
    }
}

impl core::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("suite", &self.suite)
            .field("module", &self.module)
            .field("success", &self.success())
            .finish()
    }
}
