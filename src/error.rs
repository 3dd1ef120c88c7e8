//! Errors for misuse of the runner.
//!
//! Check and test failures are not errors: they are counted in
//! [`TestStats`](crate::TestStats) and reported through
//! [`TestNotification`](crate::TestNotification). Variants here describe
//! calls the runner refused to perform.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunnerError {
    /// The case is already linked into a runner.
    #[error("test `{0}` is already registered")]
    AlreadyRegistered(&'static str),
    /// `run` was entered again from inside a test body.
    #[error("test runner is already running")]
    AlreadyRunning,
}

pub type RunnerResult<T> = Result<T, RunnerError>;
