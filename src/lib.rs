//! Minimal unit-test harness for `no_std` targets.
//!
//! Tests register themselves with `#[def_test]`, run in registration order
//! on the calling thread, and report failed checks through a
//! [`TestNotification`] sink. Nothing is allocated on the heap.
//!
//! ```no_run
//! use tinytest::{check, check_eq, def_test};
//!
//! #[def_test(suite = "math")]
//! fn test_addition() {
//!     check_eq!(4, 2 + 2);
//!     check!(2 < 3);
//! }
//!
//! fn main() {
//!     let stats = tinytest::test_run();
//!     assert_eq!(stats.failed, 0);
//! }
//! ```
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

pub mod check;
pub mod config;
pub mod error;
pub mod info;
pub mod notify;
pub mod report;
pub mod runner;
pub mod stats;
mod sync;
pub mod test_case;

pub use tinytest_macros::def_test;

pub use check::{eval, eval_with, is_equal};
pub use error::{RunnerError, RunnerResult};
pub use info::{CheckInfo, suite_name};
pub use notify::TestNotification;
pub use report::LogReporter;
pub use runner::{Runner, test_run, test_run_ok};
pub use stats::TestStats;
pub use test_case::{TestCase, Testable};

#[doc(hidden)]
pub mod __private {
    pub use crate::runner::TEST_REGISTRY;
    pub use linkme;
}
