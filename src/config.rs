//! Build-time configuration.
//!
//! Override at build time, e.g. `TINYTEST_TEXT_CAPACITY=64 cargo build`.

use const_env::from_env;

/// Bytes available for the rendered form of each check operand.
#[from_env("TINYTEST_TEXT_CAPACITY")]
pub const CHECK_TEXT_CAPACITY: usize = 256;
