//! Comparison protocol and check macros.
//!
//! A check compares the textual form of an expected and an actual value. A
//! mismatch is reported to [`Runner::instance()`] right away, which counts it
//! and fails the running test; the test body itself carries on.

use core::fmt::{self, Write};

use crate::{config::CHECK_TEXT_CAPACITY, info::CheckInfo, runner::Runner};

/// Default equality for rendered values.
pub fn is_equal(expected: &str, value: &str) -> bool {
    expected == value
}

/// Compares `expected` and `value` with [`is_equal`].
///
/// Returns `false` after reporting the failure to the process-wide runner.
pub fn eval(expected: &str, value: &str, info: &CheckInfo) -> bool {
    Runner::instance().check(expected, value, info)
}

/// Like [`eval`], with a caller-supplied equality predicate.
pub fn eval_with<F>(expected: &str, value: &str, info: &CheckInfo, is_equal: F) -> bool
where
    F: FnOnce(&str, &str) -> bool,
{
    Runner::instance().check_with(expected, value, info, is_equal)
}

/// Fixed-capacity text sink for rendering check operands without a heap.
///
/// Output beyond the capacity is dropped at a char boundary.
pub struct TextBuffer {
    buffer: [u8; CHECK_TEXT_CAPACITY],
    pos: usize,
    truncated: bool,
}

impl TextBuffer {
    pub const fn new() -> Self {
        Self {
            buffer: [0; CHECK_TEXT_CAPACITY],
            pos: 0,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buffer[..self.pos]).unwrap_or("")
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear(&mut self) {
        self.pos = 0;
        self.truncated = false;
    }
}

impl Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = self.buffer.len() - self.pos;
        let mut to_copy = s.len().min(remaining);
        while !s.is_char_boundary(to_copy) {
            to_copy -= 1;
        }
        if to_copy < s.len() {
            self.truncated = true;
        }

        self.buffer[self.pos..self.pos + to_copy].copy_from_slice(&s.as_bytes()[..to_copy]);
        self.pos += to_copy;

        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextBuffer").field(&self.as_str()).finish()
    }
}

#[doc(hidden)]
pub fn render_args(args: fmt::Arguments<'_>) -> TextBuffer {
    let mut text = TextBuffer::new();
    // TextBuffer never reports an error; overflow only truncates
    let _ = text.write_fmt(args);
    text
}

/// Renders `value` with its `Debug` representation.
pub fn render<T: fmt::Debug + ?Sized>(value: &T) -> TextBuffer {
    render_args(format_args!("{:?}", value))
}

/// Builds the [`CheckInfo`] of the current line inside a `#[def_test]` body.
#[macro_export]
macro_rules! check_info {
    () => {
        $crate::CheckInfo::new(__TINYTEST_SUITE, __TINYTEST_NAME, file!(), line!())
    };
}

/// Checks that a condition holds.
///
/// Must be used inside a `#[def_test]` function. Evaluates to `bool` and never
/// returns early.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {{
        let holds: bool = $cond;
        $crate::check::eval_with(
            stringify!($cond),
            if holds { "true" } else { "false" },
            &$crate::check_info!(),
            |_, _| holds,
        )
    }};
}

/// Checks that two values are equal.
///
/// Both sides are rendered with `Debug` for reporting; equality is decided
/// by `PartialEq`, so truncated renderings cannot hide a mismatch.
#[macro_export]
macro_rules! check_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        match (&$expected, &$actual) {
            (expected, actual) => {
                let equal = *expected == *actual;
                let expected_text = $crate::check::render(expected);
                let actual_text = $crate::check::render(actual);
                $crate::check::eval_with(
                    expected_text.as_str(),
                    actual_text.as_str(),
                    &$crate::check_info!(),
                    |_, _| equal,
                )
            }
        }
    };
}

/// Checks that two values differ.
#[macro_export]
macro_rules! check_ne {
    ($unexpected:expr, $actual:expr $(,)?) => {
        match (&$unexpected, &$actual) {
            (unexpected, actual) => {
                let differ = *unexpected != *actual;
                let expected_text =
                    $crate::check::render_args(format_args!("not {:?}", unexpected));
                let actual_text = $crate::check::render(actual);
                $crate::check::eval_with(
                    expected_text.as_str(),
                    actual_text.as_str(),
                    &$crate::check_info!(),
                    |_, _| differ,
                )
            }
        }
    };
}
