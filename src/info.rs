use core::fmt;

/// Where a check happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInfo {
    suite: &'static str,
    test: &'static str,
    file: &'static str,
    line: u32,
}

impl CheckInfo {
    pub const fn new(suite: &'static str, test: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            suite,
            test,
            file,
            line,
        }
    }

    pub fn suite(&self) -> &'static str {
        self.suite
    }

    pub fn test(&self) -> &'static str {
        self.test
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CheckInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suite.is_empty() {
            write!(f, "{} ({}:{})", self.test, self.file, self.line)
        } else {
            write!(f, "{}::{} ({}:{})", self.suite, self.test, self.file, self.line)
        }
    }
}

/// Suite name used by `#[def_test]` when no `suite = ".."` is given.
pub const fn suite_name() -> &'static str {
    ""
}
