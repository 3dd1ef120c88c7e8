//! Cases added by hand to the process-wide runner, with bodies calling the
//! free `eval` function directly.

use std::sync::Mutex;

use tinytest::{CheckInfo, Runner, TestCase, TestNotification, TestStats, Testable, eval, eval_with};

static ORDER: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

fn first() {
    ORDER.lock().unwrap().push("first");
    eval("5", "5", &CheckInfo::new("manual", "first", file!(), line!()));
}

struct Second;

impl Testable for Second {
    fn run(&self) {
        ORDER.lock().unwrap().push("second");
        let info = CheckInfo::new("manual", "second", file!(), line!());
        eval("5", "4", &info);
        eval("5", "3", &info);
    }
}

fn third() {
    ORDER.lock().unwrap().push("third");
    let info = CheckInfo::new("manual", "third", file!(), line!());
    eval_with("Hello", "hello", &info, |a, b| a.eq_ignore_ascii_case(b));
}

static FIRST_BODY: fn() = first;
static THIRD_BODY: fn() = third;

static FIRST: TestCase = TestCase::new("first", "manual", module_path!(), &FIRST_BODY);
static SECOND: TestCase = TestCase::new("second", "manual", module_path!(), &Second);
static THIRD: TestCase = TestCase::new("third", "manual", module_path!(), &THIRD_BODY);

#[derive(Default)]
struct Failures(Vec<(String, String)>, Option<TestStats>);

impl TestNotification for Failures {
    fn notify_result(&mut self, stats: TestStats) {
        assert!(self.1.replace(stats).is_none(), "result reported twice");
    }

    fn notify_failure(&mut self, expected: &str, value: &str, _info: &CheckInfo) {
        self.0.push((expected.to_owned(), value.to_owned()));
    }
}

#[test]
fn test_manual_cases_in_registration_order() {
    let _ = env_logger::builder().is_test(true).try_init();

    let runner = Runner::instance();
    assert!(runner.is_empty());

    runner.add(&FIRST);
    runner.add(&SECOND);
    runner.add(&THIRD);
    runner.add(&SECOND);
    assert_eq!(runner.len(), 3);

    let mut failures = Failures::default();
    let stats = runner.run(Some(&mut failures));

    assert_eq!(*ORDER.lock().unwrap(), ["first", "second", "third"]);
    assert_eq!(
        stats,
        TestStats {
            total: 3,
            failed: 1,
            error: 2,
        }
    );
    assert_eq!(failures.1, Some(stats));
    assert_eq!(
        failures.0,
        [("5".to_owned(), "4".to_owned()), ("5".to_owned(), "3".to_owned())]
    );
    assert!(FIRST.success());
    assert!(!SECOND.success());
    assert!(THIRD.success());
}
