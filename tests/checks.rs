//! Check macros inside `#[def_test]` bodies: suites, early-return freedom and
//! the rendered operands handed to the notification sink.

use tinytest::{CheckInfo, Runner, TestNotification, TestStats, check, check_eq, check_ne, def_test};

#[def_test(suite = "arith")]
fn arith_every_check_runs() {
    check_eq!(1, 2);
    let reached = true;
    check!(reached);
    check_eq!(10, 5 * 2);
}

#[def_test(suite = "text")]
fn text_ne_and_condition() {
    check_ne!("a", "a");
    check_ne!("a", "b");
    let v = 7;
    check!(v < 5);
}

#[def_test]
fn default_suite_in_closure() {
    let run = || check_eq!(Some(3), None::<i32>);
    let failed = !run();
    check!(failed);
}

#[derive(Default)]
struct Recorder {
    failures: Vec<(String, String, &'static str, &'static str)>,
    results: Vec<TestStats>,
}

impl TestNotification for Recorder {
    fn notify_result(&mut self, stats: TestStats) {
        self.results.push(stats);
    }

    fn notify_failure(&mut self, expected: &str, value: &str, info: &CheckInfo) {
        self.failures
            .push((expected.to_owned(), value.to_owned(), info.suite(), info.test()));
    }
}

#[test]
fn test_check_macros_report_and_continue() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut recorder = Recorder::default();
    let stats = Runner::instance().run(Some(&mut recorder));

    // error count exceeds failed count: one test raised two failed checks
    assert_eq!(
        stats,
        TestStats {
            total: 3,
            failed: 3,
            error: 4,
        }
    );
    assert_eq!(recorder.results, [stats]);

    let mut failures = recorder.failures;
    failures.sort();
    assert_eq!(
        failures,
        [
            ("1".to_owned(), "2".to_owned(), "arith", "arith_every_check_runs"),
            ("Some(3)".to_owned(), "None".to_owned(), "", "default_suite_in_closure"),
            ("not \"a\"".to_owned(), "\"a\"".to_owned(), "text", "text_ne_and_condition"),
            ("v < 5".to_owned(), "false".to_owned(), "text", "text_ne_and_condition"),
        ]
    );
}
