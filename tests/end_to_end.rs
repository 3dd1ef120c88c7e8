//! Registers three tests through `#[def_test]` and runs the process-wide
//! runner, observing the notification sequence.

use tinytest::{CheckInfo, Runner, TestNotification, TestStats, check, check_eq, def_test};

#[def_test]
fn t1_passes() {
    check_eq!(2, 1 + 1);
    check!(3 > 2);
}

#[def_test]
fn t2_one_failing_check() {
    check_eq!(5, 4);
    check_eq!("same", "same");
}

#[def_test]
fn t3_passes() {
    let values = [1, 2, 3];
    check_eq!(6, values.iter().sum::<i32>());
}

#[derive(Debug, PartialEq)]
enum Event {
    Failure {
        expected: String,
        value: String,
        info: CheckInfo,
    },
    Result(TestStats),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

impl TestNotification for Recorder {
    fn notify_result(&mut self, stats: TestStats) {
        self.events.push(Event::Result(stats));
    }

    fn notify_failure(&mut self, expected: &str, value: &str, info: &CheckInfo) {
        self.events.push(Event::Failure {
            expected: expected.to_owned(),
            value: value.to_owned(),
            info: *info,
        });
    }
}

#[test]
fn test_three_registered_tests_one_failure() {
    let _ = env_logger::builder().is_test(true).try_init();

    let runner = Runner::instance();
    assert_eq!(runner.len(), 3);

    let mut recorder = Recorder::default();
    let stats = runner.run(Some(&mut recorder));

    let expected_stats = TestStats {
        total: 3,
        failed: 1,
        error: 1,
    };
    assert_eq!(stats, expected_stats);
    assert_eq!(recorder.events.len(), 2);

    match &recorder.events[0] {
        Event::Failure {
            expected,
            value,
            info,
        } => {
            assert_eq!(expected, "5");
            assert_eq!(value, "4");
            assert_eq!(info.test(), "t2_one_failing_check");
            assert_eq!(info.suite(), "");
            assert!(info.file().ends_with("end_to_end.rs"));
        }
        other => panic!("expected a failure first, got {:?}", other),
    }
    assert_eq!(recorder.events[1], Event::Result(expected_stats));

    // a second run starts from zero and reports the same outcome
    assert_eq!(runner.run(None), expected_stats);
    assert_eq!(runner.stats(), expected_stats);
    assert!(!runner.is_running());
}
