use integration_tests::harness::{TestRun, apply_line, revision_line, send_line};
use jamtrace_core::analysis::AnalyzeError;
use jamtrace_core::cli::analyze::{AnalyzeArgs, analyze, run};
use jamtrace_core::cli::stamps::{self, StampsArgs};
use jamtrace_core::cli::{EXIT_OK, EXIT_UNRESOLVED};
use pretty_assertions::assert_eq;
use std::fs;

const STAMP: &str = "20260215-112804";

fn healthy_run() -> TestRun {
    let run = TestRun::new(STAMP);
    run.server_stdout("JammerNetz server listening on port 7777\n");
    run.server_remote(&(1..=4).map(revision_line).collect::<Vec<_>>());
    run.client_remote(
        "client1",
        &[send_line(1), send_line(2), send_line(3)],
    );
    run.client_remote("client2", &[apply_line(1), apply_line(2), apply_line(3)]);
    run
}

#[test]
fn healthy_run_reports_no_anomalies() {
    // Arrange
    let run = healthy_run();

    // Act
    let (report, text, status) = run.analyze();

    // Assert
    assert!(!report.has_anomalies(), "{text}");
    assert_eq!(status, 0);
    assert!(text.starts_with(&format!("Log analysis for run {STAMP}\n")));
    assert!(text.contains("- revision events: 4 | unique revisions: 4 | first:last = 1:4\n"));
    assert!(text.contains("- total sends: 3\n- total applies: 3\n"));
    assert!(text.ends_with("Result\n- no anomalies detected\n"));
}

#[test]
fn missing_client_logs_are_an_anomaly() {
    // Arrange
    let run = TestRun::new(STAMP);
    run.server_stdout("");

    // Act
    let (report, text, _) = run.analyze();

    // Assert
    assert!(text.contains("Client remote-control flow\n- no client remote logs found\n"));
    assert!(report.anomalies.contains("no client remote logs found"));
    assert!(text.contains("  - no client remote logs found\n"));
}

#[test]
fn malloc_failure_on_stdout_is_surfaced() {
    // Arrange
    let run = healthy_run();
    run.server_stdout(
        "\x1b[32mJammerNetz server listening\x1b[0m\n\
         malloc(): unaligned tcache chunk detected\n\
         shutting down\n",
    );

    // Act
    let (report, text, _) = run.analyze();

    // Assert
    assert!(text.contains(
        "- suspicious lines: 1\n  malloc(): unaligned tcache chunk detected\n"
    ));
    assert_eq!(
        report.anomalies.messages().collect::<Vec<_>>(),
        vec!["server stdout contains 1 suspicious lines"]
    );
}

#[test]
fn older_binary_without_apply_sequences_is_flagged() {
    // Arrange
    let run = TestRun::new(STAMP);
    run.server_stdout("");
    run.client_remote(
        "client1",
        &[
            send_line(1),
            "11:30:00.000 [client.apply] ApplyLocalVolume sourceClientId=1 targetChannel=0 controllerIndex=0 vol=0.5 seq=none".to_string(),
        ],
    );

    // Act
    let (report, _, _) = run.analyze();

    // Assert
    assert!(report.anomalies.contains(
        "no client.apply entries found (older binary or apply logging missing)"
    ));
}

#[test]
fn more_applies_than_sends_is_impossible() {
    let run = TestRun::new(STAMP);
    run.client_remote("client1", &[send_line(1)]);
    run.client_remote("client2", &[apply_line(1), apply_line(2)]);

    let (report, _, _) = run.analyze();

    assert!(report.anomalies.contains("apply count (2) exceeds send count (1)"));
}

#[test]
fn strict_mode_turns_anomalies_into_exit_status_one() {
    // Arrange
    let run = TestRun::new(STAMP);
    run.server_stdout("");
    let lenient = run.args();
    let strict = AnalyzeArgs {
        strict: true,
        ..run.args()
    };

    // Act
    let (report, _, lenient_status) = run.analyze_with(&lenient);
    let (_, _, strict_status) = run.analyze_with(&strict);

    // Assert
    assert!(report.has_anomalies());
    assert_eq!(lenient_status, 0);
    assert_eq!(strict_status, 1);
}

#[test]
fn strict_mode_on_a_clean_run_exits_zero() {
    let run = healthy_run();
    let args = AnalyzeArgs {
        strict: true,
        ..run.args()
    };

    let (_, _, status) = run.analyze_with(&args);

    assert_eq!(status, 0);
}

#[test]
fn latest_run_is_picked_when_no_stamp_is_given() {
    // Arrange
    let run = healthy_run().with_stamp("20260216-090000");
    run.server_stdout("");
    run.client_remote("client1", &[send_line(5), send_line(9)]);

    // Act
    let (report, _, _) = run.analyze();

    // Assert
    assert_eq!(report.files.stamp.as_str(), "20260216-090000");
    let client = run.client_file_name("client1");
    assert!(report
        .anomalies
        .contains(&format!("{client}: send sequence gaps 6,7,8")));
}

#[test]
fn explicit_stamp_selects_an_older_run() {
    let run = healthy_run().with_stamp("20260216-090000");
    run.server_stdout("fatal: lost audio device\n");
    let args = AnalyzeArgs {
        stamp: Some(STAMP.to_string()),
        ..run.args()
    };

    let (report, _, _) = run.analyze_with(&args);

    assert_eq!(report.files.stamp.as_str(), STAMP);
    assert!(!report.has_anomalies());
}

#[test]
fn rerunning_the_analysis_gives_the_same_report() {
    let run = healthy_run();
    run.client_remote("client3", &[send_line(1), send_line(3), send_line(2)]);

    let (first_report, first_text, _) = run.analyze();
    let (second_report, second_text, _) = run.analyze();

    assert_eq!(first_report, second_report);
    assert_eq!(first_text, second_text);
}

#[test]
fn missing_directory_does_not_resolve() {
    let run = TestRun::new(STAMP);
    let args = AnalyzeArgs {
        logs_dir: run.logs_dir().join("missing"),
        ..AnalyzeArgs::default()
    };

    let err = analyze(&args).unwrap_err();

    assert!(matches!(err, AnalyzeError::LogsDirNotFound { .. }));
    assert!(err.to_string().starts_with("logs directory not found: "));
}

#[test]
fn empty_directory_has_no_run_stamp() {
    let run = TestRun::new(STAMP);

    let err = analyze(&run.args()).unwrap_err();

    assert!(matches!(err, AnalyzeError::NoRunStamp { .. }));
}

#[test]
fn malformed_stamp_is_rejected() {
    let run = healthy_run();
    let args = AnalyzeArgs {
        stamp: Some("yesterday".to_string()),
        ..run.args()
    };

    let err = analyze(&args).unwrap_err();

    assert!(matches!(err, AnalyzeError::InvalidStamp { .. }));
}

#[test]
fn config_file_changes_limits_and_signatures() {
    // Arrange
    let run = healthy_run();
    run.server_stdout("xrun detected\nxrun detected\nfatal: something\n");
    let config = run.logs_dir().join("jamtrace.hcl");
    fs::write(&config, "display_limit = 1\nstdout_patterns = [\"XRUN\"]\n").unwrap();
    let args = AnalyzeArgs {
        config: Some(config),
        ..run.args()
    };

    // Act
    let (report, text, _) = run.analyze_with(&args);

    // Assert
    assert_eq!(report.suspicious_stdout.len(), 2);
    assert!(text.contains("- suspicious lines: 2\n  xrun detected\n  ... (+1 more)\n"));
}

#[test]
fn json_output_is_machine_readable() {
    let run = TestRun::new(STAMP);
    run.server_stdout("");
    let args = AnalyzeArgs {
        json: true,
        ..run.args()
    };

    let (_, text, _) = run.analyze_with(&args);

    assert!(text.trim_start().starts_with('{'));
    assert!(text.contains("\"message\": \"no client remote logs found\""));
}

#[test]
fn analyze_command_exits_two_when_the_run_does_not_resolve() {
    // Arrange
    let empty = TestRun::new(STAMP);
    let populated = healthy_run();
    let cases = [
        AnalyzeArgs {
            logs_dir: empty.logs_dir().join("missing"),
            ..AnalyzeArgs::default()
        },
        empty.args(),
        AnalyzeArgs {
            stamp: Some("2026-02-15".to_string()),
            ..populated.args()
        },
    ];

    for args in cases {
        // Act
        let status = run(&args).unwrap();

        // Assert
        assert_eq!(status, EXIT_UNRESOLVED, "{args:?}");
    }
}

#[test]
fn analyze_command_exits_zero_on_a_resolved_run() {
    let run_dir = healthy_run();

    assert_eq!(run(&run_dir.args()).unwrap(), EXIT_OK);
}

#[test]
fn stamps_command_exit_status() {
    // Arrange
    let empty = TestRun::new(STAMP);
    let populated = healthy_run();
    let stamps_in = |run: &TestRun| StampsArgs {
        logs_dir: run.logs_dir().to_path_buf(),
    };

    // Act / Assert
    assert_eq!(stamps::run(&stamps_in(&empty)), EXIT_UNRESOLVED);
    assert_eq!(stamps::run(&stamps_in(&populated)), EXIT_OK);
    assert_eq!(
        stamps::run(&StampsArgs {
            logs_dir: empty.logs_dir().join("missing"),
        }),
        EXIT_UNRESOLVED
    );
}
