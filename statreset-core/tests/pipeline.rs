use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use statreset_core::adapters::InMemoryRecordStore;
use statreset_core::{BatchError, BatchSettings, run_batch, run_fs_batch};
use statreset_types::report::{RecordOutcome, ResetLine, ToolInfo};
use statreset_types::{CounterTag, Period, ResetSelector, Trigger, WriteMode};
use tempfile::TempDir;

const ALICE: &str = "USER alice\n[SECTION]\nDAYUP 5 102400 3600\nDAYDN 2 2048 60\nWKUP 9 9 9\n[ENDSECTION]\n";
const BOB: &str = "USER bob\n[SECTION]\nWKUP 1 1 1\n[ENDSECTION]\nDAYUP 3 3 3\n";

fn tool() -> ToolInfo {
    ToolInfo {
        name: "statreset".to_string(),
        version: None,
    }
}

fn settings(selector: ResetSelector) -> BatchSettings {
    BatchSettings {
        users_dir: Utf8PathBuf::from("users"),
        selector,
        ..Default::default()
    }
}

#[test]
fn resets_selected_records_and_skips_the_rest() {
    let store = InMemoryRecordStore::new("users", [("alice", ALICE), ("bob", BOB)]);
    let outcome = run_batch(&settings(ResetSelector::only(Period::Day)), &store, tool()).unwrap();

    assert_eq!(outcome.success_count(), 1);
    assert_eq!(outcome.report.summary.total, 2);
    assert_eq!(outcome.report.summary.unchanged, 1);
    assert_eq!(store.writes(), vec![Utf8PathBuf::from("users/alice")]);
    assert_eq!(
        store.contents("alice").unwrap(),
        "USER alice\n[SECTION]\nDAYUP 0 0 0\nDAYDN 0 0 0\nWKUP 9 9 9\n[ENDSECTION]\n"
    );
    assert_eq!(store.contents("bob").unwrap(), BOB);

    let alice = &outcome.report.records[0];
    assert_eq!(
        alice.outcome,
        RecordOutcome::Reset {
            lines: vec![
                ResetLine::new(3, CounterTag::DayUp),
                ResetLine::new(4, CounterTag::DayDn),
            ]
        }
    );
    assert_ne!(alice.sha256_before, alice.sha256_after);
}

#[test]
fn failing_record_does_not_abort_batch() {
    let store = InMemoryRecordStore::new(
        "users",
        [("alice", ALICE), ("bob", BOB), ("carol", ALICE)],
    )
    .with_unreadable("alice")
    .with_unwritable("bob");

    let selector = ResetSelector::only(Period::Week);
    let outcome = run_batch(&settings(selector), &store, tool()).unwrap();

    assert_eq!(outcome.report.summary.failed, 2);
    assert_eq!(outcome.success_count(), 1);
    assert_eq!(store.writes(), vec![Utf8PathBuf::from("users/carol")]);

    let failures: Vec<_> = outcome.report.failures().map(|(p, _)| p.to_string()).collect();
    assert_eq!(failures, vec!["users/alice", "users/bob"]);
}

#[test]
fn dry_run_reports_without_writing() {
    let store = InMemoryRecordStore::new("users", [("alice", ALICE)]);
    let mut s = settings(ResetSelector::only(Period::Day));
    s.dry_run = true;

    let outcome = run_batch(&s, &store, tool()).unwrap();
    assert!(outcome.report.dry_run);
    assert_eq!(outcome.success_count(), 1);
    assert!(store.writes().is_empty());
    assert_eq!(store.contents("alice").unwrap(), ALICE);
    assert!(outcome.patch.contains("-DAYUP 5 102400 3600\n"));
    assert!(outcome.patch.contains("+DAYUP 0 0 0\n"));
}

#[test]
fn second_run_changes_nothing() {
    let store = InMemoryRecordStore::new("users", [("alice", ALICE), ("bob", BOB)]);
    let s = settings(ResetSelector::only(Period::Day).with(Period::Week));

    let first = run_batch(&s, &store, tool()).unwrap();
    assert_eq!(first.success_count(), 2);

    let second = run_batch(&s, &store, tool()).unwrap();
    assert_eq!(second.success_count(), 0);
    assert_eq!(second.report.summary.unchanged, 2);
    assert!(second.patch.is_empty());
    assert_eq!(store.writes().len(), 2);
}

#[test]
fn triggers_are_echoed_into_report() {
    let store = InMemoryRecordStore::new("users", [("alice", ALICE)]);
    let mut s = settings(ResetSelector::only(Period::Day).with(Period::Week));
    s.triggers = vec![Trigger::Weekly];

    let outcome = run_batch(&s, &store, tool()).unwrap();
    assert_eq!(outcome.report.triggers, vec![Trigger::Weekly]);
}

#[test]
fn missing_directory_is_fatal() {
    let store = InMemoryRecordStore::missing("nowhere");
    let err = run_batch(&settings(ResetSelector::only(Period::Day)), &store, tool()).unwrap_err();
    assert!(matches!(err, BatchError::MissingDirectory { .. }));
    assert!(err.to_string().contains("nowhere"));
}

#[test]
fn empty_directory_is_fatal() {
    let store = InMemoryRecordStore::new("users", Vec::<(&str, &str)>::new());
    let err = run_batch(&settings(ResetSelector::only(Period::Day)), &store, tool()).unwrap_err();
    assert!(matches!(err, BatchError::NoRecords { .. }));
    assert_eq!(err.to_string(), "no userfiles found in users");
}

#[test]
fn fs_batch_leaves_unmodified_files_untouched() {
    let temp = TempDir::new().expect("temp dir");
    let users = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    std::fs::write(users.join("alice"), ALICE).unwrap();
    std::fs::write(users.join("bob"), BOB).unwrap();
    let bob_mtime = std::fs::metadata(users.join("bob")).unwrap().modified().unwrap();

    let s = BatchSettings {
        users_dir: users.clone(),
        selector: ResetSelector::only(Period::Day),
        write_mode: WriteMode::Atomic,
        ..Default::default()
    };
    let outcome = run_fs_batch(&s, tool()).unwrap();

    assert_eq!(outcome.success_count(), 1);
    assert!(
        std::fs::read_to_string(users.join("alice"))
            .unwrap()
            .contains("DAYUP 0 0 0\n")
    );
    assert_eq!(std::fs::read_to_string(users.join("bob")).unwrap(), BOB);
    let bob_mtime_after = std::fs::metadata(users.join("bob")).unwrap().modified().unwrap();
    assert_eq!(bob_mtime, bob_mtime_after);
}

#[test]
fn fs_batch_reports_undecodable_record() {
    let temp = TempDir::new().expect("temp dir");
    let users = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    std::fs::write(users.join("alice"), ALICE).unwrap();
    std::fs::write(users.join("garbled"), b"[SECTION]\nDAYUP \xff 1 2\n").unwrap();

    let s = BatchSettings {
        users_dir: users.clone(),
        selector: ResetSelector::only(Period::Day),
        ..Default::default()
    };
    let outcome = run_fs_batch(&s, tool()).unwrap();
    assert_eq!(outcome.success_count(), 1);
    assert_eq!(outcome.report.summary.failed, 1);
    assert_eq!(
        std::fs::read(users.join("garbled")).unwrap(),
        b"[SECTION]\nDAYUP \xff 1 2\n"
    );
}

#[cfg(unix)]
#[test]
fn fs_batch_atomic_mode_resets_symlinked_record() {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    let users = root.join("users");
    std::fs::create_dir(&users).unwrap();
    std::fs::write(root.join("real"), "[SECTION]\nDAYUP 1 2 3\n[ENDSECTION]\n").unwrap();
    std::os::unix::fs::symlink("../real", users.join("linked")).unwrap();

    let s = BatchSettings {
        users_dir: users.clone(),
        selector: ResetSelector::only(Period::Day),
        write_mode: WriteMode::Atomic,
        ..Default::default()
    };
    let outcome = run_fs_batch(&s, tool()).unwrap();

    assert_eq!(outcome.success_count(), 1);
    let link_meta = std::fs::symlink_metadata(users.join("linked")).unwrap();
    assert!(link_meta.file_type().is_symlink());
    assert_eq!(
        std::fs::read_to_string(root.join("real")).unwrap(),
        "[SECTION]\nDAYUP 0 0 0\n[ENDSECTION]\n"
    );
}
