//! End-to-end tests for the command interpreter.
//!
//! These drive a directive stream through the public API against a
//! temporary directory standing in for the cgroup controller mount:
//! 1. Group lifecycle (create, add, set_limit, remove)
//! 2. Error isolation between lines
//! 3. Path safety of hostile input

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::Cursor;

use cgshare_core::cgroup::CgroupFs;
use cgshare_core::cgroup::cpu::read_cpu_shares;
use cgshare_core::{Interpreter, InterpreterOptions};

fn interpreter(root: &std::path::Path) -> Interpreter {
    Interpreter::new(CgroupFs::new(root), InterpreterOptions::default())
}

// ── Lifecycle ────────────────────────────────────────────────────────

#[test]
fn group_lifecycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let interpreter = interpreter(dir.path());
    let group = dir.path().join("cpu").join("grpX");

    let report = interpreter
        .run(Cursor::new(
            "create:cpu:_:grpX\n\
             add:cpu:_:grpX:1234\n\
             add:cpu:_:grpX:1235\n\
             set_limit:cpu:_:grpX:cpu.shares:1024\n\
             set_limit:cpu:_:grpX:cpu.shares:512\n",
        ))
        .expect("should run");
    assert_eq!(report.applied, 5);
    assert!(report.is_clean());

    let tasks = std::fs::read_to_string(group.join("tasks")).expect("read tasks");
    assert_eq!(tasks, "1234\n1235\n");
    assert_eq!(read_cpu_shares(&group).expect("read shares"), 512);

    // cgroupfs removes its pseudo-files with the directory; emulate that.
    std::fs::remove_file(group.join("tasks")).expect("clear tasks");
    std::fs::remove_file(group.join("cpu.shares")).expect("clear shares");

    let report = interpreter
        .run(Cursor::new("remove:cpu:_:grpX\n"))
        .expect("should run");
    assert_eq!(report.applied, 1);
    assert!(!group.exists());
}

#[test]
fn create_is_idempotent_across_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let interpreter = interpreter(dir.path());
    for _ in 0..2 {
        let report = interpreter
            .run(Cursor::new("create:cpu:_:grpX\n"))
            .expect("should run");
        assert!(report.is_clean());
    }
}

// ── Error isolation ─────────────────────────────────────────────────

#[test]
fn bad_lines_do_not_stop_good_ones() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report = interpreter(dir.path())
        .run(Cursor::new(
            "create:cpu:_:a\n\
             create:cpu:_\n\
             frobnicate:cpu:_:a\n\
             add:cpu:_:never:1\n\
             add:cpu:_:a:77\n",
        ))
        .expect("should run");

    assert_eq!(report.lines, 5);
    assert_eq!(report.parse_errors, 2);
    assert_eq!(report.fs_errors, 1);
    assert_eq!(report.applied, 2);
    let tasks = std::fs::read_to_string(dir.path().join("cpu/a/tasks")).expect("read tasks");
    assert_eq!(tasks.trim(), "77");
}

// ── Path safety ─────────────────────────────────────────────────────

#[test]
fn hostile_segments_never_leave_the_root() {
    let outer = tempfile::tempdir().expect("tempdir");
    let root = outer.path().join("root");
    std::fs::create_dir(&root).expect("mkdir root");

    let report = interpreter(&root)
        .run(Cursor::new(
            "create:..:_:escaped\n\
             create:cpu:_:../escaped\n\
             create:cpu:_:a; touch pwned\n",
        ))
        .expect("should run");

    assert_eq!(report.parse_errors, 2);
    assert_eq!(report.applied, 1);
    assert!(!outer.path().join("escaped").exists());
    assert!(root.join("cpu").join("a; touch pwned").is_dir());
    assert!(!outer.path().join("pwned").exists());
}
