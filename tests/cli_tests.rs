// End-to-end tests running the built binaries. `CARGO_BIN_EXE_<name>` is
// provided by cargo and points at the compiled binary for this package.

use std::io::Write;
use std::process::{Command, Stdio};

fn loglens() -> Command {
    Command::new(env!("CARGO_BIN_EXE_loglens"))
}

fn llcheck() -> Command {
    Command::new(env!("CARGO_BIN_EXE_llcheck"))
}

#[test]
fn prints_version() {
    let out = loglens().arg("--version").output().expect("run loglens");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout.trim(),
        format!("loglens {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn prints_help() {
    let out = loglens().arg("--help").output().expect("run loglens");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage: loglens"));
    assert!(stdout.contains("--levels-only"));
}

#[test]
fn unknown_flag_exits_with_usage_error() {
    let out = loglens().arg("--frobnicate").output().expect("run loglens");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unknown option"));
}

#[test]
fn filters_stdin_when_no_command_given() {
    let mut child = loglens()
        .args(["--colour", "off"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn loglens");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"WARN low disk\nplain line\n")
        .unwrap();

    let out = child.wait_with_output().expect("wait loglens");
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "WARN low disk\nplain line\n"
    );
}

#[test]
fn stdin_output_is_colored_when_forced_on() {
    let mut child = loglens()
        .args(["--colour", "on", "--levels-only"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn loglens");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"ERROR broken\n")
        .unwrap();

    let out = child.wait_with_output().expect("wait loglens");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\x1b["), "expected ANSI in {:?}", stdout);
    assert!(stdout.contains("ERROR broken"));
}

#[test]
fn wraps_a_command_and_filters_its_output() {
    let out = loglens()
        .args(["--colour", "off", "echo", "hello world"])
        .output()
        .expect("run loglens echo");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "hello world\n");
}

#[test]
fn propagates_child_exit_code() {
    let out = loglens()
        .args(["--colour", "off", "sh", "-c", "exit 3"])
        .output()
        .expect("run loglens sh");
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn missing_command_reports_spawn_failure() {
    let out = loglens()
        .arg("this-command-should-not-exist-xyz")
        .output()
        .expect("run loglens");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed to spawn"));
}

#[test]
fn llcheck_accepts_the_shipped_default_config() {
    let out = llcheck().arg("etc/loglens.conf").output().expect("run llcheck");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("ok (3 levels)"));
}

#[test]
fn llcheck_rejects_broken_config() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.conf");
    std::fs::write(&bad, "level=WARN\ncolours=sparkly\n").unwrap();

    let out = llcheck().arg(&bad).output().expect("run llcheck");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("sparkly"));
}
