// Exit codes: 0 clean, 1 diagnostics, 2 could not analyze.

use std::process::Command;

use super::common;

#[test]
fn test_clean_tree_exits_zero() {
    let (_dir, root) = common::create_go_tree(&[(
        "main.go",
        "package main\n\nfunc main() {}\n",
    )]);
    let output = Command::new(common::sealcheck_bin())
        .arg("check")
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_root_exits_two() {
    let (_dir, root) = common::create_go_tree(&[]);
    let output = Command::new(common::sealcheck_bin())
        .args(["check", root.join("missing").to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("sealcheck check:"));
}

#[test]
fn test_import_cycle_exits_two() {
    let (_dir, root) = common::create_go_tree(&[
        ("a/a.go", "package a\n\nimport \"b\"\n\nvar _ = b.X\n"),
        ("b/b.go", "package b\n\nimport \"a\"\n\nvar X = a.Y\n"),
    ]);
    let output = Command::new(common::sealcheck_bin())
        .arg("check")
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cycle"));
}

#[test]
fn test_unparseable_file_is_skipped_with_warning() {
    let (_dir, root) = common::create_go_tree(&[
        ("ok/ok.go", "package ok\n\nfunc F() {}\n"),
        ("bad/bad.go", "package bad\n\nfunc {{{\n"),
    ]);
    let output = Command::new(common::sealcheck_bin())
        .arg("check")
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sealcheck: warning: failed to parse bad/bad.go"));
}

#[test]
fn test_unknown_shell_exits_two() {
    let output = Command::new(common::sealcheck_bin())
        .args(["completion", "tcsh"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_completion_bash() {
    let output = Command::new(common::sealcheck_bin())
        .args(["completion", "bash"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("sealcheck"));
}
