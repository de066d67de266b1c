// Tests for `sealcheck check`.

use std::fs;
use std::process::Command;

use super::common;
use super::common::fixtures::CONSUMER_GO;

#[test]
fn test_check_reports_diagnostics() {
    let (_dir, root) = common::union_consumer_tree();
    let output = Command::new(common::sealcheck_bin())
        .arg("check")
        .current_dir(&root)
        .output()
        .expect("Failed to run sealcheck check");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = format!(
        "consumer/consumer.go:{}:2: missing cases in type switch on Shape: union.*Rectangle, union.*Triangle",
        common::switch_line(CONSUMER_GO, "DrawShape")
    );
    assert!(stdout.lines().any(|l| l == expected), "stdout: {stdout}");
    assert!(stdout.contains("5 incomplete type switch(es) in 2 file(s)"));
}

#[test]
fn test_check_explicit_path() {
    let (_dir, root) = common::union_consumer_tree();
    let output = Command::new(common::sealcheck_bin())
        .args(["check", root.join("union").to_str().unwrap()])
        .output()
        .expect("Failed to run sealcheck check");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Rooted at union/, so the package path is its own name.
    assert!(stdout.contains("union.go:"));
    assert!(!stdout.contains("consumer"));
}

#[test]
fn test_check_json_output() {
    let (_dir, root) = common::union_consumer_tree();
    let output = Command::new(common::sealcheck_bin())
        .args(["check", "--json"])
        .current_dir(&root)
        .output()
        .expect("Failed to run sealcheck check --json");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["diagnostics"].as_array().unwrap().len(), 5);
}

#[test]
fn test_check_verbose_goes_to_stderr() {
    let (_dir, root) = common::union_consumer_tree();
    let output = Command::new(common::sealcheck_bin())
        .args(["check", "--verbose", "--json"])
        .current_dir(&root)
        .output()
        .expect("Failed to run sealcheck check --verbose");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sealcheck check: loaded 2 module(s)"));
    assert!(stderr.contains("2 contract(s)"));
    // stdout stays machine readable.
    serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap();
}

#[test]
fn test_check_sole_statement_flag() {
    let source = r#"package guards

type Event interface {
	isEvent()
}

type Click struct{}
type Key struct{}

func (Click) isEvent() {}
func (Key) isEvent()   {}

func Handle(e Event) string {
	switch e.(type) {
	case Click:
		return "click"
	default:
		println("unexpected")
		panic("unreachable")
	}
}
"#;
    let (_dir, root) = common::create_go_tree(&[("guards/guards.go", source)]);
    let bin = common::sealcheck_bin();

    let output = Command::new(&bin)
        .arg("check")
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let output = Command::new(&bin)
        .args(["check", "--default-arm", "sole-statement"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_check_include_tests_flag() {
    let test_file = "package union\n\nfunc checkResult(r Result) {\n\tswitch r.(type) {\n\tcase *Success, *Error:\n\t}\n}\n\nfunc checkShape(s Shape) {\n\tswitch s.(type) {\n\t}\n}\n";
    let (_dir, root) = common::union_consumer_tree();
    fs::write(root.join("union/union_test.go"), test_file).unwrap();
    let bin = common::sealcheck_bin();

    let without = Command::new(&bin)
        .args(["check", "--json"])
        .current_dir(&root)
        .output()
        .unwrap();
    let with = Command::new(&bin)
        .args(["check", "--json", "--include-tests"])
        .current_dir(&root)
        .output()
        .unwrap();

    let count = |out: &[u8]| {
        let json: serde_json::Value = serde_json::from_slice(out).unwrap();
        json["diagnostics"].as_array().unwrap().len()
    };
    assert_eq!(count(&without.stdout), 5);
    assert_eq!(count(&with.stdout), 6);
}
