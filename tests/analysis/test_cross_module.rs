// Facts exported by one package and consumed by switches in another.

use sealcheck_core::config::SealcheckConfig;
use sealcheck_enforce::engine::AnalysisEngine;
use sealcheck_enforce::types::AnalysisError;

use super::common;
use super::common::fixtures::{CONSUMER_GO, UNION_GO};

#[test]
fn test_consumer_reports_imported_contracts() {
    let (_dir, root) = common::union_consumer_tree();
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();

    let consumer: Vec<(u32, &str)> = result
        .diagnostics
        .iter()
        .filter(|d| d.file == "consumer/consumer.go")
        .map(|d| (d.line, d.message.as_str()))
        .collect();
    assert_eq!(
        consumer,
        vec![
            (
                common::switch_line(CONSUMER_GO, "ProcessResult"),
                "missing cases in type switch on Result: union.*Error"
            ),
            (
                common::switch_line(CONSUMER_GO, "DrawShape"),
                "missing cases in type switch on Shape: union.*Rectangle, union.*Triangle"
            ),
            (
                common::switch_line(CONSUMER_GO, "GetShapeName"),
                "missing cases in type switch on Shape: union.*Triangle"
            ),
        ]
    );
}

#[test]
fn test_diagnostics_sorted_by_file_then_line() {
    let (_dir, root) = common::union_consumer_tree();
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();

    assert_eq!(result.diagnostics.len(), 5);
    let files: Vec<&str> = result.diagnostics.iter().map(|d| d.file.as_str()).collect();
    assert_eq!(
        files,
        vec![
            "consumer/consumer.go",
            "consumer/consumer.go",
            "consumer/consumer.go",
            "union/union.go",
            "union/union.go",
        ]
    );
    assert_eq!(
        result.diagnostics[3].line,
        common::switch_line(UNION_GO, "HandleResult")
    );
}

#[test]
fn test_consumer_diagnostic_carries_fact_fingerprint() {
    let (_dir, root) = common::union_consumer_tree();
    let modules = common::load(&root, &SealcheckConfig::default());
    let engine = AnalysisEngine::new();
    let result = engine.check(&modules).unwrap();
    let facts = engine.discover(&modules).unwrap();

    let shape = facts
        .facts
        .iter()
        .find(|f| f.contract.name == "Shape")
        .unwrap();
    let draw = result
        .diagnostics
        .iter()
        .find(|d| d.line == common::switch_line(CONSUMER_GO, "DrawShape"))
        .unwrap();
    assert_eq!(draw.fingerprint, shape.fingerprint);
}

#[test]
fn test_open_interface_is_not_checked() {
    // Exported methods only: anyone may implement it, so there is nothing
    // to be exhaustive over.
    let open = r#"package open

type Stringer interface {
	String() string
}

type A struct{}

func (A) String() string { return "a" }

func Describe(s Stringer) string {
	switch s.(type) {
	case A:
		return "a"
	}
	return ""
}
"#;
    let (_dir, root) = common::create_go_tree(&[("open/open.go", open)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.info.contracts, 0);
    assert_eq!(result.info.dispatch_sites, 1);
    assert_eq!(result.info.sites_checked, 0);
}

#[test]
fn test_module_path_from_go_mod() {
    let consumer = r#"package consumer

import "example.com/app/union"

func Process(r union.Result) string {
	switch r.(type) {
	case *union.Success:
		return "ok"
	}
	return ""
}
"#;
    let (_dir, root) = common::create_go_tree(&[
        ("go.mod", "module example.com/app\n\ngo 1.22\n"),
        ("union/union.go", UNION_GO),
        ("consumer/consumer.go", consumer),
    ]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();

    let d = result
        .diagnostics
        .iter()
        .find(|d| d.file == "consumer/consumer.go")
        .unwrap();
    assert_eq!(d.contract.module, "example.com/app/union");
    assert_eq!(d.message, "missing cases in type switch on Result: union.*Error");
}

#[test]
fn test_import_cycle_is_an_error() {
    let a = "package a\n\nimport \"b\"\n\nvar _ = b.X\n";
    let b = "package b\n\nimport \"a\"\n\nvar X = a.Y\n";
    let (_dir, root) = common::create_go_tree(&[("a/a.go", a), ("b/b.go", b)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let err = AnalysisEngine::new().check(&modules).unwrap_err();
    assert!(matches!(err, AnalysisError::ImportCycle(_)));
}
