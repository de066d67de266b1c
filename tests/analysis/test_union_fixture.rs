// Switches inside the package that declares the sealed interfaces.

use sealcheck_core::config::SealcheckConfig;
use sealcheck_enforce::engine::AnalysisEngine;

use super::common;
use super::common::fixtures::UNION_GO;

#[test]
fn test_union_reports_missing_variants() {
    let (_dir, root) = common::create_go_tree(&[("union/union.go", UNION_GO)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();

    let messages: Vec<(u32, &str)> = result
        .diagnostics
        .iter()
        .map(|d| (d.line, d.message.as_str()))
        .collect();
    assert_eq!(
        messages,
        vec![
            (
                common::switch_line(UNION_GO, "HandleResult"),
                "missing cases in type switch on Result: union.*Error"
            ),
            (
                common::switch_line(UNION_GO, "CalculateArea"),
                "missing cases in type switch on Shape: union.*Triangle"
            ),
        ]
    );
    assert_eq!(result.status, "error");
}

#[test]
fn test_union_diagnostic_position() {
    let (_dir, root) = common::create_go_tree(&[("union/union.go", UNION_GO)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();

    let first = &result.diagnostics[0];
    assert_eq!(first.file, "union/union.go");
    // Switch is indented by one tab.
    assert_eq!(first.column, 2);
    assert_eq!(first.contract.module, "union");
    assert_eq!(first.contract.name, "Result");
    assert_eq!(first.missing, vec!["union.*Error"]);
}

#[test]
fn test_union_site_accounting() {
    let (_dir, root) = common::create_go_tree(&[("union/union.go", UNION_GO)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();

    assert_eq!(result.modules_analyzed, 1);
    assert_eq!(result.info.contracts, 2);
    assert_eq!(result.info.dispatch_sites, 6);
    assert_eq!(result.info.sites_skipped_default, 2);
    assert_eq!(result.info.sites_checked, 6);
}

#[test]
fn test_complete_package_is_clean() {
    let source = r#"package union

type Result interface {
	isResult()
}

type Success struct{}
type Error struct{}

func (*Success) isResult() {}
func (*Error) isResult()   {}

func Handle(r Result) string {
	switch r.(type) {
	case *Success:
		return "success"
	case *Error:
		return "error"
	}
	return ""
}
"#;
    let (_dir, root) = common::create_go_tree(&[("union/union.go", source)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.status, "ok");
}

#[test]
fn test_nil_case_does_not_count_as_variant() {
    let source = r#"package union

type Result interface {
	isResult()
}

type Success struct{}
type Error struct{}

func (*Success) isResult() {}
func (*Error) isResult()   {}

func Handle(r Result) string {
	switch r.(type) {
	case nil:
		return "none"
	case *Success:
		return "success"
	}
	return ""
}
"#;
    let (_dir, root) = common::create_go_tree(&[("union/union.go", source)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].missing, vec!["union.*Error"]);
}

#[test]
fn test_value_form_case_does_not_cover_pointer_variant() {
    let source = r#"package union

type Shape interface {
	isShape()
}

type Circle struct{}
type Square struct{}

func (*Circle) isShape() {}
func (Square) isShape()  {}

func Name(s Shape) string {
	switch s.(type) {
	case *Square:
		return "square"
	case *Circle:
		return "circle"
	}
	return ""
}
"#;
    let (_dir, root) = common::create_go_tree(&[("union/union.go", source)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "missing cases in type switch on Shape: union.Square"
    );
}
