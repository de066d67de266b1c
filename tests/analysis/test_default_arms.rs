// Default arms: intentional ones silence a switch, safety guards do not.

use sealcheck_core::config::{DefaultArmPolicy, SealcheckConfig};
use sealcheck_enforce::engine::AnalysisEngine;
use sealcheck_enforce::types::CheckResult;

use super::common;
use super::common::fixtures::GUARDS_GO;

fn check_guards(config: &SealcheckConfig) -> CheckResult {
    let (_dir, root) = common::create_go_tree(&[("guards/guards.go", GUARDS_GO)]);
    let modules = common::load(&root, config);
    AnalysisEngine::with_config(config).check(&modules).unwrap()
}

fn message_for(result: &CheckResult, func: &str) -> Option<String> {
    let line = common::switch_line(GUARDS_GO, func);
    result
        .diagnostics
        .iter()
        .find(|d| d.line == line)
        .map(|d| d.message.clone())
}

#[test]
fn test_panic_default_is_still_checked() {
    let result = check_guards(&SealcheckConfig::default());
    assert_eq!(
        message_for(&result, "Panics").as_deref(),
        Some("missing cases in type switch on Event: guards.Key, guards.Scroll")
    );
}

#[test]
fn test_error_constructor_default_is_still_checked() {
    let result = check_guards(&SealcheckConfig::default());
    assert_eq!(
        message_for(&result, "ReturnsError").as_deref(),
        Some("missing cases in type switch on Event: guards.Key, guards.Scroll")
    );
    assert_eq!(
        message_for(&result, "ReturnsSentinel").as_deref(),
        Some("missing cases in type switch on Event: guards.Scroll")
    );
}

#[test]
fn test_custom_error_type_default_is_still_checked() {
    let result = check_guards(&SealcheckConfig::default());
    assert_eq!(
        message_for(&result, "ReturnsCustomError").as_deref(),
        Some("missing cases in type switch on Event: guards.Click, guards.Scroll")
    );
}

#[test]
fn test_nil_return_default_is_intentional() {
    let result = check_guards(&SealcheckConfig::default());
    assert_eq!(message_for(&result, "ReturnsNil"), None);
    assert_eq!(result.info.sites_skipped_default, 1);
}

#[test]
fn test_last_statement_policy_looks_past_logging() {
    let result = check_guards(&SealcheckConfig::default());
    assert_eq!(
        message_for(&result, "LogsThenPanics").as_deref(),
        Some("missing cases in type switch on Event: guards.Scroll")
    );
    assert_eq!(result.diagnostics.len(), 5);
}

#[test]
fn test_sole_statement_policy_requires_single_guard() {
    let config = SealcheckConfig {
        default_arm: DefaultArmPolicy::SoleStatement,
        ..SealcheckConfig::default()
    };
    let result = check_guards(&config);
    assert_eq!(message_for(&result, "LogsThenPanics"), None);
    assert!(message_for(&result, "Panics").is_some());
    assert_eq!(result.diagnostics.len(), 4);
    assert_eq!(result.info.sites_skipped_default, 2);
}

#[test]
fn test_configured_abort_function() {
    let source = r#"package guards

import "log"

type Event interface {
	isEvent()
}

type Click struct{}
type Key struct{}

func (Click) isEvent() {}
func (Key) isEvent()   {}

func Fatal(e Event) string {
	switch e.(type) {
	case Click:
		return "click"
	default:
		log.Fatalf("unexpected %T", e)
	}
	return ""
}
"#;
    let (_dir, root) = common::create_go_tree(&[("guards/guards.go", source)]);

    let default_config = SealcheckConfig::default();
    let modules = common::load(&root, &default_config);
    let result = AnalysisEngine::with_config(&default_config)
        .check(&modules)
        .unwrap();
    assert!(result.diagnostics.is_empty());

    let config = SealcheckConfig {
        abort_functions: vec!["panic".to_string(), "log.Fatalf".to_string()],
        ..SealcheckConfig::default()
    };
    let result = AnalysisEngine::with_config(&config).check(&modules).unwrap();
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].missing, vec!["guards.Key"]);
}
