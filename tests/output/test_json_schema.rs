// JSON output shape for check and facts.

use sealcheck_core::config::SealcheckConfig;
use sealcheck_enforce::engine::AnalysisEngine;
use sealcheck_enforce::types::CheckResult;
use sealcheck_output::json::JsonFormatter;
use sealcheck_output::OutputFormatter;
use serde_json::Value;

use super::common;

#[test]
fn test_check_json_fields() {
    let (_dir, root) = common::union_consumer_tree();
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();
    let json: Value = serde_json::from_str(&JsonFormatter.format_check(&result)).unwrap();

    assert_eq!(json["command"], "check");
    assert_eq!(json["status"], "error");
    assert_eq!(json["modules_analyzed"], 2);
    assert_eq!(json["info"]["contracts"], 2);

    let first = &json["diagnostics"][0];
    assert_eq!(first["file"], "consumer/consumer.go");
    assert_eq!(first["column"], 2);
    assert_eq!(first["contract"]["module"], "union");
    assert_eq!(first["contract"]["name"], "Result");
    assert_eq!(first["missing"], serde_json::json!(["union.*Error"]));
    assert_eq!(
        first["message"],
        "missing cases in type switch on Result: union.*Error"
    );
    assert_eq!(first["fingerprint"].as_str().unwrap().len(), 11);
}

#[test]
fn test_check_json_round_trips() {
    let (_dir, root) = common::union_consumer_tree();
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();
    let parsed: CheckResult =
        serde_json::from_str(&JsonFormatter.format_check(&result)).unwrap();
    assert_eq!(parsed.diagnostics, result.diagnostics);
}

#[test]
fn test_clean_check_json_status_ok() {
    let (_dir, root) = common::create_go_tree(&[(
        "main.go",
        "package main\n\nfunc main() {}\n",
    )]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();
    let json: Value = serde_json::from_str(&JsonFormatter.format_check(&result)).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["diagnostics"], serde_json::json!([]));
}

#[test]
fn test_facts_json_variants_are_strings() {
    let (_dir, root) = common::union_consumer_tree();
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().discover(&modules).unwrap();
    let json: Value = serde_json::from_str(&JsonFormatter.format_facts(&result)).unwrap();

    assert_eq!(json["command"], "facts");
    let shape = &json["facts"][1];
    assert_eq!(shape["contract"]["name"], "Shape");
    assert_eq!(shape["module_name"], "union");
    assert_eq!(shape["discriminator"], "isShape");
    assert_eq!(
        shape["variants"],
        serde_json::json!(["*Circle", "*Rectangle", "*Triangle"])
    );
}
