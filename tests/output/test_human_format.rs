// Human output: compiler-style lines for check, a listing for facts.

use sealcheck_core::config::SealcheckConfig;
use sealcheck_enforce::engine::AnalysisEngine;
use sealcheck_output::human::HumanFormatter;
use sealcheck_output::OutputFormatter;

use super::common;
use super::common::fixtures::{CONSUMER_GO, UNION_GO};

#[test]
fn test_check_lines_and_summary() {
    let (_dir, root) = common::union_consumer_tree();
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();
    let out = HumanFormatter.format_check(&result);

    let expected_first = format!(
        "consumer/consumer.go:{}:2: missing cases in type switch on Result: union.*Error",
        common::switch_line(CONSUMER_GO, "ProcessResult")
    );
    let expected_last = format!(
        "union/union.go:{}:2: missing cases in type switch on Shape: union.*Triangle",
        common::switch_line(UNION_GO, "CalculateArea")
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], expected_first);
    assert_eq!(lines[4], expected_last);
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "5 incomplete type switch(es) in 2 file(s)");
}

#[test]
fn test_clean_check_prints_nothing() {
    let (_dir, root) = common::create_go_tree(&[(
        "main.go",
        "package main\n\nfunc main() {}\n",
    )]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().check(&modules).unwrap();
    assert_eq!(HumanFormatter.format_check(&result), "");
}

#[test]
fn test_facts_listing() {
    let (_dir, root) = common::create_go_tree(&[("union/union.go", UNION_GO)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().discover(&modules).unwrap();
    let out = HumanFormatter.format_facts(&result);

    assert!(out.starts_with("union.Result ["));
    assert!(out.contains("   = discriminator: isShape\n"));
    assert!(out.contains("   = variants: *Circle, *Rectangle, *Triangle\n"));
    assert!(out.ends_with("\n2 sealed interface(s) in 1 module(s)\n"));
}

#[test]
fn test_facts_listing_empty() {
    let (_dir, root) = common::create_go_tree(&[(
        "main.go",
        "package main\n\nfunc main() {}\n",
    )]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().discover(&modules).unwrap();
    assert_eq!(
        HumanFormatter.format_facts(&result),
        "no sealed interfaces in 1 module(s)\n"
    );
}
