// Contract discovery as reported by `sealcheck facts`.

use sealcheck_core::config::SealcheckConfig;
use sealcheck_core::hash::compute_fingerprint;
use sealcheck_enforce::engine::AnalysisEngine;

use super::common;
use super::common::fixtures::UNION_GO;

#[test]
fn test_discover_union_contracts() {
    let (_dir, root) = common::union_consumer_tree();
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().discover(&modules).unwrap();

    assert_eq!(result.command, "facts");
    assert_eq!(result.modules_analyzed, 2);
    assert_eq!(result.facts.len(), 2);

    let result_fact = &result.facts[0];
    assert_eq!(result_fact.contract.to_string(), "union.Result");
    assert_eq!(result_fact.discriminator, "isResult");
    let variants: Vec<String> = result_fact.variants.iter().map(|v| v.to_string()).collect();
    assert_eq!(variants, vec!["*Error", "*Success"]);

    let shape = &result.facts[1];
    assert_eq!(shape.contract.to_string(), "union.Shape");
    assert_eq!(shape.discriminator, "isShape");
    let variants: Vec<String> = shape.variants.iter().map(|v| v.to_string()).collect();
    assert_eq!(variants, vec!["*Circle", "*Rectangle", "*Triangle"]);
}

#[test]
fn test_fact_declaration_site() {
    let (_dir, root) = common::create_go_tree(&[("union/union.go", UNION_GO)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().discover(&modules).unwrap();

    let line_of = |needle: &str| {
        UNION_GO
            .lines()
            .position(|l| l.starts_with(needle))
            .map(|i| i as u32 + 1)
            .unwrap()
    };
    assert_eq!(result.facts[0].file, "union/union.go");
    assert_eq!(result.facts[0].line, line_of("type Result interface"));
    assert_eq!(result.facts[1].line, line_of("type Shape interface"));
    assert_eq!(result.facts[0].module_name, "union");
}

#[test]
fn test_fact_fingerprint_is_stable() {
    let (_dir, root) = common::create_go_tree(&[("union/union.go", UNION_GO)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().discover(&modules).unwrap();

    let expected = compute_fingerprint(
        "union.Result",
        "isResult",
        &["*Error".to_string(), "*Success".to_string()],
    );
    assert_eq!(result.facts[0].fingerprint, expected);
}

#[test]
fn test_embedded_discriminator_is_inherited() {
    let source = r#"package ast

type Node interface {
	node()
}

type Expr interface {
	Node
	exprNode()
}

type Ident struct{}
type Call struct{}
type Block struct{}

func (Ident) node()     {}
func (Ident) exprNode() {}
func (Call) node()      {}
func (Call) exprNode()  {}
func (Block) node()     {}
"#;
    let (_dir, root) = common::create_go_tree(&[("ast/ast.go", source)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().discover(&modules).unwrap();

    let expr = result
        .facts
        .iter()
        .find(|f| f.contract.name == "Expr")
        .unwrap();
    // First method of the full set by name.
    assert_eq!(expr.discriminator, "exprNode");
    let variants: Vec<String> = expr.variants.iter().map(|v| v.to_string()).collect();
    assert_eq!(variants, vec!["Call", "Ident"]);

    let node = result
        .facts
        .iter()
        .find(|f| f.contract.name == "Node")
        .unwrap();
    assert_eq!(node.variants.len(), 3);
}

#[test]
fn test_no_contracts() {
    let (_dir, root) = common::create_go_tree(&[(
        "main.go",
        "package main\n\nfunc main() {}\n",
    )]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().discover(&modules).unwrap();
    assert!(result.facts.is_empty());
    assert_eq!(result.modules_analyzed, 1);
}

#[test]
fn test_ambiguous_embedding_is_not_a_variant() {
    let source = r#"package shapes

type Shape interface{ isShape() }

type Circle struct{}
type Square struct{}
type Both struct {
	Circle
	Square
}

func (Circle) isShape() {}
func (Square) isShape() {}
"#;
    let (_dir, root) = common::create_go_tree(&[("shapes/shapes.go", source)]);
    let modules = common::load(&root, &SealcheckConfig::default());
    let result = AnalysisEngine::new().discover(&modules).unwrap();

    assert_eq!(result.facts.len(), 1);
    let variants: Vec<String> = result.facts[0]
        .variants
        .iter()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(variants, vec!["Circle", "Square"]);
}
