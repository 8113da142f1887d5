//! Lines long enough that per-element recursion would exhaust a test
//! thread's stack.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use bnf_syntax::{parse, Ast, NodeKind};

const ATOMS: usize = 50_000;

fn hash_of(ast: &Ast) -> u64 {
    let mut hasher = DefaultHasher::new();
    ast.statements().hash(&mut hasher);
    hasher.finish()
}

fn assert_handles_long_chain(line: &str, chain: NodeKind) {
    let ast = parse(line);
    assert!(ast.is_strict());

    let copy = ast.clone();
    assert_eq!(copy, ast);
    assert_eq!(hash_of(&copy), hash_of(&ast));
    assert_eq!(copy, parse(line));

    let mut links = 0;
    let (count, result) = ast.traverse(|node| {
        if node.kind() == chain {
            links += 1;
        }
        Ok::<_, ()>(())
    });
    assert!(result.is_ok());
    assert_eq!(links, ATOMS - 1);
    assert_eq!(count, 2 * ATOMS + 2);

    let debug = format!("{ast:?}");
    assert!(debug.starts_with("Strict(["));
}

#[test]
fn test_long_concatenation() {
    let line = format!("<a> ::={}", " <b>".repeat(ATOMS));
    assert_handles_long_chain(&line, NodeKind::Compound);
}

#[test]
fn test_long_alternation() {
    let line = format!("<a> ::= <b>{}", " | \"c\"".repeat(ATOMS - 1));
    assert_handles_long_chain(&line, NodeKind::Alternative);
}

#[test]
fn test_long_chains_differ_at_the_tail() {
    let base = " <b>".repeat(ATOMS - 1);
    let one = parse(format!("<a> ::={base} <c>"));
    let other = parse(format!("<a> ::={base} <d>"));
    assert_ne!(one, other);
    assert_ne!(one, parse(format!("<a> ::={base} \"c\"")));
}
