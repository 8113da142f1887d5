//! Shared helpers for parser snapshot tests.
#![allow(dead_code, unused_imports)]

pub use bnf_syntax::{parse, tokenize, Ast, Node, NodeKind, NodeRef};

/// Formats a parse result for snapshot testing.
pub fn snapshot_parse(source: &str) -> String {
    let ast = parse(source);
    let mut output = format!("{ast}\n");

    match &ast {
        Ast::Strict(statements) => {
            for statement in statements {
                format_node(NodeRef::Statement(statement), &mut output, 0);
            }
        }
        Ast::Degraded { lines, diagnostic } => {
            output.push_str(&format!("error: {diagnostic}\n"));
            for (idx, tokens) in lines.iter().enumerate() {
                output.push_str(&format!("group {idx}:\n"));
                for token in tokens {
                    format_node(token.view(), &mut output, 1);
                }
            }
        }
    }

    output
}

/// Formats the permissive token stream of a line, one token per row.
pub fn snapshot_tokens(source: &str) -> String {
    let mut output = String::new();
    for token in tokenize(source.as_bytes()) {
        format_node(token.view(), &mut output, 0);
    }
    output
}

fn format_node(node: NodeRef<'_>, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    match node.token() {
        Some(token) => out.push_str(&format!(
            "{}{:?}@{:?} {:?}\n",
            indent,
            node.kind(),
            node.range(),
            token.name
        )),
        None => out.push_str(&format!("{}{:?}@{:?}\n", indent, node.kind(), node.range())),
    }

    for child in [node.left(), node.right()].into_iter().flatten() {
        format_node(child, out, depth + 1);
    }
}

/// Names of the nodes visited by [`Ast::traverse`], in order.
pub fn traversal(ast: &Ast) -> Vec<String> {
    let mut seen = Vec::new();
    let (count, result) = ast.traverse(|node| {
        seen.push(match node.token() {
            Some(token) => format!("{:?}({})", node.kind(), token.name),
            None => format!("{:?}", node.kind()),
        });
        Ok::<_, ()>(())
    });
    assert!(result.is_ok());
    assert_eq!(count, seen.len());
    seen
}
