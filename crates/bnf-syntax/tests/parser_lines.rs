mod common;
use common::*;
use expect_test::expect;

#[test]
fn test_alternative_of_literals() {
    let actual = snapshot_parse(r#"<month> ::= "January" | "February""#);
    expect![[r#"
<AST rules=1;>
Statement@0..34
  Assignment@8..11 "::="
    NonTerminal@0..7 "month"
    Alternative@22..23 "|"
      Terminal@12..21 "January"
      Terminal@24..34 "February"
"#]]
    .assert_eq(&actual);
}

#[test]
fn test_concatenation() {
    let actual = snapshot_parse("<a> ::= <b> <c>");
    expect![[r#"
<AST rules=1;>
Statement@0..15
  Assignment@4..7 "::="
    NonTerminal@0..3 "a"
    Compound@11..12 ""
      NonTerminal@8..11 "b"
      NonTerminal@12..15 "c"
"#]]
    .assert_eq(&actual);
}

#[test]
fn test_alternatives_of_concatenations() {
    let actual = snapshot_parse(r#"<expr> ::= <term> "+" <expr> | <term>"#);
    expect![[r#"
<AST rules=1;>
Statement@0..37
  Assignment@7..10 "::="
    NonTerminal@0..6 "expr"
    Alternative@29..30 "|"
      Compound@17..18 ""
        NonTerminal@11..17 "term"
        Compound@21..22 ""
          Terminal@18..21 "+"
          NonTerminal@22..28 "expr"
      NonTerminal@31..37 "term"
"#]]
    .assert_eq(&actual);
}

#[test]
fn test_rule_with_trailing_comment() {
    let actual = snapshot_parse("<a> ::= <b> ; why");
    expect![[r#"
<AST rules=1;>
Statement@0..17
  Assignment@4..7 "::="
    NonTerminal@0..3 "a"
    NonTerminal@8..11 "b"
  Comment@12..17 " why"
"#]]
    .assert_eq(&actual);
}

#[test]
fn test_comment_only_line() {
    let actual = snapshot_parse("; header");
    expect![[r#"
<AST rules=1;>
Statement@0..8
  Comment@0..8 " header"
"#]]
    .assert_eq(&actual);
}

#[test]
fn test_empty_line() {
    expect![[r#"
<AST rules=0;>
"#]]
    .assert_eq(&snapshot_parse(""));

    let ast = parse("");
    assert!(ast.is_strict());
    assert!(ast.diagnostic().is_none());
    assert!(traversal(&ast).is_empty());
}

#[test]
fn test_traversal_order() {
    let ast = parse("<a> ::= <b> <c>");
    assert_eq!(
        traversal(&ast),
        [
            "NonTerminal(a)",
            "Assignment(::=)",
            "NonTerminal(b)",
            "Compound()",
            "NonTerminal(c)",
            "Statement",
        ]
    );
}

#[test]
fn test_ranges_are_absolute() {
    let ast = parse("<a> ::= <b>");
    let statement = &ast.statements()[0];
    let rule = NodeRef::Assignment(statement.rule.as_ref().unwrap());
    assert_eq!(format!("{:?}", rule.right().unwrap().range()), "8..11");

    // Nested below two binary nodes, still measured from the line start.
    let ast = parse("<x> ::= <y> | <z> <w>");
    let rule = NodeRef::Assignment(ast.statements()[0].rule.as_ref().unwrap());
    let last = rule.right().unwrap().right().unwrap().right().unwrap();
    assert_eq!(last.token().unwrap().name, "w");
    assert_eq!(format!("{:?}", last.range()), "18..21");
}

#[test]
fn test_non_terminals_of_statement() {
    let ast = parse(r#"<list> ::= <item> | <item> "," <list>"#);
    let names: Vec<_> = ast.statements()[0]
        .non_terminals()
        .iter()
        .map(|nt| nt.name())
        .collect();
    assert_eq!(names, ["list", "item", "item", "list"]);
}
