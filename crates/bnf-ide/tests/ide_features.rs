use bnf_ide::{CompletionIndex, Document, HunkReport};
use bnf_syntax::parse;
use expect_test::expect;

fn format_report(doc: &Document, report: &HunkReport) -> String {
    let mut out = String::new();
    for hl in &report.highlights {
        let line = doc.line(hl.line as usize).unwrap_or_default();
        let text = String::from_utf8_lossy(&line[std::ops::Range::<usize>::from(hl.range)]);
        out.push_str(&format!(
            "{}:{:?} {} {}\n",
            hl.line, hl.range, hl.group, text
        ));
    }
    for diagnostic in &report.diagnostics {
        out.push_str(&format!("{}: {}\n", diagnostic.line, diagnostic.message));
    }
    out
}

const GRAMMAR: &str = r#"; postal addresses
<postal-address> ::= <name-part> <street-address> <zip-part>
<opt-suffix-part> ::= "Sr." | "Jr." | ""
<zip-part> ::= <town-name> "," <state-code> <ZIP-code
"#;

#[test]
fn test_highlight_document() {
    let doc = Document::from_bytes(GRAMMAR.as_bytes());
    let index = CompletionIndex::new();
    let report = doc.highlight(&index);

    expect![[r#"
0:0..18 Comment ; postal addresses
1:0..16 Identifier <postal-address>
1:17..20 Operator ::=
1:21..32 Identifier <name-part>
1:33..49 Identifier <street-address>
1:50..60 Identifier <zip-part>
2:0..17 Identifier <opt-suffix-part>
2:18..21 Operator ::=
2:22..27 String "Sr."
2:28..29 Operator |
2:30..35 String "Jr."
2:36..37 Operator |
2:38..40 String ""
3:0..10 Identifier <zip-part>
3:11..14 Operator ::=
3:15..26 Identifier <town-name>
3:27..30 String ","
3:31..43 Identifier <state-code>
3: parsing error: end of line expected at position 45
"#]]
    .assert_eq(&format_report(&doc, &report));

    // The broken last line does not feed the index.
    assert_eq!(index.count("zip-part"), 1);
    assert_eq!(index.count("town-name"), 0);
    assert_eq!(index.count("postal-address"), 1);
}

#[test]
fn test_two_lines_referencing_the_same_rule() {
    let index = CompletionIndex::new();
    index.record_ast(&parse("<a> ::= <b>"));
    index.record_ast(&parse(r#"<c> ::= "x" <b>"#));
    assert_eq!(index.count("b"), 2);
}

#[test]
fn test_counts_survive_edits() {
    let mut doc = Document::new(["<a> ::= <b>"]);
    let index = CompletionIndex::new();
    doc.highlight(&index);

    let (from, to) = doc.update(["<a> ::= <c>"], 0, Some(1));
    let report = doc.highlight_hunk(from, to, &index);
    assert!(report.is_clean());

    assert_eq!(index.count("a"), 2);
    assert_eq!(index.count("b"), 1);
    assert_eq!(index.count("c"), 1);
}

#[test]
fn test_rehighlight_only_the_hunk() {
    let mut doc = Document::from_bytes(b"<a> ::= <b>\n<b> ::= \"x\"\n");
    let index = CompletionIndex::new();
    doc.highlight(&index);

    let (from, to) = doc.update(["<b> ::= 'y'", "<c> ::= <b"], 1, Some(2));
    assert_eq!((from, to), (1, 3));

    let report = doc.highlight_hunk(from, to, &index);
    expect![[r#"
1:0..3 Identifier <b>
1:4..7 Operator ::=
1:8..11 String 'y'
2:0..3 Identifier <c>
2:4..7 Operator ::=
2: parsing error: non-terminal expected at position 11
"#]]
    .assert_eq(&format_report(&doc, &report));

    let names: Vec<_> = index
        .complete("")
        .into_iter()
        .map(|item| format!("{} {}", item.label, item.count))
        .collect();
    assert_eq!(names, ["b 3", "a 1"]);
}
