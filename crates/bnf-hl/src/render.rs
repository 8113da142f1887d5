//! Plain-text output of highlight reports and completion candidates.

use std::fmt::Write;

use bnf_ide::{CompletionItem, HunkReport};

use crate::config::HighlightNames;

/// `line:begin..end GROUP` per highlight, then `line: message` per
/// diagnostic. Lines are one-based, byte ranges zero-based.
pub fn highlights(report: &HunkReport, names: &HighlightNames) -> String {
    let mut out = String::new();
    for hl in &report.highlights {
        let _ = writeln!(
            out,
            "{}:{:?} {}",
            u64::from(hl.line) + 1,
            hl.range,
            names.name(hl.group)
        );
    }
    out.push_str(&diagnostics(report));
    out
}

/// `line: message` per diagnostic.
pub fn diagnostics(report: &HunkReport) -> String {
    let mut out = String::new();
    for diagnostic in &report.diagnostics {
        let _ = writeln!(
            out,
            "{}: {}",
            u64::from(diagnostic.line) + 1,
            diagnostic.message
        );
    }
    out
}

/// `name count` per candidate.
pub fn completions(items: &[CompletionItem]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "{} {}", item.label, item.count);
    }
    out
}
