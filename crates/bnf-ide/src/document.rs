//! In-memory mirror of an edited buffer.
//!
//! The document keeps the raw bytes of every line, splices in hunks of
//! changed lines as the editor reports them, and re-highlights only the
//! lines a hunk touched.

use tracing::debug;

use bnf_syntax::parse;

use crate::completion::CompletionIndex;
use crate::highlight::{highlight_line, Highlight};

/// A parse failure shown next to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// Zero-based line number.
    pub line: u32,
    /// Human-readable message.
    pub message: String,
}

/// Result of highlighting a range of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HunkReport {
    /// Highlights of every line in the range, in line order.
    pub highlights: Vec<Highlight>,
    /// One entry per line that failed strict parsing.
    pub diagnostics: Vec<LineDiagnostic>,
}

impl HunkReport {
    /// `true` if every line parsed strictly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The lines of one buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Vec<u8>>,
}

impl Document {
    /// Creates a document from its lines.
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits `text` on `\n`. A final newline does not start another line.
    #[must_use]
    pub fn from_bytes(text: &[u8]) -> Self {
        let text = text.strip_suffix(b"\n").unwrap_or(text);
        if text.is_empty() {
            return Self::default();
        }
        Self::new(text.split(|byte| *byte == b'\n'))
    }

    /// The line at `idx`.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<&[u8]> {
        self.lines.get(idx).map(Vec::as_slice)
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Replaces lines `first..last` with `hunk` and returns the range of
    /// lines that now hold the hunk.
    ///
    /// `last == None` replaces the whole buffer, which is how editors report
    /// the initial content. Out-of-range bounds are clamped.
    pub fn update<I, L>(&mut self, hunk: I, first: usize, last: Option<usize>) -> (usize, usize)
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let hunk = hunk.into_iter().map(Into::into);
        let Some(last) = last else {
            self.lines = hunk.collect();
            return (0, self.lines.len());
        };

        let len = self.lines.len();
        let first = first.min(len);
        let last = last.clamp(first, len);
        self.lines.splice(first..last, hunk);
        let inserted = self.lines.len() + (last - first) - len;

        debug!(first, last, inserted, "spliced hunk");
        (first, first + inserted)
    }

    /// Highlights every line.
    pub fn highlight(&self, index: &CompletionIndex) -> HunkReport {
        self.highlight_hunk(0, self.line_count(), index)
    }

    /// Highlights lines `from..to`, clamped to the document, and records the
    /// non-terminals of strictly parsed lines in `index`.
    pub fn highlight_hunk(&self, from: usize, to: usize, index: &CompletionIndex) -> HunkReport {
        let to = to.min(self.line_count());
        let from = from.min(to);
        debug!(from, to, "highlighting hunk");

        let mut report = HunkReport::default();
        for (idx, line) in self.lines[from..to].iter().enumerate() {
            let line_no = u32::try_from(from + idx).unwrap_or(u32::MAX);
            let ast = parse(line);

            match ast.diagnostic() {
                Some(diagnostic) => report.diagnostics.push(LineDiagnostic {
                    line: line_no,
                    message: format!("parsing error: {diagnostic}"),
                }),
                None => {
                    index.record_ast(&ast);
                }
            }
            report.highlights.extend(highlight_line(line_no, &ast));
        }
        report
    }
}
