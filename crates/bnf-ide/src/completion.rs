//! Usage-counted completion of rule names.
//!
//! The index counts every non-terminal seen on a strictly parsed line.
//! Counts only grow: editing or deleting a line never decrements them.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use bnf_syntax::{Ast, NodeRef};

/// A completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// The rule name.
    pub label: SmolStr,
    /// Text to insert, the name in angle brackets.
    pub insert_text: SmolStr,
    /// How many times the name has been seen.
    pub count: u32,
}

impl CompletionItem {
    /// Creates a new completion item.
    pub fn new(label: impl Into<SmolStr>, count: u32) -> Self {
        let label = label.into();
        let insert_text = SmolStr::from(format!("<{label}>"));
        Self {
            label,
            insert_text,
            count,
        }
    }
}

/// Filtering applied by [`CompletionIndex::complete_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionOptions {
    /// Prefixes shorter than this produce no candidates.
    pub min_prefix: usize,
    /// Maximum number of candidates.
    pub limit: Option<usize>,
}

/// Non-terminal usage counts, shareable across threads.
#[derive(Debug, Default)]
pub struct CompletionIndex {
    counts: Mutex<FxHashMap<SmolStr, u32>>,
}

impl CompletionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more use of `name`.
    pub fn record_usage(&self, name: &str) {
        let mut counts = self.counts.lock();
        bump(&mut counts, name);
    }

    /// Counts every non-terminal of a strictly parsed line and returns how
    /// many were recorded. Degraded ASTs are skipped.
    pub fn record_ast(&self, ast: &Ast) -> usize {
        if !ast.is_strict() {
            return 0;
        }

        let mut counts = self.counts.lock();
        let mut recorded = 0;
        let _ = ast.traverse(|node| {
            if let NodeRef::NonTerminal(nt) = node {
                bump(&mut counts, nt.name());
                recorded += 1;
            }
            Ok::<(), std::convert::Infallible>(())
        });
        trace!(recorded, "updated completion index");
        recorded
    }

    /// Number of recorded uses of `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> u32 {
        self.counts.lock().get(name).copied().unwrap_or(0)
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.lock().len()
    }

    /// `true` if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.lock().is_empty()
    }

    /// Names starting with `prefix`, most used first, ties by name.
    #[must_use]
    pub fn complete(&self, prefix: &str) -> Vec<CompletionItem> {
        self.complete_with_options(prefix, CompletionOptions::default())
    }

    /// Like [`CompletionIndex::complete`], with a minimum prefix length and a
    /// result limit.
    #[must_use]
    pub fn complete_with_options(
        &self,
        prefix: &str,
        options: CompletionOptions,
    ) -> Vec<CompletionItem> {
        if prefix.len() < options.min_prefix {
            return Vec::new();
        }

        let mut items: Vec<CompletionItem> = self
            .counts
            .lock()
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, count)| CompletionItem::new(name.clone(), *count))
            .collect();

        items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        if let Some(limit) = options.limit {
            items.truncate(limit);
        }
        items
    }
}

fn bump(counts: &mut FxHashMap<SmolStr, u32>, name: &str) {
    match counts.get_mut(name) {
        Some(count) => *count = count.saturating_add(1),
        None => {
            counts.insert(SmolStr::new(name), 1);
        }
    }
}
