//! `bnf-ide` - Editor features for BNF buffers built on `bnf-syntax`.
//!
//! - **Highlighting**: classifies syntax nodes into display groups
//! - **Completion**: a usage-counted index of rule names
//! - **Document**: a mirrored buffer that splices edited hunks and
//!   re-highlights only what changed
//!
//! All state lives in explicit objects owned by the caller. A
//! [`CompletionIndex`] can be shared between threads by reference.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod completion;
pub mod document;
pub mod highlight;

pub use completion::{CompletionIndex, CompletionItem, CompletionOptions};
pub use document::{Document, HunkReport, LineDiagnostic};
pub use highlight::{classify, highlight_line, Highlight, HighlightGroup};
