//! Tree listeners.
//!
//! [`walk`] drives a [`TreeListener`] over a [`SyntaxTree`](crate::syntax::SyntaxTree)
//! in document order. [`DeclarationExtractor`] is the listener that turns
//! exit events into [`Declaration`](crate::records::Declaration) records.

mod extractor;
mod walker;

pub use extractor::{extract, DeclarationExtractor};
pub use walker::{walk, Node, NodeKind, TreeListener};
