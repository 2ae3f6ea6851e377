//! Vision front end: lexer, parser and the typed parse tree.
//!
//! The declaration extractor in [`crate::listener`] only depends on the
//! tree shapes defined in [`tree`]. [`parse`] is the standard way to build
//! one from source text; it rejects malformed input with a [`SyntaxError`]
//! before any listener runs.

pub mod parser;
pub mod span;
pub mod token;
pub mod tree;

pub use crate::error::SyntaxError;
pub use parser::parse;
pub use span::{LineIndex, Span};
pub use token::{tokenize, Lexeme, Token};
pub use tree::{
    ClassBody, ClassDeclaration, FieldDeclaration, FuncHeader, Ident, InterfaceDeclaration, Item,
    Member, MethodDeclaration, PackageName, SyntaxTree, TypeExpr,
};
