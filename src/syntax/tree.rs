//! Typed parse tree for Vision source files.
//!
//! Only the declaration-level shape of the language is represented: the
//! package clause, classes with their fields and methods, interfaces and
//! free functions. Function bodies are skipped by the parser.
//!
//! Mandatory tokens are `Option` so that a tree assembled by hand can carry
//! a malformed node. The parser always fills them.

use super::span::Span;

/// An identifier token with its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub text: String,
    pub span: Span,
}

impl Ident {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// Root of one file's parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyntaxTree {
    pub package: Option<PackageName>,
    pub items: Vec<Item>,
    pub span: Span,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Function(MethodDeclaration),
}

/// The identifier path of a `package` clause (e.g. `pkg.sample`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    pub segments: Vec<Ident>,
    pub span: Span,
}

impl PackageName {
    /// The full dotted path.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub name: Option<Ident>,
    pub body: ClassBody,
    pub span: Span,
}

/// Members of a class body, kept in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassBody {
    pub members: Vec<Member>,
    pub span: Span,
}

impl ClassBody {
    /// Field declarations in source order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(field) => Some(field),
            Member::Method(_) => None,
        })
    }

    /// Method declarations in source order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            Member::Field(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(FieldDeclaration),
    Method(MethodDeclaration),
}

/// A field (`balance: Int`) inside a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: Option<Ident>,
    pub ty: Option<TypeExpr>,
    pub span: Span,
}

/// A type expression captured as literal text.
///
/// `text` is the concatenation of the expression's tokens without
/// whitespace, so `Map< String, Int >` becomes `Map<String,Int>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub header: FuncHeader,
    pub span: Span,
}

/// `fun name(params): Type`, without the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncHeader {
    pub name: Option<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDeclaration {
    pub name: Option<Ident>,
    pub span: Span,
}
