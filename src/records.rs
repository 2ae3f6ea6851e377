//! Declaration records extracted from a parse tree.
//!
//! Records are plain values: built by the listener, then moved into a
//! [`Sink`](crate::sink::Sink). They carry no references into the tree.

use serde::Serialize;
use std::fmt;

use crate::syntax::Span;

/// The package a file belongs to (`package pkg.sample`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDeclaration {
    pub name: String,
    pub span: Span,
}

/// A class with its fields and methods in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDeclaration {
    pub name: String,
    pub fields: Vec<FieldDeclaration>,
    pub methods: Vec<MethodDeclaration>,
    pub span: Span,
}

/// A class field; `ty` is the literal text of its type expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDeclaration {
    pub name: String,
    pub span: Span,
}

/// Kind of top-level record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Package,
    Class,
    Interface,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Package => "package",
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A record as delivered to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Declaration {
    Package(PackageDeclaration),
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
}

impl Declaration {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Package(_) => DeclarationKind::Package,
            Declaration::Class(_) => DeclarationKind::Class,
            Declaration::Interface(_) => DeclarationKind::Interface,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Declaration::Package(p) => &p.name,
            Declaration::Class(c) => &c.name,
            Declaration::Interface(i) => &i.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Declaration::Package(p) => p.span,
            Declaration::Class(c) => c.span,
            Declaration::Interface(i) => i.span,
        }
    }
}

impl From<PackageDeclaration> for Declaration {
    fn from(record: PackageDeclaration) -> Self {
        Declaration::Package(record)
    }
}

impl From<ClassDeclaration> for Declaration {
    fn from(record: ClassDeclaration) -> Self {
        Declaration::Class(record)
    }
}

impl From<InterfaceDeclaration> for Declaration {
    fn from(record: InterfaceDeclaration) -> Self {
        Declaration::Interface(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_accessors() {
        let record: Declaration = InterfaceDeclaration {
            name: "Shape".to_string(),
            span: Span::new(0, 18, 1, 1),
        }
        .into();
        assert_eq!(record.kind(), DeclarationKind::Interface);
        assert_eq!(record.name(), "Shape");
        assert_eq!(record.span().end, 18);
    }

    #[test]
    fn test_json_shape() {
        let record = Declaration::Class(ClassDeclaration {
            name: "Account".to_string(),
            fields: vec![FieldDeclaration {
                name: "balance".to_string(),
                ty: "Int".to_string(),
                span: Span::new(18, 30, 2, 5),
            }],
            methods: vec![],
            span: Span::new(0, 40, 1, 1),
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "class");
        assert_eq!(json["name"], "Account");
        assert_eq!(json["fields"][0]["type"], "Int");
        assert_eq!(json["span"]["line"], 1);
    }
}
