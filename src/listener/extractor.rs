//! The declaration extractor: turns exit events into records.

use crate::error::ExtractError;
use crate::records::{
    ClassDeclaration, Declaration, FieldDeclaration, InterfaceDeclaration, MethodDeclaration,
    PackageDeclaration,
};
use crate::sink::Sink;
use crate::syntax::{self, Ident, Span, SyntaxTree};

use super::walker::{walk, Node, NodeKind, TreeListener};

/// Listener that emits one record per package clause, class and interface.
///
/// Fields and methods are reported as part of their class, never on their
/// own. The extractor keeps nothing between callbacks except the sink.
pub struct DeclarationExtractor<S> {
    sink: S,
}

impl<S: Sink> DeclarationExtractor<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn emit(&mut self, record: impl Into<Declaration>) -> Result<(), ExtractError> {
        self.sink.accept(record.into())?;
        Ok(())
    }
}

impl<S: Sink> TreeListener for DeclarationExtractor<S> {
    type Error = ExtractError;

    fn exit(&mut self, node: Node<'_>) -> Result<(), ExtractError> {
        match node {
            Node::Package(package) => self.emit(extract_package(package)?),
            Node::Class(class) => self.emit(extract_class(class)?),
            Node::Interface(interface) => self.emit(extract_interface(interface)?),
            // Reported with their enclosing class
            Node::Field(_) | Node::Method(_) => Ok(()),
        }
    }
}

/// Extract every declaration of `tree` into `sink`, then flush it.
pub fn extract<S: Sink>(tree: &SyntaxTree, sink: S) -> Result<S, ExtractError> {
    let mut extractor = DeclarationExtractor::new(sink);
    walk(tree, &mut extractor)?;
    let mut sink = extractor.into_sink();
    sink.flush()?;
    Ok(sink)
}

fn extract_package(node: &syntax::PackageName) -> Result<PackageDeclaration, ExtractError> {
    if node.segments.is_empty() || node.segments.iter().any(|s| s.text.is_empty()) {
        return Err(ExtractError::malformed(
            NodeKind::Package,
            node.span,
            "identifier path",
        ));
    }
    Ok(PackageDeclaration {
        name: node.text(),
        span: node.span,
    })
}

fn extract_interface(
    node: &syntax::InterfaceDeclaration,
) -> Result<InterfaceDeclaration, ExtractError> {
    let name = required(&node.name, NodeKind::Interface, node.span, "name")?;
    Ok(InterfaceDeclaration {
        name: name.to_string(),
        span: node.span,
    })
}

fn extract_class(node: &syntax::ClassDeclaration) -> Result<ClassDeclaration, ExtractError> {
    let name = required(&node.name, NodeKind::Class, node.span, "name")?;
    let mut builder = ClassBuilder::new(name, node.span);

    for field in node.body.fields() {
        let record = extract_field(field).map_err(|e| e.in_class(name))?;
        builder.field(record);
    }
    for method in node.body.methods() {
        let record = extract_method(method).map_err(|e| e.in_class(name))?;
        builder.method(record);
    }

    Ok(builder.build())
}

fn extract_field(node: &syntax::FieldDeclaration) -> Result<FieldDeclaration, ExtractError> {
    let name = required(&node.name, NodeKind::Field, node.span, "name")?;
    let ty = match &node.ty {
        Some(ty) if !ty.text.is_empty() => ty.text.clone(),
        _ => return Err(ExtractError::malformed(NodeKind::Field, node.span, "type")),
    };
    Ok(FieldDeclaration {
        name: name.to_string(),
        ty,
        span: node.span,
    })
}

fn extract_method(node: &syntax::MethodDeclaration) -> Result<MethodDeclaration, ExtractError> {
    let name = required(&node.header.name, NodeKind::Method, node.span, "name")?;
    Ok(MethodDeclaration {
        name: name.to_string(),
        span: node.span,
    })
}

/// Text of a mandatory token, or a malformed-node fault if it is absent.
fn required<'t>(
    token: &'t Option<Ident>,
    kind: NodeKind,
    span: Span,
    what: &'static str,
) -> Result<&'t str, ExtractError> {
    match token {
        Some(ident) if !ident.text.is_empty() => Ok(&ident.text),
        _ => Err(ExtractError::malformed(kind, span, what)),
    }
}

/// Gathers one class's members; lives only inside the class callback.
struct ClassBuilder {
    name: String,
    span: Span,
    fields: Vec<FieldDeclaration>,
    methods: Vec<MethodDeclaration>,
}

impl ClassBuilder {
    fn new(name: &str, span: Span) -> Self {
        Self {
            name: name.to_string(),
            span,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    fn field(&mut self, field: FieldDeclaration) {
        self.fields.push(field);
    }

    fn method(&mut self, method: MethodDeclaration) {
        self.methods.push(method);
    }

    fn build(self) -> ClassDeclaration {
        ClassDeclaration {
            name: self.name,
            fields: self.fields,
            methods: self.methods,
            span: self.span,
        }
    }
}
