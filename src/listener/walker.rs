//! Depth-first driver for [`TreeListener`]s.

use std::fmt;

use crate::syntax::{
    ClassDeclaration, FieldDeclaration, InterfaceDeclaration, Item, Member, MethodDeclaration,
    PackageName, SyntaxTree,
};

/// The closed set of node kinds a listener is told about.
#[derive(Debug, Clone, Copy)]
pub enum Node<'t> {
    Package(&'t PackageName),
    Class(&'t ClassDeclaration),
    Interface(&'t InterfaceDeclaration),
    Field(&'t FieldDeclaration),
    Method(&'t MethodDeclaration),
}

impl Node<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Package(_) => NodeKind::Package,
            Node::Class(_) => NodeKind::Class,
            Node::Interface(_) => NodeKind::Interface,
            Node::Field(_) => NodeKind::Field,
            Node::Method(_) => NodeKind::Method,
        }
    }
}

/// Discriminant of [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Package,
    Class,
    Interface,
    Field,
    Method,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Package => "package name",
            NodeKind::Class => "class declaration",
            NodeKind::Interface => "interface declaration",
            NodeKind::Field => "field declaration",
            NodeKind::Method => "method declaration",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callbacks invoked by [`walk`].
///
/// `exit` fires after every child of the node has been visited, so a class
/// node's body is complete when its `exit` runs. Returning an error aborts
/// the rest of the walk.
pub trait TreeListener {
    type Error;

    fn enter(&mut self, _node: Node<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit(&mut self, node: Node<'_>) -> Result<(), Self::Error>;
}

/// Walk `tree` depth-first in document order.
///
/// Visits the package clause, then each top-level item. Class members are
/// visited in source order before the class itself exits. Top-level
/// functions are reported as method nodes.
pub fn walk<L: TreeListener>(tree: &SyntaxTree, listener: &mut L) -> Result<(), L::Error> {
    if let Some(package) = &tree.package {
        visit(listener, Node::Package(package))?;
    }

    for item in &tree.items {
        match item {
            Item::Class(class) => {
                let node = Node::Class(class);
                listener.enter(node)?;
                for member in &class.body.members {
                    match member {
                        Member::Field(field) => visit(listener, Node::Field(field))?,
                        Member::Method(method) => visit(listener, Node::Method(method))?,
                    }
                }
                listener.exit(node)?;
            }
            Item::Interface(interface) => visit(listener, Node::Interface(interface))?,
            Item::Function(function) => visit(listener, Node::Method(function))?,
        }
    }

    Ok(())
}

fn visit<L: TreeListener>(listener: &mut L, node: Node<'_>) -> Result<(), L::Error> {
    listener.enter(node)?;
    listener.exit(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    /// Records every callback as "enter kind" / "exit kind".
    #[derive(Default)]
    struct EventLog {
        events: Vec<String>,
        fail_on: Option<NodeKind>,
    }

    impl TreeListener for EventLog {
        type Error = String;

        fn enter(&mut self, node: Node<'_>) -> Result<(), String> {
            self.events.push(format!("enter {:?}", node.kind()));
            Ok(())
        }

        fn exit(&mut self, node: Node<'_>) -> Result<(), String> {
            if self.fail_on == Some(node.kind()) {
                return Err(format!("failed on {}", node.kind()));
            }
            self.events.push(format!("exit {:?}", node.kind()));
            Ok(())
        }
    }

    #[test]
    fn test_walk_order() {
        let tree = parse(
            "package p\nclass A { x: Int fun f() {} y: Int }\ninterface B {}\nfun main() {}",
        )
        .unwrap();
        let mut log = EventLog::default();
        walk(&tree, &mut log).unwrap();

        assert_eq!(
            log.events,
            vec![
                "enter Package",
                "exit Package",
                "enter Class",
                "enter Field",
                "exit Field",
                "enter Method",
                "exit Method",
                "enter Field",
                "exit Field",
                "exit Class",
                "enter Interface",
                "exit Interface",
                "enter Method",
                "exit Method",
            ]
        );
    }

    #[test]
    fn test_error_aborts_walk() {
        let tree = parse("class A { x: Int }\ninterface B {}").unwrap();
        let mut log = EventLog {
            fail_on: Some(NodeKind::Field),
            ..Default::default()
        };
        let err = walk(&tree, &mut log).unwrap_err();

        assert_eq!(err, "failed on field declaration");
        assert_eq!(log.events, vec!["enter Class", "enter Field"]);
    }

    #[test]
    fn test_empty_tree() {
        let mut log = EventLog::default();
        walk(&SyntaxTree::default(), &mut log).unwrap();
        assert!(log.events.is_empty());
    }
}
