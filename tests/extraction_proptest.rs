//! Property-based tests for declaration extraction.
//!
//! Generated classes mix fields and methods in arbitrary order; the
//! extracted record must keep each list complete and in source order.

use proptest::prelude::*;
use visionscan::{extract, parse, CollectingSink, Declaration, TextSink};

#[derive(Debug, Clone)]
enum Member {
    Field(String, String),
    Method(String),
}

const KEYWORDS: &[&str] = &["package", "class", "interface", "fun"];

fn snake_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("keywords are reserved", |s| {
        !KEYWORDS.contains(&s.as_str())
    })
}

fn type_expr() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-zA-Z0-9]{0,6}",
        "[A-Z][a-z]{0,4}".prop_map(|t| format!("List<{}>", t)),
        "[A-Z][a-z]{0,4}".prop_map(|t| format!("{}?", t)),
        "[A-Z][a-z]{0,4}".prop_map(|t| format!("{}[]", t)),
    ]
}

fn member() -> impl Strategy<Value = Member> {
    prop_oneof![
        (snake_name(), type_expr()).prop_map(|(n, t)| Member::Field(n, t)),
        snake_name().prop_map(Member::Method),
    ]
}

fn render(name: &str, members: &[Member]) -> String {
    let mut source = format!("class {} {{\n", name);
    for member in members {
        match member {
            Member::Field(n, t) => source.push_str(&format!("    {}: {}\n", n, t)),
            Member::Method(n) => source.push_str(&format!("    fun {}(x: Int) {{ call(x) }}\n", n)),
        }
    }
    source.push_str("}\n");
    source
}

proptest! {
    #[test]
    fn prop_members_keep_source_order(
        name in "[A-Z][a-zA-Z0-9]{0,8}",
        members in prop::collection::vec(member(), 0..12),
    ) {
        let source = render(&name, &members);
        let tree = parse(&source).unwrap();
        let records = extract(&tree, CollectingSink::new()).unwrap().into_records();
        prop_assert_eq!(records.len(), 1);

        let class = match &records[0] {
            Declaration::Class(class) => class,
            other => return Err(TestCaseError::fail(format!("unexpected record {:?}", other))),
        };
        prop_assert_eq!(&class.name, &name);

        let expected_fields: Vec<(String, String)> = members
            .iter()
            .filter_map(|m| match m {
                Member::Field(n, t) => Some((n.clone(), t.clone())),
                Member::Method(_) => None,
            })
            .collect();
        let expected_methods: Vec<String> = members
            .iter()
            .filter_map(|m| match m {
                Member::Method(n) => Some(n.clone()),
                Member::Field(..) => None,
            })
            .collect();

        let fields: Vec<(String, String)> = class
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.ty.clone()))
            .collect();
        let methods: Vec<String> = class.methods.iter().map(|m| m.name.clone()).collect();

        prop_assert_eq!(fields, expected_fields);
        prop_assert_eq!(methods, expected_methods);
    }

    #[test]
    fn prop_text_output_is_idempotent(
        members in prop::collection::vec(member(), 0..8),
    ) {
        let source = format!("package gen.props\n{}", render("Sample", &members));
        let tree = parse(&source).unwrap();
        let first = extract(&tree, TextSink::new(Vec::new())).unwrap().into_inner();
        let second = extract(&tree, TextSink::new(Vec::new())).unwrap().into_inner();
        prop_assert_eq!(&first, &second);

        let lines = String::from_utf8(first).unwrap().lines().count();
        // package line + class line + one line per member
        prop_assert_eq!(lines, 2 + members.len());
    }
}
