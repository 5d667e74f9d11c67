use json_core::ast::{AstNode, Node};
use json_core::{analyze, parse};

#[test]
fn test_node_at_finds_innermost_value() {
    let source = r#"
        {
            "server": { "host": "localhost", "ports": [80, 443] },
            "debug": false
        }
    "#;

    let analysis = analyze(source, "test.json").unwrap();

    let port_pos = source.find("443").unwrap();
    let node = analysis.document.node_at(port_pos).unwrap();
    assert_eq!(node.node_type(), "NumberLiteral");
    assert_eq!(node.span().offset(), port_pos);
    assert_eq!(node.span().len(), 3);

    let host_pos = source.find("\"localhost\"").unwrap();
    let node = analysis.document.node_at(host_pos + 3).unwrap();
    match node {
        Node::String(s) => assert_eq!(s.value, "localhost"),
        other => panic!("expected a string, got {other:?}"),
    }
}

#[test]
fn test_node_at_between_elements_returns_container() {
    let source = r#"[1,   2]"#;
    let (_, document) = parse(source).unwrap();

    let node = document.node_at(4).unwrap();
    assert_eq!(node.node_type(), "Array");
    assert_eq!(node.span().len(), source.len());
}

#[test]
fn test_node_at_outside_document() {
    let source = "  {}  ";
    let (_, document) = parse(source).unwrap();

    assert!(document.node_at(0).is_none());
    assert!(document.node_at(4).is_none());
    assert_eq!(document.node_at(2).map(|n| n.node_type()), Some("Object"));
}

#[test]
fn test_positions_are_one_based_and_track_lines() {
    let source = "{\n  \"a\": [\n    true,\n    null\n  ]\n}";
    let (_, document) = parse(source).unwrap();

    let Node::Object(object) = &document.body else {
        panic!("expected an object");
    };
    assert_eq!((object.position.line, object.position.column), (1, 1));

    let property = &object.members[0];
    assert_eq!(property.key.value, "a");
    assert_eq!((property.key.position.line, property.key.position.column), (2, 3));

    let Node::Array(array) = &property.value else {
        panic!("expected an array");
    };
    let positions: Vec<(usize, usize)> = array
        .elements
        .iter()
        .map(|e| (e.position().line, e.position().column))
        .collect();
    assert_eq!(positions, vec![(3, 5), (4, 5)]);
    assert_eq!(document.pos_end(), source.len());
}

#[test]
fn test_ast_keeps_duplicate_members() {
    let source = r#"{"a": 1, "b": 2, "a": 3}"#;
    let (value, document) = parse(source).unwrap();

    assert_eq!(value.as_object().unwrap().len(), 2);

    let Node::Object(object) = &document.body else {
        panic!("expected an object");
    };
    assert_eq!(object.members.len(), 3);

    let duplicates = object.duplicate_keys();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].key.position.offset, source.rfind("\"a\"").unwrap());
}

#[test]
fn test_number_literal_keeps_raw_text() {
    let (_, document) = parse("[1.50, 2E3]").unwrap();
    let Node::Array(array) = &document.body else {
        panic!("expected an array");
    };
    let raws: Vec<&str> = array
        .elements
        .iter()
        .map(|e| match e {
            Node::Number(n) => n.raw.as_str(),
            other => panic!("expected a number, got {other:?}"),
        })
        .collect();
    assert_eq!(raws, vec!["1.50", "2E3"]);
}

#[test]
fn test_ast_json_tags() {
    let analysis = analyze(r#"{"k": [true, null, "s", 1]}"#, "test.json").unwrap();
    let ast: serde_json::Value = serde_json::from_str(&analysis.ast_json().unwrap()).unwrap();

    assert_eq!(ast["type"], "Document");
    assert_eq!(ast["body"]["type"], "Object");

    let member = &ast["body"]["members"][0];
    assert_eq!(member["type"], "Property");
    assert_eq!(member["key"]["type"], "Identifier");
    assert_eq!(member["key"]["value"], "k");

    let tags: Vec<&str> = member["value"]["elements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        tags,
        vec!["BooleanLiteral", "NullLiteral", "StringLiteral", "NumberLiteral"]
    );
    assert_eq!(member["value"]["position"]["line"], 1);
    assert_eq!(member["value"]["position"]["column"], 7);
}
