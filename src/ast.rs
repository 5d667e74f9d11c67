pub use crate::lexer::Position;
use crate::number::Number;
use miette::SourceSpan;
use serde::Serialize;
use std::collections::HashSet;

/// Common behaviour of every AST node.
pub trait AstNode {
    /// The node's tag, e.g. `"Object"` or `"StringLiteral"`.
    fn node_type(&self) -> &'static str;

    /// Location of the node's first character.
    fn position(&self) -> Position;

    /// Exclusive byte offset of the node's last character.
    fn pos_end(&self) -> usize;

    fn span(&self) -> SourceSpan {
        let start = self.position().offset;
        (start, self.pos_end() - start).into()
    }

    fn contains(&self, offset: usize) -> bool {
        offset >= self.position().offset && offset < self.pos_end()
    }
}

/// The root of a parse. There is exactly one per document.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub struct Document {
    pub body: Node,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "Object")]
    Object(ObjectNode),
    #[serde(rename = "Array")]
    Array(ArrayNode),
    #[serde(rename = "StringLiteral")]
    String(StringLiteral),
    #[serde(rename = "NumberLiteral")]
    Number(NumberLiteral),
    #[serde(rename = "BooleanLiteral")]
    Boolean(BooleanLiteral),
    #[serde(rename = "NullLiteral")]
    Null(NullLiteral),
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ObjectNode {
    /// Every member in source order, duplicates included.
    pub members: Vec<Property>,
    pub position: Position,
    pub pos_end: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ArrayNode {
    pub elements: Vec<Node>,
    pub position: Position,
    pub pos_end: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub struct Property {
    pub key: Identifier,
    pub value: Node,
}

/// An object key.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub struct Identifier {
    pub value: String,
    pub position: Position,
    pub pos_end: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct StringLiteral {
    pub value: String,
    pub position: Position,
    pub pos_end: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct NumberLiteral {
    pub value: Number,
    /// The literal as it appeared in the source.
    pub raw: String,
    pub position: Position,
    pub pos_end: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct BooleanLiteral {
    pub value: bool,
    pub position: Position,
    pub pos_end: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct NullLiteral {
    pub position: Position,
    pub pos_end: usize,
}

impl Document {
    /// Finds the innermost value node whose span contains `offset`.
    pub fn node_at(&self, offset: usize) -> Option<&Node> {
        find_node_at(&self.body, offset)
    }
}

fn find_node_at(node: &Node, offset: usize) -> Option<&Node> {
    if !node.contains(offset) {
        return None;
    }

    match node {
        Node::Object(object) => {
            for member in &object.members {
                if let Some(found) = find_node_at(&member.value, offset) {
                    return Some(found);
                }
            }
        }
        Node::Array(array) => {
            for element in &array.elements {
                if let Some(found) = find_node_at(element, offset) {
                    return Some(found);
                }
            }
        }
        _ => {}
    }

    Some(node)
}

impl ObjectNode {
    /// Properties whose key already appeared earlier in the same object.
    pub fn duplicate_keys(&self) -> Vec<&Property> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for property in &self.members {
            if !seen.insert(property.key.value.as_str()) {
                duplicates.push(property);
            }
        }
        duplicates
    }
}

impl AstNode for Document {
    fn node_type(&self) -> &'static str {
        "Document"
    }

    fn position(&self) -> Position {
        self.body.position()
    }

    fn pos_end(&self) -> usize {
        self.body.pos_end()
    }
}

impl AstNode for Node {
    fn node_type(&self) -> &'static str {
        match self {
            Node::Object(n) => n.node_type(),
            Node::Array(n) => n.node_type(),
            Node::String(n) => n.node_type(),
            Node::Number(n) => n.node_type(),
            Node::Boolean(n) => n.node_type(),
            Node::Null(n) => n.node_type(),
        }
    }

    fn position(&self) -> Position {
        match self {
            Node::Object(n) => n.position,
            Node::Array(n) => n.position,
            Node::String(n) => n.position,
            Node::Number(n) => n.position,
            Node::Boolean(n) => n.position,
            Node::Null(n) => n.position,
        }
    }

    fn pos_end(&self) -> usize {
        match self {
            Node::Object(n) => n.pos_end,
            Node::Array(n) => n.pos_end,
            Node::String(n) => n.pos_end,
            Node::Number(n) => n.pos_end,
            Node::Boolean(n) => n.pos_end,
            Node::Null(n) => n.pos_end,
        }
    }
}

impl AstNode for Property {
    fn node_type(&self) -> &'static str {
        "Property"
    }

    fn position(&self) -> Position {
        self.key.position
    }

    fn pos_end(&self) -> usize {
        self.value.pos_end()
    }
}

macro_rules! positioned_node {
    ($($ty:ty => $tag:literal),* $(,)?) => {
        $(
            impl AstNode for $ty {
                fn node_type(&self) -> &'static str {
                    $tag
                }

                fn position(&self) -> Position {
                    self.position
                }

                fn pos_end(&self) -> usize {
                    self.pos_end
                }
            }
        )*
    };
}

positioned_node! {
    ObjectNode => "Object",
    ArrayNode => "Array",
    Identifier => "Identifier",
    StringLiteral => "StringLiteral",
    NumberLiteral => "NumberLiteral",
    BooleanLiteral => "BooleanLiteral",
    NullLiteral => "NullLiteral",
}
