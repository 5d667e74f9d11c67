pub mod api;
pub mod ast;
pub mod error;
pub mod lexer;
pub mod number;
pub mod parser;
pub mod value;

pub use api::{analyze, analyze_with_options, parse, parse_with_options, Analysis};
pub use ast::{AstNode, Document, Node};
pub use error::JsonError;
pub use number::Number;
pub use parser::{ParseOptions, Parser};
pub use value::{Map, Value};
