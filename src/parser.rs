use crate::ast::*;
use crate::error::{JsonError, LexerError, ParserError};
use crate::lexer::{Lexer, Token, TokenType};
use crate::number::{parse_number_literal, NumberIssue};
use crate::value::{Map, Value};
use log::{debug, trace};
use miette::{NamedSource, SourceSpan};

/// Knobs for a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject documents whose top-level value is not an object or array.
    pub require_container_root: bool,
    /// Maximum container nesting. `None` leaves it to the call stack.
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_container_root(mut self, require: bool) -> Self {
        self.require_container_root = require;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// A recursive descent parser for JSON that builds a `Value` and its AST in
/// one pass, pulling tokens from the lexer one at a time.
pub struct Parser<'a> {
    name: String,
    source: NamedSource<String>,
    lexer: Lexer<'a>,
    current: Token,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Result<Self, JsonError> {
        Self::new_with_name(source_text, "source.json".to_string())
    }

    pub fn new_with_name(source_text: &'a str, name: String) -> Result<Self, JsonError> {
        Self::with_options(source_text, name, ParseOptions::default())
    }

    /// Creates a parser and pulls the first token. Fails if that token is
    /// already a lexical error.
    pub fn with_options(
        source_text: &'a str,
        name: String,
        options: ParseOptions,
    ) -> Result<Self, JsonError> {
        let source = NamedSource::new(name.clone(), source_text.to_string());
        let mut lexer = Lexer::new(source_text);
        let first = lexer.next_token();
        let first = check_token(&source, first)?;

        Ok(Self {
            name,
            source,
            lexer,
            current: first,
            options,
            depth: 0,
        })
    }

    // === Main Parsing Methods ===

    /// Document ::= Value EOF
    pub fn parse_document(&mut self) -> Result<(Value, Document), JsonError> {
        debug!(
            "parsing {} ({} bytes)",
            self.name,
            self.lexer.source().len()
        );

        match self.current.ttype {
            TokenType::Eof => return Err(self.err_eof()),
            TokenType::LBrace | TokenType::LBracket => {}
            _ if self.options.require_container_root => {
                return Err(ParserError::InvalidRoot {
                    src: self.source.clone(),
                    span: span_of(&self.current),
                    line: self.current.line,
                    column: self.current.column,
                    found: self.current.ttype.describe(),
                }
                .into());
            }
            _ => {}
        }

        let (value, body) = self.parse_value()?;

        if self.current.ttype != TokenType::Eof {
            return Err(ParserError::TrailingContent {
                src: self.source.clone(),
                span: span_of(&self.current),
                line: self.current.line,
                column: self.current.column,
                found: self.current.ttype.describe(),
            }
            .into());
        }

        debug!("parsed {} as {}", self.name, value.kind_name());
        Ok((value, Document { body }))
    }

    /// Value ::= Object | Array | String | Number | Boolean | Null
    fn parse_value(&mut self) -> Result<(Value, Node), JsonError> {
        match self.current.ttype {
            TokenType::LBrace => return self.parse_object(),
            TokenType::LBracket => return self.parse_array(),
            TokenType::String(_)
            | TokenType::Number(_)
            | TokenType::Boolean(_)
            | TokenType::Null => {}
            TokenType::Eof => return Err(self.err_eof()),
            _ => return Err(self.err_unexpected("a value")),
        }

        let position = self.current.position();
        let pos_end = self.current.pos_end;

        // Validated before advancing so that a bad literal is reported ahead
        // of any lexical error in the token after it.
        let number = match &self.current.ttype {
            TokenType::Number(raw) => Some(
                parse_number_literal(raw)
                    .map_err(|issue| self.err_number(issue, raw, position, pos_end))?,
            ),
            _ => None,
        };

        let token = self.advance()?;
        let parsed = match (token.ttype, number) {
            (TokenType::String(value), _) => (
                Value::String(value.clone()),
                Node::String(StringLiteral {
                    value,
                    position,
                    pos_end,
                }),
            ),
            (TokenType::Number(raw), Some(number)) => (
                Value::Number(number),
                Node::Number(NumberLiteral {
                    value: number,
                    raw,
                    position,
                    pos_end,
                }),
            ),
            (TokenType::Boolean(value), _) => (
                Value::Boolean(value),
                Node::Boolean(BooleanLiteral {
                    value,
                    position,
                    pos_end,
                }),
            ),
            // Null is the only scalar left after the check above.
            _ => (Value::Null, Node::Null(NullLiteral { position, pos_end })),
        };
        Ok(parsed)
    }

    /// Object ::= "{" [ Member { "," Member } ] "}"
    fn parse_object(&mut self) -> Result<(Value, Node), JsonError> {
        let open = self.advance()?;
        self.enter(&open)?;

        let mut map = Map::new();
        let mut members = Vec::new();

        let close = if self.current.ttype == TokenType::RBrace {
            self.advance()?
        } else {
            loop {
                let (key, value, property) = self.parse_member()?;
                // Last write wins in the value; the AST keeps every member.
                map.insert(key, value);
                members.push(property);

                match self.current.ttype {
                    TokenType::Comma => {
                        let comma = self.advance()?;
                        if self.current.ttype == TokenType::RBrace {
                            return Err(self.err_dangling_comma(&comma, '}'));
                        }
                    }
                    TokenType::RBrace => break self.advance()?,
                    TokenType::Eof => return Err(self.err_eof()),
                    _ => return Err(self.err_unexpected("',' or '}'")),
                }
            }
        };

        self.depth -= 1;
        Ok((
            Value::Object(map),
            Node::Object(ObjectNode {
                members,
                position: open.position(),
                pos_end: close.pos_end,
            }),
        ))
    }

    /// Member ::= String ":" Value
    fn parse_member(&mut self) -> Result<(String, Value, Property), JsonError> {
        let key = match &self.current.ttype {
            TokenType::String(s) => s.clone(),
            TokenType::Eof => return Err(self.err_eof()),
            _ => return Err(self.err_unexpected("a string key")),
        };
        let key_token = self.advance()?;
        self.expect(TokenType::Colon, "':'")?;
        let (value, node) = self.parse_value()?;

        let property = Property {
            key: Identifier {
                value: key.clone(),
                position: key_token.position(),
                pos_end: key_token.pos_end,
            },
            value: node,
        };
        Ok((key, value, property))
    }

    /// Array ::= "[" [ Value { "," Value } ] "]"
    fn parse_array(&mut self) -> Result<(Value, Node), JsonError> {
        let open = self.advance()?;
        self.enter(&open)?;

        let mut values = Vec::new();
        let mut elements = Vec::new();

        let close = if self.current.ttype == TokenType::RBracket {
            self.advance()?
        } else {
            loop {
                let (value, node) = self.parse_value()?;
                values.push(value);
                elements.push(node);

                match self.current.ttype {
                    TokenType::Comma => {
                        let comma = self.advance()?;
                        if self.current.ttype == TokenType::RBracket {
                            return Err(self.err_dangling_comma(&comma, ']'));
                        }
                    }
                    TokenType::RBracket => break self.advance()?,
                    TokenType::Eof => return Err(self.err_eof()),
                    _ => return Err(self.err_unexpected("',' or ']'")),
                }
            }
        };

        self.depth -= 1;
        Ok((
            Value::Array(values),
            Node::Array(ArrayNode {
                elements,
                position: open.position(),
                pos_end: close.pos_end,
            }),
        ))
    }

    // === Token Helper Methods ===

    /// Returns the current token and pulls the next one from the lexer.
    fn advance(&mut self) -> Result<Token, JsonError> {
        let next = self.lexer.next_token();
        trace!(
            "token {:?} at {}:{}",
            next.ttype,
            next.line,
            next.column
        );
        let next = check_token(&self.source, next)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, expected: TokenType, description: &str) -> Result<Token, JsonError> {
        if self.current.ttype == expected {
            self.advance()
        } else if self.current.ttype == TokenType::Eof {
            Err(self.err_eof())
        } else {
            Err(self.err_unexpected(description))
        }
    }

    fn enter(&mut self, open: &Token) -> Result<(), JsonError> {
        self.depth += 1;
        match self.options.max_depth {
            Some(max_depth) if self.depth > max_depth => Err(ParserError::NestingTooDeep {
                src: self.source.clone(),
                span: span_of(open),
                line: open.line,
                column: open.column,
                max_depth,
            }
            .into()),
            _ => Ok(()),
        }
    }

    // === Errors ===

    fn err_unexpected(&self, expected: &str) -> JsonError {
        ParserError::UnexpectedToken {
            src: self.source.clone(),
            span: span_of(&self.current),
            line: self.current.line,
            column: self.current.column,
            expected: expected.to_string(),
            found: self.current.ttype.describe(),
        }
        .into()
    }

    fn err_eof(&self) -> JsonError {
        ParserError::UnexpectedEof {
            src: self.source.clone(),
            span: span_of(&self.current),
            line: self.current.line,
            column: self.current.column,
        }
        .into()
    }

    fn err_dangling_comma(&self, comma: &Token, closing: char) -> JsonError {
        ParserError::DanglingComma {
            src: self.source.clone(),
            span: span_of(comma),
            line: comma.line,
            column: comma.column,
            closing,
        }
        .into()
    }

    fn err_number(
        &self,
        issue: NumberIssue,
        literal: &str,
        position: Position,
        pos_end: usize,
    ) -> JsonError {
        let src = self.source.clone();
        let span: SourceSpan = (position.offset, pos_end - position.offset).into();
        let (line, column) = (position.line, position.column);
        let literal = literal.to_string();
        match issue {
            NumberIssue::LeadingZero => ParserError::LeadingZero {
                src,
                span,
                line,
                column,
                literal,
            },
            NumberIssue::Invalid => ParserError::InvalidNumber {
                src,
                span,
                line,
                column,
                literal,
            },
            NumberIssue::OutOfRange => ParserError::NumberOutOfRange {
                src,
                span,
                line,
                column,
                literal,
            },
        }
        .into()
    }
}

fn span_of(token: &Token) -> SourceSpan {
    (token.pos_start, token.pos_end - token.pos_start).into()
}

/// Turns an `Invalid` token into its lexical diagnostic.
fn check_token(source: &NamedSource<String>, token: Token) -> Result<Token, JsonError> {
    if let TokenType::Invalid(issue) = &token.ttype {
        return Err(LexerError::from_issue(issue.clone(), source.clone(), &token).into());
    }
    Ok(token)
}
