use crate::lexer::{LexIssue, Token};
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum JsonError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexer(#[from] LexerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parser(#[from] ParserError),
}

impl JsonError {
    /// 1-based line of the offending token.
    pub fn line(&self) -> usize {
        match self {
            JsonError::Lexer(e) => e.location().0,
            JsonError::Parser(e) => e.location().0,
        }
    }

    /// 1-based column of the offending token.
    pub fn column(&self) -> usize {
        match self {
            JsonError::Lexer(e) => e.location().1,
            JsonError::Parser(e) => e.location().1,
        }
    }

    /// Byte offset of the offending token.
    pub fn offset(&self) -> usize {
        match self {
            JsonError::Lexer(e) => e.location().2.offset(),
            JsonError::Parser(e) => e.location().2.offset(),
        }
    }

    /// Renders the error as a graphical miette report, without colors.
    pub fn render(&self) -> String {
        let mut buffer = String::new();
        let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
        match handler.render_report(&mut buffer, self) {
            Ok(()) => buffer,
            Err(_) => self.to_string(),
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum LexerError {
    #[error("unexpected character {found:?} at line {line}, column {column}")]
    #[diagnostic(
        code(lexer::unexpected_character),
        help("JSON values start with '{{', '[', '\"', a digit, '-', true, false or null.")
    )]
    UnexpectedCharacter {
        #[source_code]
        src: NamedSource<String>,
        #[label("this character cannot start a token")]
        span: SourceSpan,
        line: usize,
        column: usize,
        found: char,
    },

    #[error("unknown literal `{word}` at line {line}, column {column}")]
    #[diagnostic(
        code(lexer::unknown_literal),
        help("The only bare words in JSON are true, false and null. Strings need double quotes.")
    )]
    UnknownLiteral {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a JSON literal")]
        span: SourceSpan,
        line: usize,
        column: usize,
        word: String,
    },

    #[error("unterminated string at line {line}, column {column}")]
    #[diagnostic(
        code(lexer::unterminated_string),
        help("The file ended before this string's closing quote.")
    )]
    UnterminatedString {
        #[source_code]
        src: NamedSource<String>,
        #[label("string starts here")]
        span: SourceSpan,
        line: usize,
        column: usize,
    },

    #[error("invalid escape sequence \\{escape} at line {line}, column {column}")]
    #[diagnostic(
        code(lexer::invalid_escape),
        help("Valid escapes are \\\" \\\\ \\/ \\b \\f \\n \\r \\t and \\uXXXX.")
    )]
    InvalidEscape {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown escape")]
        span: SourceSpan,
        line: usize,
        column: usize,
        escape: char,
    },

    #[error("malformed \\u escape at line {line}, column {column}")]
    #[diagnostic(
        code(lexer::malformed_unicode_escape),
        help("\\u must be followed by exactly four hexadecimal digits.")
    )]
    MalformedUnicodeEscape {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected four hex digits after this")]
        span: SourceSpan,
        line: usize,
        column: usize,
    },

    #[error("unpaired surrogate \\u{unit:04X} at line {line}, column {column}")]
    #[diagnostic(
        code(lexer::unpaired_surrogate),
        help("A high surrogate (D800-DBFF) must be followed by a \\u escape for a low surrogate (DC00-DFFF).")
    )]
    UnpairedSurrogate {
        #[source_code]
        src: NamedSource<String>,
        #[label("this half of a surrogate pair stands alone")]
        span: SourceSpan,
        line: usize,
        column: usize,
        unit: u16,
    },

    #[error("unescaped control character U+{code:04X} in string at line {line}, column {column}")]
    #[diagnostic(
        code(lexer::control_character),
        help("Control characters inside strings must be escaped, e.g. \\n or \\u0009.")
    )]
    ControlCharacter {
        #[source_code]
        src: NamedSource<String>,
        #[label("raw control character")]
        span: SourceSpan,
        line: usize,
        column: usize,
        code: u32,
    },
}

impl LexerError {
    /// Builds the diagnostic for an `Invalid` token.
    pub fn from_issue(issue: LexIssue, src: NamedSource<String>, token: &Token) -> Self {
        let span: SourceSpan = (token.pos_start, token.pos_end - token.pos_start).into();
        let (line, column) = (token.line, token.column);
        match issue {
            LexIssue::UnexpectedCharacter(found) => LexerError::UnexpectedCharacter {
                src,
                span,
                line,
                column,
                found,
            },
            LexIssue::UnknownLiteral(word) => LexerError::UnknownLiteral {
                src,
                span,
                line,
                column,
                word,
            },
            LexIssue::UnterminatedString => LexerError::UnterminatedString {
                src,
                span,
                line,
                column,
            },
            LexIssue::InvalidEscape(escape) => LexerError::InvalidEscape {
                src,
                span,
                line,
                column,
                escape,
            },
            LexIssue::MalformedUnicodeEscape => LexerError::MalformedUnicodeEscape {
                src,
                span,
                line,
                column,
            },
            LexIssue::UnpairedSurrogate(unit) => LexerError::UnpairedSurrogate {
                src,
                span,
                line,
                column,
                unit,
            },
            LexIssue::ControlCharacter(c) => LexerError::ControlCharacter {
                src,
                span,
                line,
                column,
                code: c as u32,
            },
        }
    }

    fn location(&self) -> (usize, usize, SourceSpan) {
        match self {
            LexerError::UnexpectedCharacter {
                line, column, span, ..
            }
            | LexerError::UnknownLiteral {
                line, column, span, ..
            }
            | LexerError::UnterminatedString {
                line, column, span, ..
            }
            | LexerError::InvalidEscape {
                line, column, span, ..
            }
            | LexerError::MalformedUnicodeEscape {
                line, column, span, ..
            }
            | LexerError::UnpairedSurrogate {
                line, column, span, ..
            }
            | LexerError::ControlCharacter {
                line, column, span, ..
            } => (*line, *column, *span),
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParserError {
    #[error("expected {expected}, found {found} at line {line}, column {column}")]
    #[diagnostic(
        code(parser::unexpected_token),
        help("The parser found a token it did not expect in this position.")
    )]
    UnexpectedToken {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected {expected} here")]
        span: SourceSpan,
        line: usize,
        column: usize,
        expected: String,
        found: String,
    },

    #[error("unexpected end of file at line {line}, column {column}")]
    #[diagnostic(
        code(parser::unexpected_eof),
        help("The file ended unexpectedly. A value or a closing '}}' or ']' is missing.")
    )]
    UnexpectedEof {
        #[source_code]
        src: NamedSource<String>,
        #[label("file ended unexpectedly here")]
        span: SourceSpan,
        line: usize,
        column: usize,
    },

    #[error("unexpected , before {closing} at line {line}, column {column}")]
    #[diagnostic(
        code(parser::dangling_comma),
        help("Trailing commas are not allowed in JSON. Remove this comma.")
    )]
    DanglingComma {
        #[source_code]
        src: NamedSource<String>,
        #[label("trailing comma")]
        span: SourceSpan,
        line: usize,
        column: usize,
        closing: char,
    },

    #[error("unexpected token after top-level value: {found} at line {line}, column {column}")]
    #[diagnostic(
        code(parser::trailing_content),
        help("A JSON document holds exactly one value.")
    )]
    TrailingContent {
        #[source_code]
        src: NamedSource<String>,
        #[label("nothing may follow the top-level value")]
        span: SourceSpan,
        line: usize,
        column: usize,
        found: String,
    },

    #[error("top-level value must be an object or array, found {found} at line {line}, column {column}")]
    #[diagnostic(
        code(parser::invalid_root),
        help("Wrap the value in an array, or parse without `require_container_root`.")
    )]
    InvalidRoot {
        #[source_code]
        src: NamedSource<String>,
        #[label("document root")]
        span: SourceSpan,
        line: usize,
        column: usize,
        found: String,
    },

    #[error("numbers cannot have leading zeros: {literal} at line {line}, column {column}")]
    #[diagnostic(code(parser::leading_zero))]
    LeadingZero {
        #[source_code]
        src: NamedSource<String>,
        #[label("leading zero")]
        span: SourceSpan,
        line: usize,
        column: usize,
        literal: String,
    },

    #[error("invalid number literal {literal} at line {line}, column {column}")]
    #[diagnostic(
        code(parser::invalid_number),
        help("Numbers look like -12, 0.5 or 6.02e23.")
    )]
    InvalidNumber {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a number")]
        span: SourceSpan,
        line: usize,
        column: usize,
        literal: String,
    },

    #[error("number out of range: {literal} at line {line}, column {column}")]
    #[diagnostic(code(parser::number_out_of_range))]
    NumberOutOfRange {
        #[source_code]
        src: NamedSource<String>,
        #[label("does not fit in a 64-bit float")]
        span: SourceSpan,
        line: usize,
        column: usize,
        literal: String,
    },

    #[error("nesting too deep (limit {max_depth}) at line {line}, column {column}")]
    #[diagnostic(code(parser::nesting_too_deep))]
    NestingTooDeep {
        #[source_code]
        src: NamedSource<String>,
        #[label("this container exceeds the depth limit")]
        span: SourceSpan,
        line: usize,
        column: usize,
        max_depth: usize,
    },
}

impl ParserError {
    fn location(&self) -> (usize, usize, SourceSpan) {
        match self {
            ParserError::UnexpectedToken {
                line, column, span, ..
            }
            | ParserError::UnexpectedEof {
                line, column, span, ..
            }
            | ParserError::DanglingComma {
                line, column, span, ..
            }
            | ParserError::TrailingContent {
                line, column, span, ..
            }
            | ParserError::InvalidRoot {
                line, column, span, ..
            }
            | ParserError::LeadingZero {
                line, column, span, ..
            }
            | ParserError::InvalidNumber {
                line, column, span, ..
            }
            | ParserError::NumberOutOfRange {
                line, column, span, ..
            }
            | ParserError::NestingTooDeep {
                line, column, span, ..
            } => (*line, *column, *span),
        }
    }
}
