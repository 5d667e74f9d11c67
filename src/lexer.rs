use serde::Serialize;
use std::fmt;

/// A 1-based line/column pair plus the byte offset it corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The reason a token could not be recognized.
#[derive(Debug, PartialEq, Clone)]
pub enum LexIssue {
    /// A character that cannot start any token.
    UnexpectedCharacter(char),
    /// A bare word that is not `true`, `false` or `null`.
    UnknownLiteral(String),
    /// The input ended before the closing quote of a string.
    UnterminatedString,
    /// A backslash followed by a character that is not a JSON escape.
    InvalidEscape(char),
    /// `\u` not followed by four hexadecimal digits.
    MalformedUnicodeEscape,
    /// A `\u` escape naming half of a surrogate pair without the other half.
    UnpairedSurrogate(u16),
    /// An unescaped control character inside a string.
    ControlCharacter(char),
}

impl fmt::Display for LexIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexIssue::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}"),
            LexIssue::UnknownLiteral(word) => write!(f, "unknown literal `{word}`"),
            LexIssue::UnterminatedString => write!(f, "unterminated string"),
            LexIssue::InvalidEscape(c) => write!(f, "invalid escape sequence \\{c}"),
            LexIssue::MalformedUnicodeEscape => write!(f, "malformed \\u escape"),
            LexIssue::UnpairedSurrogate(unit) => write!(f, "unpaired surrogate \\u{unit:04X}"),
            LexIssue::ControlCharacter(c) => {
                write!(f, "unescaped control character U+{:04X}", *c as u32)
            }
        }
    }
}

/// Represents the different kinds of tokens that the lexer can produce.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// Left Brace: `{`
    LBrace,
    /// Right Brace: `}`
    RBrace,
    /// Left Bracket: `[`
    LBracket,
    /// Right Bracket: `]`
    RBracket,
    /// Colon: `:`
    Colon,
    /// Comma: `,`
    Comma,
    /// A string literal. Holds the decoded content, quotes removed.
    String(String),
    /// A number literal exactly as written. Validation happens in the parser.
    Number(String),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`
    Null,
    /// End of input. Returned forever once reached.
    Eof,
    /// Input that could not be tokenized.
    Invalid(LexIssue),
}

impl TokenType {
    /// A short human description used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenType::LBrace => "'{'".to_string(),
            TokenType::RBrace => "'}'".to_string(),
            TokenType::LBracket => "'['".to_string(),
            TokenType::RBracket => "']'".to_string(),
            TokenType::Colon => "':'".to_string(),
            TokenType::Comma => "','".to_string(),
            TokenType::String(s) => format!("string {s:?}"),
            TokenType::Number(n) => format!("number {n}"),
            TokenType::Boolean(b) => b.to_string(),
            TokenType::Null => "null".to_string(),
            TokenType::Eof => "end of file".to_string(),
            TokenType::Invalid(issue) => issue.to_string(),
        }
    }
}

/// A token with its type and position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub ttype: TokenType,
    pub line: usize,
    pub column: usize,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Token {
    pub fn new(ttype: TokenType, start: Position, pos_end: usize) -> Token {
        Token {
            ttype,
            line: start.line,
            column: start.column,
            pos_start: start.offset,
            pos_end,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.pos_start)
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    position: usize,
    line: usize,
    column: usize,
    emitted_eof: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            line: 1,
            column: 1,
            emitted_eof: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.input
    }

    /// Tokenizes the whole input, up to and including the `Eof` token.
    pub fn lex(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.ttype == TokenType::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.mark();

        let Some(char) = self.advance() else {
            return Token::new(TokenType::Eof, start, self.position);
        };

        let ttype = match char {
            '{' => TokenType::LBrace,
            '}' => TokenType::RBrace,
            '[' => TokenType::LBracket,
            ']' => TokenType::RBracket,
            ':' => TokenType::Colon,
            ',' => TokenType::Comma,
            '"' => match self.read_string() {
                Ok(value) => TokenType::String(value),
                Err((issue, at)) => return self.invalid(issue, at),
            },
            c if c.is_ascii_digit() || c == '-' => self.read_number(c),
            c if c.is_ascii_alphabetic() => self.read_keyword(c),
            c => TokenType::Invalid(LexIssue::UnexpectedCharacter(c)),
        };

        Token::new(ttype, start, self.position)
    }

    fn mark(&self) -> Position {
        Position::new(self.line, self.column, self.position)
    }

    /// Builds an `Invalid` token located at `at` and spanning one character.
    fn invalid(&self, issue: LexIssue, at: Position) -> Token {
        let width = self.input[at.offset..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        Token::new(TokenType::Invalid(issue), at, at.offset + width)
    }

    fn advance(&mut self) -> Option<char> {
        let char = self.chars.next();
        if let Some(c) = char {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        char
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Reads string content after the opening quote. On failure returns the
    /// issue and where it was found.
    fn read_string(&mut self) -> Result<String, (LexIssue, Position)> {
        // The opening quote has already been consumed.
        let opening = Position::new(self.line, self.column - 1, self.position - 1);
        let mut value = String::new();
        loop {
            let here = self.mark();
            match self.advance() {
                None => return Err((LexIssue::UnterminatedString, opening)),
                Some('"') => return Ok(value),
                Some('\\') => value.push(self.read_escape(here)?),
                Some(c) if (c as u32) < 0x20 => {
                    return Err((LexIssue::ControlCharacter(c), here));
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// Decodes one escape sequence; `at` is the position of the backslash.
    fn read_escape(&mut self, at: Position) -> Result<char, (LexIssue, Position)> {
        match self.advance() {
            None => Err((LexIssue::UnterminatedString, at)),
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000C}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => self.read_unicode_escape(at),
            Some(other) => Err((LexIssue::InvalidEscape(other), at)),
        }
    }

    fn read_unicode_escape(&mut self, at: Position) -> Result<char, (LexIssue, Position)> {
        let unit = self.read_hex4().map_err(|issue| (issue, at))?;
        let code_point = match unit {
            0xD800..=0xDBFF => {
                let low_at = self.mark();
                if self.peek() != Some(&'\\') {
                    return Err((LexIssue::UnpairedSurrogate(unit), at));
                }
                self.advance();
                if self.advance() != Some('u') {
                    return Err((LexIssue::UnpairedSurrogate(unit), at));
                }
                let low = self.read_hex4().map_err(|issue| (issue, low_at))?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err((LexIssue::UnpairedSurrogate(unit), at));
                }
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err((LexIssue::UnpairedSurrogate(unit), at)),
            _ => u32::from(unit),
        };
        char::from_u32(code_point).ok_or((LexIssue::MalformedUnicodeEscape, at))
    }

    fn read_hex4(&mut self) -> Result<u16, LexIssue> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or(LexIssue::MalformedUnicodeEscape)?;
            self.advance();
            unit = (unit << 4) | digit as u16;
        }
        Ok(unit)
    }

    fn read_keyword(&mut self, first_char: char) -> TokenType {
        let mut word = String::new();
        word.push(first_char);

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || *c == '_' {
                let c = *c;
                self.advance();
                word.push(c);
            } else {
                break;
            }
        }

        match word.as_str() {
            "true" => TokenType::Boolean(true),
            "false" => TokenType::Boolean(false),
            "null" => TokenType::Null,
            _ => TokenType::Invalid(LexIssue::UnknownLiteral(word)),
        }
    }

    /// Greedy over `[0-9eE+\-.]`; the shape is checked by the parser.
    fn read_number(&mut self, first_char: char) -> TokenType {
        let mut number_str = String::new();
        number_str.push(first_char);

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, 'e' | 'E' | '+' | '-' | '.') {
                let c = *c;
                self.advance();
                number_str.push(c);
            } else {
                break;
            }
        }

        TokenType::Number(number_str)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token including the first `Eof`, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.ttype == TokenType::Eof {
            self.emitted_eof = true;
        }
        Some(token)
    }
}
