//! Tokenizer for the schema definition language.
//!
//! Whitespace, commas, the byte order mark and `#` comments are insignificant
//! and never reach the parser.

use crate::position::{SourcePosition, Spanning};
use derive_more::Display;

///
/// Punctuation
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Punctuation {
    #[display("&")]
    Amp,
    #[display("@")]
    At,
    #[display("!")]
    Bang,
    #[display("{{")]
    BraceL,
    #[display("}}")]
    BraceR,
    #[display("[")]
    BracketL,
    #[display("]")]
    BracketR,
    #[display(":")]
    Colon,
    #[display("$")]
    Dollar,
    #[display("=")]
    Equals,
    #[display("(")]
    ParenL,
    #[display(")")]
    ParenR,
    #[display("|")]
    Pipe,
    #[display("...")]
    Spread,
}

///
/// Token
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Token {
    #[display("{_0}")]
    Name(String),
    #[display("{_0}")]
    Punctuation(Punctuation),
    #[display("{_0}")]
    Int(String),
    #[display("{_0}")]
    Float(String),
    #[display("\"{_0}\"")]
    String(String),
    #[display("\"\"\"{_0}\"\"\"")]
    BlockString(String),
}

///
/// LexError
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexError {
    pub position: SourcePosition,
    pub message: String,
}

impl LexError {
    fn new(position: SourcePosition, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

///
/// Lexer
///

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the whole source in one pass.
    pub fn tokenize(mut self) -> Result<Vec<Spanning<Token>>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_ignored();
            if self.peek().is_none() {
                break;
            }
            tokens.push(self.read_token()?);
        }

        Ok(tokens)
    }

    const fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.col)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        match c {
            '\n' => {
                self.line += 1;
                self.col = 1;
            }
            // \r\n counts as a single line terminator
            '\r' if self.peek() != Some('\n') => {
                self.line += 1;
                self.col = 1;
            }
            '\r' => {}
            _ => self.col += 1,
        }

        Some(c)
    }

    fn skip_ignored(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{feff}' => {
                    self.bump();
                }
                '#' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' || c == '\r' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_token(&mut self) -> Result<Spanning<Token>, LexError> {
        let start = self.position();
        let Some(c) = self.peek() else {
            return Err(LexError::new(start, "unexpected end of input"));
        };

        let token = match c {
            '!' => self.punctuation(Punctuation::Bang),
            '$' => self.punctuation(Punctuation::Dollar),
            '&' => self.punctuation(Punctuation::Amp),
            '(' => self.punctuation(Punctuation::ParenL),
            ')' => self.punctuation(Punctuation::ParenR),
            ':' => self.punctuation(Punctuation::Colon),
            '=' => self.punctuation(Punctuation::Equals),
            '@' => self.punctuation(Punctuation::At),
            '[' => self.punctuation(Punctuation::BracketL),
            ']' => self.punctuation(Punctuation::BracketR),
            '{' => self.punctuation(Punctuation::BraceL),
            '|' => self.punctuation(Punctuation::Pipe),
            '}' => self.punctuation(Punctuation::BraceR),
            '.' => self.read_spread()?,
            '"' if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') => {
                self.read_block_string()?
            }
            '"' => self.read_string()?,
            '-' | '0'..='9' => self.read_number()?,
            c if is_name_start(c) => self.read_name(),
            c => return Err(LexError::new(start, format!("unexpected character \"{c}\""))),
        };

        Ok(Spanning::start_end(start, self.position(), token))
    }

    fn punctuation(&mut self, p: Punctuation) -> Token {
        self.bump();
        Token::Punctuation(p)
    }

    fn read_spread(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        for _ in 0..3 {
            if self.peek() != Some('.') {
                return Err(LexError::new(start, "unexpected character \".\""));
            }
            self.bump();
        }

        Ok(Token::Punctuation(Punctuation::Spread))
    }

    fn read_name(&mut self) -> Token {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !is_name_continue(c) {
                break;
            }
            name.push(c);
            self.bump();
        }

        Token::Name(name)
    }

    fn read_digits(&mut self, out: &mut String) -> Result<(), LexError> {
        let start = self.position();
        let mut any = false;
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            out.push(c);
            self.bump();
            any = true;
        }
        if any {
            Ok(())
        } else {
            Err(LexError::new(start, "expected digit"))
        }
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        let mut text = String::new();
        let mut is_float = false;

        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        if self.peek() == Some('0') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            return Err(LexError::new(start, "invalid number, unexpected leading zero"));
        }
        self.read_digits(&mut text)?;

        if self.peek() == Some('.') {
            is_float = true;
            text.push('.');
            self.bump();
            self.read_digits(&mut text)?;
        }
        if let Some(e @ ('e' | 'E')) = self.peek() {
            is_float = true;
            text.push(e);
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.bump();
            }
            self.read_digits(&mut text)?;
        }
        if let Some(c) = self.peek().filter(|c| *c == '.' || is_name_start(*c)) {
            return Err(LexError::new(
                self.position(),
                format!("invalid number, unexpected character \"{c}\""),
            ));
        }

        Ok(if is_float {
            Token::Float(text)
        } else {
            Token::Int(text)
        })
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        self.bump();

        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n' | '\r') => {
                    return Err(LexError::new(start, "unterminated string"));
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    let escape_pos = self.position();
                    self.bump();
                    let escaped = match self.bump() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => self.read_unicode_escape(escape_pos)?,
                        _ => return Err(LexError::new(escape_pos, "invalid escape sequence")),
                    };
                    value.push(escaped);
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }

        Ok(Token::String(value))
    }

    fn read_unicode_escape(&mut self, escape_pos: SourcePosition) -> Result<char, LexError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| LexError::new(escape_pos, "invalid unicode escape sequence"))?;
            code = code * 16 + digit;
        }

        char::from_u32(code)
            .ok_or_else(|| LexError::new(escape_pos, "invalid unicode escape sequence"))
    }

    fn read_block_string(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        for _ in 0..3 {
            self.bump();
        }

        let mut raw = String::new();
        loop {
            match self.peek() {
                None => return Err(LexError::new(start, "unterminated block string")),
                Some('"') if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') => {
                    for _ in 0..3 {
                        self.bump();
                    }
                    break;
                }
                Some('\\')
                    if self.peek_at(1) == Some('"')
                        && self.peek_at(2) == Some('"')
                        && self.peek_at(3) == Some('"') =>
                {
                    raw.push_str("\"\"\"");
                    for _ in 0..4 {
                        self.bump();
                    }
                }
                Some(c) => {
                    raw.push(c);
                    self.bump();
                }
            }
        }

        Ok(Token::BlockString(block_string_value(&raw)))
    }
}

/// Strip the common indentation and surrounding blank lines of a block string.
fn block_string_value(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut out: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line
            } else {
                line.get(common_indent..).unwrap_or("")
            }
        })
        .collect();

    while out.first().is_some_and(|l| l.trim().is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }

    out.join("\n")
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .tokenize()
            .expect("source should tokenize")
            .into_iter()
            .map(|t| t.item)
            .collect()
    }

    #[test]
    fn skips_comments_and_commas() {
        let tokens = items("# leading\ntype Cat { a: Int, b: Int } # trailing");
        assert_eq!(tokens.len(), 10);
        assert_eq!(tokens[0], Token::Name("type".to_string()));
        assert_eq!(tokens[2], Token::Punctuation(Punctuation::BraceL));
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = Lexer::new("type\n  Cat").tokenize().unwrap();
        assert_eq!(tokens[1].start, SourcePosition::new(2, 3));
    }

    #[test]
    fn reads_numbers() {
        assert_eq!(
            items("12 -3 1.5 2e10"),
            vec![
                Token::Int("12".to_string()),
                Token::Int("-3".to_string()),
                Token::Float("1.5".to_string()),
                Token::Float("2e10".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(Lexer::new("012").tokenize().is_err());
    }

    #[test]
    fn decodes_string_escapes() {
        assert_eq!(
            items(r#""a\"b\u0041""#),
            vec![Token::String("a\"bA".to_string())]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::new("\"abc\ndef\"").tokenize().unwrap_err();
        assert_eq!(err.position, SourcePosition::new(1, 1));
    }

    #[test]
    fn block_strings_are_dedented() {
        let tokens = items("\"\"\"\n    Hello\n      world\n    \"\"\"");
        assert_eq!(tokens, vec![Token::BlockString("Hello\n  world".to_string())]);
    }

    #[test]
    fn rejects_unknown_character() {
        let err = Lexer::new("type Cat ^").tokenize().unwrap_err();
        assert!(err.message.contains("unexpected character"));
    }
}
