//! Lexer (tokenizer) for Pascal source code
//!
//! Produces one [`Token`] per call to [`Lexer::next_token`], so the parser pulls
//! tokens on demand instead of receiving a pre-built vector. Once the input is
//! exhausted every further call returns [`Token::Eof`].
//!
//! Comments are delimited by `{` and `}` and do not nest: the first `}` closes
//! the comment no matter how many `{` appear inside it.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntegerConst(i64, SourceLocation),
    RealConst(f64, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Program(SourceLocation),
    Var(SourceLocation),
    Div(SourceLocation),
    Integer(SourceLocation),
    Real(SourceLocation),
    Begin(SourceLocation),
    End(SourceLocation),

    // Operators
    Plus(SourceLocation),   // +
    Minus(SourceLocation),  // -
    Star(SourceLocation),   // *
    Slash(SourceLocation),  // /
    Assign(SourceLocation), // :=

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    Semicolon(SourceLocation), // ;
    Colon(SourceLocation),     // :
    Comma(SourceLocation),     // ,
    Dot(SourceLocation),       // .

    // End of input
    Eof(SourceLocation),
}

/// Payload-free token tag, used for parser decisions and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    IntegerConst,
    RealConst,
    Ident,
    Program,
    Var,
    Div,
    Integer,
    Real,
    Begin,
    End,
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    LParen,
    RParen,
    Semicolon,
    Colon,
    Comma,
    Dot,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::IntegerConst => "integer literal",
            TokenKind::RealConst => "real literal",
            TokenKind::Ident => "identifier",
            TokenKind::Program => "'PROGRAM'",
            TokenKind::Var => "'VAR'",
            TokenKind::Div => "'DIV'",
            TokenKind::Integer => "'INTEGER'",
            TokenKind::Real => "'REAL'",
            TokenKind::Begin => "'BEGIN'",
            TokenKind::End => "'END'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Assign => "':='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntegerConst(_, loc)
            | Token::RealConst(_, loc)
            | Token::Ident(_, loc)
            | Token::Program(loc)
            | Token::Var(loc)
            | Token::Div(loc)
            | Token::Integer(loc)
            | Token::Real(loc)
            | Token::Begin(loc)
            | Token::End(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Assign(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::Semicolon(loc)
            | Token::Colon(loc)
            | Token::Comma(loc)
            | Token::Dot(loc)
            | Token::Eof(loc) => *loc,
        }
    }

    /// Returns the payload-free kind of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::IntegerConst(..) => TokenKind::IntegerConst,
            Token::RealConst(..) => TokenKind::RealConst,
            Token::Ident(..) => TokenKind::Ident,
            Token::Program(_) => TokenKind::Program,
            Token::Var(_) => TokenKind::Var,
            Token::Div(_) => TokenKind::Div,
            Token::Integer(_) => TokenKind::Integer,
            Token::Real(_) => TokenKind::Real,
            Token::Begin(_) => TokenKind::Begin,
            Token::End(_) => TokenKind::End,
            Token::Plus(_) => TokenKind::Plus,
            Token::Minus(_) => TokenKind::Minus,
            Token::Star(_) => TokenKind::Star,
            Token::Slash(_) => TokenKind::Slash,
            Token::Assign(_) => TokenKind::Assign,
            Token::LParen(_) => TokenKind::LParen,
            Token::RParen(_) => TokenKind::RParen,
            Token::Semicolon(_) => TokenKind::Semicolon,
            Token::Colon(_) => TokenKind::Colon,
            Token::Comma(_) => TokenKind::Comma,
            Token::Dot(_) => TokenKind::Dot,
            Token::Eof(_) => TokenKind::Eof,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntegerConst(n, _) => write!(f, "integer literal {}", n),
            Token::RealConst(r, _) => write!(f, "real literal {:?}", r),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Lexical error at line {}, column {}: {kind}", .location.line, .location.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

/// Lexer for Pascal source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Collect every token up to and including the first end-of-input token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let at_end = matches!(token, Token::Eof(_));
            tokens.push(token);
            if at_end {
                return Ok(tokens);
            }
        }
    }

    /// Scan the next token. Returns [`Token::Eof`] forever once input runs out.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan_token()?;
        trace!(
            target: "spi::token",
            token = %token,
            line = token.location().line,
            column = token.location().column
        );
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(Token::Eof(loc)),
        };

        match ch {
            '0'..='9' => self.number_literal(ch, loc),
            c if c.is_ascii_alphabetic() => Ok(self.identifier_or_keyword(ch, loc)),
            ':' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Assign(loc))
                } else {
                    Ok(Token::Colon(loc))
                }
            }
            '+' => Ok(Token::Plus(loc)),
            '-' => Ok(Token::Minus(loc)),
            '*' => Ok(Token::Star(loc)),
            '/' => Ok(Token::Slash(loc)),
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            ';' => Ok(Token::Semicolon(loc)),
            ',' => Ok(Token::Comma(loc)),
            '.' => Ok(Token::Dot(loc)),
            _ => Err(LexError {
                kind: LexErrorKind::UnexpectedCharacter(ch),
                location: loc,
            }),
        }
    }

    /// Parse numeric literal: digits, optionally followed by `.` and more digits
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        if self.peek() == Some('.') {
            self.advance();
            num_str.push('.');
            let fraction_start = num_str.len();
            self.take_digits(&mut num_str);
            // "5." is a real with an empty fractional part
            if num_str.len() == fraction_start {
                num_str.push('0');
            }
            trace!(target: "spi::lexer", literal = %num_str, "scanned real literal");

            // Digit strings always parse, but may round to infinity
            return match num_str.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Token::RealConst(value, loc)),
                _ => Err(LexError {
                    kind: LexErrorKind::InvalidNumber(num_str),
                    location: loc,
                }),
            };
        }

        trace!(target: "spi::lexer", literal = %num_str, "scanned integer literal");
        let value = num_str.parse::<i64>().map_err(|_| LexError {
            kind: LexErrorKind::InvalidNumber(num_str.clone()),
            location: loc,
        })?;

        Ok(Token::IntegerConst(value, loc))
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                buf.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        trace!(target: "spi::lexer", word = %ident, "scanned word");

        // Keywords are matched case-sensitively
        match ident.as_str() {
            "PROGRAM" => Token::Program(loc),
            "VAR" => Token::Var(loc),
            "DIV" => Token::Div(loc),
            "INTEGER" => Token::Integer(loc),
            "REAL" => Token::Real(loc),
            "BEGIN" => Token::Begin(loc),
            "END" => Token::End(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Skip whitespace and `{ ... }` comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('{') => self.skip_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip a comment up to and including the first `}`
    fn skip_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '{'

        while let Some(ch) = self.advance() {
            if ch == '}' {
                trace!(
                    target: "spi::lexer",
                    line = start_loc.line,
                    column = start_loc.column,
                    "skipped comment"
                );
                return Ok(());
            }
        }

        Err(LexError {
            kind: LexErrorKind::UnterminatedComment,
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Yields tokens through the first end-of-input token (or the first error),
/// then stops.
impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if matches!(result, Ok(Token::Eof(_)) | Err(_)) {
            self.finished = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .iter()
            .map(Token::kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("PROGRAM Part10; BEGIN x := 1 END.");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Program(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "Part10"));
        assert!(matches!(tokens[2], Token::Semicolon(_)));
        assert!(matches!(tokens[3], Token::Begin(_)));
        assert!(matches!(tokens[4], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[5], Token::Assign(_)));
        assert!(matches!(tokens[6], Token::IntegerConst(1, _)));
        assert!(matches!(tokens[7], Token::End(_)));
        assert!(matches!(tokens[8], Token::Dot(_)));
        assert!(matches!(tokens[9], Token::Eof(_)));
    }

    #[test]
    fn test_colon_versus_assign() {
        assert_eq!(
            kinds("a : b := c:=d"),
            vec![
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let tokens = Lexer::new("42 3.14 7.").tokenize().unwrap();
        assert!(matches!(tokens[0], Token::IntegerConst(42, _)));
        assert!(matches!(tokens[1], Token::RealConst(r, _) if r == 3.14));
        assert!(matches!(tokens[2], Token::RealConst(r, _) if r == 7.0));
        assert!(matches!(tokens[3], Token::Eof(_)));
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            kinds("BEGIN begin Begin DIV div"),
            vec![
                TokenKind::Begin,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Div,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("x { this + contains * invalid ] chars } := 1"),
            vec![
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::IntegerConst,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_do_not_nest() {
        // The first '}' closes the comment, leaving "b }" as source
        let mut lexer = Lexer::new("a { { inner } b }");
        let tokens: Vec<_> = (0..2).map(|_| lexer.next_token().unwrap()).collect();
        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "a"));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "b"));
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('}'));
    }

    #[test]
    fn test_unterminated_comment() {
        let err = Lexer::new("x\n  { never closed").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
        assert_eq!(err.location, SourceLocation::new(2, 3));
    }

    #[test]
    fn test_invalid_character_location() {
        let err = Lexer::new("a := 1;\nb := 2 ? 3").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('?'));
        assert_eq!(err.location, SourceLocation::new(2, 8));
        assert_eq!(
            err.to_string(),
            "Lexical error at line 2, column 8: unexpected character '?'"
        );
    }

    #[test]
    fn test_integer_overflow_is_rejected() {
        let err = Lexer::new("99999999999999999999").tokenize().unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::InvalidNumber(_)));
    }

    #[test]
    fn test_real_literal_out_of_range_is_rejected() {
        let huge = format!("x := 1{}.0", "0".repeat(400));
        let err = Lexer::new(&huge).tokenize().unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::InvalidNumber(_)));
        assert_eq!(err.location, SourceLocation::new(1, 6));

        let largest = Lexer::new("1797693134862315.0").tokenize().unwrap();
        assert!(matches!(largest[0], Token::RealConst(r, _) if r.is_finite()));
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("  ");
        assert!(matches!(lexer.next_token(), Ok(Token::Eof(_))));
        assert!(matches!(lexer.next_token(), Ok(Token::Eof(_))));
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let items: Vec<_> = Lexer::new("a + b").collect();
        assert_eq!(items.len(), 4);
        assert!(matches!(items[3], Ok(Token::Eof(_))));
    }
}
