//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a predictive LL(1) recursive descent parser with one method
//! per grammar rule:
//! - This module: Parser struct, token cursor, `expect`, and the `program` rule
//! - `declarations`: `block`, `declarations`, `variable_declaration`, `type_spec`
//! - `statements`: `compound_statement`, `statement_list`, `statement`, `assignment`
//! - `expressions`: `expr`, `term`, `factor`, `variable`
//!
//! The parser holds exactly one unconsumed token and pulls the next one from
//! the [`Lexer`] only when the current one is consumed.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;
use tracing::trace;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The lexer failed while the parser was pulling the next token
    #[error(transparent)]
    Lexical(#[from] LexError),

    /// The current token does not fit the grammar at this point
    #[error(
        "Syntax error at line {}, column {}: expected {expected}, found {found}",
        .location.line,
        .location.column
    )]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lexical(err) => err.location,
            ParseError::UnexpectedToken { location, .. } => *location,
        }
    }
}

/// Recursive descent parser for the Pascal subset
pub struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) current: Token,
}

impl Parser {
    /// Create a parser over `source`, reading the first token.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a complete program; nothing but end of input may follow the final `.`
    ///
    /// `program := PROGRAM variable SEMI block DOT`
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        trace!(target: "spi::parser", "program");
        let location = self.current_location();
        self.expect(TokenKind::Program)?;
        let name = self.parse_variable()?.name;
        self.expect(TokenKind::Semicolon)?;
        let block = self.parse_block()?;
        self.expect(TokenKind::Dot)?;

        // Trailing tokens after the program are an error
        if !self.is_at_end() {
            return Err(self.unexpected(TokenKind::Eof));
        }

        trace!(
            target: "spi::ast",
            program = %name,
            declarations = block.declarations.len(),
            "built Program"
        );
        Ok(Program {
            name,
            block,
            location,
        })
    }

    // ===== Helper methods =====

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.current.kind()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location()
    }

    /// Consume the current token and pull the next one, returning the consumed token.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consume the current token if it has the expected kind, otherwise fail
    /// naming both the expected and the found kind.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind))
        }
    }

    pub(crate) fn unexpected(&self, expected: TokenKind) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.peek_kind(),
            location: self.current_location(),
        }
    }
}
