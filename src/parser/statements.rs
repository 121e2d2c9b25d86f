//! Statement parsing implementation
//!
//! This module handles the statement layer of the grammar:
//!
//! - `BEGIN ... END` compound statements, which may nest
//! - Assignments `variable := expr`
//! - The empty statement, produced wherever a statement is allowed but the
//!   current token cannot start one (e.g. before `END` or a second `;`)
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::trace;

impl Parser {
    /// `compoundStmt := BEGIN statementList END`
    pub(crate) fn parse_compound_statement(&mut self) -> Result<Compound, ParseError> {
        trace!(target: "spi::parser", "compound_statement");
        let location = self.current_location();
        self.expect(TokenKind::Begin)?;
        let statements = self.parse_statement_list()?;
        self.expect(TokenKind::End)?;

        trace!(target: "spi::ast", statements = statements.len(), "built Compound");
        Ok(Compound {
            statements,
            location,
        })
    }

    /// `statementList := statement (SEMI statement)*`
    fn parse_statement_list(&mut self) -> Result<Vec<Statement>, ParseError> {
        trace!(target: "spi::parser", "statement_list");
        let mut statements = vec![self.parse_statement()?];

        while self.check(TokenKind::Semicolon) {
            self.advance()?;
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// `statement := compoundStmt | assignment | empty`
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        trace!(target: "spi::parser", "statement");
        match self.peek_kind() {
            TokenKind::Begin => Ok(Statement::Compound(self.parse_compound_statement()?)),
            TokenKind::Ident => self.parse_assignment(),
            _ => {
                trace!(target: "spi::ast", "built NoOp");
                Ok(Statement::NoOp)
            }
        }
    }

    /// `assignment := variable ASSIGN expr`
    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        trace!(target: "spi::parser", "assignment");
        let target = self.parse_variable()?;
        let location = target.location;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;

        trace!(target: "spi::ast", variable = %target.name, value = %value, "built Assign");
        Ok(Statement::Assign {
            target,
            value,
            location,
        })
    }
}
