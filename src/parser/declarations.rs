//! Block and declaration parsing
//!
//! Handles the `VAR` section that precedes a block's body. Each
//! `a, b, c : INTEGER` group is flattened into one [`VarDecl`] per name, in
//! source order.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::trace;

impl Parser {
    /// `block := declarations compoundStatement`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        trace!(target: "spi::parser", "block");
        let declarations = self.parse_declarations()?;
        let body = self.parse_compound_statement()?;
        Ok(Block { declarations, body })
    }

    /// `declarations := ( VAR (variableDecl SEMI)+ )?`
    fn parse_declarations(&mut self) -> Result<Vec<VarDecl>, ParseError> {
        trace!(target: "spi::parser", "declarations");
        let mut declarations = Vec::new();

        if !self.check(TokenKind::Var) {
            return Ok(declarations);
        }
        self.advance()?;

        // At least one declaration must follow VAR
        loop {
            declarations.extend(self.parse_variable_declaration()?);
            self.expect(TokenKind::Semicolon)?;
            if !self.check(TokenKind::Ident) {
                break;
            }
        }

        Ok(declarations)
    }

    /// `variableDecl := ID (COMMA ID)* COLON typeSpec`
    fn parse_variable_declaration(&mut self) -> Result<Vec<VarDecl>, ParseError> {
        trace!(target: "spi::parser", "variable_declaration");
        let mut names = vec![self.parse_variable()?];

        while self.check(TokenKind::Comma) {
            self.advance()?;
            names.push(self.parse_variable()?);
        }

        self.expect(TokenKind::Colon)?;
        let var_type = self.parse_type_spec()?;

        Ok(names
            .into_iter()
            .map(|var| {
                trace!(target: "spi::ast", name = %var.name, %var_type, "built VarDecl");
                VarDecl {
                    name: var.name,
                    var_type,
                    location: var.location,
                }
            })
            .collect())
    }

    /// `typeSpec := INTEGER | REAL`
    fn parse_type_spec(&mut self) -> Result<TypeSpec, ParseError> {
        match self.peek_kind() {
            TokenKind::Integer => {
                self.advance()?;
                Ok(TypeSpec::Integer)
            }
            // Anything else is reported as a missing REAL
            _ => {
                self.expect(TokenKind::Real)?;
                Ok(TypeSpec::Real)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{ParseError, Parser};

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::new(source)?.parse_program()
    }

    #[test]
    fn test_grouped_declarations_are_flattened() {
        let program = parse(
            "PROGRAM P;
             VAR
                number : INTEGER;
                a, b   : INTEGER;
                y      : REAL;
             BEGIN END.",
        )
        .unwrap();

        let decls: Vec<(&str, TypeSpec)> = program
            .block
            .declarations
            .iter()
            .map(|d| (d.name.as_str(), d.var_type))
            .collect();
        assert_eq!(
            decls,
            vec![
                ("number", TypeSpec::Integer),
                ("a", TypeSpec::Integer),
                ("b", TypeSpec::Integer),
                ("y", TypeSpec::Real),
            ]
        );
    }

    #[test]
    fn test_var_requires_a_declaration() {
        let err = parse("PROGRAM P; VAR BEGIN END.").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::Ident,
                found: TokenKind::Begin,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_type_spec() {
        let err = parse("PROGRAM P; VAR x : BOOLEAN; BEGIN END.").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::Real,
                found: TokenKind::Ident,
                ..
            }
        ));
    }

    #[test]
    fn test_declaration_missing_semicolon() {
        let err = parse("PROGRAM P; VAR x : INTEGER BEGIN END.").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::Semicolon,
                ..
            }
        ));
    }
}
