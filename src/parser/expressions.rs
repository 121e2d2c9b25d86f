//! Expression parsing implementation
//!
//! Precedence is encoded in the grammar itself, one method per level:
//!
//! ```text
//! expr   := term ((PLUS | MINUS) term)*
//! term   := factor ((MUL | DIV | SLASH) factor)*
//! factor := PLUS factor | MINUS factor | INTEGER_CONST | REAL_CONST
//!         | LPAREN expr RPAREN | variable
//! ```
//!
//! Binary chains are built left-associatively. Unary signs recurse into
//! `factor`, so `- -5` nests two [`Expr::UnaryOp`] nodes; nothing is folded at
//! parse time.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};
use tracing::trace;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        trace!(target: "spi::parser", "expr");
        let mut left = self.parse_term()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let loc = self.advance()?.location();
            let right = Box::new(self.parse_term()?);
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse multiplicative level
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        trace!(target: "spi::parser", "term");
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Div => BinOp::IntDiv,
                TokenKind::Slash => BinOp::RealDiv,
                _ => break,
            };
            let loc = self.advance()?.location();
            let right = Box::new(self.parse_factor()?);
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse unary signs, literals, parenthesized expressions and variables
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        trace!(target: "spi::parser", "factor");
        match self.peek_kind() {
            TokenKind::Plus | TokenKind::Minus => {
                let token = self.advance()?;
                let op = if matches!(token, Token::Plus(_)) {
                    UnOp::Plus
                } else {
                    UnOp::Minus
                };
                let operand = Box::new(self.parse_factor()?);
                trace!(target: "spi::ast", op = op.symbol(), "built UnaryOp");
                Ok(Expr::UnaryOp {
                    op,
                    operand,
                    location: token.location(),
                })
            }
            TokenKind::IntegerConst | TokenKind::RealConst => {
                let literal = match self.advance()? {
                    Token::IntegerConst(n, loc) => (Literal::Integer(n), loc),
                    Token::RealConst(r, loc) => (Literal::Real(r), loc),
                    other => return Err(self.mismatch(TokenKind::IntegerConst, &other)),
                };
                trace!(target: "spi::ast", literal = %literal.0, "built Number");
                Ok(Expr::Number(literal.0, literal.1))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Ok(Expr::Variable(self.parse_variable()?)),
        }
    }

    /// `variable := ID`
    pub(crate) fn parse_variable(&mut self) -> Result<VariableRef, ParseError> {
        trace!(target: "spi::parser", "variable");
        match self.expect(TokenKind::Ident)? {
            Token::Ident(name, location) => {
                trace!(target: "spi::ast", name = %name, "built Variable");
                Ok(VariableRef { name, location })
            }
            other => Err(self.mismatch(TokenKind::Ident, &other)),
        }
    }

    fn binary(op: BinOp, left: Expr, right: Box<Expr>, location: SourceLocation) -> Expr {
        trace!(target: "spi::ast", op = op.symbol(), "built BinaryOp");
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right,
            location,
        }
    }

    /// Error for a token that was consumed but turned out to be the wrong kind
    fn mismatch(&self, expected: TokenKind, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: found.kind(),
            location: found.location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{ParseError, Parser};

    fn expr(text: &str) -> Result<Expr, ParseError> {
        let source = format!("PROGRAM P; BEGIN x := {} END.", text);
        let program = Parser::new(&source)?.parse_program()?;
        match program.block.body.statements.into_iter().next() {
            Some(Statement::Assign { value, .. }) => Ok(value),
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(expr("2 + 3 * 4").unwrap().to_string(), "(2 + (3 * 4))");
        assert_eq!(expr("(2 + 3) * 4").unwrap().to_string(), "((2 + 3) * 4)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(expr("10 - 3 - 2").unwrap().to_string(), "((10 - 3) - 2)");
        assert_eq!(
            expr("8 / 4 DIV 2 * 3").unwrap().to_string(),
            "(((8 / 4) DIV 2) * 3)"
        );
    }

    #[test]
    fn test_unary_chain_is_not_folded() {
        let parsed = expr("- -5").unwrap();
        match parsed {
            Expr::UnaryOp {
                op: UnOp::Minus,
                operand,
                ..
            } => assert!(matches!(
                *operand,
                Expr::UnaryOp {
                    op: UnOp::Minus,
                    ..
                }
            )),
            other => panic!("Expected unary minus, got {:?}", other),
        }
    }

    #[test]
    fn test_literals_and_variables() {
        assert_eq!(
            expr("3.14").unwrap(),
            Expr::Number(Literal::Real(3.14), SourceLocation::new(1, 23))
        );
        assert!(matches!(expr("y").unwrap(), Expr::Variable(ref v) if v.name == "y"));
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        let err = expr("(1 + 2").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::RParen,
                found: TokenKind::End,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_operand() {
        let err = expr("1 +").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::Ident,
                found: TokenKind::End,
                ..
            }
        ));
    }
}
