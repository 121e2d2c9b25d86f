// Syntax tree definitions for the Pascal interpreter

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Declared variable types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSpec {
    Integer,
    Real,
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Integer => write!(f, "INTEGER"),
            TypeSpec::Real => write!(f, "REAL"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    IntDiv,  // DIV
    RealDiv, // /
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::IntDiv => "DIV",
            BinOp::RealDiv => "/",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,  // +x
    Minus, // -x
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Plus => "+",
            UnOp::Minus => "-",
        }
    }
}

/// Numeric literal as written in the source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Integer(i64),
    Real(f64),
}

/// Reference to a variable by name
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRef {
    pub name: String,
    pub location: SourceLocation,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    Number(Literal, SourceLocation),
    Variable(VariableRef),
}

impl Expr {
    /// Get the source location of this expression
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::BinaryOp { location, .. } => *location,
            Expr::UnaryOp { location, .. } => *location,
            Expr::Number(_, loc) => *loc,
            Expr::Variable(var) => var.location,
        }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Compound(Compound),
    Assign {
        target: VariableRef,
        value: Expr,
        location: SourceLocation,
    },
    NoOp,
}

/// `BEGIN ... END` block
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

/// One declared variable; inert at runtime
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub var_type: TypeSpec,
    pub location: SourceLocation,
}

/// Declarations followed by the body
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub declarations: Vec<VarDecl>,
    pub body: Compound,
}

/// Parse root
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub block: Block,
    pub location: SourceLocation,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Real(r) if r.fract() == 0.0 && r.is_finite() => write!(f, "{}.0", r),
            Literal::Real(r) => write!(f, "{}", r),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::BinaryOp {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::UnaryOp { op, operand, .. } => write!(f, "{}{}", op.symbol(), operand),
            Expr::Number(lit, _) => write!(f, "{}", lit),
            Expr::Variable(var) => write!(f, "{}", var.name),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Compound(compound) => {
                write!(f, "BEGIN ({} statements) END", compound.statements.len())
            }
            Statement::Assign { target, value, .. } => write!(f, "{} := {}", target.name, value),
            Statement::NoOp => write!(f, "(empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: i64) -> Expr {
        Expr::Number(Literal::Integer(n), SourceLocation::default())
    }

    #[test]
    fn test_expression_display_is_fully_parenthesized() {
        let expr = Expr::BinaryOp {
            op: BinOp::Add,
            left: Box::new(num(2)),
            right: Box::new(Expr::BinaryOp {
                op: BinOp::IntDiv,
                left: Box::new(num(7)),
                right: Box::new(num(2)),
                location: SourceLocation::default(),
            }),
            location: SourceLocation::default(),
        };
        assert_eq!(expr.to_string(), "(2 + (7 DIV 2))");
    }

    #[test]
    fn test_unary_and_real_display() {
        let expr = Expr::UnaryOp {
            op: UnOp::Minus,
            operand: Box::new(Expr::Number(Literal::Real(5.0), SourceLocation::default())),
            location: SourceLocation::default(),
        };
        assert_eq!(expr.to_string(), "-5.0");
    }
}
