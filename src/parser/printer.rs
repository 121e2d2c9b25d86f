//! Indented syntax tree dump, one node per line.
//!
//! ```text
//! Program Part10
//!   VarDecl number : INTEGER
//!   Compound
//!     Assign number
//!       Number 2
//! ```

use crate::parser::ast::*;
use std::fmt::Write;

/// Render `program` as an indented tree.
pub fn dump_program(program: &Program) -> String {
    let mut out = String::new();
    line(&mut out, 0, format_args!("Program {}", program.name));
    for decl in &program.block.declarations {
        line(
            &mut out,
            1,
            format_args!("VarDecl {} : {}", decl.name, decl.var_type),
        );
    }
    dump_compound(&mut out, 1, &program.block.body);
    out
}

fn dump_compound(out: &mut String, depth: usize, compound: &Compound) {
    line(out, depth, format_args!("Compound"));
    for stmt in &compound.statements {
        dump_statement(out, depth + 1, stmt);
    }
}

fn dump_statement(out: &mut String, depth: usize, stmt: &Statement) {
    match stmt {
        Statement::Compound(compound) => dump_compound(out, depth, compound),
        Statement::Assign { target, value, .. } => {
            line(out, depth, format_args!("Assign {}", target.name));
            dump_expr(out, depth + 1, value);
        }
        Statement::NoOp => line(out, depth, format_args!("NoOp")),
    }
}

fn dump_expr(out: &mut String, depth: usize, expr: &Expr) {
    match expr {
        Expr::BinaryOp {
            op, left, right, ..
        } => {
            line(out, depth, format_args!("BinaryOp {}", op.symbol()));
            dump_expr(out, depth + 1, left);
            dump_expr(out, depth + 1, right);
        }
        Expr::UnaryOp { op, operand, .. } => {
            line(out, depth, format_args!("UnaryOp {}", op.symbol()));
            dump_expr(out, depth + 1, operand);
        }
        Expr::Number(lit, _) => line(out, depth, format_args!("Number {}", lit)),
        Expr::Variable(var) => line(out, depth, format_args!("Variable {}", var.name)),
    }
}

fn line(out: &mut String, depth: usize, text: std::fmt::Arguments<'_>) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "{:indent$}{}", "", text, indent = depth * 2);
}
