//! Pascal source code parser
//!
//! This module transforms Pascal source text into a syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens, one at a time)
//! - [`parse`]: Parsing (tokens → syntax tree)
//! - [`ast`]: Syntax tree node definitions
//! - [`printer`]: Indented tree dump for `--dump-ast`
//!
//! # Supported Pascal Subset
//!
//! - A `PROGRAM name;` header, an optional `VAR` section of `INTEGER`/`REAL`
//!   declarations, and one `BEGIN ... END.` body
//! - Statements: assignments and nested `BEGIN ... END` blocks
//! - Expressions: `+ - * / DIV`, unary `+`/`-`, parentheses, integer and real literals
//! - `{ ... }` comments (not nested)
//!
//! # Parser Implementation
//!
//! Hand-written LL(1) recursive descent parser, one method per grammar rule.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod printer;
mod statements;
