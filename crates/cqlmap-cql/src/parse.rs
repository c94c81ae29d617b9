//! Parsing of the CQL this crate emits.
//!
//! [`statement`] turns statement text back into a [`Statement`], keeping
//! every value as literal text. [`value`] then reads a literal as a typed
//! [`Value`] once the column type is known.

mod lexer;
use lexer::Lexer;

mod parser;
pub use parser::Parser;

mod statement;

mod token;
pub use token::Token;

mod value;

use crate::{stmt::Value, Literal, Statement};

use cqlmap_core::{schema::ColumnType, Result};

/// Parses one statement, with an optional trailing `;`.
pub fn statement(src: &str) -> Result<Statement> {
    let mut parser = Parser::new(src);
    let stmt = statement::parse(&mut parser)?;
    parser.finish()?;
    Ok(stmt)
}

/// Reads literal text as a value of the given column type.
pub fn literal(src: &str, ty: &ColumnType) -> Result<Value> {
    let mut parser = Parser::new(src);
    let value = value::parse(&mut parser, ty)?;
    parser.finish()?;
    Ok(value)
}

/// Reads a [`Literal`] as a value of the given column type.
pub fn value(literal: &Literal, ty: &ColumnType) -> Result<Value> {
    self::literal(literal.as_str(), ty)
}
