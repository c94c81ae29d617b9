#[macro_use]
mod fmt;
use fmt::ToCql;

mod delim;
use delim::{Comma, Period};

mod ident;
use ident::Ident;

// Fragment serializers
mod filter;
mod literal;
mod name;
mod statement;
mod ty;
mod using;

use crate::stmt::Statement;

/// Serialize a statement to a CQL string
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    /// When true, statements are terminated with `;`
    terminate: bool,
}

struct Formatter<'a> {
    /// Where to write the serialized CQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer::default()
    }

    /// A serializer that terminates every statement with `;`, for scripts.
    pub fn terminated() -> Serializer {
        Serializer { terminate: true }
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter { dst: &mut ret };
        stmt.to_cql(&mut fmt);

        if self.terminate {
            ret.push(';');
        }

        ret
    }

    /// Serializes several statements, one per line.
    pub fn serialize_all<'a>(&self, stmts: impl IntoIterator<Item = &'a Statement>) -> String {
        let mut ret = String::new();

        for stmt in stmts {
            if !ret.is_empty() {
                ret.push('\n');
            }
            ret.push_str(&self.serialize(stmt));
        }

        ret
    }
}
