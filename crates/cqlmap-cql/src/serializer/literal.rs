use super::{Comma, Formatter, ToCql};

use crate::{stmt::Operand, Literal};

impl ToCql for &Literal {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self.as_str());
    }
}

impl ToCql for &Operand {
    fn to_cql(self, f: &mut Formatter<'_>) {
        match self {
            Operand::Literal(literal) => fmt!(f, literal),
            Operand::List(items) => fmt!(f, "(" Comma(items) ")"),
        }
    }
}
