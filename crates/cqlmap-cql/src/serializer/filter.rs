use super::{Formatter, Ident, ToCql};

use crate::stmt::{Condition, Filter};

/// ` WHERE a = 1 AND b = 2`, with a leading space, or nothing.
impl ToCql for &Filter {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let mut s = " WHERE ";
        for condition in &self.0 {
            fmt!(f, s condition);
            s = " AND ";
        }
    }
}

impl ToCql for &Condition {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let column = Ident(&self.column);
        let operand = &self.operand;
        fmt!(f, column " " self.relation.as_str() " " operand);
    }
}
