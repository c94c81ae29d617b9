use super::{Formatter, Ident, Period, ToCql};

use crate::stmt;

impl ToCql for &stmt::Name {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let parts = Period(self.0.iter().map(Ident));
        fmt!(f, parts);
    }
}
