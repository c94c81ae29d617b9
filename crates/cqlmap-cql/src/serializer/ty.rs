use super::{Formatter, ToCql};

use cqlmap_core::schema::{ColumnType, Direction, Type};

impl ToCql for &ColumnType {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(&self.to_string());
    }
}

impl ToCql for &Type {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self.as_str());
    }
}

impl ToCql for Direction {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self.as_str());
    }
}
