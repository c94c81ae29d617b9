use super::{Formatter, ToCql};

use crate::stmt::Using;

/// ` USING TTL n AND TIMESTAMP t`, with a leading space, or nothing.
impl ToCql for &Using {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let mut s = " USING ";

        if let Some(ttl) = self.ttl {
            fmt!(f, s "TTL " ttl);
            s = " AND ";
        }

        if let Some(timestamp) = self.timestamp {
            fmt!(f, s "TIMESTAMP " timestamp);
        }
    }
}
