use super::Formatter;

macro_rules! fmt {
    ($f:expr, $( $fragments:expr )*) => {{
        $(
            $fragments.to_cql($f);
        )*
    }};
}

pub(super) trait ToCql {
    fn to_cql(self, f: &mut Formatter<'_>);
}

impl ToCql for &str {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

impl ToCql for &String {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

impl ToCql for u32 {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(&self.to_string());
    }
}

impl ToCql for u64 {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(&self.to_string());
    }
}

impl ToCql for i64 {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(&self.to_string());
    }
}
