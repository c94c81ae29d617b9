use super::{Formatter, ToCql};

/// An unquoted identifier. Column and table names are lower-cased by the
/// entity compiler, so no quoting is needed.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToCql for Ident<S> {
    fn to_cql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self.0.as_ref());
    }
}
