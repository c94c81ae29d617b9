use super::Error;

/// Error when a table is not present in a keyspace registry.
#[derive(Debug)]
pub(super) struct TableNotFound {
    keyspace: Box<str>,
    table: Box<str>,
}

impl std::error::Error for TableNotFound {}

impl core::fmt::Display for TableNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "table `{}.{}` not found", self.keyspace, self.table)
    }
}

impl Error {
    /// Creates a table not found error.
    pub fn table_not_found(keyspace: impl Into<String>, table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TableNotFound(TableNotFound {
            keyspace: keyspace.into().into(),
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is a table not found error.
    pub fn is_table_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TableNotFound(_))
    }
}
