use super::{Name, Statement};

/// A statement to drop a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTable {
    /// Qualified name of the table.
    pub name: Name,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,
}

impl Statement {
    /// Drops a table if it exists.
    pub fn drop_table(name: Name) -> Self {
        DropTable {
            name,
            if_exists: true,
        }
        .into()
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}
