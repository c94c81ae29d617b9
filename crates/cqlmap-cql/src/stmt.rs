mod column_def;
pub use column_def::ColumnDef;

mod create_index;
pub use create_index::CreateIndex;

mod create_keyspace;
pub use create_keyspace::{CreateKeyspace, Replication};

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod drop_keyspace;
pub use drop_keyspace::DropKeyspace;

mod drop_table;
pub use drop_table::DropTable;

mod filter;
pub use filter::{Condition, Filter, Operand};

mod insert;
pub use insert::Insert;

mod name;
pub use name::Name;

mod select;
pub use select::Select;

mod system;

mod update;
pub use update::{Assignment, AssignmentExpr, Update};

pub use cqlmap_core::stmt::*;

use crate::Serializer;

use std::fmt;

/// A CQL statement, ready to be serialized.
///
/// Statements are built through the constructors on `Statement`, which check
/// every column and value against the entity. A built statement always
/// serializes.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateIndex(CreateIndex),
    CreateKeyspace(CreateKeyspace),
    CreateTable(CreateTable),
    Delete(Delete),
    DropKeyspace(DropKeyspace),
    DropTable(DropTable),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl Statement {
    /// Returns `true` if the statement returns rows.
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Statement::Select(select) => Some(select),
            _ => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Serializer::new().serialize(self))
    }
}
