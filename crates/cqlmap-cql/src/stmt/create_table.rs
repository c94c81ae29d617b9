use super::{ColumnDef, Direction, Name, Statement};

use cqlmap_core::schema::Entity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    /// Qualified name of the table
    pub name: Name,

    /// Whether or not to add an `IF NOT EXISTS` clause.
    pub if_not_exists: bool,

    /// Column definitions, in field declaration order
    pub columns: Vec<ColumnDef>,

    /// Partition key columns, in ordinal order
    pub partition_key: Vec<String>,

    /// Clustering key columns, in ordinal order
    pub clustering_key: Vec<String>,

    /// `WITH CLUSTERING ORDER BY` entries, in ordinal order
    pub clustering_order: Vec<(String, Direction)>,
}

impl Statement {
    /// Creates the table backing `entity`, if it does not exist.
    pub fn create_table(name: Name, entity: &Entity) -> Self {
        CreateTable {
            name,
            if_not_exists: true,
            columns: entity.columns().iter().map(ColumnDef::from_schema).collect(),
            partition_key: entity
                .partition_keys()
                .into_iter()
                .map(|column| column.name.clone())
                .collect(),
            clustering_key: entity
                .clustering_keys()
                .into_iter()
                .map(|column| column.name.clone())
                .collect(),
            clustering_order: entity
                .clustering_order()
                .into_iter()
                .map(|(column, direction)| (column.name.clone(), direction))
                .collect(),
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
