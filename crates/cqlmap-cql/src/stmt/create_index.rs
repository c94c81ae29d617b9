use super::{Name, Statement};

use cqlmap_core::schema::Entity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndex {
    /// Name of the index
    pub name: String,

    /// Which table to index
    pub on: Name,

    /// The indexed column
    pub column: String,

    /// Whether or not to add an `IF NOT EXISTS` clause.
    pub if_not_exists: bool,
}

impl Statement {
    /// Creates one secondary index per indexed column of `entity`.
    ///
    /// Indexes are named `<table><column>_index`.
    pub fn create_indices(table: &Name, entity: &Entity) -> Vec<Self> {
        entity
            .indexed_columns()
            .map(|column| {
                CreateIndex {
                    name: format!("{}{}_index", table.unqualified(), column.name),
                    on: table.clone(),
                    column: column.name.clone(),
                    if_not_exists: true,
                }
                .into()
            })
            .collect()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
