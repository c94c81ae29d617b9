use cqlmap_core::schema::{Column, ColumnType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Name of the column
    pub name: String,

    /// Storage type
    pub ty: ColumnType,
}

impl ColumnDef {
    pub fn from_schema(column: &Column) -> ColumnDef {
        ColumnDef {
            name: column.name.clone(),
            ty: column.ty.clone(),
        }
    }
}
