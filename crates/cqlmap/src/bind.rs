use cqlmap_core::{
    schema::{Column, Entity},
    stmt::{Record, Row},
    Error, Result,
};

/// Binds result rows into records.
///
/// Named rows are matched to descriptors by column name. Positional rows
/// are matched against the projection the binder was built with.
#[derive(Debug)]
pub struct Binder<'a> {
    entity: &'a Entity,

    /// Descriptors of positional row values, in row order
    projection: Vec<&'a Column>,
}

impl<'a> Binder<'a> {
    /// A binder for rows holding every entity column in declaration order.
    pub fn new(entity: &'a Entity) -> Binder<'a> {
        Binder {
            entity,
            projection: entity.columns().iter().collect(),
        }
    }

    /// A binder for rows holding `columns`, in that order.
    pub fn with_projection<S: AsRef<str>>(entity: &'a Entity, columns: &[S]) -> Result<Binder<'a>> {
        let projection = columns
            .iter()
            .map(|name| {
                let name = name.as_ref();
                entity
                    .column(name)
                    .ok_or_else(|| Error::unknown_column(name))
            })
            .collect::<Result<_>>()?;

        Ok(Binder { entity, projection })
    }

    /// Assigns every value of `row` into `record`, through each
    /// descriptor's field ordinal.
    pub fn bind(&self, row: Row, record: &mut dyn Record) -> Result<()> {
        match row {
            Row::Positional(values) => {
                if values.len() > self.projection.len() {
                    return Err(Error::unknown_column(format!(
                        "#{}",
                        self.projection.len()
                    )));
                }

                for (column, value) in self.projection.iter().zip(values) {
                    record.set_field(column.field_index, value)?;
                }
            }
            Row::Named(values) => {
                for (name, value) in values {
                    let Some(column) = self.entity.column(&name) else {
                        return Err(Error::unknown_column(name));
                    };

                    record.set_field(column.field_index, value)?;
                }
            }
        }

        Ok(())
    }
}

/// Binds a row holding every entity column into `record`.
pub fn bind(entity: &Entity, row: Row, record: &mut dyn Record) -> Result<()> {
    Binder::new(entity).bind(row, record)
}
