use super::{Name, Relation, WhereClause};
use crate::Literal;

use cqlmap_core::{
    schema::{Column, ColumnType, Entity, Type},
    Error, Result,
};

/// A compiled `WHERE` clause: conditions joined with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter(pub Vec<Condition>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub relation: Relation,
    pub operand: Operand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(Literal),

    /// Parenthesized operand list of an `IN` relation
    List(Vec<Literal>),
}

impl Filter {
    /// Compiles where clauses against `entity`.
    ///
    /// Every clause must name a declared column. `IN` operands must be
    /// non-empty sequences. `CONTAINS` operands are formatted with the
    /// collection's element type and `CONTAINS KEY` operands with its key
    /// type.
    pub fn compile(entity: &Entity, clauses: &[WhereClause]) -> Result<Filter> {
        clauses
            .iter()
            .map(|clause| Condition::compile(entity, clause))
            .collect::<Result<Vec<_>>>()
            .map(Filter)
    }

    /// Like [`Filter::compile`], but fails when there are no clauses.
    pub fn compile_required(
        table: &Name,
        entity: &Entity,
        clauses: &[WhereClause],
    ) -> Result<Filter> {
        if clauses.is_empty() {
            return Err(Error::empty_where_clause(table.to_string()));
        }

        Filter::compile(entity, clauses)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Condition {
    /// `column = 'text'`, for statements that are not entity-backed.
    pub fn text_eq(column: impl Into<String>, text: &str) -> Condition {
        Condition {
            column: column.into(),
            relation: Relation::Eq,
            operand: Operand::Literal(Literal::text(text)),
        }
    }

    fn compile(entity: &Entity, clause: &WhereClause) -> Result<Condition> {
        let column = entity
            .column(&clause.column)
            .ok_or_else(|| Error::unknown_where_column(&clause.column))?;

        let operand = match clause.relation {
            Relation::In => {
                let items = match clause.value.as_sequence() {
                    Some(items) if !items.is_empty() => items,
                    Some(_) => return Err(Error::invalid_in_operand(&column.name, "empty list")),
                    None => {
                        return Err(Error::invalid_in_operand(
                            &column.name,
                            clause.value.type_name(),
                        ))
                    }
                };

                Operand::List(
                    items
                        .iter()
                        .map(|item| Literal::for_column(column, item))
                        .collect::<Result<_>>()?,
                )
            }
            Relation::Contains => {
                Operand::Literal(Literal::scalar(&column.name, &clause.value, element_ty(column))?)
            }
            Relation::ContainsKey => {
                let ty = match &column.ty {
                    ColumnType::Collection(collection) => {
                        collection.key.as_ref().unwrap_or(&collection.value)
                    }
                    ColumnType::Scalar(ty) => ty,
                };
                Operand::Literal(Literal::scalar(&column.name, &clause.value, ty)?)
            }
            _ => Operand::Literal(Literal::for_column(column, &clause.value)?),
        };

        Ok(Condition {
            column: column.name.clone(),
            relation: clause.relation,
            operand,
        })
    }
}

fn element_ty(column: &Column) -> &Type {
    match &column.ty {
        ColumnType::Collection(collection) => &collection.value,
        ColumnType::Scalar(ty) => ty,
    }
}
